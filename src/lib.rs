//! 2D articulated human skeleton physics.
//!
//! `ambler` simulates a planar human figure as a graph of mass-less
//! joints connected by mass-bearing bones, stabilized by an iterative
//! geometric constraint solver and driven by one of two force
//! generators: a procedural gait (walking) or a standing-balance
//! controller.
//!
//! # Features
//!
//! - **Joint arena**: shared endpoints addressed by static ids, no
//!   string lookups in the solver loop
//! - **Relaxation solver**: distance then angle constraints, fixed
//!   iteration count per frame
//! - **Gait generator**: sinusoidal foot targets, counter-swinging
//!   arms, pelvis drive and bounce, every force clamped
//! - **Balance controller**: proportional posture forces with a head
//!   dead zone for jitter-free rest
//! - **Anthropometric masses**: per-bone mass from a body-mass fraction
//!   table
//! - **Observable**: monitor frame phases via the `StepObserver` trait
//! - **`no_std` compatible**: works in embedded and WASM environments

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod joint;
pub mod bone;
pub mod skeleton;
pub mod gait;
mod balance;
pub mod config;
pub mod error;
pub mod observer;

// Re-export primary API
pub use float::Float;
pub use vec::Vec2;
pub use joint::{AngleRange, Joint, JointId, Joints};
pub use bone::{Bone, BoneId, Rgb};
pub use skeleton::{Proportions, Segment, Skeleton};
pub use gait::Gait;
pub use config::{BodyConfig, StepConfig};
pub use error::SkeletonError;
pub use observer::{NoOpStepObserver, StepObserver};
