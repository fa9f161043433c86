//! Error types for skeleton construction and configuration.

use core::fmt;

/// Errors that can occur while building a skeleton or validating its
/// configuration. The per-frame update itself is infallible: numeric
/// hazards are guarded structurally by damping and force clamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkeletonError {
    /// Scale must be positive and finite.
    InvalidScale,
    /// Spawn position must be finite.
    InvalidPosition,
    /// Body mass must be positive and finite.
    InvalidBodyMass,
    /// Damping and friction factors must lie in [0, 1].
    InvalidDamping,
    /// At least one relaxation iteration is required.
    InvalidIterations,
    /// A joint angle range has min > max.
    InvalidAngleRange,
    /// A configuration value is NaN or infinite.
    NonFiniteConfig,
}

impl fmt::Display for SkeletonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkeletonError::InvalidScale => write!(f, "scale must be positive and finite"),
            SkeletonError::InvalidPosition => write!(f, "spawn position must be finite"),
            SkeletonError::InvalidBodyMass => write!(f, "body mass must be positive and finite"),
            SkeletonError::InvalidDamping => {
                write!(f, "damping and friction factors must be in [0, 1]")
            }
            SkeletonError::InvalidIterations => {
                write!(f, "at least one relaxation iteration is required")
            }
            SkeletonError::InvalidAngleRange => write!(f, "joint angle range has min > max"),
            SkeletonError::NonFiniteConfig => {
                write!(f, "configuration value is NaN or infinite")
            }
        }
    }
}
