//! Joints: mass-less connection points with velocity-domain force application.

use crate::float::Float;
use crate::vec::Vec2;
use crate::config::StepConfig;
use core::ops::{Index, IndexMut};

/// Identifiers for the 19 joints of the skeleton.
///
/// Doubles as the arena index, so the hot solver loops never touch a
/// name string.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum JointId {
    Head,
    Neck,
    Chest,
    Waist,
    Pelvis,
    LeftShoulder,
    LeftElbow,
    LeftHand,
    RightShoulder,
    RightElbow,
    RightHand,
    LeftHip,
    LeftKnee,
    LeftAnkle,
    LeftFoot,
    RightHip,
    RightKnee,
    RightAnkle,
    RightFoot,
}

impl JointId {
    /// Number of joints in the skeleton.
    pub const COUNT: usize = 19;

    /// All joints, in update order.
    pub const ALL: [JointId; Self::COUNT] = [
        JointId::Head,
        JointId::Neck,
        JointId::Chest,
        JointId::Waist,
        JointId::Pelvis,
        JointId::LeftShoulder,
        JointId::LeftElbow,
        JointId::LeftHand,
        JointId::RightShoulder,
        JointId::RightElbow,
        JointId::RightHand,
        JointId::LeftHip,
        JointId::LeftKnee,
        JointId::LeftAnkle,
        JointId::LeftFoot,
        JointId::RightHip,
        JointId::RightKnee,
        JointId::RightAnkle,
        JointId::RightFoot,
    ];
}

/// Allowed bend range for a joint, in radians relative to the parent
/// bone's direction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AngleRange<F: Float> {
    pub min: F,
    pub max: F,
}

impl<F: Float> AngleRange<F> {
    pub fn new(min: F, max: F) -> Self {
        AngleRange { min, max }
    }

    /// Symmetric range around zero.
    pub fn symmetric(half_width: F) -> Self {
        AngleRange { min: -half_width, max: half_width }
    }

    pub fn contains(&self, angle: F) -> bool {
        angle >= self.min && angle <= self.max
    }
}

/// A mass-less connection point. All mass lives in the bones; joints
/// only carry position, velocity, and an optional bend range.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Joint<F: Float> {
    pub pos: Vec2<F>,
    pub vel: Vec2<F>,
    pub limits: Option<AngleRange<F>>,
}

impl<F: Float> Joint<F> {
    pub fn new(pos: Vec2<F>, limits: Option<AngleRange<F>>) -> Self {
        Joint { pos, vel: Vec2::zero(), limits }
    }

    /// Velocity-domain impulse: the force is added to velocity directly,
    /// with no mass scaling. Mass enters the system only through gravity.
    pub fn apply_force(&mut self, force: Vec2<F>) {
        self.vel = self.vel + force;
    }

    /// Damp velocity, advance position, and clamp against the ground line.
    ///
    /// The damping factor is applied per call rather than scaled by `dt`;
    /// the tuning constants assume a 60 Hz cadence.
    pub fn integrate(&mut self, dt: F, config: &StepConfig<F>) {
        self.vel = self.vel.scale(config.damping);
        self.pos = self.pos + self.vel.scale(dt);

        // Ground collision: y grows downward, the ground line is below.
        if self.pos.y > config.ground_y {
            self.pos.y = config.ground_y;
            self.vel.y = F::zero();
            self.vel.x = self.vel.x * config.ground_friction;
        }
    }
}

/// Fixed arena holding every joint, indexed by [`JointId`].
///
/// Bones store `JointId` handles into this arena, so shared endpoints
/// never create ownership cycles.
#[derive(Clone, Debug, PartialEq)]
pub struct Joints<F: Float> {
    slots: [Joint<F>; JointId::COUNT],
}

impl<F: Float> Joints<F> {
    /// Build the arena by evaluating `f` once per joint, in `ALL` order.
    pub fn from_fn(mut f: impl FnMut(JointId) -> Joint<F>) -> Self {
        Joints { slots: JointId::ALL.map(|id| f(id)) }
    }

    pub fn iter(&self) -> impl Iterator<Item = (JointId, &Joint<F>)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, joint)| (JointId::ALL[i], joint))
    }
}

impl<F: Float> Index<JointId> for Joints<F> {
    type Output = Joint<F>;
    fn index(&self, id: JointId) -> &Joint<F> {
        &self.slots[id as usize]
    }
}

impl<F: Float> IndexMut<JointId> for Joints<F> {
    fn index_mut(&mut self, id: JointId) -> &mut Joint<F> {
        &mut self.slots[id as usize]
    }
}
