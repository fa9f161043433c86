//! Bones: mass-bearing rigid links owning the distance and angle
//! constraint algorithms.

use crate::float::Float;
use crate::vec::Vec2;
use crate::joint::{JointId, Joints};

/// Render color attached to each bone.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
}

/// Identifiers for the 18 bones, in solver order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BoneId {
    Neck,
    UpperSpine,
    MidSpine,
    LowerSpine,
    LeftClavicle,
    LeftUpperArm,
    LeftLowerArm,
    RightClavicle,
    RightUpperArm,
    RightLowerArm,
    LeftPelvis,
    LeftUpperLeg,
    LeftLowerLeg,
    LeftFoot,
    RightPelvis,
    RightUpperLeg,
    RightLowerLeg,
    RightFoot,
}

impl BoneId {
    /// Number of bones in the skeleton.
    pub const COUNT: usize = 18;

    /// All bones, in the order the length constraints are applied.
    pub const ALL: [BoneId; Self::COUNT] = [
        BoneId::Neck,
        BoneId::UpperSpine,
        BoneId::MidSpine,
        BoneId::LowerSpine,
        BoneId::LeftClavicle,
        BoneId::LeftUpperArm,
        BoneId::LeftLowerArm,
        BoneId::RightClavicle,
        BoneId::RightUpperArm,
        BoneId::RightLowerArm,
        BoneId::LeftPelvis,
        BoneId::LeftUpperLeg,
        BoneId::LeftLowerLeg,
        BoneId::LeftFoot,
        BoneId::RightPelvis,
        BoneId::RightUpperLeg,
        BoneId::RightLowerLeg,
        BoneId::RightFoot,
    ];

    /// Bones with an angle-limited distal joint, in the order the angle
    /// constraints are applied each relaxation iteration.
    pub const ANGLE_CONSTRAINED: [BoneId; 10] = [
        BoneId::LeftUpperArm,
        BoneId::LeftLowerArm,
        BoneId::RightUpperArm,
        BoneId::RightLowerArm,
        BoneId::LeftUpperLeg,
        BoneId::LeftLowerLeg,
        BoneId::RightUpperLeg,
        BoneId::RightLowerLeg,
        BoneId::UpperSpine,
        BoneId::Neck,
    ];

    /// Endpoint joints, proximal then distal.
    pub fn joints(self) -> (JointId, JointId) {
        match self {
            BoneId::Neck => (JointId::Head, JointId::Neck),
            BoneId::UpperSpine => (JointId::Neck, JointId::Chest),
            BoneId::MidSpine => (JointId::Chest, JointId::Waist),
            BoneId::LowerSpine => (JointId::Waist, JointId::Pelvis),
            BoneId::LeftClavicle => (JointId::Chest, JointId::LeftShoulder),
            BoneId::LeftUpperArm => (JointId::LeftShoulder, JointId::LeftElbow),
            BoneId::LeftLowerArm => (JointId::LeftElbow, JointId::LeftHand),
            BoneId::RightClavicle => (JointId::Chest, JointId::RightShoulder),
            BoneId::RightUpperArm => (JointId::RightShoulder, JointId::RightElbow),
            BoneId::RightLowerArm => (JointId::RightElbow, JointId::RightHand),
            BoneId::LeftPelvis => (JointId::Pelvis, JointId::LeftHip),
            BoneId::LeftUpperLeg => (JointId::LeftHip, JointId::LeftKnee),
            BoneId::LeftLowerLeg => (JointId::LeftKnee, JointId::LeftAnkle),
            BoneId::LeftFoot => (JointId::LeftAnkle, JointId::LeftFoot),
            BoneId::RightPelvis => (JointId::Pelvis, JointId::RightHip),
            BoneId::RightUpperLeg => (JointId::RightHip, JointId::RightKnee),
            BoneId::RightLowerLeg => (JointId::RightKnee, JointId::RightAnkle),
            BoneId::RightFoot => (JointId::RightAnkle, JointId::RightFoot),
        }
    }

    /// Fraction of total body mass carried by this segment.
    ///
    /// Anthropometric data after Winter (1990).
    pub fn mass_fraction(self) -> f32 {
        match self {
            BoneId::Neck => 0.014,
            BoneId::UpperSpine => 0.158,
            BoneId::MidSpine => 0.102,
            BoneId::LowerSpine => 0.097,
            BoneId::LeftClavicle | BoneId::RightClavicle => 0.028,
            BoneId::LeftUpperArm | BoneId::RightUpperArm => 0.028,
            BoneId::LeftLowerArm | BoneId::RightLowerArm => 0.022,
            BoneId::LeftPelvis | BoneId::RightPelvis => 0.100,
            BoneId::LeftUpperLeg | BoneId::RightUpperLeg => 0.100,
            BoneId::LeftLowerLeg | BoneId::RightLowerLeg => 0.0465,
            BoneId::LeftFoot | BoneId::RightFoot => 0.0145,
        }
    }

    /// Parent bone for angle-constraint propagation. `None` for bones
    /// outside the hierarchy table.
    pub fn parent(self) -> Option<BoneId> {
        match self {
            BoneId::LeftUpperArm => Some(BoneId::LeftClavicle),
            BoneId::LeftLowerArm => Some(BoneId::LeftUpperArm),
            BoneId::RightUpperArm => Some(BoneId::RightClavicle),
            BoneId::RightLowerArm => Some(BoneId::RightUpperArm),
            BoneId::LeftUpperLeg => Some(BoneId::LeftPelvis),
            BoneId::LeftLowerLeg => Some(BoneId::LeftUpperLeg),
            BoneId::RightUpperLeg => Some(BoneId::RightPelvis),
            BoneId::RightLowerLeg => Some(BoneId::RightUpperLeg),
            BoneId::UpperSpine => Some(BoneId::LowerSpine),
            BoneId::Neck => Some(BoneId::UpperSpine),
            _ => None,
        }
    }
}

/// A rigid link between two joints with an immutable rest length and a
/// mass derived from the anthropometric table.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bone<F: Float> {
    pub id: BoneId,
    /// Proximal joint handle.
    pub a: JointId,
    /// Distal joint handle.
    pub b: JointId,
    pub rest_length: F,
    pub mass: F,
    pub color: Rgb,
}

impl<F: Float> Bone<F> {
    /// Build a bone from the initial joint positions; the current
    /// separation becomes the immutable rest length.
    pub fn new(id: BoneId, joints: &Joints<F>, body_mass: F) -> Self {
        let (a, b) = id.joints();
        let rest_length = joints[a].pos.distance(joints[b].pos);
        let mass = body_mass * F::from_f32(id.mass_fraction());
        Bone { id, a, b, rest_length, mass, color: Rgb::WHITE }
    }

    /// Current distance between the endpoint joints.
    pub fn current_length(&self, joints: &Joints<F>) -> F {
        joints[self.a].pos.distance(joints[self.b].pos)
    }

    /// One positional relaxation step toward the rest length.
    ///
    /// The correction is split 50/50 between the endpoints, unweighted by
    /// mass. Skipped when the current length is zero.
    pub fn solve_length(&self, joints: &mut Joints<F>) {
        let delta = joints[self.b].pos - joints[self.a].pos;
        let current = delta.length();
        if !(current > F::zero()) {
            return;
        }

        let percent = (current - self.rest_length) / current * F::half();
        let offset = delta.scale(percent);

        joints[self.a].pos = joints[self.a].pos + offset;
        joints[self.b].pos = joints[self.b].pos - offset;
    }

    /// Push the distal joint back inside its angle range, measured
    /// relative to `parent`'s direction.
    ///
    /// The correction is a proportional velocity nudge toward the ideal
    /// position at the clamped angle, not a positional snap, so it
    /// converges over multiple iterations. Skipped when the distal joint
    /// has no range or the parent direction is degenerate.
    pub fn solve_angle(&self, parent: &Bone<F>, joints: &mut Joints<F>, gain: F) {
        let range = match joints[self.b].limits {
            Some(range) => range,
            None => return,
        };

        let parent_vec = joints[self.a].pos - joints[parent.a].pos;
        if parent_vec == Vec2::zero() {
            return;
        }
        let own_vec = joints[self.b].pos - joints[self.a].pos;

        let parent_angle = parent_vec.angle();
        let mut relative = own_vec.angle() - parent_angle;

        let two_pi = F::two() * F::pi();
        while relative > F::pi() {
            relative = relative - two_pi;
        }
        while relative < -F::pi() {
            relative = relative + two_pi;
        }

        let target_angle = if relative < range.min {
            parent_angle + range.min
        } else if relative > range.max {
            parent_angle + range.max
        } else {
            return;
        };

        let ideal = joints[self.a].pos + Vec2::from_angle(target_angle).scale(self.rest_length);
        let force = (ideal - joints[self.b].pos).scale(gain);
        joints[self.b].apply_force(force);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::joint::{AngleRange, Joint};

    fn arena(f: impl Fn(JointId) -> Vec2<f32>) -> Joints<f32> {
        Joints::from_fn(|id| Joint::new(f(id), None))
    }

    #[test]
    fn mass_fractions_cover_the_whole_body() {
        let total: f32 = BoneId::ALL.iter().map(|b| b.mass_fraction()).sum();
        // The Winter table sums slightly above 1 because clavicle and
        // pelvis wings double-count the adjoining segments.
        assert!((total - 1.049).abs() < 1e-3, "total fraction = {}", total);
    }

    #[test]
    fn hierarchy_has_ten_entries_with_parents() {
        assert_eq!(BoneId::ANGLE_CONSTRAINED.len(), 10);
        for id in BoneId::ANGLE_CONSTRAINED {
            assert!(id.parent().is_some(), "{:?} missing parent", id);
        }
    }

    #[test]
    fn bones_connect_distinct_joints() {
        for id in BoneId::ALL {
            let (a, b) = id.joints();
            assert_ne!(a, b, "{:?} is degenerate", id);
        }
    }

    #[test]
    fn solve_length_restores_rest_length_in_one_pass() {
        let mut joints = arena(|id| match id {
            JointId::LeftElbow => Vec2::new(10.0, 0.0),
            _ => Vec2::zero(),
        });
        let bone = Bone::new(BoneId::LeftUpperArm, &joints, 70.0);
        assert_eq!(bone.rest_length, 10.0);

        joints[JointId::LeftElbow].pos = Vec2::new(16.0, 0.0);
        bone.solve_length(&mut joints);

        let len = bone.current_length(&joints);
        assert!((len - 10.0).abs() < 1e-4, "length = {}", len);
        // Equal split: both endpoints moved by the same amount.
        assert!((joints[JointId::LeftShoulder].pos.x - 3.0).abs() < 1e-4);
        assert!((joints[JointId::LeftElbow].pos.x - 13.0).abs() < 1e-4);
    }

    #[test]
    fn zero_length_bone_skips_correction() {
        let mut joints = arena(|_| Vec2::new(2.0, 2.0));
        let bone = Bone::new(BoneId::Neck, &joints, 70.0);
        bone.solve_length(&mut joints);
        assert!(joints[JointId::Head].pos.is_finite());
        assert_eq!(joints[JointId::Head].pos, Vec2::new(2.0, 2.0));
    }

    #[test]
    fn angle_within_range_applies_no_force() {
        // Straight arm hanging down: clavicle then upper arm both point +y.
        let mut joints = Joints::from_fn(|id| {
            let pos = match id {
                JointId::Chest => Vec2::new(0.0, 0.0),
                JointId::LeftShoulder => Vec2::new(0.0, 10.0),
                JointId::LeftElbow => Vec2::new(0.0, 20.0),
                _ => Vec2::new(-50.0, -50.0),
            };
            let limits = (id == JointId::LeftElbow)
                .then(|| AngleRange::symmetric(0.5));
            Joint::new(pos, limits)
        });
        let clavicle = Bone::new(BoneId::LeftClavicle, &joints, 70.0);
        let upper_arm = Bone::new(BoneId::LeftUpperArm, &joints, 70.0);

        upper_arm.solve_angle(&clavicle, &mut joints, 1.5);
        assert_eq!(joints[JointId::LeftElbow].vel, Vec2::zero());
    }

    #[test]
    fn angle_violation_nudges_toward_clamped_bound() {
        // Upper arm bent 90 degrees against a ±0.5 rad elbow range.
        let mut joints = Joints::from_fn(|id| {
            let pos = match id {
                JointId::Chest => Vec2::new(0.0, 0.0),
                JointId::LeftShoulder => Vec2::new(0.0, 10.0),
                JointId::LeftElbow => Vec2::new(10.0, 10.0),
                _ => Vec2::new(-50.0, -50.0),
            };
            let limits = (id == JointId::LeftElbow)
                .then(|| AngleRange::symmetric(0.5));
            Joint::new(pos, limits)
        });
        let clavicle = Bone::new(BoneId::LeftClavicle, &joints, 70.0);
        let upper_arm = Bone::new(BoneId::LeftUpperArm, &joints, 70.0);

        upper_arm.solve_angle(&clavicle, &mut joints, 1.5);

        // Relative angle is -pi/2 < -0.5, so the elbow is pushed toward
        // the min bound: down and inward.
        let vel = joints[JointId::LeftElbow].vel;
        assert!(vel.y > 0.0, "expected downward nudge, vel = {:?}", vel);
        assert!(vel.x < 0.0, "expected inward nudge, vel = {:?}", vel);
    }
}
