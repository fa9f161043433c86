//! The skeleton aggregate: joint arena, bones, frame orchestration, and
//! the walking/standing state machine.

use crate::float::Float;
use crate::vec::Vec2;
use crate::joint::{AngleRange, Joint, JointId, Joints};
use crate::bone::{Bone, BoneId, Rgb};
use crate::gait::Gait;
use crate::balance;
use crate::config::{BodyConfig, StepConfig};
use crate::error::SkeletonError;
use crate::observer::StepObserver;
use alloc::vec::Vec as AllocVec;

/// Lateral shoulder offset from the body center line, unscaled.
pub(crate) const SHOULDER_OFFSET: f32 = 15.0;
/// Lateral hip offset from the body center line, unscaled. Also the
/// lateral offset of the gait foot targets from the pelvis.
pub(crate) const HIP_OFFSET: f32 = 10.0;

/// Body segment lengths derived from the skeleton scale (8-head figure).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Proportions<F: Float> {
    pub scale: F,
    pub head_size: F,
    pub torso_length: F,
    pub upper_arm: F,
    pub lower_arm: F,
    pub upper_leg: F,
    pub lower_leg: F,
    pub foot_length: F,
}

impl<F: Float> Proportions<F> {
    pub fn new(scale: F) -> Self {
        Proportions {
            scale,
            head_size: F::from_f32(20.0) * scale,
            torso_length: F::from_f32(120.0) * scale,
            upper_arm: F::from_f32(60.0) * scale,
            lower_arm: F::from_f32(55.0) * scale,
            upper_leg: F::from_f32(80.0) * scale,
            lower_leg: F::from_f32(75.0) * scale,
            foot_length: F::from_f32(25.0) * scale,
        }
    }
}

/// Geometric description of one bone for an external renderer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Segment<F: Float> {
    pub start: Vec2<F>,
    pub end: Vec2<F>,
    pub color: Rgb,
}

/// A complete articulated skeleton.
///
/// Owns the joint arena and the bones; each call to [`Skeleton::step`]
/// runs one frame: force generation (gait while walking, balance while
/// standing), joint integration, per-bone gravity, then the fixed-count
/// relaxation pass over the distance and angle constraints. The state is
/// consistent for readers whenever no `step` call is in flight.
#[derive(Clone, Debug)]
pub struct Skeleton<F: Float> {
    joints: Joints<F>,
    bones: [Bone<F>; BoneId::COUNT],
    props: Proportions<F>,
    gait: Gait<F>,
    walking: bool,
}

impl<F: Float> Skeleton<F> {
    /// Build a skeleton in the anatomical rest pose around
    /// `(center_x, center_y)`.
    ///
    /// Construction is the only fallible entry point: scale, position,
    /// body mass, and the static angle-range table are validated here so
    /// the per-frame loop never has to.
    pub fn new(
        center_x: F,
        center_y: F,
        scale: F,
        body: &BodyConfig<F>,
    ) -> Result<Self, SkeletonError> {
        if !(scale.is_finite() && scale > F::zero()) {
            return Err(SkeletonError::InvalidScale);
        }
        if !center_x.is_finite() || !center_y.is_finite() {
            return Err(SkeletonError::InvalidPosition);
        }
        body.validate()?;

        let props = Proportions::new(scale);
        let center = Vec2::new(center_x, center_y);
        let joints = Joints::from_fn(|id| {
            Joint::new(center + rest_offset(id, &props), angle_limits(id))
        });

        for (_, joint) in joints.iter() {
            if let Some(range) = joint.limits {
                if range.min > range.max {
                    return Err(SkeletonError::InvalidAngleRange);
                }
            }
        }

        let bones = BoneId::ALL.map(|id| Bone::new(id, &joints, body.body_mass));

        Ok(Skeleton {
            joints,
            bones,
            props,
            gait: Gait::new(),
            walking: false,
        })
    }

    /// Discard the whole graph and rebuild it. There is no partial
    /// reset: gait phase and the walking flag return to their defaults.
    pub fn reset(
        &mut self,
        center_x: F,
        center_y: F,
        scale: F,
        body: &BodyConfig<F>,
    ) -> Result<(), SkeletonError> {
        *self = Self::new(center_x, center_y, scale, body)?;
        Ok(())
    }

    /// Switch to the gait generator. Idempotent; the gait phase is
    /// never rewound, so re-starting resumes the cycle where it left off.
    pub fn start_walking(&mut self) {
        self.walking = true;
    }

    /// Switch to the balance controller. Idempotent.
    pub fn stop_walking(&mut self) {
        self.walking = false;
    }

    pub fn is_walking(&self) -> bool {
        self.walking
    }

    /// Accumulated gait phase in radians.
    pub fn gait_phase(&self) -> F {
        self.gait.phase()
    }

    pub fn proportions(&self) -> &Proportions<F> {
        &self.props
    }

    pub fn scale(&self) -> F {
        self.props.scale
    }

    pub fn joints(&self) -> &Joints<F> {
        &self.joints
    }

    pub fn joint(&self, id: JointId) -> &Joint<F> {
        &self.joints[id]
    }

    pub fn bones(&self) -> &[Bone<F>] {
        &self.bones
    }

    pub fn bone(&self, id: BoneId) -> &Bone<F> {
        &self.bones[id as usize]
    }

    /// Relative angle of a constrained bone against its hierarchy
    /// parent, normalized to (-pi, pi]. `None` for bones outside the
    /// hierarchy table or with a degenerate parent direction.
    pub fn relative_angle(&self, id: BoneId) -> Option<F> {
        let parent = self.bone(id.parent()?);
        let child = self.bone(id);
        let parent_vec = self.joints[child.a].pos - self.joints[parent.a].pos;
        if parent_vec == Vec2::zero() {
            return None;
        }
        let own_vec = self.joints[child.b].pos - self.joints[child.a].pos;
        let mut relative = own_vec.angle() - parent_vec.angle();
        let two_pi = F::two() * F::pi();
        while relative > F::pi() {
            relative = relative - two_pi;
        }
        while relative < -F::pi() {
            relative = relative + two_pi;
        }
        Some(relative)
    }

    /// Render radius of the head circle.
    pub fn head_radius(&self) -> F {
        self.props.head_size
    }

    /// Endpoint geometry of every bone, in solver order. The rendering
    /// contract is purely geometric; no physics state leaks through.
    pub fn segments(&self) -> AllocVec<Segment<F>> {
        self.bones
            .iter()
            .map(|bone| Segment {
                start: self.joints[bone.a].pos,
                end: self.joints[bone.b].pos,
                color: bone.color,
            })
            .collect()
    }

    /// Advance the simulation by one frame.
    ///
    /// Phases, in order: the active force generator, joint integration,
    /// per-bone gravity, then `config.iterations` relaxation passes of
    /// all length constraints followed by all angle constraints.
    ///
    /// Gravity pre-scales its velocity contribution by `dt`, while the
    /// gait and balance forces are applied once per step unscaled; the
    /// tuning assumes a 60 Hz cadence.
    pub fn step<O: StepObserver>(&mut self, dt: F, config: &StepConfig<F>, observer: &mut O) {
        if self.walking {
            self.gait.advance(dt, config.walk_speed);
            self.gait.apply_forces(&mut self.joints, &self.props, config);
        } else {
            balance::apply_forces(&mut self.joints, &self.props, config);
        }
        observer.on_forces();

        for id in JointId::ALL {
            self.joints[id].integrate(dt, config);
        }
        observer.on_integrate();

        for bone in &self.bones {
            let impulse = bone.mass * config.gravity * F::half() * dt;
            self.joints[bone.a].apply_force(Vec2::new(F::zero(), impulse));
            self.joints[bone.b].apply_force(Vec2::new(F::zero(), impulse));
        }
        observer.on_gravity();

        for i in 0..config.iterations {
            for bone in &self.bones {
                bone.solve_length(&mut self.joints);
            }
            for id in BoneId::ANGLE_CONSTRAINED {
                if let Some(parent_id) = id.parent() {
                    let child = self.bones[id as usize];
                    let parent = self.bones[parent_id as usize];
                    child.solve_angle(&parent, &mut self.joints, config.angle_gain);
                }
            }
            observer.on_relax_iteration(i);
        }

        observer.on_step_complete();
    }
}

/// Rest-pose position of a joint relative to the skeleton center.
fn rest_offset<F: Float>(id: JointId, p: &Proportions<F>) -> Vec2<F> {
    let zero = F::zero();
    let half = F::half();
    let quarter = F::from_f32(0.25);
    let shoulder = F::from_f32(SHOULDER_OFFSET);
    let hip = F::from_f32(HIP_OFFSET);

    let torso = p.torso_length;
    let arm_y = |depth: F| -torso * quarter + depth;
    let leg_y = |depth: F| torso * quarter + depth;

    match id {
        JointId::Head => Vec2::new(zero, -torso * half - p.head_size),
        JointId::Neck => Vec2::new(zero, -torso * half),
        JointId::Chest => Vec2::new(zero, -torso * quarter),
        JointId::Waist => Vec2::new(zero, zero),
        JointId::Pelvis => Vec2::new(zero, torso * quarter),

        JointId::LeftShoulder => Vec2::new(-shoulder, arm_y(zero)),
        JointId::LeftElbow => Vec2::new(-shoulder, arm_y(p.upper_arm)),
        JointId::LeftHand => Vec2::new(-shoulder, arm_y(p.upper_arm + p.lower_arm)),
        JointId::RightShoulder => Vec2::new(shoulder, arm_y(zero)),
        JointId::RightElbow => Vec2::new(shoulder, arm_y(p.upper_arm)),
        JointId::RightHand => Vec2::new(shoulder, arm_y(p.upper_arm + p.lower_arm)),

        JointId::LeftHip => Vec2::new(-hip, leg_y(zero)),
        JointId::LeftKnee => Vec2::new(-hip, leg_y(p.upper_leg)),
        JointId::LeftAnkle => Vec2::new(-hip, leg_y(p.upper_leg + p.lower_leg)),
        JointId::LeftFoot => {
            Vec2::new(-hip + p.foot_length * half, leg_y(p.upper_leg + p.lower_leg))
        }
        JointId::RightHip => Vec2::new(hip, leg_y(zero)),
        JointId::RightKnee => Vec2::new(hip, leg_y(p.upper_leg)),
        JointId::RightAnkle => Vec2::new(hip, leg_y(p.upper_leg + p.lower_leg)),
        JointId::RightFoot => {
            Vec2::new(hip + p.foot_length * half, leg_y(p.upper_leg + p.lower_leg))
        }
    }
}

/// Static angle-range table, on the distal joint of each constrained
/// bone, relative to the parent bone direction.
fn angle_limits<F: Float>(id: JointId) -> Option<AngleRange<F>> {
    let pi = F::pi();
    let frac = |num: f32, den: f32| pi * F::from_f32(num) / F::from_f32(den);

    match id {
        JointId::Neck => Some(AngleRange::symmetric(frac(1.0, 16.0))),
        JointId::Chest | JointId::Waist => Some(AngleRange::symmetric(frac(1.0, 6.0))),

        JointId::LeftShoulder => Some(AngleRange::new(-frac(1.0, 2.0), pi)),
        JointId::RightShoulder => Some(AngleRange::new(-pi, frac(1.0, 2.0))),
        JointId::LeftElbow => Some(AngleRange::new(-frac(1.0, 6.0), frac(5.0, 6.0))),
        JointId::RightElbow => Some(AngleRange::new(-frac(5.0, 6.0), frac(1.0, 6.0))),
        JointId::LeftHand | JointId::RightHand => Some(AngleRange::symmetric(frac(1.0, 3.0))),

        JointId::LeftHip | JointId::RightHip => Some(AngleRange::symmetric(frac(1.0, 3.0))),
        JointId::LeftKnee | JointId::RightKnee => {
            Some(AngleRange::new(-frac(2.0, 3.0), F::zero()))
        }
        JointId::LeftAnkle | JointId::RightAnkle => {
            Some(AngleRange::symmetric(frac(1.0, 3.0)))
        }

        JointId::Head | JointId::Pelvis | JointId::LeftFoot | JointId::RightFoot => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct PhaseCounter {
        forces: usize,
        integrations: usize,
        gravity: usize,
        relax: usize,
        steps: usize,
    }

    impl StepObserver for PhaseCounter {
        fn on_forces(&mut self) { self.forces += 1; }
        fn on_integrate(&mut self) { self.integrations += 1; }
        fn on_gravity(&mut self) { self.gravity += 1; }
        fn on_relax_iteration(&mut self, _i: usize) { self.relax += 1; }
        fn on_step_complete(&mut self) { self.steps += 1; }
    }

    #[test]
    fn observer_sees_every_phase() {
        let mut s = Skeleton::<f32>::new(600.0, 400.0, 1.0, &BodyConfig::default()).unwrap();
        let cfg = StepConfig::default();
        let mut counter = PhaseCounter::default();

        for _ in 0..5 {
            s.step(1.0 / 60.0, &cfg, &mut counter);
        }

        assert_eq!(counter.forces, 5);
        assert_eq!(counter.integrations, 5);
        assert_eq!(counter.gravity, 5);
        assert_eq!(counter.relax, 5 * cfg.iterations);
        assert_eq!(counter.steps, 5);
    }

    #[test]
    fn rest_pose_is_symmetric() {
        let s = Skeleton::<f32>::new(600.0, 400.0, 1.0, &BodyConfig::default()).unwrap();
        let j = s.joints();

        for (left, right) in [
            (JointId::LeftShoulder, JointId::RightShoulder),
            (JointId::LeftElbow, JointId::RightElbow),
            (JointId::LeftHip, JointId::RightHip),
            (JointId::LeftKnee, JointId::RightKnee),
            (JointId::LeftAnkle, JointId::RightAnkle),
        ] {
            assert_eq!(j[left].pos.y, j[right].pos.y);
            assert_eq!(600.0 - j[left].pos.x, j[right].pos.x - 600.0);
        }
    }

    #[test]
    fn construction_rejects_bad_inputs() {
        let body = BodyConfig::default();
        assert_eq!(
            Skeleton::<f32>::new(600.0, 400.0, 0.0, &body).err(),
            Some(SkeletonError::InvalidScale)
        );
        assert_eq!(
            Skeleton::<f32>::new(600.0, 400.0, f32::NAN, &body).err(),
            Some(SkeletonError::InvalidScale)
        );
        assert_eq!(
            Skeleton::<f32>::new(f32::INFINITY, 400.0, 1.0, &body).err(),
            Some(SkeletonError::InvalidPosition)
        );
        assert_eq!(
            Skeleton::<f32>::new(600.0, 400.0, 1.0, &BodyConfig::new().with_body_mass(-1.0))
                .err(),
            Some(SkeletonError::InvalidBodyMass)
        );
    }

    #[test]
    fn rest_lengths_match_proportions() {
        let s = Skeleton::<f32>::new(0.0, 0.0, 2.0, &BodyConfig::default()).unwrap();
        let p = s.proportions();
        assert!((s.bone(BoneId::LeftUpperArm).rest_length - p.upper_arm).abs() < 1e-4);
        assert!((s.bone(BoneId::RightLowerLeg).rest_length - p.lower_leg).abs() < 1e-4);
        assert!((s.bone(BoneId::Neck).rest_length - p.head_size).abs() < 1e-4);
    }

    #[test]
    fn segments_expose_render_geometry() {
        let s = Skeleton::<f32>::new(600.0, 400.0, 1.0, &BodyConfig::default()).unwrap();
        let segments = s.segments();
        assert_eq!(segments.len(), BoneId::COUNT);
        for seg in &segments {
            assert!(seg.start.is_finite() && seg.end.is_finite());
            assert_eq!(seg.color, Rgb::WHITE);
        }
        assert_eq!(s.head_radius(), 20.0);
    }
}
