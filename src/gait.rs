//! Walking-cycle phase accumulator and force generator.
//!
//! The gait is purely procedural: feet chase sinusoidal targets 180
//! degrees out of phase, arms counter-swing, and the pelvis receives a
//! constant forward drive plus a double-frequency bounce. Every force is
//! proportional and clamped, so a bad pose recovers instead of diverging.

use crate::float::Float;
use crate::vec::Vec2;
use crate::joint::{JointId, Joints};
use crate::config::StepConfig;
use crate::skeleton::{Proportions, HIP_OFFSET};

/// Monotonically advancing walk-cycle phase with its force generator.
#[derive(Clone, Debug, PartialEq)]
pub struct Gait<F: Float> {
    phase: F,
}

impl<F: Float> Gait<F> {
    pub(crate) fn new() -> Self {
        Gait { phase: F::zero() }
    }

    /// Accumulated phase in radians. Never rewinds; wrapping to one
    /// cycle happens at force-generation time.
    pub fn phase(&self) -> F {
        self.phase
    }

    pub(crate) fn advance(&mut self, dt: F, walk_speed: F) {
        self.phase = self.phase + dt * walk_speed;
    }

    /// Apply one frame of walking forces.
    pub(crate) fn apply_forces(
        &self,
        joints: &mut Joints<F>,
        props: &Proportions<F>,
        cfg: &StepConfig<F>,
    ) {
        let two_pi = F::two() * F::pi();
        let phase = self.phase % two_pi;

        let swing = cfg.leg_swing_amplitude * props.scale;
        let lift = cfg.leg_lift_amplitude * props.scale;

        // Legs move 180 degrees out of phase; lift only on the forward swing.
        let left_phase = phase;
        let right_phase = phase + F::pi();
        let left_offset = left_phase.sin() * swing;
        let left_lift = F::zero().max(left_phase.sin() * lift);
        let right_offset = right_phase.sin() * swing;
        let right_lift = F::zero().max(right_phase.sin() * lift);

        let pelvis_x = joints[JointId::Pelvis].pos.x;
        let hip = F::from_f32(HIP_OFFSET);

        let targets = [
            (
                JointId::LeftFoot,
                Vec2::new(pelvis_x - hip + left_offset, cfg.ground_y - left_lift),
            ),
            (
                JointId::RightFoot,
                Vec2::new(pelvis_x + hip + right_offset, cfg.ground_y - right_lift),
            ),
        ];
        for (foot, target) in targets {
            let err = target - joints[foot].pos;
            let force = Vec2::new(
                (err.x * cfg.foot_gain).clamp(-cfg.foot_force_max, cfg.foot_force_max),
                (err.y * cfg.foot_gain).clamp(-cfg.foot_force_max, cfg.foot_force_max),
            );
            joints[foot].apply_force(force);
        }

        // Arms counter-swing against the same-side leg, horizontal only.
        let arm = cfg.arm_swing_amplitude * props.scale;
        let left_swing = (phase + F::pi()).sin() * arm;
        let right_swing = phase.sin() * arm;
        let left_force =
            (left_swing * F::two()).clamp(-cfg.arm_force_max, cfg.arm_force_max);
        let right_force =
            (right_swing * F::two()).clamp(-cfg.arm_force_max, cfg.arm_force_max);
        joints[JointId::LeftHand].apply_force(Vec2::new(left_force, F::zero()));
        joints[JointId::RightHand].apply_force(Vec2::new(right_force, F::zero()));

        // Constant forward drive, then a double-frequency vertical bounce.
        let forward = cfg.drive_gain * props.scale;
        joints[JointId::Pelvis].apply_force(Vec2::new(forward, F::zero()));

        let bounce = (phase * F::two()).sin() * cfg.bounce_amplitude * props.scale;
        let bounce_force =
            (bounce * F::two()).clamp(-cfg.bounce_force_max, cfg.bounce_force_max);
        joints[JointId::Pelvis].apply_force(Vec2::new(F::zero(), bounce_force));
    }
}
