//! Standing-balance controller: proportional posture forces applied
//! while the skeleton is not walking.

use crate::float::Float;
use crate::vec::Vec2;
use crate::joint::{JointId, Joints};
use crate::config::StepConfig;
use crate::skeleton::Proportions;

/// Pelvis rest height above the fully extended legs, unscaled.
const PELVIS_CLEARANCE: f32 = 20.0;

/// Apply one frame of standing-posture forces.
pub(crate) fn apply_forces<F: Float>(
    joints: &mut Joints<F>,
    props: &Proportions<F>,
    cfg: &StepConfig<F>,
) {
    // Pull each airborne foot back to the ground line.
    for foot in [JointId::LeftFoot, JointId::RightFoot] {
        let y = joints[foot].pos.y;
        if y < cfg.ground_y {
            let force = ((cfg.ground_y - y) * cfg.balance_gain).min(cfg.balance_force_max);
            joints[foot].apply_force(Vec2::new(F::zero(), force));
        }
    }

    // Drive the pelvis toward the midpoint of the feet at standing height.
    let mid_x = (joints[JointId::LeftFoot].pos.x + joints[JointId::RightFoot].pos.x) * F::half();
    let target_y =
        cfg.ground_y - props.upper_leg - props.lower_leg - F::from_f32(PELVIS_CLEARANCE);
    let err = Vec2::new(mid_x, target_y) - joints[JointId::Pelvis].pos;
    let force = Vec2::new(
        (err.x * cfg.posture_gain).clamp(-cfg.pelvis_force_max, cfg.pelvis_force_max),
        (err.y * cfg.posture_gain).clamp(-cfg.pelvis_force_max, cfg.pelvis_force_max),
    );
    joints[JointId::Pelvis].apply_force(force);

    // Keep the chest directly above the pelvis, gentler gain.
    let pelvis = joints[JointId::Pelvis].pos;
    let target = Vec2::new(pelvis.x, pelvis.y - props.torso_length * F::half());
    let err = target - joints[JointId::Chest].pos;
    let gain = cfg.posture_gain * cfg.chest_factor;
    let force = Vec2::new(
        (err.x * gain).clamp(-cfg.chest_force_max, cfg.chest_force_max),
        (err.y * gain).clamp(-cfg.chest_force_max, cfg.chest_force_max),
    );
    joints[JointId::Chest].apply_force(force);

    // Keep the head above the chest. A dead zone on the error magnitude
    // prevents oscillatory jitter once the head has settled.
    let chest = joints[JointId::Chest].pos;
    let target = Vec2::new(
        chest.x,
        chest.y - props.torso_length * F::half() - props.head_size,
    );
    let err = target - joints[JointId::Head].pos;
    if err.length() > cfg.head_dead_zone {
        let gain = cfg.posture_gain * cfg.head_factor;
        let force = Vec2::new(
            (err.x * gain).clamp(-cfg.head_force_max, cfg.head_force_max),
            (err.y * gain).clamp(-cfg.head_force_max, cfg.head_force_max),
        );
        joints[JointId::Head].apply_force(force);
    }
}
