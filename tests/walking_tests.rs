use ambler::{BodyConfig, JointId, NoOpStepObserver, Skeleton, StepConfig};

const DT: f32 = 1.0 / 60.0;

#[test]
fn walking_drifts_forward_without_leaving_the_ground() {
    let cfg = StepConfig::default();
    let mut s = Skeleton::new(600.0, 400.0, 1.0, &BodyConfig::default()).unwrap();
    let initial_pelvis_x = s.joint(JointId::Pelvis).pos.x;

    s.start_walking();
    for _ in 0..120 {
        s.step(DT, &cfg, &mut NoOpStepObserver);
    }

    assert!(s.is_walking());
    assert!(
        s.joint(JointId::Pelvis).pos.x > initial_pelvis_x,
        "pelvis should drift forward: {} -> {}",
        initial_pelvis_x,
        s.joint(JointId::Pelvis).pos.x
    );
    for (id, joint) in s.joints().iter() {
        assert!(joint.pos.is_finite(), "{:?} position is not finite", id);
        assert!(joint.vel.is_finite(), "{:?} velocity is not finite", id);
        // Small slack: the relaxation pass runs after the ground clamp
        // and may leave sub-unit residue on contact joints.
        assert!(
            joint.pos.y <= cfg.ground_y + 2.0,
            "{:?} sank below the ground: y = {}",
            id,
            joint.pos.y
        );
    }
}

#[test]
fn gait_phase_advances_at_walk_speed() {
    let cfg = StepConfig::default();
    let mut s = Skeleton::new(600.0, 400.0, 1.0, &BodyConfig::default()).unwrap();

    s.start_walking();
    let mut last = s.gait_phase();
    for _ in 0..120 {
        s.step(DT, &cfg, &mut NoOpStepObserver);
        assert!(s.gait_phase() > last, "phase must be monotone");
        last = s.gait_phase();
    }
    // 120 frames at dt = 1/60 and walk_speed 2.0 -> 4 radians.
    assert!((s.gait_phase() - 4.0).abs() < 1e-3);
}

#[test]
fn standing_frames_do_not_advance_the_phase() {
    let cfg = StepConfig::default();
    let mut s = Skeleton::new(600.0, 400.0, 1.0, &BodyConfig::default()).unwrap();

    s.start_walking();
    for _ in 0..60 {
        s.step(DT, &cfg, &mut NoOpStepObserver);
    }
    let phase = s.gait_phase();

    s.stop_walking();
    for _ in 0..60 {
        s.step(DT, &cfg, &mut NoOpStepObserver);
    }
    assert_eq!(s.gait_phase(), phase);
}

#[test]
fn feet_alternate_leading_during_the_cycle() {
    let cfg = StepConfig::default();
    let mut s = Skeleton::new(600.0, 400.0, 1.0, &BodyConfig::default()).unwrap();
    s.start_walking();

    let mut left_led = false;
    let mut right_led = false;
    for _ in 0..240 {
        s.step(DT, &cfg, &mut NoOpStepObserver);
        let pelvis_x = s.joint(JointId::Pelvis).pos.x;
        let left = s.joint(JointId::LeftFoot).pos.x - pelvis_x;
        let right = s.joint(JointId::RightFoot).pos.x - pelvis_x;
        if left > right {
            left_led = true;
        }
        if right > left {
            right_led = true;
        }
    }
    assert!(left_led && right_led, "both feet should take turns in front");
}
