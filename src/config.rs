//! Configuration types for the skeleton simulation.
//!
//! Every tunable the solver and the force generators use is a named,
//! documented field here rather than a literal in the hot loop. The
//! defaults assume a 60 Hz cadence and screen coordinates (positive y
//! toward the ground).

use crate::float::Float;
use crate::error::SkeletonError;

/// Construction-time body parameters.
pub struct BodyConfig<F: Float> {
    /// Total body mass distributed across bones by the anthropometric
    /// fraction table. Default: 70.0.
    pub body_mass: F,
}

impl<F: Float> BodyConfig<F> {
    pub fn new() -> Self {
        BodyConfig { body_mass: F::from_f32(70.0) }
    }

    pub fn with_body_mass(mut self, body_mass: F) -> Self {
        self.body_mass = body_mass;
        self
    }

    pub fn validate(&self) -> Result<(), SkeletonError> {
        if !(self.body_mass.is_finite() && self.body_mass > F::zero()) {
            return Err(SkeletonError::InvalidBodyMass);
        }
        Ok(())
    }
}

impl<F: Float> Default for BodyConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-step tunables: integration, solver, and force-generator gains.
///
/// # Builder Pattern
/// ```
/// use ambler::config::StepConfig;
///
/// let config: StepConfig<f32> = StepConfig::new()
///     .with_gravity(600.0)
///     .with_ground(700.0)
///     .with_walk_speed(2.0);
/// ```
pub struct StepConfig<F: Float> {
    /// Downward gravitational acceleration. Default: 600.0.
    pub gravity: F,
    /// Ground line; joints are clamped to y <= ground_y. Default: 700.0.
    pub ground_y: F,
    /// Per-step velocity damping factor, independent of dt. Default: 0.95.
    pub damping: F,
    /// Horizontal velocity factor applied on ground contact. Default: 0.85.
    pub ground_friction: F,
    /// Relaxation iterations per step. Fixed-count, not adaptive. Default: 3.
    pub iterations: usize,
    /// Proportional gain of the angle-limit correction. Default: 1.5.
    pub angle_gain: F,

    // Gait generator.
    /// Gait phase advance per second, in radians. Default: 2.0.
    pub walk_speed: F,
    /// Foot swing amplitude before scaling. Default: 30.0.
    pub leg_swing_amplitude: F,
    /// Foot lift amplitude before scaling, forward swing only. Default: 15.0.
    pub leg_lift_amplitude: F,
    /// Hand swing amplitude before scaling. Default: 20.0.
    pub arm_swing_amplitude: F,
    /// Pelvis vertical bounce amplitude before scaling. Default: 5.0.
    pub bounce_amplitude: F,
    /// Proportional gain pulling feet toward their gait targets. Default: 10.0.
    pub foot_gain: F,
    /// Per-axis clamp on foot forces. Default: 100.0.
    pub foot_force_max: F,
    /// Clamp on hand swing forces. Default: 30.0.
    pub arm_force_max: F,
    /// Constant forward drive on the pelvis, scaled by skeleton scale. Default: 5.0.
    pub drive_gain: F,
    /// Clamp on the pelvis bounce force. Default: 20.0.
    pub bounce_force_max: F,

    // Balance controller.
    /// Proportional gain pulling feet to the ground line. Default: 100.0.
    pub balance_gain: F,
    /// Clamp on the per-foot balance force. Default: 100.0.
    pub balance_force_max: F,
    /// Proportional gain of the posture controller. Default: 50.0.
    pub posture_gain: F,
    /// Per-axis clamp on pelvis posture forces. Default: 300.0.
    pub pelvis_force_max: F,
    /// Posture gain multiplier for the chest. Default: 0.3.
    pub chest_factor: F,
    /// Per-axis clamp on chest posture forces. Default: 50.0.
    pub chest_force_max: F,
    /// Posture gain multiplier for the head. Default: 0.1.
    pub head_factor: F,
    /// Per-axis clamp on head posture forces. Default: 20.0.
    pub head_force_max: F,
    /// No head force is applied while the positional error magnitude is
    /// below this, preventing jitter at rest. Default: 2.0.
    pub head_dead_zone: F,
}

impl<F: Float> StepConfig<F> {
    /// Create a config with the default tuning.
    pub fn new() -> Self {
        StepConfig {
            gravity: F::from_f32(600.0),
            ground_y: F::from_f32(700.0),
            damping: F::from_f32(0.95),
            ground_friction: F::from_f32(0.85),
            iterations: 3,
            angle_gain: F::from_f32(1.5),
            walk_speed: F::from_f32(2.0),
            leg_swing_amplitude: F::from_f32(30.0),
            leg_lift_amplitude: F::from_f32(15.0),
            arm_swing_amplitude: F::from_f32(20.0),
            bounce_amplitude: F::from_f32(5.0),
            foot_gain: F::from_f32(10.0),
            foot_force_max: F::from_f32(100.0),
            arm_force_max: F::from_f32(30.0),
            drive_gain: F::from_f32(5.0),
            bounce_force_max: F::from_f32(20.0),
            balance_gain: F::from_f32(100.0),
            balance_force_max: F::from_f32(100.0),
            posture_gain: F::from_f32(50.0),
            pelvis_force_max: F::from_f32(300.0),
            chest_factor: F::from_f32(0.3),
            chest_force_max: F::from_f32(50.0),
            head_factor: F::from_f32(0.1),
            head_force_max: F::from_f32(20.0),
            head_dead_zone: F::from_f32(2.0),
        }
    }

    /// Set the gravitational acceleration.
    pub fn with_gravity(mut self, gravity: F) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the ground line.
    pub fn with_ground(mut self, ground_y: F) -> Self {
        self.ground_y = ground_y;
        self
    }

    /// Set the per-step velocity damping factor.
    pub fn with_damping(mut self, damping: F) -> Self {
        self.damping = damping;
        self
    }

    /// Set the number of relaxation iterations.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the gait phase advance rate.
    pub fn with_walk_speed(mut self, walk_speed: F) -> Self {
        self.walk_speed = walk_speed;
        self
    }

    pub fn validate(&self) -> Result<(), SkeletonError> {
        let unit = |v: F| v >= F::zero() && v <= F::one();
        if !(self.damping.is_finite() && unit(self.damping))
            || !(self.ground_friction.is_finite() && unit(self.ground_friction))
        {
            return Err(SkeletonError::InvalidDamping);
        }
        if self.iterations == 0 {
            return Err(SkeletonError::InvalidIterations);
        }
        if !self.gravity.is_finite() || !self.ground_y.is_finite() {
            return Err(SkeletonError::NonFiniteConfig);
        }
        Ok(())
    }
}

impl<F: Float> Default for StepConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}
