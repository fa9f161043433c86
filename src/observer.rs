//! Step observer trait for monitoring simulation progress.

/// Trait for observing the phases of a skeleton frame update.
///
/// Implement this trait to monitor solver progress (e.g., for debugging,
/// visualization, or performance profiling). All methods have default
/// no-op implementations.
pub trait StepObserver {
    /// Called after the active force generator (gait or balance) has run.
    fn on_forces(&mut self) {}

    /// Called after all joints have been integrated.
    fn on_integrate(&mut self) {}

    /// Called after gravity has been applied to every bone.
    fn on_gravity(&mut self) {}

    /// Called after each relaxation iteration.
    fn on_relax_iteration(&mut self, _iteration: usize) {}

    /// Called when a simulation step is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
