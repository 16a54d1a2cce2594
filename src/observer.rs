//! Step observer trait for monitoring simulation progress.

/// Trait for observing simulation steps.
///
/// Implement this trait to monitor integrator progress (e.g., for debugging,
/// visualization, or performance profiling). All methods have default
/// no-op implementations.
pub trait StepObserver {
    /// Called after each of the four RK4 force evaluations (`stage` 0..=3).
    fn on_force_evaluation(&mut self, _stage: usize) {}

    /// Called for every vertex in contact at the start of a sub-step, with the
    /// distinct face-start indices it collides with.
    fn on_contact(&mut self, _vertex: usize, _faces: &[usize]) {}

    /// Called after each RK4 sub-step has been committed.
    fn on_sub_step(&mut self, _index: usize) {}

    /// Called when a frame (all sub-steps) is complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
