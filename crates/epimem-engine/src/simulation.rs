//! Simulation facade: the single entry point external callers (dashboard,
//! export tooling) use to turn a parameter record into a trajectory.
//!
//! The facade is stateless; repeated calls with the same record reproduce
//! the same trajectory, and concurrent runs share nothing.

use epimem_core::{Parameters, SimulationError, Trajectory, TrajectoryPoint};

use crate::integrator::MemoryRk4;

/// Verdict of a step observer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepControl {
    Continue,
    /// End the run cooperatively after the current step; the trajectory
    /// recorded so far is returned as a successful result.
    Halt,
}

/// Validate the record, integrate from t = 0 to the horizon, and return the
/// completed trajectory.
pub fn run(params: &Parameters) -> Result<Trajectory, SimulationError> {
    MemoryRk4::new(params.clone())?.run()
}

/// Like [`run`], but invokes `observe` with each newly recorded trajectory
/// point between steps. Returning [`StepControl::Halt`] stops the run early
/// with the partial trajectory; there is no mid-step cancellation.
pub fn run_observed<F>(params: &Parameters, mut observe: F) -> Result<Trajectory, SimulationError>
where
    F: FnMut(&TrajectoryPoint) -> StepControl,
{
    let mut engine = MemoryRk4::new(params.clone())?;
    while !engine.is_done() {
        engine.step()?;
        if observe(engine.last_point()) == StepControl::Halt {
            break;
        }
    }
    Ok(engine.into_trajectory())
}
