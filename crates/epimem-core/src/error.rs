use thiserror::Error;

use crate::types::trajectory::Trajectory;

/// Errors a simulation run can surface.
///
/// Configuration variants are detected by [`Parameters::validate`] before
/// integration starts; [`SimulationError::Diverged`] is the only mid-run
/// failure and carries the partial trajectory for diagnostics. Integration
/// is deterministic, so nothing here is retried.
///
/// [`Parameters::validate`]: crate::Parameters::validate
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("parameter `{name}` must be finite and non-negative, got {value}")]
    InvalidRate { name: &'static str, value: f64 },

    #[error("vaccine effectiveness must lie in [0, 1], got {0}")]
    EffectivenessOutOfRange(f64),

    #[error("max uptake {max} is below base uptake {base}")]
    UptakeBoundsInverted { base: f64, max: f64 },

    #[error("memory window must be positive, got {0}")]
    EmptyMemoryWindow(f64),

    #[error("step size must be positive and finite, got {0}")]
    InvalidStepSize(f64),

    #[error("step size {step} exceeds the memory window {window}")]
    StepExceedsWindow { step: f64, window: f64 },

    #[error("time horizon {horizon} is shorter than one step {step}")]
    HorizonTooShort { horizon: f64, step: f64 },

    #[error("initial `{name}` population must be finite and non-negative, got {value}")]
    InvalidInitialState { name: &'static str, value: f64 },

    #[error("initial population must be positive, got {0}")]
    EmptyPopulation(f64),

    /// Non-finite state, a compartment persistently below zero, or total
    /// population drifting beyond tolerance. Usually a step size too large
    /// for the fastest rate in the system; the remedy is a corrected
    /// configuration, not a retry.
    #[error("numerical divergence at t = {time} (step {step}); reduce the step size")]
    Diverged {
        time: f64,
        step: usize,
        partial: Box<Trajectory>,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
