//! Data model for the memory-coupled SIRVC vaccination model.
//!
//! This crate holds the types shared between the simulation engine and its
//! callers: the immutable [`Parameters`] record, the [`Compartments`] state
//! vector, the recorded [`Trajectory`], and the [`SimulationError`] taxonomy.
//! The engine itself lives in `epimem-engine`.

mod error;
pub mod types;

pub use error::SimulationError;
pub use types::parameters::Parameters;
pub use types::state::Compartments;
pub use types::trajectory::{Trajectory, TrajectoryPoint};
