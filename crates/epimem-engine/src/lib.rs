//! Simulation engine for the memory-coupled SIRVC vaccination model.
//!
//! The model couples a five-compartment epidemic (susceptible, vaccinated,
//! carrier, infected, recovered) to three behavioral indices — healthcare
//! access, social influence, and misinformation — derived from a weighted
//! memory of the recent infected history. Because the right-hand side at
//! time t depends on the trajectory's own past, the engine keeps an
//! explicit sliding-window [`history::HistoryBuffer`] instead of calling a
//! generic ODE solver, and advances state and history together with a
//! fixed-step RK4 scheme.
//!
//! ## Example
//! ```
//! use epimem_core::Parameters;
//!
//! let mut params = Parameters::default();
//! params.horizon = 30.0;
//! let trajectory = epimem_engine::run(&params).unwrap();
//! assert_eq!(trajectory.points().first().unwrap().time, 0.0);
//! assert_eq!(trajectory.last().unwrap().time, 30.0);
//! ```

pub mod feedback;
pub mod history;
pub mod integrator;
pub mod rhs;
pub mod simulation;

pub use feedback::BehavioralIndices;
pub use history::{information_index, HistoryBuffer};
pub use integrator::MemoryRk4;
pub use simulation::{run, run_observed, StepControl};
