//! Fixed-step RK4 integrator coupled to the history buffer.
//!
//! The right-hand side at time t depends on the trajectory's own past
//! through the information index, so a generic ODE solver does not apply:
//! each step first reads the history into the memory kernel, freezes the
//! resulting behavioral indices across the four Runge-Kutta stages (history
//! exists only at grid points), advances the compartments, and then appends
//! the new sample to the history before the next step reads it.

use epimem_core::{Compartments, Parameters, SimulationError, Trajectory, TrajectoryPoint};

use crate::feedback::{self, BehavioralIndices};
use crate::history::{self, HistoryBuffer};
use crate::rhs;

/// Allowed undershoot below zero per compartment, relative to N.
const NEGATIVE_SLACK: f64 = 1e-9;
/// Allowed relative drift of the total population.
const CONSERVATION_TOLERANCE: f64 = 1e-6;

/// Step-wise simulation state: current time, compartments, the history
/// buffer, and the trajectory recorded so far.
///
/// Most callers go through [`crate::simulation::run`]; this type is for
/// those that need to drive the loop themselves.
pub struct MemoryRk4 {
    params: Parameters,
    population: f64,
    step: usize,
    state: Compartments,
    history: HistoryBuffer,
    index: f64,
    indices: BehavioralIndices,
    points: Vec<TrajectoryPoint>,
}

impl MemoryRk4 {
    /// Validate the parameter record and set up the initial state at t = 0
    /// with an empty history (M = 0 until the first sample is recorded).
    pub fn new(params: Parameters) -> Result<Self, SimulationError> {
        params.validate()?;
        let population = params.population();
        let state = params.initial;
        let index = 0.0;
        let indices = feedback::evaluate(index, &params);
        let capacity = (params.horizon / params.step_size).ceil() as usize + 2;
        let mut points = Vec::with_capacity(capacity);
        points.push(Self::point(0.0, &state, &indices, index));
        Ok(Self {
            history: HistoryBuffer::new(params.memory_window),
            params,
            population,
            step: 0,
            state,
            index,
            indices,
            points,
        })
    }

    /// Grid time of the current state. Derived from the step count so the
    /// grid does not accumulate floating-point drift.
    pub fn current_time(&self) -> f64 {
        self.step as f64 * self.params.step_size
    }

    pub fn state(&self) -> &Compartments {
        &self.state
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Information index as of the current time.
    pub fn information_index(&self) -> f64 {
        self.index
    }

    /// The most recently recorded trajectory point. The trajectory always
    /// holds at least the initial point.
    pub fn last_point(&self) -> &TrajectoryPoint {
        self.points
            .last()
            .unwrap_or_else(|| unreachable!("trajectory holds the initial point"))
    }

    /// True once the grid has reached (or stepped past) the horizon.
    pub fn is_done(&self) -> bool {
        self.current_time() >= self.params.horizon - 1e-9 * self.params.step_size
    }

    /// Advance one step: kernel → indices → RHS → RK4 update → admissibility
    /// check → record history sample and trajectory point.
    pub fn step(&mut self) -> Result<(), SimulationError> {
        let h = self.params.step_size;
        let y = self.state;
        let k1 = rhs::derivatives(&y, &self.indices, self.index, &self.params);
        let k2 = rhs::derivatives(
            &y.add_scaled(&k1, 0.5 * h),
            &self.indices,
            self.index,
            &self.params,
        );
        let k3 = rhs::derivatives(
            &y.add_scaled(&k2, 0.5 * h),
            &self.indices,
            self.index,
            &self.params,
        );
        let k4 = rhs::derivatives(&y.add_scaled(&k3, h), &self.indices, self.index, &self.params);
        let next = y
            .add_scaled(&k1, h / 6.0)
            .add_scaled(&k2, h / 3.0)
            .add_scaled(&k3, h / 3.0)
            .add_scaled(&k4, h / 6.0);

        self.step += 1;
        let time = self.current_time();
        self.check_admissible(&next, time)?;

        self.state = next;
        self.history.record(time, next.infected / self.population);
        self.index = history::information_index(&self.history, time, self.params.memory_sharpness);
        self.indices = feedback::evaluate(self.index, &self.params);
        self.points
            .push(Self::point(time, &next, &self.indices, self.index));
        Ok(())
    }

    /// Drive the integrator to the horizon and hand the trajectory to the
    /// caller.
    pub fn run(mut self) -> Result<Trajectory, SimulationError> {
        while !self.is_done() {
            self.step()?;
        }
        Ok(self.into_trajectory())
    }

    pub fn into_trajectory(self) -> Trajectory {
        Trajectory::from(self.points)
    }

    fn point(
        time: f64,
        state: &Compartments,
        indices: &BehavioralIndices,
        index: f64,
    ) -> TrajectoryPoint {
        TrajectoryPoint {
            time,
            state: *state,
            healthcare_access: indices.healthcare_access,
            social_influence: indices.social_influence,
            misinformation: indices.misinformation,
            information_index: index,
        }
    }

    /// Reject non-finite states, compartments below the numerical slack,
    /// and population drift beyond tolerance. The partial trajectory up to
    /// the last admissible step ships with the error for diagnostics.
    fn check_admissible(&self, state: &Compartments, time: f64) -> Result<(), SimulationError> {
        let admissible = state.is_finite()
            && state.min_value() >= -NEGATIVE_SLACK * self.population
            && (state.total() - self.population).abs()
                <= CONSERVATION_TOLERANCE * self.population;
        if admissible {
            Ok(())
        } else {
            Err(SimulationError::Diverged {
                time,
                step: self.step,
                partial: Box::new(Trajectory::from(self.points.clone())),
            })
        }
    }
}
