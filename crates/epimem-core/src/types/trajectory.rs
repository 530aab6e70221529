use serde::{Deserialize, Serialize};

use crate::error::SimulationError;
use crate::types::state::Compartments;

/// One recorded time point of a simulation run.
///
/// Field order matches the column contract with the plotting/export
/// collaborators: time, the five compartments, then the three behavioral
/// indices. The raw information index is appended as a trailing diagnostic
/// column.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub time: f64,
    #[serde(flatten)]
    pub state: Compartments,
    /// Healthcare-access index γ(M) ∈ (0, 1].
    pub healthcare_access: f64,
    /// Social-influence index η(M) ∈ [0, 1).
    pub social_influence: f64,
    /// Misinformation index ξ(M) ∈ [0, 1).
    pub misinformation: f64,
    /// Information index M the three indices were derived from.
    pub information_index: f64,
}

/// Complete output of one run: the initial point plus one point per
/// integration step, in time order. Immutable once returned to the caller.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    points: Vec<TrajectoryPoint>,
}

impl Trajectory {
    pub fn points(&self) -> &[TrajectoryPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&TrajectoryPoint> {
        self.points.last()
    }

    pub fn into_points(self) -> Vec<TrajectoryPoint> {
        self.points
    }

    /// Serialize the trajectory for the export collaborator.
    pub fn to_json(&self) -> Result<String, SimulationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<Vec<TrajectoryPoint>> for Trajectory {
    fn from(points: Vec<TrajectoryPoint>) -> Self {
        Self { points }
    }
}
