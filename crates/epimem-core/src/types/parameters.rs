use serde::{Deserialize, Serialize};

use crate::error::SimulationError;
use crate::types::state::Compartments;

/// Immutable configuration record for one simulation run.
///
/// All rates are per unit of simulated time (days in the default
/// parameterization). The record is supplied by the external dashboard/CLI
/// as JSON ([`Parameters::from_json`]) or built directly; it is validated
/// once, before any integration starts, and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Transmission rate β scaling the force of infection.
    pub transmission_rate: f64,
    /// Modification factor ε weighting carriers in the infectious load.
    pub carrier_infectivity: f64,
    /// Vaccine effectiveness ψ ∈ [0, 1]; breakthrough transmission in the
    /// vaccinated compartment is scaled by (1 − ψ).
    pub vaccine_effectiveness: f64,
    /// Baseline per-capita vaccination rate p₀.
    pub base_uptake: f64,
    /// Awareness-saturated vaccination rate p_max (≥ p₀).
    pub max_uptake: f64,
    /// Reactivity factor D: half-saturation scale of the awareness response
    /// to the information index.
    pub reactivity: f64,
    /// Waning rate θ of vaccine-induced immunity (V → S).
    pub vaccine_waning: f64,
    /// Symptom development rate σ (C → I).
    pub symptom_onset: f64,
    /// Recovery rate δ of carriers (C → R).
    pub carrier_recovery: f64,
    /// Recovery rate ρ of the infected (I → R).
    pub infected_recovery: f64,
    /// Waning rate ϕ of natural immunity (R → S).
    pub natural_waning: f64,
    /// Characteristic memory length a: trailing time span of history fed to
    /// the information-index kernel.
    pub memory_window: f64,
    /// Information coverage/decay shape k: larger values weight recent
    /// history more sharply inside the memory window.
    pub memory_sharpness: f64,
    /// Growth coefficient αγ of the healthcare-access index.
    pub healthcare_growth: f64,
    /// Reduction coefficient βγ of the healthcare-access index.
    pub healthcare_decay: f64,
    /// Growth coefficient αη of the social-influence index.
    pub social_growth: f64,
    /// Reduction coefficient βη of the social-influence index.
    pub social_decay: f64,
    /// Growth coefficient αξ of the misinformation index.
    pub misinfo_growth: f64,
    /// Reduction coefficient βξ of the misinformation index.
    pub misinfo_decay: f64,
    /// Time horizon T of the run.
    pub horizon: f64,
    /// Fixed integration step Δt (must not exceed the memory window).
    pub step_size: f64,
    /// Initial compartment populations; their sum fixes the total
    /// population N conserved for the whole run.
    pub initial: Compartments,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            transmission_rate: 0.3,
            carrier_infectivity: 1.0,
            vaccine_effectiveness: 0.9,
            base_uptake: 0.01,
            max_uptake: 0.05,
            reactivity: 5000.0,
            vaccine_waning: 1.0 / 365.0,
            symptom_onset: 0.01,
            carrier_recovery: 1.0 / 14.0,
            infected_recovery: 1.0 / 10.0,
            natural_waning: 1.0 / 365.0,
            memory_window: 30.0,
            memory_sharpness: 0.5,
            healthcare_growth: 0.01,
            healthcare_decay: 0.005,
            social_growth: 0.02,
            social_decay: 0.01,
            misinfo_growth: 0.005,
            misinfo_decay: 0.002,
            horizon: 365.0,
            step_size: 0.5,
            initial: Compartments {
                susceptible: 176_115_000.0,
                vaccinated: 10_000_000.0,
                carrier: 5_000.0,
                infected: 1_000.0,
                recovered: 0.0,
            },
        }
    }
}

impl Parameters {
    /// Total population N implied by the initial conditions.
    pub fn population(&self) -> f64 {
        self.initial.total()
    }

    /// Check every invariant of the record. Called by the engine before
    /// integration; callers constructing records from untrusted input may
    /// also call it directly.
    pub fn validate(&self) -> Result<(), SimulationError> {
        let rates = [
            ("transmission_rate", self.transmission_rate),
            ("carrier_infectivity", self.carrier_infectivity),
            ("vaccine_effectiveness", self.vaccine_effectiveness),
            ("base_uptake", self.base_uptake),
            ("max_uptake", self.max_uptake),
            ("reactivity", self.reactivity),
            ("vaccine_waning", self.vaccine_waning),
            ("symptom_onset", self.symptom_onset),
            ("carrier_recovery", self.carrier_recovery),
            ("infected_recovery", self.infected_recovery),
            ("natural_waning", self.natural_waning),
            ("memory_sharpness", self.memory_sharpness),
            ("healthcare_growth", self.healthcare_growth),
            ("healthcare_decay", self.healthcare_decay),
            ("social_growth", self.social_growth),
            ("social_decay", self.social_decay),
            ("misinfo_growth", self.misinfo_growth),
            ("misinfo_decay", self.misinfo_decay),
        ];
        for (name, value) in rates {
            if !value.is_finite() || value < 0.0 {
                return Err(SimulationError::InvalidRate { name, value });
            }
        }
        if self.vaccine_effectiveness > 1.0 {
            return Err(SimulationError::EffectivenessOutOfRange(
                self.vaccine_effectiveness,
            ));
        }
        if self.max_uptake < self.base_uptake {
            return Err(SimulationError::UptakeBoundsInverted {
                base: self.base_uptake,
                max: self.max_uptake,
            });
        }
        if !self.memory_window.is_finite() || self.memory_window <= 0.0 {
            return Err(SimulationError::EmptyMemoryWindow(self.memory_window));
        }
        if !self.step_size.is_finite() || self.step_size <= 0.0 {
            return Err(SimulationError::InvalidStepSize(self.step_size));
        }
        if self.step_size > self.memory_window {
            return Err(SimulationError::StepExceedsWindow {
                step: self.step_size,
                window: self.memory_window,
            });
        }
        if !self.horizon.is_finite() || self.horizon < self.step_size {
            return Err(SimulationError::HorizonTooShort {
                horizon: self.horizon,
                step: self.step_size,
            });
        }
        let compartments = [
            ("susceptible", self.initial.susceptible),
            ("vaccinated", self.initial.vaccinated),
            ("carrier", self.initial.carrier),
            ("infected", self.initial.infected),
            ("recovered", self.initial.recovered),
        ];
        for (name, value) in compartments {
            if !value.is_finite() || value < 0.0 {
                return Err(SimulationError::InvalidInitialState { name, value });
            }
        }
        if self.population() <= 0.0 {
            return Err(SimulationError::EmptyPopulation(self.population()));
        }
        Ok(())
    }

    /// Parse a configuration record from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SimulationError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the record to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SimulationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
