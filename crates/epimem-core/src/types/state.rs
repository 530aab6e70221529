use serde::{Deserialize, Serialize};

/// Population of each SIRVC compartment at one instant.
///
/// The same struct doubles as a derivative vector (per-compartment rates of
/// change), which keeps the Runge-Kutta combinations in the engine free of
/// index bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Compartments {
    pub susceptible: f64,
    pub vaccinated: f64,
    pub carrier: f64,
    pub infected: f64,
    pub recovered: f64,
}

impl Compartments {
    /// Total population across all compartments.
    pub fn total(&self) -> f64 {
        self.susceptible + self.vaccinated + self.carrier + self.infected + self.recovered
    }

    /// `self + scale * rate`, component-wise.
    pub fn add_scaled(&self, rate: &Compartments, scale: f64) -> Compartments {
        Compartments {
            susceptible: self.susceptible + scale * rate.susceptible,
            vaccinated: self.vaccinated + scale * rate.vaccinated,
            carrier: self.carrier + scale * rate.carrier,
            infected: self.infected + scale * rate.infected,
            recovered: self.recovered + scale * rate.recovered,
        }
    }

    /// Smallest compartment value, used for the negativity check.
    pub fn min_value(&self) -> f64 {
        self.susceptible
            .min(self.vaccinated)
            .min(self.carrier)
            .min(self.infected)
            .min(self.recovered)
    }

    pub fn is_finite(&self) -> bool {
        self.susceptible.is_finite()
            && self.vaccinated.is_finite()
            && self.carrier.is_finite()
            && self.infected.is_finite()
            && self.recovered.is_finite()
    }
}
