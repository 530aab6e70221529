//! Behavioral feedback: the three saturating transforms from the
//! information index M to bounded rate modifiers.
//!
//! All three are rational saturating forms, so for any M ≥ 0 the
//! healthcare-access index stays in (0, 1] and the social-influence and
//! misinformation indices stay in [0, 1). With all coefficients zero the
//! trio collapses to its neutral baseline (γ = 1, η = ξ = 0) and the model
//! reduces to a plain SIRVC system.

use epimem_core::Parameters;

/// The three behavioral indices at one instant. Derived from M every step,
/// never persisted as state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BehavioralIndices {
    /// Healthcare access γ(M) ∈ (0, 1].
    pub healthcare_access: f64,
    /// Social influence η(M) ∈ [0, 1).
    pub social_influence: f64,
    /// Misinformation ξ(M) ∈ [0, 1).
    pub misinformation: f64,
}

impl BehavioralIndices {
    /// The no-effect baseline reached when M = 0 or all coefficients are
    /// zero.
    pub fn neutral() -> Self {
        Self {
            healthcare_access: 1.0,
            social_influence: 0.0,
            misinformation: 0.0,
        }
    }
}

/// Evaluate all three indices for a given information index.
pub fn evaluate(index: f64, params: &Parameters) -> BehavioralIndices {
    // The index may sit a few ulps below zero when compartments graze the
    // boundary inside the numerical slack.
    let m = index.max(0.0);
    BehavioralIndices {
        healthcare_access: access_response(m, params.healthcare_growth, params.healthcare_decay),
        social_influence: saturating_gain(m, params.social_growth, params.social_decay),
        misinformation: saturating_gain(m, params.misinfo_growth, params.misinfo_decay),
    }
}

/// γ form: starts at 1, saturates towards growth / (growth + decay).
fn access_response(m: f64, growth: f64, decay: f64) -> f64 {
    (1.0 + growth * m) / (1.0 + (growth + decay) * m)
}

/// η/ξ form: starts at 0, saturates below growth / (growth + decay) < 1.
fn saturating_gain(m: f64, growth: f64, decay: f64) -> f64 {
    growth * m / (1.0 + (growth + decay) * m)
}
