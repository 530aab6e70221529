//! Instantaneous rate of change of the SIRVC compartments.
//!
//! Pure function of (state, behavioral indices, information index,
//! parameters); all history handling lives in the integrator. Every term
//! below is a flow between two compartments with equal and opposite signs,
//! so the derivative sums to zero identically and the total population is
//! conserved by construction.

use epimem_core::{Compartments, Parameters};

use crate::feedback::BehavioralIndices;

/// Effective per-capita vaccination rate.
///
/// The awareness term lifts the baseline uptake p₀ towards p_max as the
/// information index saturates the reactivity response D·M / (1 + D·M);
/// the behavioral indices then scale it: healthcare access gates it,
/// social influence amplifies it, misinformation suppresses it. With all
/// behavioral coefficients zero this is exactly the awareness-driven rate
/// of the underlying model.
pub fn effective_uptake(index: f64, indices: &BehavioralIndices, params: &Parameters) -> f64 {
    let awareness = params.base_uptake
        + (params.max_uptake - params.base_uptake) * params.reactivity * index
            / (1.0 + params.reactivity * index);
    indices.healthcare_access
        * (1.0 + indices.social_influence)
        * (1.0 - indices.misinformation)
        * awareness
}

/// Evaluate dState/dt for the modified SIRVC flow graph.
pub fn derivatives(
    state: &Compartments,
    indices: &BehavioralIndices,
    index: f64,
    params: &Parameters,
) -> Compartments {
    let n = state.total();
    let infectious = params.carrier_infectivity * state.carrier + state.infected;
    // Force of infection; zero for an empty population so boundary states
    // never divide by zero.
    let force = if n > 0.0 {
        params.transmission_rate * infectious / n
    } else {
        0.0
    };
    let uptake = effective_uptake(index, indices, params);
    let breakthrough = (1.0 - params.vaccine_effectiveness) * force;

    let s_to_v = uptake * state.susceptible;
    let s_to_c = force * state.susceptible;
    let v_to_c = breakthrough * state.vaccinated;
    let v_to_s = params.vaccine_waning * state.vaccinated;
    let c_to_i = params.symptom_onset * state.carrier;
    let c_to_r = params.carrier_recovery * state.carrier;
    let i_to_r = params.infected_recovery * state.infected;
    let r_to_s = params.natural_waning * state.recovered;

    Compartments {
        susceptible: v_to_s + r_to_s - s_to_v - s_to_c,
        vaccinated: s_to_v - v_to_c - v_to_s,
        carrier: s_to_c + v_to_c - c_to_i - c_to_r,
        infected: c_to_i - i_to_r,
        recovered: c_to_r + i_to_r - r_to_s,
    }
}
