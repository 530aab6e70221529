//! End-to-end properties of the simulation facade.

use epimem_core::{Compartments, Parameters, SimulationError};
use epimem_engine::{run, run_observed, StepControl};

fn small_population() -> Compartments {
    Compartments {
        susceptible: 990.0,
        vaccinated: 0.0,
        carrier: 0.0,
        infected: 10.0,
        recovered: 0.0,
    }
}

/// Parameter set of the reduced scenario: behavioral coefficients zero and
/// a flat uptake rate, so the memory machinery has no influence and the
/// system is a plain SIRVC model.
fn reduced_scenario() -> Parameters {
    let mut params = Parameters::default();
    params.transmission_rate = 0.5;
    params.carrier_infectivity = 1.0;
    params.vaccine_effectiveness = 0.3;
    params.base_uptake = 0.02;
    params.max_uptake = 0.02;
    params.reactivity = 0.0;
    params.vaccine_waning = 0.05;
    params.symptom_onset = 0.2;
    params.carrier_recovery = 0.05;
    params.infected_recovery = 0.1;
    params.natural_waning = 0.05;
    params.memory_window = 5.0;
    params.memory_sharpness = 0.5;
    params.healthcare_growth = 0.0;
    params.healthcare_decay = 0.0;
    params.social_growth = 0.0;
    params.social_decay = 0.0;
    params.misinfo_growth = 0.0;
    params.misinfo_decay = 0.0;
    params.horizon = 50.0;
    params.step_size = 0.1;
    params.initial = small_population();
    params
}

/// Independent RK4 solution of the reduced (non-memory) SIRVC system.
fn reference_reduced(params: &Parameters) -> Vec<[f64; 5]> {
    let deriv = |y: [f64; 5]| -> [f64; 5] {
        let [s, v, c, i, r] = y;
        let n = s + v + c + i + r;
        let force = params.transmission_rate * (params.carrier_infectivity * c + i) / n;
        let uptake = params.base_uptake;
        let breakthrough = (1.0 - params.vaccine_effectiveness) * force;
        [
            params.vaccine_waning * v + params.natural_waning * r - uptake * s - force * s,
            uptake * s - breakthrough * v - params.vaccine_waning * v,
            force * s + breakthrough * v
                - (params.symptom_onset + params.carrier_recovery) * c,
            params.symptom_onset * c - params.infected_recovery * i,
            params.carrier_recovery * c + params.infected_recovery * i
                - params.natural_waning * r,
        ]
    };
    let add = |y: [f64; 5], k: [f64; 5], scale: f64| -> [f64; 5] {
        [
            y[0] + scale * k[0],
            y[1] + scale * k[1],
            y[2] + scale * k[2],
            y[3] + scale * k[3],
            y[4] + scale * k[4],
        ]
    };

    let h = params.step_size;
    let steps = (params.horizon / h).round() as usize;
    let mut y = [
        params.initial.susceptible,
        params.initial.vaccinated,
        params.initial.carrier,
        params.initial.infected,
        params.initial.recovered,
    ];
    let mut out = Vec::with_capacity(steps + 1);
    out.push(y);
    for _ in 0..steps {
        let k1 = deriv(y);
        let k2 = deriv(add(y, k1, 0.5 * h));
        let k3 = deriv(add(y, k2, 0.5 * h));
        let k4 = deriv(add(y, k3, h));
        y = add(add(add(add(y, k1, h / 6.0), k2, h / 3.0), k3, h / 3.0), k4, h / 6.0);
        out.push(y);
    }
    out
}

#[test]
fn disabled_feedback_matches_the_plain_sirvc_reference() {
    let params = reduced_scenario();
    let trajectory = run(&params).unwrap();
    let reference = reference_reduced(&params);
    assert_eq!(trajectory.len(), reference.len());

    let population = params.population();
    for (point, expected) in trajectory.points().iter().zip(&reference) {
        assert!((point.state.susceptible - expected[0]).abs() <= 1e-8 * population);
        assert!((point.state.vaccinated - expected[1]).abs() <= 1e-8 * population);
        assert!((point.state.carrier - expected[2]).abs() <= 1e-8 * population);
        assert!((point.state.infected - expected[3]).abs() <= 1e-8 * population);
        assert!((point.state.recovered - expected[4]).abs() <= 1e-8 * population);
        // Feedback must sit on its neutral baseline the whole run.
        assert_eq!(point.healthcare_access, 1.0);
        assert_eq!(point.social_influence, 0.0);
        assert_eq!(point.misinformation, 0.0);
    }

    // Infected peak and time-to-peak agree with the reference.
    let (engine_argmax, engine_peak) = trajectory
        .points()
        .iter()
        .enumerate()
        .map(|(i, p)| (i, p.state.infected))
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .unwrap();
    let (reference_argmax, reference_peak) = reference
        .iter()
        .enumerate()
        .map(|(i, y)| (i, y[3]))
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .unwrap();
    assert!((engine_peak - reference_peak).abs() <= 1e-6 * reference_peak);
    let time_gap = (engine_argmax as f64 - reference_argmax as f64).abs() * params.step_size;
    assert!(time_gap <= params.step_size + 1e-12);
}

#[test]
fn population_is_conserved_along_the_trajectory() {
    let mut params = Parameters::default();
    params.horizon = 120.0;
    params.step_size = 0.5;
    let population = params.population();
    let trajectory = run(&params).unwrap();
    for point in trajectory.points() {
        let drift = (point.state.total() - population).abs();
        assert!(
            drift <= 1e-6 * population,
            "conservation violated at t = {}: drift {drift}",
            point.time
        );
    }
}

#[test]
fn identical_parameter_sets_reproduce_the_trajectory_bit_for_bit() {
    let mut params = reduced_scenario();
    // Re-enable the feedback so the full memory path is exercised.
    params.healthcare_growth = 0.01;
    params.healthcare_decay = 0.005;
    params.social_growth = 0.02;
    params.social_decay = 0.01;
    params.misinfo_growth = 0.005;
    params.misinfo_decay = 0.002;
    params.max_uptake = 0.05;
    params.reactivity = 5000.0;

    let first = run(&params).unwrap();
    let second = run(&params).unwrap();
    assert_eq!(first.points(), second.points());
}

#[test]
fn degenerate_window_of_one_step_runs_the_full_horizon() {
    let mut params = reduced_scenario();
    params.memory_window = params.step_size;
    params.healthcare_growth = 0.01;
    params.social_growth = 0.02;
    params.misinfo_growth = 0.005;
    let trajectory = run(&params).unwrap();
    assert!((trajectory.last().unwrap().time - 50.0).abs() < 1e-9);
    assert!(trajectory.points().iter().all(|p| p.state.is_finite()));
}

#[test]
fn trajectory_times_follow_the_step_grid() {
    let mut params = Parameters::default();
    params.horizon = 10.0;
    params.step_size = 0.5;
    let trajectory = run(&params).unwrap();
    for (i, point) in trajectory.points().iter().enumerate() {
        assert_eq!(point.time, i as f64 * params.step_size);
    }
}

#[test]
fn behavioral_indices_stay_bounded_for_the_whole_run() {
    let mut params = Parameters::default();
    params.horizon = 120.0;
    params.step_size = 0.5;
    let trajectory = run(&params).unwrap();
    for point in trajectory.points() {
        assert!(point.healthcare_access > 0.0 && point.healthcare_access <= 1.0);
        assert!((0.0..1.0).contains(&point.social_influence));
        assert!((0.0..1.0).contains(&point.misinformation));
        assert!(point.information_index >= 0.0);
    }
}

#[test]
fn configuration_errors_are_surfaced_before_the_run_starts() {
    let mut params = Parameters::default();
    params.step_size = params.memory_window * 2.0;
    assert!(matches!(
        run(&params),
        Err(SimulationError::StepExceedsWindow { .. })
    ));

    let mut params = Parameters::default();
    params.transmission_rate = f64::NAN;
    assert!(matches!(
        run(&params),
        Err(SimulationError::InvalidRate { .. })
    ));
}

#[test]
fn cooperative_halt_returns_the_partial_trajectory() {
    let mut params = Parameters::default();
    params.horizon = 200.0;
    params.step_size = 0.5;
    let trajectory = run_observed(&params, |point| {
        if point.time >= 25.0 {
            StepControl::Halt
        } else {
            StepControl::Continue
        }
    })
    .unwrap();
    assert_eq!(trajectory.last().unwrap().time, 25.0);
}
