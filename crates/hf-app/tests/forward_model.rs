//! Forward model against the individual sub-solvers.

use hf_app::{Facility, Measurement, forward, run_case, run_case_file};
use hf_core::units::{k, m, m2, pa};
use hf_gas::{EquilibriumGas, GasModel};
use hf_solver::{ForwardOptions, PreShock, free_stream, massflow, normal_shock, reservoir, total};
use std::path::Path;

fn facility() -> Facility {
    Facility {
        throat_area: m2(1.0e-4),
        nose_radius: m(0.025),
        wall_temperature: k(300.0),
        prandtl: 0.71,
        lewis: 1.0,
    }
}

#[test]
fn all_measurements_in_request_order() {
    let gas = EquilibriumGas::air5();
    let preshock = PreShock::new(k(220.0), pa(1000.0), 8.0);
    let requested = [
        Measurement::FreeStreamPressure,
        Measurement::HeatFlux,
        Measurement::ReservoirPressure,
        Measurement::MassFlow,
        Measurement::StagnationDensity,
        Measurement::TotalEnthalpy,
        Measurement::ReservoirTemperature,
        Measurement::StagnationPressure,
    ];
    let opts = ForwardOptions::default();

    let set = forward(&gas, &preshock, &facility(), &requested, &opts).unwrap();
    let order: Vec<Measurement> = set.measurements().collect();
    assert_eq!(order, requested.to_vec());

    let fs = free_stream(&gas, &preshock).unwrap();
    let res = reservoir(&gas, &fs, &opts.reservoir).unwrap();
    let throat = massflow(&gas, &fs, m2(1.0e-4), &opts.massflow).unwrap();
    let post = normal_shock(&gas, &fs, &opts.shocking).unwrap();
    let tot = total(&gas, &post, &opts.total).unwrap();

    let close = |a: f64, b: f64| (a - b).abs() <= 1e-9 * b.abs().max(1.0);
    assert_eq!(set.get(Measurement::FreeStreamPressure), Some(1000.0));
    assert!(close(set.get(Measurement::ReservoirTemperature).unwrap(), res.t.value));
    assert!(close(set.get(Measurement::ReservoirPressure).unwrap(), res.p.value));
    assert!(close(set.get(Measurement::MassFlow).unwrap(), throat.mdot.value));
    assert!(close(set.get(Measurement::StagnationPressure).unwrap(), tot.p.value));
    assert!(close(
        set.get(Measurement::TotalEnthalpy).unwrap(),
        gas.h(&tot.state).unwrap()
    ));
    assert!(close(
        set.get(Measurement::StagnationDensity).unwrap(),
        gas.rho(&tot.state).unwrap().value
    ));

    // Physical ordering
    let pt2 = set.get(Measurement::StagnationPressure).unwrap();
    let p0 = set.get(Measurement::ReservoirPressure).unwrap();
    assert!(pt2 > 1000.0 && pt2 < p0);
    let ht2 = set.get(Measurement::TotalEnthalpy).unwrap();
    assert!((ht2 / fs.h_total - 1.0).abs() < 1e-6);
    assert!(set.get(Measurement::HeatFlux).unwrap() > 0.0);
}

#[test]
fn duplicate_requests_are_ignored() {
    let gas = EquilibriumGas::air5();
    let set = forward(
        &gas,
        &PreShock::new(k(250.0), pa(5000.0), 4.0),
        &facility(),
        &[
            Measurement::ReservoirTemperature,
            Measurement::FreeStreamPressure,
            Measurement::ReservoirTemperature,
        ],
        &ForwardOptions::default(),
    )
    .unwrap();
    assert_eq!(set.len(), 2);
    assert!(set.get(Measurement::ReservoirTemperature).unwrap() > 250.0);
}

#[test]
fn bundled_cases_run() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../cases");

    let report = run_case_file(&root.join("01_air5_heat_flux.yaml")).unwrap();
    assert_eq!(report.points.len(), 1);
    let values = report.points[0].values.as_ref().unwrap();
    assert_eq!(values.len(), 3);

    let report = run_case_file(&root.join("03_nitrogen2_sweep.yaml")).unwrap();
    assert_eq!(report.points.len(), 3);
    assert_eq!(report.failures(), 0);
    let enthalpies: Vec<f64> = report
        .points
        .iter()
        .map(|p| p.values.as_ref().unwrap().get(Measurement::TotalEnthalpy).unwrap())
        .collect();
    // Faster free streams carry more total enthalpy.
    assert!(enthalpies.windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn cold_free_stream_is_evaluated() {
    let gas = EquilibriumGas::air5();
    for t1 in [40.0, 45.0, 50.0] {
        let set = forward(
            &gas,
            &PreShock::new(k(t1), pa(400.0), 12.0),
            &facility(),
            &[Measurement::FreeStreamPressure, Measurement::StagnationPressure],
            &ForwardOptions::default(),
        )
        .unwrap();
        assert_eq!(set.get(Measurement::FreeStreamPressure), Some(400.0));
        assert!(set.get(Measurement::StagnationPressure).unwrap() > 400.0);
    }
}

#[test]
fn failing_sweep_point_is_recorded() {
    // One bracket step reaches the throat at M1 = 1.2 but not at M1 = 8.
    let case = hf_case::from_yaml_str(
        r#"
version: 1
name: short-bracket
mixture: air5
free_stream: { temperature_k: 300.0, pressure_pa: 1.0e5, mach: 1.2 }
facility: { throat_area_m2: 1.0e-4, nose_radius_m: 0.025 }
measurements: [Mass_flow]
options:
  massflow: { max_bracket_steps: 1 }
sweep:
  - { temperature_k: 300.0, pressure_pa: 1.0e5, mach: 8.0 }
  - { temperature_k: 300.0, pressure_pa: 2.0e5, mach: 1.2 }
"#,
    )
    .unwrap();

    let report = run_case(&case).unwrap();
    assert_eq!(report.points.len(), 3);
    assert_eq!(report.failures(), 1);

    let failed = &report.points[1];
    assert!(failed.values.is_none());
    assert!(failed.error.as_deref().unwrap().contains("Solver error"));

    let first = report.points[0].values.as_ref().unwrap();
    let last = report.points[2].values.as_ref().unwrap();
    let ratio = last.get(Measurement::MassFlow).unwrap() / first.get(Measurement::MassFlow).unwrap();
    assert!((ratio - 2.0).abs() < 1e-3);
}
