use approx::assert_relative_eq;

use super::{Action, Config, ConfigError, Error, Event, System, solve, solve_unobserved};

/// Builds the 1D Laplacian pattern `[-1, 2, -1]` with a unit right-hand side
/// at both ends.
fn laplacian(n: usize) -> System {
    let mut system = System::zeros(n);
    for row in 0..n {
        let rhs = if row == 0 || row == n - 1 { 1.0 } else { 0.0 };
        system.set_row(row, [-1.0, 2.0, -1.0], rhs);
    }
    system
}

#[test]
fn solves_identity() {
    let values = [1.0, 2.0, 3.0, 4.0, 5.0];
    let mut system = System::zeros(values.len());
    for (row, value) in values.iter().enumerate() {
        system.set_row(row, [0.0, 1.0, 0.0], *value);
    }

    let solution = solve_unobserved(&system, &Config::default()).expect("should solve");

    assert_eq!(solution.x, values.to_vec());
    assert_relative_eq!(solution.min_relative_pivot, 1.0);
}

#[test]
fn solves_laplacian() {
    let system = laplacian(4);

    let solution = solve_unobserved(&system, &Config::default()).expect("should solve");

    // Symmetric boundary loading gives a uniform solution.
    for value in &solution.x {
        assert_relative_eq!(*value, 1.0, epsilon = 1e-12);
    }
    for residual in system.residual(&solution.x) {
        assert_relative_eq!(residual, 0.0, epsilon = 1e-12);
    }
}

#[test]
fn single_row() {
    let mut system = System::zeros(1);
    system.set_row(0, [7.0, 4.0, 9.0], 2.0);

    // Out-of-matrix coefficients are discarded.
    assert_eq!(system.coefficients(0), [0.0, 4.0, 0.0]);

    let solution = solve_unobserved(&system, &Config::default()).expect("should solve");
    assert_eq!(solution.x, vec![0.5]);
}

#[test]
fn pivot_test_is_scale_invariant() {
    let mut system = laplacian(6);
    for row in 0..system.len() {
        let [sub, diag, sup] = system.coefficients(row);
        let rhs = system.rhs(row);
        system.set_row(row, [sub * 1e9, diag * 1e9, sup * 1e9], rhs * 1e9);
    }

    let solution = solve_unobserved(&system, &Config::default()).expect("should solve");
    for value in &solution.x {
        assert_relative_eq!(*value, 1.0, epsilon = 1e-9);
    }
}

#[test]
fn detects_zero_pivot() {
    // Second row becomes exactly zero after eliminating the first.
    let mut system = System::zeros(3);
    system.set_row(0, [0.0, 1.0, 1.0], 1.0);
    system.set_row(1, [1.0, 1.0, 0.0], 1.0);
    system.set_row(2, [0.0, 1.0, 0.0], 1.0);

    let error = solve_unobserved(&system, &Config::default()).unwrap_err();

    assert_eq!(error, Error::Singular { row: 1, pivot: 0.0 });
}

#[test]
fn detects_all_zero_row() {
    let mut system = System::zeros(3);
    system.set_row(0, [0.0, 1.0, 0.0], 1.0);
    system.set_row(2, [0.0, 1.0, 0.0], 1.0);

    let error = solve_unobserved(&system, &Config::default()).unwrap_err();

    assert!(matches!(error, Error::Singular { row: 1, .. }));
}

#[test]
fn detects_non_finite_coefficients() {
    let mut system = laplacian(3);
    system.set_row(1, [-1.0, f64::NAN, -1.0], 0.0);

    let error = solve_unobserved(&system, &Config::default()).unwrap_err();

    assert!(matches!(error, Error::Singular { row: 1, .. }));
}

#[test]
fn detects_non_finite_solution() {
    let mut system = laplacian(3);
    system.set_row(2, [-1.0, 2.0, 0.0], f64::INFINITY);

    let error = solve_unobserved(&system, &Config::default()).unwrap_err();

    assert!(matches!(error, Error::NonFinite { .. }));
}

#[test]
fn rejects_empty_system() {
    let error = solve_unobserved(&System::zeros(0), &Config::default()).unwrap_err();
    assert_eq!(error, Error::Empty);
}

#[test]
fn observer_sees_every_row() {
    let system = laplacian(5);
    let mut rows = Vec::new();

    let observer = |event: &Event| -> Option<Action> {
        rows.push(event.row);
        assert_relative_eq!(event.scale, 2.0);
        None
    };

    solve(&system, &Config::default(), observer).expect("should solve");

    assert_eq!(rows, vec![0, 1, 2, 3, 4]);
}

#[test]
fn observer_can_reject_a_pivot() {
    let system = laplacian(5);

    // Relative pivots run 1, 3/4, 2/3, ... so the second row is the first below 0.8.
    let observer =
        |event: &Event| (event.relative_pivot() < 0.8).then_some(Action::TreatAsSingular);

    let error = solve(&system, &Config::default(), observer).unwrap_err();

    assert!(matches!(error, Error::Rejected { row: 1, .. }));
}

#[test]
fn config_validation() {
    assert!(Config::new(0.0).is_ok());
    assert_eq!(Config::new(-1e-3), Err(ConfigError::PivotTolerance));
    assert_eq!(Config::new(f64::NAN), Err(ConfigError::PivotTolerance));
    assert_relative_eq!(Config::default().pivot_tolerance(), 1e-12);
}
