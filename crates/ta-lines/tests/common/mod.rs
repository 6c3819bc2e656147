//! Shared test utilities for ta-lines integration tests.

use ta_lines::line::Line;

/// Standard epsilon for high-precision comparisons.
#[allow(dead_code)]
pub const EPSILON: f64 = 1e-10;

/// Looser epsilon for long smoothing chains.
#[allow(dead_code)]
pub const LOOSE_EPSILON: f64 = 1e-6;

/// Approximate equality; two NaN values compare equal.
#[allow(dead_code)]
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    if a.is_nan() || b.is_nan() {
        return false;
    }
    (a - b).abs() < eps
}

/// Line over `1.0, 2.0, ..., n`.
#[allow(dead_code)]
pub fn ramp(n: usize) -> Line<f64> {
    Line::new((1..=n).map(|i| i as f64).collect())
}

/// Deterministic close prices with some up and down movement.
#[allow(dead_code)]
pub fn close_prices(n: usize) -> Line<f64> {
    Line::new(
        (0..n)
            .map(|i| {
                let x = i as f64;
                100.0 + 10.0 * (x * 0.3).sin() + 0.5 * x
            })
            .collect(),
    )
}

/// Verify that exactly the first `expected` values are NaN.
#[allow(dead_code)]
pub fn verify_nan_prefix(data: &[f64], expected: usize) -> bool {
    data.iter()
        .enumerate()
        .all(|(i, x)| x.is_nan() == (i < expected))
}

/// Assert every value matches, NaN included.
#[allow(dead_code)]
pub fn assert_values(actual: &[f64], expected: &[f64], eps: f64, label: &str) {
    assert_eq!(actual.len(), expected.len(), "{label}: length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(approx_eq(*a, *e, eps), "{label}[{i}] expected {e}, got {a}");
    }
}
