//! Property-based tests for minperiod propagation using proptest.
//!
//! These tests verify the warm-up rules that must hold for all inputs,
//! using randomly generated series and periods.

#![allow(clippy::float_cmp)]

use proptest::prelude::*;

use ta_lines::prelude::*;
use ta_lines::utils::count_nan_prefix;

// ==================== Test Data Generators ====================

/// Generate a random price series (all positive values)
fn arb_price_series(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0..1000.0_f64, min_len..=max_len)
}

/// Generate a line whose warm-up is `shift` samples long
fn arb_warmed_line() -> impl Strategy<Value = Line<f64>> {
    (arb_price_series(40, 120), 0usize..10).prop_map(|(data, shift)| {
        let line = Line::new(data);
        if shift == 0 {
            line
        } else {
            line.ago(shift).unwrap()
        }
    })
}

// ==================== Rolling Properties ====================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Rolling window of p over minperiod m yields m + p - 1
    #[test]
    fn prop_rolling_minperiod(line in arb_warmed_line(), period in 2usize..=20) {
        let m = line.minperiod();
        for f in WindowFn::ALL {
            let out = line.rolling(period).unwrap().aggregate(f).unwrap();
            prop_assert_eq!(out.minperiod(), m + period - 1);
            let expected_prefix = (m + period - 2).min(line.len());
            prop_assert_eq!(count_nan_prefix(out.values()), expected_prefix);
        }
    }

    /// Rolling max is never below rolling mean, which is never below rolling min
    #[test]
    fn prop_rolling_ordering(data in arb_price_series(10, 80), period in 1usize..=10) {
        let line = Line::new(data);
        let rolling = line.rolling(period).unwrap();
        let (max, mean, min) = (rolling.max().unwrap(), rolling.mean().unwrap(), rolling.min().unwrap());
        for i in (period - 1)..line.len() {
            prop_assert!(max.values()[i] >= mean.values()[i] - 1e-9);
            prop_assert!(mean.values()[i] >= min.values()[i] - 1e-9);
        }
    }

    /// Deque-based extrema agree with a direct scan of each window
    #[test]
    fn prop_rolling_extrema_match_scan(data in arb_price_series(5, 60), period in 1usize..=8) {
        let line = Line::new(data.clone());
        let max = line.rolling(period).unwrap().max().unwrap();
        let argmin = line.rolling(period).unwrap().aggregate(WindowFn::ArgMin).unwrap();
        for i in (period - 1)..data.len() {
            let window = &data[i + 1 - period..=i];
            let scanned = window.iter().copied().fold(f64::MIN, f64::max);
            prop_assert_eq!(max.values()[i], scanned);

            let mut best = 0;
            for (j, &x) in window.iter().enumerate() {
                if x < window[best] {
                    best = j;
                }
            }
            prop_assert_eq!(argmin.values()[i], best as f64);
        }
    }
}

// ==================== Elementwise Properties ====================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Elementwise operations take the larger minperiod
    #[test]
    fn prop_binary_minperiod(data in arb_price_series(30, 80), a in 0usize..10, b in 0usize..10) {
        let base = Line::new(data);
        let left = base.rolling(a + 1).unwrap().sum().unwrap();
        let right = base.rolling(b + 1).unwrap().mean().unwrap();
        for op in BinaryOp::ALL {
            let out = left.binary(op, &right).unwrap();
            prop_assert_eq!(out.minperiod(), left.minperiod().max(right.minperiod()));
            prop_assert_eq!(count_nan_prefix(out.values()), a.max(b));
        }
    }

    /// Period standard ops add their period to the input minperiod
    #[test]
    fn prop_standard_minperiod(line in arb_warmed_line(), period in 1usize..=15) {
        let m = line.minperiod();
        for op in [StandardOp::Shift, StandardOp::Diff, StandardOp::PctChange] {
            let out = line.standard(op, Some(period)).unwrap();
            prop_assert_eq!(out.minperiod(), m + period);
        }
        for op in [StandardOp::Abs, StandardOp::CumSum, StandardOp::CumMax] {
            prop_assert_eq!(line.standard(op, None).unwrap().minperiod(), m);
        }
    }
}

// ==================== Smoothing Properties ====================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Smoothing a constant returns that constant
    #[test]
    fn prop_smoothing_constant_input(constant in 1.0..1000.0_f64, len in 30usize..60, period in 1usize..=20) {
        let line = Line::new(vec![constant; len]);
        for config in [Smoothing::span(period), Smoothing::wilder(period)] {
            let out = line.ewm(&config).unwrap();
            prop_assert_eq!(out.minperiod(), period);
            for value in out.valid() {
                prop_assert!((value - constant).abs() < 1e-9 * constant);
            }
        }
    }

    /// Smoothing stays within the range of its input
    #[test]
    fn prop_smoothing_bounded(data in arb_price_series(30, 100), period in 1usize..=20) {
        let lo = data.iter().copied().fold(f64::MAX, f64::min);
        let hi = data.iter().copied().fold(f64::MIN, f64::max);
        let out = Line::new(data).ewm(&Smoothing::span(period)).unwrap();
        for value in out.valid() {
            prop_assert!(*value >= lo - 1e-9 && *value <= hi + 1e-9);
        }
    }

    /// A constant dynamic factor reproduces the constant path exactly
    #[test]
    fn prop_dynamic_constant_alpha(data in arb_price_series(30, 80), period in 1usize..=20) {
        let line = Line::new(data);
        let alpha = 2.0 / (period as f64 + 1.0);
        let constant = line.ewm(&Smoothing::alpha(alpha, period)).unwrap();
        let dynamic_alpha = Line::new(vec![alpha; line.len()]);
        let dynamic = line.ewm(&Smoothing::dynamic(dynamic_alpha, period)).unwrap();
        prop_assert_eq!(constant.minperiod(), dynamic.minperiod());
        prop_assert_eq!(constant.valid(), dynamic.valid());
    }

    /// The seed plan lands where the result minperiod says it does
    #[test]
    fn prop_seed_plan_consistent(line in arb_warmed_line(), period in 1usize..=20, poffset in 0usize..30) {
        let config = Smoothing::span(period).poffset(poffset);
        let Ok(plan) = config.plan(line.minperiod()) else {
            return Ok(());
        };
        prop_assume!(plan.seed_end <= line.len());
        let out = line.ewm(&config).unwrap();
        prop_assert_eq!(out.minperiod(), plan.minperiod);
        prop_assert!(!out.values()[plan.seed_index()].is_nan());
    }
}

// ==================== Wrapping Properties ====================

proptest! {
    /// Wrapping is idempotent on minperiod and values
    #[test]
    fn prop_wrap_idempotent(line in arb_warmed_line()) {
        let once = Line::wrap(LineSource::Line(&line), None).unwrap();
        let twice = Line::wrap(LineSource::Line(&once), Some("again")).unwrap();
        prop_assert_eq!(twice.minperiod(), line.minperiod());
        prop_assert_eq!(twice.valid(), line.valid());
    }
}
