// Tests for one-sample z-test / t-test evaluation
//
// Expected values come from standard normal and Student-t tables:
// - one-tailed 5%: 1.645, two-tailed 5%: 1.960
// - t(0.995, df=48) = 2.682

use super::*;
use crate::error::EvaluationError;

fn assert_close(actual: f64, expected: f64, tol: f64, what: &str) {
    assert!(
        (actual - expected).abs() <= tol,
        "{what}: expected {expected}, got {actual} (tol {tol})"
    );
}

/// Portfolio alpha: fund claims returns above the 12% market return
#[test]
fn test_portfolio_alpha_right_tailed_z() {
    let input = TestInput::new(13.5, 12.0, 6.0, 36, 0.05, Tail::Right);
    let result = evaluate_z(&input).unwrap();

    assert_close(result.statistic, 1.500, 5e-4, "statistic");
    assert_close(result.critical_value.value(), 1.645, 5e-4, "critical");
    assert_close(result.p_value, 0.067, 5e-4, "p-value");
    assert!(!result.reject_null);
    assert!(matches!(result.critical_value, CriticalValue::Upper(_)));
    assert_eq!(result.degrees_of_freedom, None);
}

/// VaR change: has daily VaR moved away from 50 lakhs?
#[test]
fn test_var_change_two_tailed_z() {
    let input = TestInput::new(47.5, 50.0, 12.0, 64, 0.05, Tail::Two);
    let result = evaluate_z(&input).unwrap();

    assert_close(result.statistic, -1.667, 5e-4, "statistic");
    assert_close(result.critical_value.value(), 1.960, 5e-4, "critical");
    assert_close(result.p_value, 0.096, 5e-4, "p-value");
    assert!(!result.reject_null);
    assert!(matches!(result.critical_value, CriticalValue::TwoSided(_)));
}

/// Bond duration: has modified duration moved away from 7 years?
#[test]
fn test_bond_duration_two_tailed_t() {
    let input = TestInput::new(7.84, 7.0, 2.94, 49, 0.01, Tail::Two);
    let result = evaluate_t(&input).unwrap();

    assert_close(result.statistic, 2.000, 5e-4, "statistic");
    assert_close(result.critical_value.value(), 2.685, 5e-3, "critical");
    assert_close(result.critical_value.value(), 2.682, 1e-3, "critical (table)");
    assert_close(result.p_value, 0.049, 5e-3, "p-value");
    assert!(!result.reject_null);
    assert_eq!(result.degrees_of_freedom, Some(48));
}

/// Drug trial: does the drug lower systolic BP below 140 mmHg?
#[test]
fn test_drug_trial_left_tailed_z() {
    let input = TestInput::new(138.5, 140.0, 8.0, 64, 0.05, Tail::Left);
    let result = evaluate_z(&input).unwrap();

    assert_close(result.statistic, -1.500, 5e-4, "statistic");
    assert_close(result.critical_value.value(), -1.645, 5e-4, "critical");
    assert_close(result.p_value, 0.067, 5e-4, "p-value");
    assert!(!result.reject_null);
    assert!(matches!(result.critical_value, CriticalValue::Lower(_)));
}

#[test]
fn test_right_tailed_rejection() {
    // z = 2.0 > 1.645
    let input = TestInput::new(14.0, 12.0, 8.0, 64, 0.05, Tail::Right);
    let result = evaluate_z(&input).unwrap();
    assert_close(result.statistic, 2.0, 1e-9, "statistic");
    assert!(result.reject_null);
    assert!(result.p_value < 0.05);
}

#[test]
fn test_same_data_rejected_one_tailed_not_two_tailed() {
    // z = 1.75 sits between 1.645 and 1.960
    let one = TestInput::new(1.75, 0.0, 1.0, 1, 0.05, Tail::Right);
    let two = one.with_tail(Tail::Two);

    assert!(evaluate_z(&one).unwrap().reject_null);
    assert!(!evaluate_z(&two).unwrap().reject_null);
}

#[test]
fn test_zero_deviation_gives_zero_statistic() {
    let input = TestInput::new(5.0, 5.0, 1e-320, 1_000_000, 0.05, Tail::Two);
    let result = evaluate_z(&input).unwrap();
    assert_eq!(result.statistic, 0.0);
    assert_close(result.p_value, 1.0, 1e-12, "p-value");
    assert!(!result.reject_null);
}

#[test]
fn test_tiny_dispersion_gives_extreme_statistic() {
    let input = TestInput::new(5.1, 5.0, 1e-300, 100, 0.05, Tail::Right);
    let result = evaluate_z(&input).unwrap();
    assert!(result.statistic > 1e250);
    assert!(result.reject_null);
    assert!(result.p_value >= 0.0 && result.p_value < 1e-9);
}

#[test]
fn test_p_value_bounded_for_all_tails() {
    for tail in Tail::ALL {
        for mean in [-50.0, -1.0, 0.0, 0.3, 2.5, 80.0] {
            let input = TestInput::new(mean, 0.0, 1.0, 4, 0.05, tail);
            for kind in [TestKind::Z, TestKind::T] {
                let result = evaluate(kind, &input).unwrap();
                assert!(
                    (0.0..=1.0).contains(&result.p_value),
                    "{kind} {tail} mean={mean}: p={}",
                    result.p_value
                );
            }
        }
    }
}

#[test]
fn test_decision_matches_p_value() {
    for tail in Tail::ALL {
        for mean in [-3.0, -2.0, -1.7, -0.4, 0.0, 0.4, 1.7, 2.0, 3.0] {
            for alpha in [0.10, 0.05, 0.025, 0.01, 0.005] {
                let input = TestInput::new(mean, 0.0, 1.0, 1, alpha, tail);
                let result = evaluate_z(&input).unwrap();
                assert_eq!(
                    result.reject_null,
                    result.p_value < alpha,
                    "tail={tail} mean={mean} alpha={alpha} p={}",
                    result.p_value
                );
            }
        }
    }
}

#[test]
fn test_two_tailed_critical_symmetry() {
    let dist = StatrsDistributions::new();
    for alpha in [0.2, 0.1, 0.05, 0.01, 0.001] {
        let upper = dist.normal_inv_cdf(1.0 - alpha / 2.0);
        let lower = dist.normal_inv_cdf(alpha / 2.0);
        assert_close(upper, -lower, 1e-9, "symmetric quantiles");
    }
}

#[test]
fn test_t_critical_exceeds_z_critical() {
    for tail in [Tail::Right, Tail::Two] {
        let input = TestInput::new(1.0, 0.0, 1.0, 31, 0.05, tail);
        let z = evaluate_z(&input).unwrap();
        let t = evaluate_t(&input).unwrap();
        assert!(t.critical_value.value() > z.critical_value.value());
        assert!(t.p_value > z.p_value);
    }
}

#[test]
fn test_t_converges_to_z() {
    let input = TestInput::new(10.05, 10.0, 2.0, 10_000, 0.05, Tail::Two);
    let z = evaluate_z(&input).unwrap();
    let t = evaluate_t(&input).unwrap();

    assert_close(t.statistic, z.statistic, 1e-3, "statistic");
    assert_close(
        t.critical_value.value(),
        z.critical_value.value(),
        1e-3,
        "critical",
    );
    assert_close(t.p_value, z.p_value, 1e-3, "p-value");
}

#[test]
fn test_tiny_alpha_keeps_finite_critical_values() {
    // 1 - α rounds to 1 here; the upper boundary must still be finite
    for alpha in [1e-17, 1e-40] {
        for kind in [TestKind::Z, TestKind::T] {
            for tail in Tail::ALL {
                let mean = if tail == Tail::Left { -15.0 } else { 15.0 };
                let input = TestInput::new(mean, 0.0, 1.0, 10_000, alpha, tail);
                let result = evaluate(kind, &input).unwrap();

                let what = format!("{kind} {tail} alpha={alpha}");
                assert!(result.critical_value.value().is_finite(), "{what}");
                assert!(result.p_value < alpha, "{what}");
                assert!(result.reject_null, "{what}");
            }
        }
    }
}

#[test]
fn test_tiny_alpha_moderate_statistic_not_rejected() {
    // z = 5: p ≈ 2.9e-7 one-tailed, far above α
    for kind in [TestKind::Z, TestKind::T] {
        for tail in Tail::ALL {
            let input = TestInput::new(0.05, 0.0, 1.0, 10_000, 1e-17, tail);
            let result = evaluate(kind, &input).unwrap();
            assert!(result.critical_value.value().is_finite());
            assert!(!result.reject_null, "{kind} {tail}");
        }
    }
}

#[test]
fn test_tiny_alpha_confidence_interval_is_finite() {
    let input = TestInput::new(15.0, 0.0, 1.0, 10_000, 1e-40, Tail::Two);
    for kind in [TestKind::Z, TestKind::T] {
        let ci = confidence_interval(kind, &input).unwrap();
        assert!(ci.lower.is_finite() && ci.upper.is_finite());
        assert!(ci.lower < 15.0 && ci.upper > 15.0);
        assert!(!ci.contains(0.0));
    }
}

#[test]
fn test_huge_sample_t_returns_and_matches_z() {
    for n in [100_000_000, u64::MAX] {
        let input = TestInput::new(1.0, 0.999, 1.0, n, 0.05, Tail::Two);
        let z = evaluate_z(&input).unwrap();
        let t = evaluate_t(&input).unwrap();

        assert_eq!(t.degrees_of_freedom, Some(n - 1));
        assert_close(t.statistic, z.statistic, 1e-9, "statistic");
        assert_close(
            t.critical_value.value(),
            z.critical_value.value(),
            1e-9,
            "critical",
        );
        assert_close(t.p_value, z.p_value, 1e-9, "p-value");
        assert_eq!(t.reject_null, z.reject_null);
    }
}

// ============================================================================
// Input validation
// ============================================================================

fn valid() -> TestInput {
    TestInput::new(13.5, 12.0, 6.0, 36, 0.05, Tail::Right)
}

fn assert_invalid(result: crate::error::Result<TestResult>, field: &str) {
    match result {
        Err(EvaluationError::InvalidInput { field: got, .. }) => assert_eq!(got, field),
        other => panic!("expected InvalidInput({field}), got {other:?}"),
    }
}

#[test]
fn test_zero_dispersion_rejected() {
    let input = TestInput {
        dispersion: 0.0,
        ..valid()
    };
    assert_invalid(evaluate_z(&input), "dispersion");
    assert_invalid(evaluate_t(&input), "dispersion");
}

#[test]
fn test_negative_dispersion_rejected() {
    let input = TestInput {
        dispersion: -6.0,
        ..valid()
    };
    assert_invalid(evaluate_z(&input), "dispersion");
    assert_invalid(evaluate_t(&input), "dispersion");
}

#[test]
fn test_zero_sample_size_rejected() {
    let input = TestInput {
        sample_size: 0,
        ..valid()
    };
    assert_invalid(evaluate_z(&input), "sample_size");
    assert_invalid(evaluate_t(&input), "sample_size");
}

#[test]
fn test_single_observation_rejected_for_t_only() {
    let input = TestInput {
        sample_size: 1,
        ..valid()
    };
    assert!(evaluate_z(&input).is_ok());
    assert_invalid(evaluate_t(&input), "sample_size");
}

#[test]
fn test_significance_level_bounds_rejected() {
    for alpha in [0.0, 1.0, -0.05, 1.5, f64::NAN] {
        let input = valid().with_significance_level(alpha);
        assert_invalid(evaluate_z(&input), "significance_level");
        assert_invalid(evaluate_t(&input), "significance_level");
    }
}

#[test]
fn test_any_open_interval_alpha_accepted() {
    for alpha in [f64::MIN_POSITIVE, 1e-17, 1e-6, 0.07, 0.33, 0.999, 1.0 - 1e-16] {
        let input = valid().with_significance_level(alpha);
        for kind in [TestKind::Z, TestKind::T] {
            let result = evaluate(kind, &input).unwrap();
            assert!(
                result.critical_value.value().is_finite(),
                "{kind} alpha={alpha}"
            );
        }
    }
}

#[test]
fn test_unrecognized_tail_rejected() {
    let err = "sideways".parse::<Tail>().unwrap_err();
    assert!(matches!(
        err,
        EvaluationError::InvalidInput { field: "tail", .. }
    ));
}

// ============================================================================
// Confidence interval
// ============================================================================

#[test]
fn test_confidence_interval_known_sigma() {
    let input = TestInput::new(47.5, 50.0, 12.0, 64, 0.05, Tail::Two);
    let ci = confidence_interval(TestKind::Z, &input).unwrap();
    // 47.5 ± 1.96 × 1.5
    assert_close(ci.lower, 44.560, 1e-3, "lower");
    assert_close(ci.upper, 50.440, 1e-3, "upper");
    assert_close(ci.confidence_level, 0.95, 1e-12, "level");
}

#[test]
fn test_confidence_interval_agrees_with_two_tailed_decision() {
    let cases = [
        TestInput::new(47.5, 50.0, 12.0, 64, 0.05, Tail::Two),
        TestInput::new(7.84, 7.0, 2.94, 49, 0.01, Tail::Two),
        TestInput::new(499.1, 500.0, 4.0, 100, 0.05, Tail::Two),
    ];
    for input in cases {
        for kind in [TestKind::Z, TestKind::T] {
            let ci = confidence_interval(kind, &input).unwrap();
            let result = evaluate(kind, &input).unwrap();
            assert_eq!(ci.contains(input.hypothesized_mean), !result.reject_null);
        }
    }
}

// ============================================================================
// Provider seam
// ============================================================================

/// Backend with a fixed quantile, to check the evaluator only composes calls
///
/// Every quantile is -2, so an upper boundary comes out at +2.
struct FixedQuantile;

impl DistributionProvider for FixedQuantile {
    fn normal_cdf(&self, x: f64) -> f64 {
        StatrsDistributions::new().normal_cdf(x)
    }

    fn normal_inv_cdf(&self, _p: f64) -> f64 {
        -2.0
    }

    fn t_cdf(&self, _x: f64, _df: u64) -> crate::error::Result<f64> {
        Err(EvaluationError::Distribution("t unsupported".into()))
    }

    fn t_inv_cdf(&self, _p: f64, _df: u64) -> crate::error::Result<f64> {
        Err(EvaluationError::Distribution("t unsupported".into()))
    }
}

#[test]
fn test_custom_provider_is_used() {
    let input = TestInput::new(1.9, 0.0, 1.0, 1, 0.05, Tail::Right);
    let result = evaluate_with(&FixedQuantile, TestKind::Z, &input).unwrap();
    assert_eq!(result.critical_value, CriticalValue::Upper(2.0));
    assert!(!result.reject_null);
}

#[test]
fn test_provider_errors_propagate() {
    let input = TestInput::new(1.9, 0.0, 1.0, 5, 0.05, Tail::Right);
    let err = evaluate_with(&FixedQuantile, TestKind::T, &input).unwrap_err();
    assert!(matches!(err, EvaluationError::Distribution(_)));
}
