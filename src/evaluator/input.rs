// Inputs to a one-sample z-test or t-test
//
// A TestInput is the whole contract on the way in: five scalars plus the
// direction of the alternative hypothesis. It is validated before any
// distribution function is called.

use crate::error::{EvaluationError, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of the alternative hypothesis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Tail {
    /// H₁: μ > μ₀
    Right,
    /// H₁: μ < μ₀
    Left,
    /// H₁: μ ≠ μ₀
    Two,
}

impl Tail {
    pub const ALL: [Tail; 3] = [Tail::Right, Tail::Left, Tail::Two];

    /// Relation used in H₁ (">", "<" or "≠")
    pub fn alternative_relation(self) -> &'static str {
        match self {
            Tail::Right => ">",
            Tail::Left => "<",
            Tail::Two => "≠",
        }
    }

    /// Relation used in H₀, the complement of the alternative
    pub fn null_relation(self) -> &'static str {
        match self {
            Tail::Right => "≤",
            Tail::Left => "≥",
            Tail::Two => "=",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tail::Right => "right-tailed",
            Tail::Left => "left-tailed",
            Tail::Two => "two-tailed",
        }
    }
}

impl fmt::Display for Tail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tail::Right => "right",
            Tail::Left => "left",
            Tail::Two => "two",
        };
        f.write_str(name)
    }
}

impl FromStr for Tail {
    type Err = EvaluationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "right" => Ok(Tail::Right),
            "left" => Ok(Tail::Left),
            "two" => Ok(Tail::Two),
            _ => Err(EvaluationError::invalid(
                "tail",
                format!("{s:?}"),
                "one of \"right\", \"left\", \"two\"",
            )),
        }
    }
}

/// Which reference distribution the statistic is compared against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TestKind {
    /// σ known: standard normal reference
    Z,
    /// σ estimated by s: Student-t with n - 1 degrees of freedom
    T,
}

impl TestKind {
    /// Symbol of the statistic ("z" or "t")
    pub fn symbol(self) -> &'static str {
        match self {
            TestKind::Z => "z",
            TestKind::T => "t",
        }
    }

    /// Smallest sample size the test is defined for
    pub fn min_sample_size(self) -> u64 {
        match self {
            TestKind::Z => 1,
            TestKind::T => 2,
        }
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-test", self.symbol())
    }
}

/// Sample statistics and test settings for a single evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestInput {
    /// Observed sample mean x̄
    pub sample_mean: f64,
    /// Null-hypothesis reference value μ₀
    pub hypothesized_mean: f64,
    /// σ for a z-test, s for a t-test
    pub dispersion: f64,
    /// n
    pub sample_size: u64,
    /// α, strictly between 0 and 1
    pub significance_level: f64,
    pub tail: Tail,
}

impl TestInput {
    pub fn new(
        sample_mean: f64,
        hypothesized_mean: f64,
        dispersion: f64,
        sample_size: u64,
        significance_level: f64,
        tail: Tail,
    ) -> Self {
        Self {
            sample_mean,
            hypothesized_mean,
            dispersion,
            sample_size,
            significance_level,
            tail,
        }
    }

    /// Same data, different α
    pub fn with_significance_level(self, significance_level: f64) -> Self {
        Self {
            significance_level,
            ..self
        }
    }

    /// Same data, different direction
    pub fn with_tail(self, tail: Tail) -> Self {
        Self { tail, ..self }
    }

    /// σ/√n (or s/√n)
    pub fn standard_error(&self) -> f64 {
        self.dispersion / (self.sample_size as f64).sqrt()
    }

    /// Check every precondition of `kind` without computing anything
    pub fn validate(&self, kind: TestKind) -> Result<()> {
        if !self.sample_mean.is_finite() {
            return Err(EvaluationError::invalid(
                "sample_mean",
                self.sample_mean,
                "a finite number",
            ));
        }

        if !self.hypothesized_mean.is_finite() {
            return Err(EvaluationError::invalid(
                "hypothesized_mean",
                self.hypothesized_mean,
                "a finite number",
            ));
        }

        // NaN fails this comparison too
        if !(self.dispersion > 0.0 && self.dispersion.is_finite()) {
            return Err(EvaluationError::invalid(
                "dispersion",
                self.dispersion,
                "a finite value > 0",
            ));
        }

        if self.sample_size < kind.min_sample_size() {
            let constraint = match kind {
                TestKind::Z => ">= 1",
                TestKind::T => ">= 2 (degrees of freedom n - 1 must be >= 1)",
            };
            return Err(EvaluationError::invalid(
                "sample_size",
                self.sample_size,
                constraint,
            ));
        }

        if !(self.significance_level > 0.0 && self.significance_level < 1.0) {
            return Err(EvaluationError::invalid(
                "significance_level",
                self.significance_level,
                "a value in the open interval (0, 1)",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> TestInput {
        TestInput::new(13.5, 12.0, 6.0, 36, 0.05, Tail::Right)
    }

    #[test]
    fn test_tail_from_str() {
        assert_eq!("right".parse::<Tail>().unwrap(), Tail::Right);
        assert_eq!(" Left ".parse::<Tail>().unwrap(), Tail::Left);
        assert_eq!("TWO".parse::<Tail>().unwrap(), Tail::Two);
    }

    #[test]
    fn test_tail_from_str_rejects_unknown() {
        let err = "both".parse::<Tail>().unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("tail"));
    }

    #[test]
    fn test_tail_display_round_trips() {
        for tail in Tail::ALL {
            assert_eq!(tail.to_string().parse::<Tail>().unwrap(), tail);
        }
    }

    #[test]
    fn test_tail_relations() {
        assert_eq!(Tail::Right.alternative_relation(), ">");
        assert_eq!(Tail::Right.null_relation(), "≤");
        assert_eq!(Tail::Two.alternative_relation(), "≠");
        assert_eq!(Tail::Left.null_relation(), "≥");
    }

    #[test]
    fn test_standard_error() {
        assert!((input().standard_error() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_valid_input_passes_both_kinds() {
        assert!(input().validate(TestKind::Z).is_ok());
        assert!(input().validate(TestKind::T).is_ok());
    }

    #[test]
    fn test_single_observation_only_valid_for_z() {
        let single = TestInput {
            sample_size: 1,
            ..input()
        };
        assert!(single.validate(TestKind::Z).is_ok());
        assert!(single.validate(TestKind::T).is_err());
    }

    #[test]
    fn test_nan_dispersion_rejected() {
        let bad = TestInput {
            dispersion: f64::NAN,
            ..input()
        };
        assert!(bad.validate(TestKind::Z).is_err());
    }

    #[test]
    fn test_infinite_sample_mean_rejected() {
        let bad = TestInput {
            sample_mean: f64::INFINITY,
            ..input()
        };
        let err = bad.validate(TestKind::Z).unwrap_err();
        assert!(err.to_string().contains("sample_mean"));
    }

    #[test]
    fn test_with_helpers_keep_data() {
        let changed = input().with_significance_level(0.01).with_tail(Tail::Two);
        assert_eq!(changed.sample_mean, 13.5);
        assert_eq!(changed.significance_level, 0.01);
        assert_eq!(changed.tail, Tail::Two);
    }
}
