// Output of a single evaluation
//
// The critical value is kept as a tagged variant so a two-tailed region is
// never confused with a one-sided boundary of the same magnitude.

use crate::evaluator::input::{Tail, TestKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Boundary of the rejection region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "region", content = "value", rename_all = "snake_case")]
pub enum CriticalValue {
    /// Reject when statistic > value
    Upper(f64),
    /// Reject when statistic < value
    Lower(f64),
    /// Reject when |statistic| > value; boundaries are ±value
    TwoSided(f64),
}

impl CriticalValue {
    /// The signed boundary for one-sided regions, the magnitude for two-sided
    pub fn value(self) -> f64 {
        match self {
            CriticalValue::Upper(v) | CriticalValue::Lower(v) | CriticalValue::TwoSided(v) => v,
        }
    }

    /// (lower, upper) boundaries; `None` where the region is unbounded on that side
    pub fn bounds(self) -> (Option<f64>, Option<f64>) {
        match self {
            CriticalValue::Upper(v) => (None, Some(v)),
            CriticalValue::Lower(v) => (Some(v), None),
            CriticalValue::TwoSided(v) => (Some(-v), Some(v)),
        }
    }

    /// True iff `statistic` falls inside the rejection region
    pub fn rejects(self, statistic: f64) -> bool {
        match self {
            CriticalValue::Upper(v) => statistic > v,
            CriticalValue::Lower(v) => statistic < v,
            CriticalValue::TwoSided(v) => statistic.abs() > v,
        }
    }
}

impl fmt::Display for CriticalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(3);
        match self {
            CriticalValue::Upper(v) | CriticalValue::Lower(v) => {
                write!(f, "{:+.*}", precision, v)
            }
            CriticalValue::TwoSided(v) => write!(f, "±{:.*}", precision, v),
        }
    }
}

/// Statistic, critical value, p-value and decision for one test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub kind: TestKind,
    pub tail: Tail,
    /// z or t
    pub statistic: f64,
    pub critical_value: CriticalValue,
    /// In [0, 1]
    pub p_value: f64,
    pub reject_null: bool,
    pub significance_level: f64,
    pub standard_error: f64,
    /// n - 1 for a t-test
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degrees_of_freedom: Option<u64>,
}

impl TestResult {
    /// "REJECT H₀" or "FAIL TO REJECT H₀"
    pub fn decision_label(&self) -> &'static str {
        if self.reject_null {
            "REJECT H₀"
        } else {
            "FAIL TO REJECT H₀"
        }
    }
}

/// Two-sided (1 - α) confidence interval for the population mean
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
    /// 1 - α
    pub confidence_level: f64,
}

impl ConfidenceInterval {
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upper_region() {
        let cv = CriticalValue::Upper(1.645);
        assert!(cv.rejects(1.7));
        assert!(!cv.rejects(1.5));
        assert!(!cv.rejects(-3.0));
        assert_eq!(cv.bounds(), (None, Some(1.645)));
    }

    #[test]
    fn test_lower_region() {
        let cv = CriticalValue::Lower(-1.645);
        assert!(cv.rejects(-2.0));
        assert!(!cv.rejects(-1.5));
        assert!(!cv.rejects(3.0));
    }

    #[test]
    fn test_two_sided_region() {
        let cv = CriticalValue::TwoSided(1.96);
        assert!(cv.rejects(2.0));
        assert!(cv.rejects(-2.0));
        assert!(!cv.rejects(1.9));
        assert_eq!(cv.bounds(), (Some(-1.96), Some(1.96)));
        assert_eq!(cv.value(), 1.96);
    }

    #[test]
    fn test_boundary_is_not_rejected() {
        assert!(!CriticalValue::Upper(1.645).rejects(1.645));
        assert!(!CriticalValue::TwoSided(1.96).rejects(-1.96));
    }

    #[test]
    fn test_display() {
        assert_eq!(CriticalValue::Upper(1.6448).to_string(), "+1.645");
        assert_eq!(CriticalValue::Lower(-1.6448).to_string(), "-1.645");
        assert_eq!(format!("{:.2}", CriticalValue::TwoSided(1.96)), "±1.96");
    }

    #[test]
    fn test_confidence_interval_contains() {
        let ci = ConfidenceInterval {
            lower: 44.56,
            upper: 50.44,
            confidence_level: 0.95,
        };
        assert!(ci.contains(47.5));
        assert!(!ci.contains(50.5));
        assert!((ci.width() - 5.88).abs() < 1e-9);
    }

    #[test]
    fn test_serializes_region_tag() {
        let json = serde_json::to_string(&CriticalValue::TwoSided(1.96)).unwrap();
        assert_eq!(json, r#"{"region":"two_sided","value":1.96}"#);
    }
}
