// One-sample hypothesis test evaluation
//
// Given x̄, μ₀, a dispersion, n, α and a tail, compute the standardized
// statistic, the critical value, the p-value and the reject / fail-to-reject
// decision.
//
//   se        = dispersion / √n
//   statistic = (x̄ - μ₀) / se
//
//   right: crit = -Q(α)         reject iff stat > crit     p = 1 - F(stat)
//   left:  crit = Q(α)          reject iff stat < crit     p = F(stat)
//   two:   crit = -Q(α/2)       reject iff |stat| > crit   p = 2(1 - F(|stat|))
//
// F and Q are the standard normal CDF / quantile for the z-test and the
// Student-t CDF / quantile with n - 1 degrees of freedom for the t-test.
// Upper quantiles go through symmetry, Q(1 - a) = -Q(a): 1 - a rounds to 1
// for a below 1e-16 and Q(1) is infinite.
// Evaluation is pure: no state, no I/O.

mod input;
mod result;

pub use input::{Tail, TestInput, TestKind};
pub use result::{ConfidenceInterval, CriticalValue, TestResult};

use crate::distribution::{DistributionProvider, StatrsDistributions};
use crate::error::Result;

/// Reference distribution of the statistic under H₀
#[derive(Debug, Clone, Copy)]
enum Reference {
    Normal,
    StudentT { df: u64 },
}

impl Reference {
    fn for_test(kind: TestKind, input: &TestInput) -> Self {
        match kind {
            TestKind::Z => Reference::Normal,
            TestKind::T => Reference::StudentT {
                df: input.sample_size - 1,
            },
        }
    }

    fn degrees_of_freedom(self) -> Option<u64> {
        match self {
            Reference::Normal => None,
            Reference::StudentT { df } => Some(df),
        }
    }

    fn cdf<D: DistributionProvider + ?Sized>(self, dist: &D, x: f64) -> Result<f64> {
        match self {
            Reference::Normal => Ok(dist.normal_cdf(x)),
            Reference::StudentT { df } => dist.t_cdf(x, df),
        }
    }

    fn sf<D: DistributionProvider + ?Sized>(self, dist: &D, x: f64) -> Result<f64> {
        match self {
            Reference::Normal => Ok(dist.normal_sf(x)),
            Reference::StudentT { df } => dist.t_sf(x, df),
        }
    }

    fn quantile<D: DistributionProvider + ?Sized>(self, dist: &D, p: f64) -> Result<f64> {
        match self {
            Reference::Normal => Ok(dist.normal_inv_cdf(p)),
            Reference::StudentT { df } => dist.t_inv_cdf(p, df),
        }
    }

    /// The x with P(X > x) = `tail`
    fn upper_quantile<D: DistributionProvider + ?Sized>(self, dist: &D, tail: f64) -> Result<f64> {
        Ok(-self.quantile(dist, tail)?)
    }
}

/// z-test with known population standard deviation
///
/// # Example
/// ```
/// use hypotest::evaluator::{evaluate_z, Tail, TestInput};
///
/// let input = TestInput::new(13.5, 12.0, 6.0, 36, 0.05, Tail::Right);
/// let result = evaluate_z(&input).unwrap();
/// assert!((result.statistic - 1.5).abs() < 1e-9);
/// assert!(!result.reject_null);
/// ```
pub fn evaluate_z(input: &TestInput) -> Result<TestResult> {
    evaluate(TestKind::Z, input)
}

/// t-test with the sample standard deviation; requires n >= 2
///
/// # Example
/// ```
/// use hypotest::evaluator::{evaluate_t, Tail, TestInput};
///
/// let input = TestInput::new(7.84, 7.0, 2.94, 49, 0.01, Tail::Two);
/// let result = evaluate_t(&input).unwrap();
/// assert_eq!(result.degrees_of_freedom, Some(48));
/// assert!(!result.reject_null);
/// ```
pub fn evaluate_t(input: &TestInput) -> Result<TestResult> {
    evaluate(TestKind::T, input)
}

/// Evaluate with the default `statrs` backend
pub fn evaluate(kind: TestKind, input: &TestInput) -> Result<TestResult> {
    evaluate_with(&StatrsDistributions::new(), kind, input)
}

/// Evaluate against an explicit distribution backend
pub fn evaluate_with<D: DistributionProvider + ?Sized>(
    dist: &D,
    kind: TestKind,
    input: &TestInput,
) -> Result<TestResult> {
    input.validate(kind)?;

    let reference = Reference::for_test(kind, input);
    let alpha = input.significance_level;
    let standard_error = input.standard_error();

    // se can underflow to 0; an exact match still means "no deviation"
    let deviation = input.sample_mean - input.hypothesized_mean;
    let statistic = if deviation == 0.0 {
        0.0
    } else {
        deviation / standard_error
    };

    let (critical_value, p_value) = match input.tail {
        Tail::Right => (
            CriticalValue::Upper(reference.upper_quantile(dist, alpha)?),
            reference.sf(dist, statistic)?,
        ),
        Tail::Left => (
            CriticalValue::Lower(reference.quantile(dist, alpha)?),
            reference.cdf(dist, statistic)?,
        ),
        Tail::Two => (
            CriticalValue::TwoSided(reference.upper_quantile(dist, alpha / 2.0)?),
            2.0 * reference.sf(dist, statistic.abs())?,
        ),
    };
    let p_value = p_value.clamp(0.0, 1.0);
    let reject_null = critical_value.rejects(statistic);

    tracing::debug!(
        kind = %kind,
        tail = %input.tail,
        statistic,
        critical = critical_value.value(),
        p_value,
        reject_null,
        "evaluated hypothesis test"
    );

    Ok(TestResult {
        kind,
        tail: input.tail,
        statistic,
        critical_value,
        p_value,
        reject_null,
        significance_level: alpha,
        standard_error,
        degrees_of_freedom: reference.degrees_of_freedom(),
    })
}

/// Two-sided (1 - α) interval x̄ ± crit · se; the tail of `input` is ignored
pub fn confidence_interval(kind: TestKind, input: &TestInput) -> Result<ConfidenceInterval> {
    confidence_interval_with(&StatrsDistributions::new(), kind, input)
}

pub fn confidence_interval_with<D: DistributionProvider + ?Sized>(
    dist: &D,
    kind: TestKind,
    input: &TestInput,
) -> Result<ConfidenceInterval> {
    input.validate(kind)?;

    let reference = Reference::for_test(kind, input);
    let alpha = input.significance_level;
    let margin = reference.upper_quantile(dist, alpha / 2.0)? * input.standard_error();

    Ok(ConfidenceInterval {
        lower: input.sample_mean - margin,
        upper: input.sample_mean + margin,
        confidence_level: 1.0 - alpha,
    })
}

#[cfg(test)]
mod tests;
