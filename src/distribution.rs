//! Distribution capability used by the evaluator
//!
//! The evaluator composes CDF and quantile calls; it never implements them.
//! Any numeric backend can stand in by implementing [`DistributionProvider`].
//! [`StatrsDistributions`] is the default backend, built on `statrs`.

use crate::error::{EvaluationError, Result};
use statrs::distribution::{ContinuousCDF, Normal, StudentsT};

/// Standard normal and Student-t CDF / inverse-CDF
pub trait DistributionProvider {
    /// Φ(x)
    fn normal_cdf(&self, x: f64) -> f64;

    /// Φ⁻¹(p) for p in (0, 1)
    fn normal_inv_cdf(&self, p: f64) -> f64;

    /// Student-t CDF with `df` degrees of freedom
    fn t_cdf(&self, x: f64, df: u64) -> Result<f64>;

    /// Student-t quantile with `df` degrees of freedom
    fn t_inv_cdf(&self, p: f64, df: u64) -> Result<f64>;

    /// 1 - Φ(x)
    fn normal_sf(&self, x: f64) -> f64 {
        1.0 - self.normal_cdf(x)
    }

    /// 1 - T_df(x)
    fn t_sf(&self, x: f64, df: u64) -> Result<f64> {
        Ok(1.0 - self.t_cdf(x, df)?)
    }
}

/// From this many degrees of freedom on, Student-t is evaluated as the
/// standard normal. The quantile gap is about (z³ + z) / (4·df): under 2e-4
/// for |z| ≤ 4 at this df.
pub const NORMAL_LIMIT_DF: u64 = 100_000;

/// Student-t tail probabilities below this are inverted by bisection on the
/// survival function. statrs' beta inversion stops on an absolute tolerance
/// and does not terminate once the squared tail underflows.
const DIRECT_QUANTILE_MIN_TAIL: f64 = 1e-4;

/// `statrs`-backed provider
///
/// Student-t with at least [`NORMAL_LIMIT_DF`] degrees of freedom is served
/// by the normal, so evaluation time does not grow with the sample size.
#[derive(Debug, Clone)]
pub struct StatrsDistributions {
    normal: Normal,
}

impl StatrsDistributions {
    pub fn new() -> Self {
        Self {
            normal: Normal::standard(),
        }
    }

    fn students_t(df: u64) -> Result<StudentsT> {
        if df == 0 {
            return Err(EvaluationError::invalid(
                "degrees_of_freedom",
                df,
                ">= 1",
            ));
        }
        StudentsT::new(0.0, 1.0, df as f64)
            .map_err(|e| EvaluationError::Distribution(format!("Student-t(df={df}): {e}")))
    }

    /// `None` when `df` is large enough to use the normal instead
    fn finite_t(df: u64) -> Result<Option<StudentsT>> {
        if df >= NORMAL_LIMIT_DF {
            return Ok(None);
        }
        Self::students_t(df).map(Some)
    }
}

/// The t with P(T > t) = `tail`, for a tail below 1/2
///
/// Doubles an upper bound until the survival function drops to `tail`, then
/// bisects down to adjacent floats. The survival function reaches 0 once t²
/// overflows, so the doubling always stops.
fn t_upper_quantile(dist: &StudentsT, tail: f64) -> f64 {
    let mut lo = 0.0;
    let mut hi = 1.0;
    while dist.sf(hi) > tail {
        lo = hi;
        hi *= 2.0;
    }

    loop {
        let mid = 0.5 * (lo + hi);
        if mid <= lo || mid >= hi {
            return hi;
        }
        if dist.sf(mid) > tail {
            lo = mid;
        } else {
            hi = mid;
        }
    }
}

impl Default for StatrsDistributions {
    fn default() -> Self {
        Self::new()
    }
}

impl DistributionProvider for StatrsDistributions {
    fn normal_cdf(&self, x: f64) -> f64 {
        self.normal.cdf(x)
    }

    fn normal_inv_cdf(&self, p: f64) -> f64 {
        self.normal.inverse_cdf(p)
    }

    fn t_cdf(&self, x: f64, df: u64) -> Result<f64> {
        Ok(match Self::finite_t(df)? {
            Some(t) => t.cdf(x),
            None => self.normal.cdf(x),
        })
    }

    fn t_inv_cdf(&self, p: f64, df: u64) -> Result<f64> {
        let Some(t) = Self::finite_t(df)? else {
            return Ok(self.normal.inverse_cdf(p));
        };

        if p < DIRECT_QUANTILE_MIN_TAIL {
            Ok(-t_upper_quantile(&t, p))
        } else if 1.0 - p < DIRECT_QUANTILE_MIN_TAIL {
            Ok(t_upper_quantile(&t, 1.0 - p))
        } else {
            Ok(t.inverse_cdf(p))
        }
    }

    // statrs computes the upper tail directly, which keeps precision for large |x|
    fn normal_sf(&self, x: f64) -> f64 {
        self.normal.sf(x)
    }

    fn t_sf(&self, x: f64, df: u64) -> Result<f64> {
        Ok(match Self::finite_t(df)? {
            Some(t) => t.sf(x),
            None => self.normal.sf(x),
        })
    }
}
