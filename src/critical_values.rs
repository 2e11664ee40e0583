//! Critical value reference table and z-vs-t explorer

use crate::distribution::DistributionProvider;
use crate::error::{EvaluationError, Result};
use crate::evaluator::Tail;
use serde::{Deserialize, Serialize};

/// One α row of the reference table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalValueRow {
    pub alpha: f64,
    /// Φ⁻¹(1 - α), computed as -Φ⁻¹(α)
    pub one_tail_z: f64,
    /// Φ⁻¹(1 - α/2), computed as -Φ⁻¹(α/2); boundaries are ±value
    pub two_tail_z: f64,
    /// (df, two-tailed t critical value) per requested df
    pub two_tail_t: Vec<(u64, f64)>,
}

/// Build the reference table for `alphas` with a two-tailed t column per df
pub fn reference_table<D: DistributionProvider + ?Sized>(
    dist: &D,
    alphas: &[f64],
    dfs: &[u64],
) -> Result<Vec<CriticalValueRow>> {
    alphas
        .iter()
        .map(|&alpha| {
            check_alpha(alpha)?;
            let two_tail_t = dfs
                .iter()
                .map(|&df| Ok((df, -dist.t_inv_cdf(alpha / 2.0, df)?)))
                .collect::<Result<Vec<_>>>()?;
            Ok(CriticalValueRow {
                alpha,
                one_tail_z: -dist.normal_inv_cdf(alpha),
                two_tail_z: -dist.normal_inv_cdf(alpha / 2.0),
                two_tail_t,
            })
        })
        .collect()
}

/// z and t critical values for one α and tail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exploration {
    pub alpha: f64,
    pub tail: Tail,
    /// Signed for one-tailed, magnitude for two-tailed
    pub z_critical: f64,
    pub t_critical: Vec<(u64, f64)>,
}

impl Exploration {
    /// Heavier t tails push every finite-df critical value past z
    ///
    /// From [`NORMAL_LIMIT_DF`](crate::distribution::NORMAL_LIMIT_DF) on the
    /// t column equals z, so this is false for such entries.
    pub fn t_exceeds_z(&self) -> bool {
        self.t_critical
            .iter()
            .all(|(_, t)| t.abs() > self.z_critical.abs())
    }
}

/// Compare z against t critical values for the same α and tail
pub fn explore<D: DistributionProvider + ?Sized>(
    dist: &D,
    alpha: f64,
    tail: Tail,
    dfs: &[u64],
) -> Result<Exploration> {
    check_alpha(alpha)?;

    // lower-tail probability, and the sign that maps its quantile onto the boundary
    let (p, sign) = match tail {
        Tail::Right => (alpha, -1.0),
        Tail::Left => (alpha, 1.0),
        Tail::Two => (alpha / 2.0, -1.0),
    };
    let t_critical = dfs
        .iter()
        .map(|&df| Ok((df, sign * dist.t_inv_cdf(p, df)?)))
        .collect::<Result<Vec<_>>>()?;

    Ok(Exploration {
        alpha,
        tail,
        z_critical: sign * dist.normal_inv_cdf(p),
        t_critical,
    })
}

/// A well-known z critical value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MemoryAnchor {
    pub alpha: f64,
    pub tail: Tail,
    pub z: f64,
}

/// 1.645, 1.960, 2.326, 2.576: one- and two-tailed at 5% and 1%
pub fn memory_anchors() -> [MemoryAnchor; 4] {
    [
        MemoryAnchor {
            alpha: 0.05,
            tail: Tail::Right,
            z: 1.645,
        },
        MemoryAnchor {
            alpha: 0.05,
            tail: Tail::Two,
            z: 1.960,
        },
        MemoryAnchor {
            alpha: 0.01,
            tail: Tail::Right,
            z: 2.326,
        },
        MemoryAnchor {
            alpha: 0.01,
            tail: Tail::Two,
            z: 2.576,
        },
    ]
}

fn check_alpha(alpha: f64) -> Result<()> {
    if alpha > 0.0 && alpha < 1.0 {
        Ok(())
    } else {
        Err(EvaluationError::invalid(
            "significance_level",
            alpha,
            "a value in the open interval (0, 1)",
        ))
    }
}
