//! Choosing the right test for a research question

use crate::evaluator::{Tail, TestKind};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// What the researcher expects before seeing the data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Claim {
    /// The metric went up
    Increased,
    /// The metric went down
    Decreased,
    /// The metric moved, direction unknown
    Changed,
    /// No prediction, just investigating
    NoPrior,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub kind: TestKind,
    pub tail: Tail,
    /// H₁ written against μ₀
    pub alternative: String,
    pub rationale: Vec<&'static str>,
}

/// Map a claim and knowledge of σ to a test
///
/// # Example
/// ```
/// use hypotest::guide::{recommend, Claim};
/// use hypotest::evaluator::{Tail, TestKind};
///
/// let rec = recommend(Claim::Increased, false);
/// assert_eq!(rec.tail, Tail::Right);
/// assert_eq!(rec.kind, TestKind::T);
/// ```
pub fn recommend(claim: Claim, sigma_known: bool) -> Recommendation {
    let (tail, direction) = match claim {
        Claim::Increased => (
            Tail::Right,
            "A predicted increase is directional: all of α goes in the right tail.",
        ),
        Claim::Decreased => (
            Tail::Left,
            "A predicted decrease is directional: all of α goes in the left tail.",
        ),
        Claim::Changed => (
            Tail::Two,
            "A change in either direction splits α into α/2 per tail.",
        ),
        Claim::NoPrior => (
            Tail::Two,
            "Without a prior prediction, two-tailed is the safe default.",
        ),
    };

    let (kind, spread) = if sigma_known {
        (
            TestKind::Z,
            "σ is known: compare against the standard normal N(0,1).",
        )
    } else {
        (
            TestKind::T,
            "σ is estimated by s: compare against Student-t with n - 1 df, which has heavier tails.",
        )
    };

    Recommendation {
        kind,
        tail,
        alternative: format!("μ {} μ₀", tail.alternative_relation()),
        rationale: vec![direction, spread],
    }
}
