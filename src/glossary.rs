//! Reference definitions for hypothesis-testing terms

use serde::Serialize;

/// One glossary entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Term {
    pub term: &'static str,
    /// Alternate spellings accepted by `lookup`
    pub aliases: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<&'static str>,
    pub definition: &'static str,
    pub formula: &'static str,
    pub example: &'static str,
}

pub static GLOSSARY: &[Term] = &[
    Term {
        term: "Null Hypothesis (H₀)",
        aliases: &["null hypothesis", "null", "h0", "h₀"],
        symbol: None,
        definition: "The default assumption of no change or no effect. It always contains an \
                     equality (=, ≤, ≥). H₀ is never proven; it is either rejected or not rejected.",
        formula: "H₀: μ = μ₀",
        example: "A mutual fund's average annual return equals the 12% benchmark.",
    },
    Term {
        term: "Alternative Hypothesis (H₁)",
        aliases: &["alternative hypothesis", "alternative", "h1", "h₁"],
        symbol: None,
        definition: "The claim under investigation. Its relation (>, <, ≠) decides between a \
                     right-tailed, left-tailed or two-tailed test and must be fixed before \
                     collecting data.",
        formula: "H₁: μ > μ₀ (right) | H₁: μ < μ₀ (left) | H₁: μ ≠ μ₀ (two)",
        example: "The fund's average return is above 12%.",
    },
    Term {
        term: "z-Statistic",
        aliases: &["z", "z statistic", "z-score", "z-test"],
        symbol: Some("z = (x̄ − μ₀)/(σ/√n)"),
        definition: "Number of standard errors between the sample mean and μ₀ when σ is known. \
                     Standard normal under H₀.",
        formula: "z = (x̄ − μ₀) / (σ/√n), SE = σ/√n",
        example: "x̄ = 13.5, μ₀ = 12, σ = 6, n = 36 → SE = 1.0 → z = 1.50",
    },
    Term {
        term: "t-Statistic",
        aliases: &["t", "t statistic", "t-test"],
        symbol: Some("t = (x̄ − μ₀)/(s/√n)"),
        definition: "Test statistic when σ is unknown and estimated by the sample standard \
                     deviation s. Student-t with n − 1 degrees of freedom under H₀; heavier \
                     tails than z make H₀ harder to reject.",
        formula: "t = (x̄ − μ₀) / (s/√n), df = n − 1",
        example: "x̄ = 7.84, μ₀ = 7.0, s = 2.94, n = 49 → t = 0.84 / 0.42 = 2.00",
    },
    Term {
        term: "p-value",
        aliases: &["p", "p value", "pvalue"],
        symbol: Some("P(T at least as extreme as observed | H₀)"),
        definition: "Probability of a statistic at least as extreme as the observed one, \
                     assuming H₀ is true. It is not the probability that H₀ is true.",
        formula: "right: P(Z > z) | left: P(Z < z) | two: 2 × P(Z > |z|)",
        example: "z = 1.50 right-tailed: p = 0.0668 > 0.05, fail to reject.",
    },
    Term {
        term: "Type I Error (α)",
        aliases: &["type i error", "type 1 error", "false positive"],
        symbol: Some("P(reject H₀ | H₀ true)"),
        definition: "Rejecting a true null hypothesis. Its probability is the significance \
                     level α; lowering α also lowers power.",
        formula: "α = P(Type I error)",
        example: "At α = 5%, a true H₀ is still rejected 5% of the time.",
    },
    Term {
        term: "Statistical Power",
        aliases: &["power", "1 - beta", "type ii error"],
        symbol: Some("1 − β"),
        definition: "Probability of rejecting H₀ when it is false. Grows with sample size, \
                     effect size and α; one-tailed tests have more power in the stated direction.",
        formula: "Power = 1 − P(Type II error)",
        example: "Power 0.85: an 85% chance of detecting real outperformance.",
    },
    Term {
        term: "Critical Value",
        aliases: &["critical", "z_crit", "t_crit", "rejection region"],
        symbol: Some("z_crit or t_crit"),
        definition: "Boundary of the rejection region. Set by α, the tail and the reference \
                     distribution.",
        formula: "one-tail 5%: ±1.645 | two-tail 5%: ±1.960 | two-tail 1%: ±2.576",
        example: "Right-tailed at 5%: reject if z > 1.645, so z = 1.5 does not reject.",
    },
    Term {
        term: "Significance Level (α)",
        aliases: &["significance level", "alpha", "α"],
        symbol: Some("α"),
        definition: "Type I error rate chosen before testing. Any value strictly between 0 and \
                     1; 10%, 5% and 1% are conventional.",
        formula: "reject H₀ iff p < α",
        example: "α = 0.05 corresponds to 95% confidence.",
    },
    Term {
        term: "Degrees of Freedom",
        aliases: &["df", "degrees of freedom"],
        symbol: Some("df = n − 1"),
        definition: "Shape parameter of the Student-t reference distribution for a one-sample \
                     t-test. As df grows the t critical values approach the z critical values.",
        formula: "df = n − 1",
        example: "n = 49 → df = 48 → two-tailed 1% t_crit ≈ 2.682 versus z_crit 2.576",
    },
];

/// Exact match on the term or an alias, ignoring case
pub fn lookup(query: &str) -> Option<&'static Term> {
    let query = query.trim().to_lowercase();
    GLOSSARY.iter().find(|t| {
        t.term.to_lowercase() == query || t.aliases.iter().any(|a| a.to_lowercase() == query)
    })
}

/// Case-insensitive substring match on term and definition
pub fn search(text: &str) -> Vec<&'static Term> {
    let text = text.trim().to_lowercase();
    GLOSSARY
        .iter()
        .filter(|t| {
            t.term.to_lowercase().contains(&text) || t.definition.to_lowercase().contains(&text)
        })
        .collect()
}
