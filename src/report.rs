// Step-by-step walkthroughs and serializable reports
//
// A walkthrough turns one evaluation into the five steps a student writes
// out by hand: hypotheses, critical value, test statistic, decision and
// p-value. Rendering never recomputes anything; it only formats the
// `TestInput` / `TestResult` pair it was built from.

use crate::error::Result;
use crate::evaluator::{self, ConfidenceInterval, Tail, TestInput, TestKind, TestResult};
use serde::{Deserialize, Serialize};
use std::fmt;

const DEFAULT_DECIMALS: usize = 4;

/// Stage of a worked solution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Hypotheses,
    CriticalValue,
    TestStatistic,
    Decision,
    PValue,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = match self {
            StepKind::Hypotheses => "Hypotheses",
            StepKind::CriticalValue => "Critical value",
            StepKind::TestStatistic => "Test statistic",
            StepKind::Decision => "Decision",
            StepKind::PValue => "p-value",
        };
        f.write_str(title)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub kind: StepKind,
    pub detail: String,
}

/// Worked solution for one evaluated test
#[derive(Debug, Clone)]
pub struct Walkthrough {
    input: TestInput,
    result: TestResult,
    decimals: usize,
}

impl Walkthrough {
    pub fn new(input: &TestInput, result: &TestResult) -> Self {
        Self {
            input: *input,
            result: *result,
            decimals: DEFAULT_DECIMALS,
        }
    }

    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn steps(&self) -> Vec<Step> {
        vec![
            Step {
                kind: StepKind::Hypotheses,
                detail: self.hypotheses(),
            },
            Step {
                kind: StepKind::CriticalValue,
                detail: self.critical_value(),
            },
            Step {
                kind: StepKind::TestStatistic,
                detail: self.test_statistic(),
            },
            Step {
                kind: StepKind::Decision,
                detail: self.decision(),
            },
            Step {
                kind: StepKind::PValue,
                detail: self.p_value(),
            },
        ]
    }

    /// Numbered steps, one per line
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();

        report.push_str(&format!(
            "{} {} (α = {})\n\n",
            self.result.tail.label(),
            self.result.kind,
            self.result.significance_level
        ));

        for (i, step) in self.steps().iter().enumerate() {
            report.push_str(&format!("{}. {}: {}\n", i + 1, step.kind, step.detail));
        }

        report
    }

    fn hypotheses(&self) -> String {
        let tail = self.input.tail;
        let mu0 = self.input.hypothesized_mean;
        format!(
            "H₀: μ {} {mu0} | H₁: μ {} {mu0} ({})",
            tail.null_relation(),
            tail.alternative_relation(),
            tail.label()
        )
    }

    fn critical_value(&self) -> String {
        let d = self.decimals;
        let alpha = self.result.significance_level;
        let split = match self.result.tail {
            Tail::Right => format!("α = {alpha} in the right tail"),
            Tail::Left => format!("α = {alpha} in the left tail"),
            Tail::Two => format!("α/2 = {} per tail", alpha / 2.0),
        };
        let df = match self.result.degrees_of_freedom {
            Some(df) => format!(", df = {df}"),
            None => String::new(),
        };
        format!(
            "{split}{df} → {}_crit = {:.*}",
            self.result.kind.symbol(),
            d,
            self.result.critical_value
        )
    }

    fn test_statistic(&self) -> String {
        let d = self.decimals;
        let input = &self.input;
        let spread = match self.result.kind {
            TestKind::Z => "σ",
            TestKind::T => "s",
        };
        format!(
            "{sym} = ({} − {}) / ({spread} = {} / √{}) = {:.*} / {:.*} = {:.*}",
            input.sample_mean,
            input.hypothesized_mean,
            input.dispersion,
            input.sample_size,
            d,
            input.sample_mean - input.hypothesized_mean,
            d,
            self.result.standard_error,
            d,
            self.result.statistic,
            sym = self.result.kind.symbol(),
        )
    }

    fn decision(&self) -> String {
        let d = self.decimals;
        let r = &self.result;
        let sym = r.kind.symbol();
        let (lhs, relation) = match (r.tail, r.reject_null) {
            (Tail::Right, true) => (format!("{sym} = {:.*}", d, r.statistic), ">"),
            (Tail::Right, false) => (format!("{sym} = {:.*}", d, r.statistic), "≤"),
            (Tail::Left, true) => (format!("{sym} = {:.*}", d, r.statistic), "<"),
            (Tail::Left, false) => (format!("{sym} = {:.*}", d, r.statistic), "≥"),
            (Tail::Two, true) => (format!("|{sym}| = {:.*}", d, r.statistic.abs()), ">"),
            (Tail::Two, false) => (format!("|{sym}| = {:.*}", d, r.statistic.abs()), "≤"),
        };
        format!(
            "{lhs} {relation} {:.*} → {}",
            d,
            r.critical_value.value(),
            r.decision_label()
        )
    }

    fn p_value(&self) -> String {
        let d = self.decimals;
        let r = &self.result;
        let var = match r.kind {
            TestKind::Z => "Z",
            TestKind::T => "T",
        };
        let probability = match r.tail {
            Tail::Right => format!("P({var} > {:.*})", d, r.statistic),
            Tail::Left => format!("P({var} < {:.*})", d, r.statistic),
            Tail::Two => format!("2 × P({var} > {:.*})", d, r.statistic.abs()),
        };
        let verdict = if r.p_value < r.significance_level {
            "< α → reject"
        } else {
            "≥ α → fail to reject"
        };
        format!("{probability} = {:.*} {verdict}", d, r.p_value)
    }
}

/// The same data evaluated under two different tails
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DirectionContrast {
    pub chosen: TestResult,
    pub alternative: TestResult,
}

impl DirectionContrast {
    pub fn verdict_changes(&self) -> bool {
        self.chosen.reject_null != self.alternative.reject_null
    }

    pub fn to_report_string(&self, decimals: usize) -> String {
        let line = |r: &TestResult| {
            format!(
                "  {:<13} {} = {:.*}, crit {:.*}, p = {:.*} → {}\n",
                r.tail.label(),
                r.kind.symbol(),
                decimals,
                r.statistic,
                decimals,
                r.critical_value,
                decimals,
                r.p_value,
                r.decision_label()
            )
        };

        let mut report = String::from("Direction contrast:\n");
        report.push_str(&line(&self.chosen));
        report.push_str(&line(&self.alternative));
        if self.verdict_changes() {
            report.push_str("  The direction of H₁ alone changes the conclusion.\n");
        } else {
            report.push_str("  Same conclusion, but the rejection threshold moves.\n");
        }
        report
    }
}

/// Evaluate `input` as given and again under `tail`
pub fn direction_contrast(
    input: &TestInput,
    kind: TestKind,
    tail: Tail,
) -> Result<DirectionContrast> {
    Ok(DirectionContrast {
        chosen: evaluator::evaluate(kind, input)?,
        alternative: evaluator::evaluate(kind, &input.with_tail(tail))?,
    })
}

/// Machine-readable evaluation report (`--format json`)
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
    pub input: TestInput,
    pub result: TestResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_interval: Option<ConfidenceInterval>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<Step>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contrast: Option<DirectionContrast>,
}

impl JsonReport {
    pub fn new(input: &TestInput, result: &TestResult) -> Self {
        Self {
            scenario: None,
            input: *input,
            result: *result,
            confidence_interval: None,
            steps: Vec::new(),
            contrast: None,
        }
    }

    pub fn with_scenario(mut self, id: impl Into<String>) -> Self {
        self.scenario = Some(id.into());
        self
    }

    pub fn with_confidence_interval(mut self, ci: ConfidenceInterval) -> Self {
        self.confidence_interval = Some(ci);
        self
    }

    pub fn with_steps(mut self, walkthrough: &Walkthrough) -> Self {
        self.steps = walkthrough.steps();
        self
    }

    pub fn with_contrast(mut self, contrast: DirectionContrast) -> Self {
        self.contrast = Some(contrast);
        self
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
