//! Catalog of worked hypothesis-testing examples
//!
//! Scenarios are plain data loaded from TOML. The built-in catalog is
//! compiled into the binary; `from_file` loads a user catalog with the same
//! layout.
//!
//! # Example TOML
//! ```toml
//! [[scenario]]
//! id = "portfolio-alpha"
//! domain = "finance"
//! field = "Portfolio Management"
//! title = "Portfolio Alpha Test"
//! question = "Does the fund return more than the 12% market return?"
//! kind = "z"
//! tail = "right"
//! sample_mean = 13.5
//! hypothesized_mean = 12.0
//! dispersion = 6.0
//! sample_size = 36
//! significance_level = 0.05
//! units = "% return"
//! ```

use crate::error::EvaluationError;
use crate::evaluator::{self, Tail, TestInput, TestKind, TestResult};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

const DEFAULT_TOML: &str = include_str!("../scenarios-default.toml");

/// Errors for scenario catalog operations
#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("Failed to read scenario catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse scenario catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Duplicate scenario id '{0}'")]
    DuplicateId(String),

    #[error("Unknown scenario '{0}'")]
    UnknownScenario(String),

    #[error("Scenario '{id}' cannot be evaluated: {source}")]
    Evaluation {
        id: String,
        #[source]
        source: EvaluationError,
    },
}

pub type Result<T> = std::result::Result<T, ScenarioError>;

/// Subject area of a worked example
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Finance,
    General,
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::Finance => f.write_str("finance"),
            Domain::General => f.write_str("general"),
        }
    }
}

/// A worked example: a research question plus its sample statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub id: String,
    pub domain: Domain,
    /// e.g. "Fixed Income", "Clinical Medicine"
    pub field: String,
    pub title: String,
    pub question: String,
    pub kind: TestKind,
    pub tail: Tail,
    pub sample_mean: f64,
    pub hypothesized_mean: f64,
    pub dispersion: f64,
    pub sample_size: u64,
    pub significance_level: f64,
    #[serde(default)]
    pub units: String,
}

impl Scenario {
    /// Evaluator input, optionally at a different α
    pub fn input(&self, alpha_override: Option<f64>) -> TestInput {
        TestInput::new(
            self.sample_mean,
            self.hypothesized_mean,
            self.dispersion,
            self.sample_size,
            alpha_override.unwrap_or(self.significance_level),
            self.tail,
        )
    }

    pub fn evaluate(&self, alpha_override: Option<f64>) -> Result<TestResult> {
        evaluator::evaluate(self.kind, &self.input(alpha_override)).map_err(|source| {
            tracing::warn!(id = %self.id, error = %source, "scenario evaluation rejected");
            ScenarioError::Evaluation {
                id: self.id.clone(),
                source,
            }
        })
    }
}

/// Ordered, id-unique collection of scenarios
#[derive(Debug, Clone)]
pub struct ScenarioCatalog {
    scenarios: Vec<Scenario>,
}

#[derive(Deserialize)]
struct ScenarioFile {
    #[serde(default)]
    scenario: Vec<Scenario>,
}

impl ScenarioCatalog {
    /// The embedded finance and general-domain examples
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(DEFAULT_TOML)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ScenarioFile = toml::from_str(content)?;
        tracing::debug!(count = file.scenario.len(), "parsed scenario catalog");
        Self::new(file.scenario)
    }

    /// Rejects duplicate ids
    pub fn new(scenarios: Vec<Scenario>) -> Result<Self> {
        let mut seen = HashSet::new();
        for scenario in &scenarios {
            if !seen.insert(scenario.id.as_str()) {
                return Err(ScenarioError::DuplicateId(scenario.id.clone()));
            }
        }
        Ok(Self { scenarios })
    }

    pub fn get(&self, id: &str) -> Result<&Scenario> {
        self.scenarios
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| ScenarioError::UnknownScenario(id.to_string()))
    }

    pub fn by_domain(&self, domain: Domain) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter().filter(move |s| s.domain == domain)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}
