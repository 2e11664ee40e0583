//! CLI argument parsing for hypotest

use crate::evaluator::{Tail, TestInput};
use crate::guide::Claim;
use crate::quiz::Level;
use crate::scenarios::Domain;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "hypotest")]
#[command(version)]
#[command(about = "One-sample z-test and t-test evaluator with worked examples", long_about = None)]
pub struct Cli {
    /// Configuration file (TOML); defaults apply when omitted
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// z-test: population standard deviation σ known
    Z(TestArgs),

    /// t-test: standard deviation estimated by the sample s
    T(TestArgs),

    /// Built-in worked examples
    Scenario {
        #[command(subcommand)]
        action: ScenarioCommand,
    },

    /// Critical value reference table for the configured α grid
    Table,

    /// Compare z and t critical values for one α and tail
    Explore {
        /// Significance level (defaults to the configured α)
        #[arg(long)]
        alpha: Option<f64>,

        #[arg(long, value_enum, default_value = "two")]
        tail: Tail,

        /// Degrees of freedom to compare (defaults to the configured list)
        #[arg(long, value_delimiter = ',')]
        df: Vec<u64>,
    },

    /// Look up or list hypothesis-testing terms
    Glossary {
        /// Term, alias or search text
        term: Option<String>,
    },

    /// Recommend a test for a research claim
    Guide {
        #[arg(long, value_enum)]
        claim: Claim,

        /// Population σ is known
        #[arg(long)]
        sigma_known: bool,
    },

    /// Multiple-choice self-assessment
    Quiz {
        #[command(subcommand)]
        action: QuizCommand,
    },
}

#[derive(Args, Debug, Clone)]
pub struct TestArgs {
    /// Observed sample mean x̄
    #[arg(long, allow_negative_numbers = true)]
    pub sample_mean: f64,

    /// Null-hypothesis mean μ₀
    #[arg(long, allow_negative_numbers = true)]
    pub hypothesized_mean: f64,

    /// σ for a z-test, s for a t-test
    #[arg(long, allow_negative_numbers = true)]
    pub dispersion: f64,

    /// Sample size n
    #[arg(long)]
    pub sample_size: u64,

    /// Significance level (defaults to the configured α)
    #[arg(long, allow_negative_numbers = true)]
    pub alpha: Option<f64>,

    #[arg(long, value_enum, default_value = "two")]
    pub tail: Tail,

    /// Show the step-by-step solution
    #[arg(long)]
    pub steps: bool,

    /// Show the two-sided (1 - α) confidence interval
    #[arg(long)]
    pub ci: bool,

    /// Also evaluate the same data under another tail
    #[arg(long, value_enum, value_name = "TAIL")]
    pub contrast: Option<Tail>,
}

impl TestArgs {
    pub fn to_input(&self, default_alpha: f64) -> TestInput {
        TestInput::new(
            self.sample_mean,
            self.hypothesized_mean,
            self.dispersion,
            self.sample_size,
            self.alpha.unwrap_or(default_alpha),
            self.tail,
        )
    }
}

#[derive(Subcommand, Debug)]
pub enum ScenarioCommand {
    /// List scenarios
    List {
        #[arg(long, value_enum)]
        domain: Option<Domain>,

        /// Scenario catalog (TOML) instead of the built-in one
        #[arg(long, value_name = "PATH")]
        catalog: Option<PathBuf>,
    },

    /// Evaluate one scenario
    Run {
        id: String,

        /// Override the scenario's significance level
        #[arg(long)]
        alpha: Option<f64>,

        /// Show the step-by-step solution
        #[arg(long)]
        steps: bool,

        #[arg(long, value_name = "PATH")]
        catalog: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum QuizCommand {
    /// List questions without answers
    List {
        #[arg(long, value_enum)]
        level: Option<Level>,

        #[arg(long)]
        topic: Option<String>,
    },

    /// Score answers given as ID=CHOICE (e.g. q04=B)
    Score {
        #[arg(required = true, value_parser = parse_answer)]
        answers: Vec<(String, usize)>,
    },
}

/// Parse `q04=B` (letter) or `q04=1` (zero-based index)
fn parse_answer(s: &str) -> Result<(String, usize), String> {
    let (id, choice) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ID=CHOICE, got '{s}'"))?;
    let id = id.trim();
    let choice = choice.trim();
    if id.is_empty() {
        return Err(format!("missing question id in '{s}'"));
    }

    let index = match choice.as_bytes() {
        [c] if c.is_ascii_alphabetic() => (c.to_ascii_uppercase() - b'A') as usize,
        _ => choice
            .parse::<usize>()
            .map_err(|_| format!("choice must be a letter or an index, got '{choice}'"))?,
    };
    Ok((id.to_string(), index))
}
