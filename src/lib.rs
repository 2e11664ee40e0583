//! Hypotest - one-sample z-test and t-test evaluation with worked examples
//!
//! The core is [`evaluator`]: given a sample mean, a hypothesized mean, a
//! dispersion, a sample size, a significance level and a tail, it returns
//! the test statistic, critical value, p-value and decision. Everything else
//! (scenario catalog, reference tables, walkthroughs, glossary, quiz) is
//! built on top of it.
//!
//! # Example
//! ```
//! use hypotest::evaluator::{evaluate_z, Tail, TestInput};
//!
//! // H₀: μ = 50 vs H₁: μ ≠ 50, σ = 12, n = 64
//! let input = TestInput::new(47.5, 50.0, 12.0, 64, 0.05, Tail::Two);
//! let result = evaluate_z(&input).unwrap();
//! assert!(!result.reject_null);
//! ```

pub mod cli;
pub mod config;
pub mod critical_values;
pub mod distribution;
pub mod error;
pub mod evaluator;
pub mod glossary;
pub mod guide;
pub mod quiz;
pub mod report;
pub mod scenarios;
