//! Multiple-choice self-assessment
//!
//! The question bank is data (`questions-default.toml`); `QuizState` holds a
//! learner's answers and scores them against the bank.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use thiserror::Error;

const DEFAULT_TOML: &str = include_str!("../questions-default.toml");

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("Failed to parse question bank: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid question '{id}': {reason}")]
    InvalidQuestion { id: String, reason: String },

    #[error("Unknown question '{0}'")]
    UnknownQuestion(String),

    #[error("Option {choice} out of range for question '{id}' ({count} options)")]
    OptionOutOfRange {
        id: String,
        choice: usize,
        count: usize,
    },
}

pub type Result<T> = std::result::Result<T, QuizError>;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Foundation,
    Intermediate,
    Advanced,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Foundation => "Foundation",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Question {
    pub id: String,
    pub level: Level,
    pub topic: String,
    pub prompt: String,
    pub options: Vec<String>,
    /// Zero-based index into `options`
    pub answer: usize,
    pub explanation: String,
}

impl Question {
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.answer
    }

    /// "A".."Z" label for an option index
    pub fn option_label(index: usize) -> char {
        (b'A' + (index % 26) as u8) as char
    }
}

#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

#[derive(Deserialize)]
struct QuestionFile {
    #[serde(default)]
    question: Vec<Question>,
}

impl QuestionBank {
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(DEFAULT_TOML)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: QuestionFile = toml::from_str(content)?;
        Self::new(file.question)
    }

    /// Rejects duplicate ids, empty option lists and out-of-range answers
    pub fn new(questions: Vec<Question>) -> Result<Self> {
        let mut seen = HashSet::new();
        for q in &questions {
            if !seen.insert(q.id.as_str()) {
                return Err(QuizError::InvalidQuestion {
                    id: q.id.clone(),
                    reason: "duplicate id".to_string(),
                });
            }
            if q.options.len() < 2 {
                return Err(QuizError::InvalidQuestion {
                    id: q.id.clone(),
                    reason: format!("needs at least 2 options, has {}", q.options.len()),
                });
            }
            if q.answer >= q.options.len() {
                return Err(QuizError::InvalidQuestion {
                    id: q.id.clone(),
                    reason: format!(
                        "answer {} out of range ({} options)",
                        q.answer,
                        q.options.len()
                    ),
                });
            }
        }
        Ok(Self { questions })
    }

    pub fn get(&self, id: &str) -> Result<&Question> {
        self.questions
            .iter()
            .find(|q| q.id == id)
            .ok_or_else(|| QuizError::UnknownQuestion(id.to_string()))
    }

    /// Questions matching `level` and `topic` (case-insensitive); `None` matches all
    pub fn filter<'a>(
        &'a self,
        level: Option<Level>,
        topic: Option<&'a str>,
    ) -> impl Iterator<Item = &'a Question> + 'a {
        self.questions.iter().filter(move |q| {
            level.map_or(true, |l| q.level == l)
                && topic.map_or(true, |t| q.topic.eq_ignore_ascii_case(t))
        })
    }

    /// Distinct topics, sorted
    pub fn topics(&self) -> Vec<&str> {
        let mut topics: Vec<&str> = self.questions.iter().map(|q| q.topic.as_str()).collect();
        topics.sort_unstable();
        topics.dedup();
        topics
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    /// ≥ 80%
    Strong,
    /// ≥ 60%
    Developing,
    NeedsReview,
}

impl ScoreBand {
    pub fn from_percent(percent: f64) -> Self {
        if percent >= 80.0 {
            ScoreBand::Strong
        } else if percent >= 60.0 {
            ScoreBand::Developing
        } else {
            ScoreBand::NeedsReview
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuizScore {
    pub correct: usize,
    pub attempted: usize,
    /// Share of attempted questions answered correctly, 0 when none attempted
    pub percent: f64,
    /// `None` until at least one question is attempted
    pub band: Option<ScoreBand>,
}

/// A learner's answers, keyed by question id; re-answering overwrites
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizState {
    answers: BTreeMap<String, usize>,
}

impl QuizState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `choice` for `id`; returns whether it is correct
    pub fn record(&mut self, bank: &QuestionBank, id: &str, choice: usize) -> Result<bool> {
        let question = bank.get(id)?;
        if choice >= question.options.len() {
            return Err(QuizError::OptionOutOfRange {
                id: id.to_string(),
                choice,
                count: question.options.len(),
            });
        }
        self.answers.insert(id.to_string(), choice);
        Ok(question.is_correct(choice))
    }

    pub fn answer(&self, id: &str) -> Option<usize> {
        self.answers.get(id).copied()
    }

    pub fn reset(&mut self) {
        self.answers.clear();
    }

    pub fn score(&self, bank: &QuestionBank) -> QuizScore {
        let correct = self
            .answers
            .iter()
            .filter(|(id, choice)| bank.get(id).is_ok_and(|q| q.is_correct(**choice)))
            .count();
        let attempted = self.answers.len();

        if attempted == 0 {
            return QuizScore {
                correct: 0,
                attempted: 0,
                percent: 0.0,
                band: None,
            };
        }

        let percent = correct as f64 / attempted as f64 * 100.0;
        QuizScore {
            correct,
            attempted,
            percent,
            band: Some(ScoreBand::from_percent(percent)),
        }
    }
}
