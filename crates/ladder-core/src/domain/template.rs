//! Prompt templates (decomposition / usefulness).
//!
//! Templates are authored elsewhere and loaded once per run. Every slot is
//! required and indexed slots are parsed up front, so a bad template is
//! reported at load time instead of halfway through a search.

use serde::{Deserialize, Serialize};

use super::errors::ConfigError;

const PLACEHOLDER: &str = "{}";

/// A template string with exactly one `{}` placeholder for a 1-based step index.
///
/// e.g. `"Question 1.{}:"` renders as `"Question 1.3:"` for step 3.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IndexedPattern {
    head: String,
    tail: String,
}

impl IndexedPattern {
    pub fn parse(pattern: &str) -> Result<Self, ConfigError> {
        let found = pattern.matches(PLACEHOLDER).count();
        match pattern.split_once(PLACEHOLDER) {
            Some((head, tail)) if found == 1 => Ok(Self {
                head: head.to_string(),
                tail: tail.to_string(),
            }),
            _ => Err(ConfigError::MalformedPattern {
                pattern: pattern.to_string(),
                found,
            }),
        }
    }

    pub fn render(&self, index: usize) -> String {
        format!("{}{}{}", self.head, index, self.tail)
    }
}

impl TryFrom<String> for IndexedPattern {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<IndexedPattern> for String {
    fn from(p: IndexedPattern) -> Self {
        format!("{}{}{}", p.head, PLACEHOLDER, p.tail)
    }
}

/// Slots used to build the generation prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecompositionTemplate {
    /// Few-shot preamble used only for the very first step.
    pub decomposition: String,

    /// Few-shot preamble used for every later step.
    pub input: String,

    pub question_prefix: String,
    pub subquestion_prefix: IndexedPattern,
    pub answer_prefix: IndexedPattern,

    /// Marker that frames a sub-question as the final restatement of the
    /// overall question, e.g. `"Now we can answer the question:"`.
    pub overall_question_prefix: String,
}

impl DecompositionTemplate {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Matched as a substring of model outputs; "" would match everything.
        if self.overall_question_prefix.trim().is_empty() {
            return Err(ConfigError::EmptySlot("overall_question_prefix"));
        }
        Ok(())
    }
}

/// Slots used to build the usefulness-scoring prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UsefulnessTemplate {
    pub input: String,
    pub question_prefix: String,
    pub subquestion_prefix: IndexedPattern,
    pub new_subquestion_prefix: IndexedPattern,
    pub useful_prefix: String,
}

impl UsefulnessTemplate {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.useful_prefix.trim().is_empty() {
            return Err(ConfigError::EmptySlot("useful_prefix"));
        }
        Ok(())
    }
}
