//! Reasoning state: the chain of sub-questions asked and answered so far.
//!
//! The state is owned by the external state-transition collaborator, which
//! appends one `SubStep` per executed action. The policy only reads it.

use serde::{Deserialize, Serialize};

/// One executed step of the decomposition chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubStep {
    pub sub_question: String,
    pub sub_answer: String,

    /// Confidence of the answer as reported by the state transition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl SubStep {
    pub fn new(sub_question: impl Into<String>, sub_answer: impl Into<String>) -> Self {
        Self {
            sub_question: sub_question.into(),
            sub_answer: sub_answer.into(),
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

/// Ordered chain of `SubStep`s. Insertion order is the reasoning order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReasoningState {
    steps: Vec<SubStep>,
}

impl ReasoningState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new state with `step` appended; `self` is left untouched.
    pub fn appended(&self, step: SubStep) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubStep> {
        self.steps.iter()
    }
}

impl From<Vec<SubStep>> for ReasoningState {
    fn from(steps: Vec<SubStep>) -> Self {
        Self { steps }
    }
}

impl FromIterator<SubStep> for ReasoningState {
    fn from_iter<I: IntoIterator<Item = SubStep>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}
