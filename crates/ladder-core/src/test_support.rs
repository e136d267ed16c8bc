//! Shared fixtures for unit tests.

use crate::domain::{DecompositionTemplate, IndexedPattern, PolicyConfig, UsefulnessTemplate};

pub const QUESTION: &str = "Is Paris the capital of France?";
pub const OVERALL_PREFIX: &str = "Now we can answer the question:";

fn pattern(raw: &str) -> IndexedPattern {
    IndexedPattern::parse(raw).expect("fixture pattern")
}

pub fn decomposition_template() -> DecompositionTemplate {
    DecompositionTemplate {
        decomposition: "Decompose the question into sub-questions.".to_string(),
        input: "Given a question, ask and answer sub-questions.\n\n".to_string(),
        question_prefix: "Question 1: ".to_string(),
        subquestion_prefix: pattern("Question 1.{}:"),
        answer_prefix: pattern("Answer 1.{}:"),
        overall_question_prefix: OVERALL_PREFIX.to_string(),
    }
}

pub fn usefulness_template() -> UsefulnessTemplate {
    UsefulnessTemplate {
        input: "Decide whether the new question is useful.\n\n".to_string(),
        question_prefix: "Question 1: ".to_string(),
        subquestion_prefix: pattern("Question 1.{}:"),
        new_subquestion_prefix: pattern("New question 1.{}:"),
        useful_prefix: "Is the new question useful?".to_string(),
    }
}

pub fn config() -> PolicyConfig {
    PolicyConfig::default()
}
