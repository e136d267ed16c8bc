//! Prompt assembly.
//!
//! Pure functions of their arguments: same state and templates, same text.
//! Templates are validated at load time, so nothing here can fail.

use crate::domain::{Action, DecompositionTemplate, ReasoningState, UsefulnessTemplate};

/// Lead-in removed from usefulness prompts. Left in, it frames the candidate
/// as the final answer and biases the Yes/No judgement.
pub const FINAL_ANSWER_LEAD_IN: &str = "Now we can answer the question: ";

/// Prompt for proposing the next sub-question.
///
/// With an empty state this is the first-step decomposition prompt, which
/// asks for a quoted list of sub-questions. Otherwise it replays the chain
/// and leaves the next numbered sub-question open. `forced_overall` appends
/// the overall-question marker so the model restates the overall question.
pub fn build_decomposition_prompt(
    state: &ReasoningState,
    template: &DecompositionTemplate,
    overall_question: &str,
    forced_overall: bool,
) -> String {
    let mut prompt = if state.is_empty() {
        format!(
            "{}\n\nQ: {overall_question}\n\
             A: To answer the question \"{overall_question}\", we need to know:",
            template.decomposition
        )
    } else {
        let mut p = String::new();
        p.push_str(&template.input);
        p.push_str(&template.question_prefix);
        p.push_str(overall_question);
        p.push('\n');
        for (idx, step) in state.iter().enumerate() {
            let index = idx + 1;
            p.push_str(&format!(
                "{} {}\n",
                template.subquestion_prefix.render(index),
                step.sub_question
            ));
            p.push_str(&format!(
                "{} {}\n",
                template.answer_prefix.render(index),
                step.sub_answer
            ));
        }
        p.push_str(&template.subquestion_prefix.render(state.len() + 1));
        p
    };

    if forced_overall {
        prompt.push(' ');
        prompt.push_str(&template.overall_question_prefix);
    }
    prompt
}

/// Prompt asking whether `action` is a useful next sub-question.
///
/// Only the sub-questions of the chain are replayed, not their answers.
pub fn build_usefulness_prompt(
    state: &ReasoningState,
    action: &Action,
    template: &UsefulnessTemplate,
    example: &str,
) -> String {
    let mut prompt = String::new();
    prompt.push_str(&template.input);
    prompt.push_str(&template.question_prefix);
    prompt.push_str(example);
    prompt.push('\n');
    for (idx, step) in state.iter().enumerate() {
        prompt.push_str(&format!(
            "{} {}\n",
            template.subquestion_prefix.render(idx + 1),
            step.sub_question
        ));
    }
    prompt.push_str(&format!(
        "{} {}\n",
        template.new_subquestion_prefix.render(state.len() + 1),
        action
    ));
    prompt.push_str(&template.useful_prefix);

    prompt.replace(FINAL_ANSWER_LEAD_IN, "")
}
