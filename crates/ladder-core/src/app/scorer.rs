//! UsefulnessScorer - 候補 action の有用性を Yes/No の確率で評価する
//!
//! action の実行結果（answer）は使わず、質問の連鎖と候補だけを見ます。
//! モデル側のエラーはそのまま返し、retry はしません。

use std::sync::Arc;

use tracing::debug;

use super::prompt::build_usefulness_prompt;
use crate::domain::{
    Action, Episode, PolicyError, ReasoningState, RewardComponents, UsefulnessTemplate,
};
use crate::ports::{LanguageModel, ModelError};

/// Next-token vocabulary the judgement is read from; index 0 is "useful".
pub const USEFULNESS_LABELS: [&str; 2] = ["Yes", "No"];

pub struct UsefulnessScorer {
    model: Arc<dyn LanguageModel>,
    template: UsefulnessTemplate,
}

impl UsefulnessScorer {
    pub fn new(model: Arc<dyn LanguageModel>, template: UsefulnessTemplate) -> Self {
        Self { model, template }
    }

    /// Probability that `action` is a useful next sub-question, plus the
    /// diagnostics (`r_useful` only) handed back to the search.
    pub async fn score(
        &self,
        state: &ReasoningState,
        action: &Action,
        episode: &Episode,
    ) -> Result<(f64, RewardComponents), PolicyError> {
        let prompt =
            build_usefulness_prompt(state, action, &self.template, episode.overall_question());
        let logits = self
            .model
            .next_token_logits(&prompt, &USEFULNESS_LABELS)
            .await?;
        let r_useful = yes_probability(&logits)?;

        debug!(
            episode = %episode.id(),
            depth = state.len(),
            action = %action,
            r_useful,
            "scored action"
        );
        Ok((r_useful, RewardComponents::useful(r_useful)))
    }
}

/// Softmax over exactly the two label logits; mass on "Yes".
fn yes_probability(logits: &[f64]) -> Result<f64, ModelError> {
    let &[yes, no] = logits else {
        return Err(ModelError::ShapeMismatch {
            expected: USEFULNESS_LABELS.len(),
            got: logits.len(),
        });
    };
    if let Some(bad) = [yes, no].into_iter().find(|l| !l.is_finite()) {
        return Err(ModelError::NonFiniteLogit(bad));
    }

    let max = yes.max(no);
    let (e_yes, e_no) = ((yes - max).exp(), (no - max).exp());
    Ok(e_yes / (e_yes + e_no))
}
