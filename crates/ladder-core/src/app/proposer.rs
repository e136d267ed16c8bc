//! ActionProposer - 次の sub-question 候補を生成する
//!
//! # 処理の流れ
//! 1. depth limit 判定（到達していれば overall question へ誘導）
//! 2. prompt 組み立て（`app::prompt`）
//! 3. batch ごとに逐次 generate（batch 境界で順序は変わらない）
//! 4. 後処理: trim → 初手の抽出 → prefix 付与 → overall question への正規化 → 安定 dedup

use std::sync::Arc;

use tracing::{debug, warn};

use super::prompt::build_decomposition_prompt;
use crate::collections::dedup_stable;
use crate::domain::{
    Action, DecompositionTemplate, Episode, PolicyConfig, PolicyError, ReasoningState,
};
use crate::ports::{GenerateRequest, LanguageModel, ModelError, SubquestionExtractor};

/// Generations stop at the end of the line: one sub-question per sample.
pub const STOP_SEQUENCE: &str = "\n";

pub struct ActionProposer {
    model: Arc<dyn LanguageModel>,
    extractor: Arc<dyn SubquestionExtractor>,
    template: DecompositionTemplate,
    config: PolicyConfig,
}

impl ActionProposer {
    pub fn new(
        model: Arc<dyn LanguageModel>,
        extractor: Arc<dyn SubquestionExtractor>,
        template: DecompositionTemplate,
        config: PolicyConfig,
    ) -> Self {
        Self {
            model,
            extractor,
            template,
            config,
        }
    }

    /// Whether the next step must restate the overall question.
    pub fn at_depth_limit(&self, state: &ReasoningState) -> bool {
        self.config.force_terminating_on_depth_limit && state.len() + 1 >= self.config.depth_limit
    }

    /// Propose 1..=n_actions distinct actions for `state`, in sample order.
    pub async fn propose(
        &self,
        state: &ReasoningState,
        episode: &Episode,
    ) -> Result<Vec<Action>, PolicyError> {
        let question = episode.overall_question();
        let at_depth_limit = self.at_depth_limit(state);
        let prompt = build_decomposition_prompt(state, &self.template, question, at_depth_limit);

        let (n_actions, temperature) = if at_depth_limit {
            (1, 0.0)
        } else {
            (self.config.n_actions, self.config.temperature)
        };

        let mut outputs: Vec<String> = self
            .sample(&prompt, n_actions, temperature)
            .await?
            .iter()
            .map(|o| o.trim().to_string())
            .collect();

        if state.is_empty() {
            outputs = outputs
                .iter()
                .map(|o| self.first_subquestion(o))
                .collect::<Result<_, _>>()?;
        }

        let prefix = self.template.overall_question_prefix.as_str();
        let canonical = format!("{prefix} {question}");

        if at_depth_limit {
            outputs = outputs.iter().map(|o| format!("{prefix} {o}")).collect();
        }
        if self.config.force_overall_question_on_overall_prompt {
            for output in outputs.iter_mut().filter(|o| o.contains(prefix)) {
                output.clone_from(&canonical);
            }
        }
        if self.config.force_overall_prompt_on_overall_question {
            let lowered = question.to_lowercase();
            for output in outputs.iter_mut().filter(|o| o.to_lowercase() == lowered) {
                output.clone_from(&canonical);
            }
        }

        let sampled = outputs.len();
        let actions: Vec<Action> = dedup_stable(outputs).into_iter().map(Action::from).collect();
        if actions.len() < sampled {
            debug!(
                episode = %episode.id(),
                dropped = sampled - actions.len(),
                "duplicate samples dropped"
            );
        }
        debug!(
            episode = %episode.id(),
            depth = state.len(),
            at_depth_limit,
            sampled,
            actions = actions.len(),
            "proposed actions"
        );
        Ok(actions)
    }

    /// Request `n` samples of `prompt` in sequential batches of at most
    /// `batch_size`, concatenated in request order.
    async fn sample(
        &self,
        prompt: &str,
        n: usize,
        temperature: f64,
    ) -> Result<Vec<String>, PolicyError> {
        let mut outputs = Vec::with_capacity(n);
        while outputs.len() < n {
            let slots = (n - outputs.len()).min(self.config.batch_size);
            let request = GenerateRequest {
                prompts: vec![prompt.to_string(); slots],
                stop: STOP_SEQUENCE.to_string(),
                do_sample: true,
                temperature,
                hide_input: true,
            };
            let batch = self.model.generate(request).await?;
            if batch.len() != slots {
                return Err(ModelError::ShapeMismatch {
                    expected: slots,
                    got: batch.len(),
                }
                .into());
            }
            outputs.extend(batch);
        }
        Ok(outputs)
    }

    /// First quoted sub-question of a first-step output, without its quotes.
    fn first_subquestion(&self, output: &str) -> Result<String, PolicyError> {
        let first = self
            .extractor
            .extract_subquestions(output)
            .into_iter()
            .next()
            .map(|item| unquote(&item));

        match first {
            Some(subquestion) if !subquestion.is_empty() => Ok(subquestion),
            _ => {
                warn!(output, "first-step output has no extractable sub-question");
                Err(PolicyError::Parse {
                    output: output.to_string(),
                })
            }
        }
    }
}

/// Normalise to exactly one pair of surrounding double quotes, then drop it.
fn unquote(item: &str) -> String {
    let item = item.trim();
    let item = item.strip_prefix('"').unwrap_or(item);
    let item = item.strip_suffix('"').unwrap_or(item);
    item.trim().to_string()
}
