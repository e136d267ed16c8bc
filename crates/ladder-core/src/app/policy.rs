//! DecompositionPolicy - 探索アルゴリズムに渡す policy 本体
//!
//! proposer / scorer / reward combiner を束ね、`SearchConfig` を実装します。
//! 保持する可変状態は「現在の episode」だけで、それも `update_example`
//! でしか変わりません。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::proposer::ActionProposer;
use super::scorer::UsefulnessScorer;
use crate::domain::{
    Action, Episode, PolicyError, ReasoningState, RewardCombiner, RewardComponents,
};
use crate::ports::SearchConfig;

/// An action together with its proxy reward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredAction {
    pub action: Action,
    pub fast_reward: f64,
    pub components: RewardComponents,
}

pub struct DecompositionPolicy {
    proposer: ActionProposer,
    scorer: UsefulnessScorer,
    combiner: RewardCombiner,
    episode: Option<Episode>,
}

impl DecompositionPolicy {
    /// Use `PolicyBuilder` unless the parts are already validated.
    pub fn new(
        proposer: ActionProposer,
        scorer: UsefulnessScorer,
        combiner: RewardCombiner,
    ) -> Self {
        Self {
            proposer,
            scorer,
            combiner,
            episode: None,
        }
    }

    pub fn episode(&self) -> Option<&Episode> {
        self.episode.as_ref()
    }

    pub fn combiner(&self) -> &RewardCombiner {
        &self.combiner
    }

    fn bound_episode(&self) -> Result<&Episode, PolicyError> {
        self.episode.as_ref().ok_or(PolicyError::ExampleNotBound)
    }

    /// Propose actions for `state` and proxy-score each, in proposal order.
    ///
    /// This is the expansion step of a fresh search node. The first failing
    /// call aborts the whole expansion.
    pub async fn score_actions(
        &self,
        state: &ReasoningState,
    ) -> Result<Vec<ScoredAction>, PolicyError> {
        let actions = self.propose(state).await?;
        let mut scored = Vec::with_capacity(actions.len());
        for action in actions {
            let (fast_reward, components) = self.fast_reward(state, &action).await?;
            scored.push(ScoredAction {
                action,
                fast_reward,
                components,
            });
        }
        Ok(scored)
    }
}

#[async_trait]
impl SearchConfig for DecompositionPolicy {
    fn update_example(&mut self, example: &str) {
        let episode = Episode::new(example);
        info!(episode = %episode.id(), "bound new example");
        self.episode = Some(episode);
    }

    async fn propose(&self, state: &ReasoningState) -> Result<Vec<Action>, PolicyError> {
        let episode = self.bound_episode()?;
        self.proposer.propose(state, episode).await
    }

    async fn fast_reward(
        &self,
        state: &ReasoningState,
        action: &Action,
    ) -> Result<(f64, RewardComponents), PolicyError> {
        let episode = self.bound_episode()?;
        let (r_useful, diagnostics) = self.scorer.score(state, action, episode).await?;
        let (reward, _) = self.combiner.combine(r_useful, None);
        Ok((reward, diagnostics))
    }

    fn reward(
        &self,
        _state: &ReasoningState,
        _action: &Action,
        r_useful: Option<f64>,
        r_conf: Option<f64>,
    ) -> Result<(f64, RewardComponents), PolicyError> {
        self.combiner.combine_final(r_useful, r_conf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::domain::{ErrorKind, SubStep};
    use crate::impls::{QuotedListExtractor, ScriptedModel};
    use crate::test_support::{config, decomposition_template, usefulness_template, QUESTION};

    fn policy(model: Arc<ScriptedModel>) -> DecompositionPolicy {
        let cfg = config();
        let proposer = ActionProposer::new(
            model.clone(),
            Arc::new(QuotedListExtractor),
            decomposition_template(),
            cfg.clone(),
        );
        let scorer = UsefulnessScorer::new(model, usefulness_template());
        DecompositionPolicy::new(
            proposer,
            scorer,
            RewardCombiner::new(cfg.reward_alpha, cfg.default_confidence),
        )
    }

    #[tokio::test]
    async fn calls_before_update_example_fail() {
        let p = policy(Arc::new(ScriptedModel::new()));
        let err = p.propose(&ReasoningState::new()).await.unwrap_err();
        assert!(matches!(err, PolicyError::ExampleNotBound));
        assert_eq!(err.kind(), ErrorKind::Precondition);
    }

    #[tokio::test]
    async fn search_drives_policy_through_trait_object() {
        let model = Arc::new(
            ScriptedModel::new()
                .with_generations(["Where is Paris?"; 4])
                .with_default_logits([0.0, 0.0]),
        );
        let mut search: Box<dyn SearchConfig> = Box::new(policy(model));
        search.update_example(QUESTION);
        let state: ReasoningState =
            vec![SubStep::new("What is the capital of France?", "Paris.")].into();

        let actions = search.propose(&state).await.unwrap();
        assert_eq!(actions, vec![Action::from("Where is Paris?")]);

        let (_, diag) = search.fast_reward(&state, &actions[0]).await.unwrap();
        assert_eq!(diag, RewardComponents::useful(0.5));
    }

    #[tokio::test]
    async fn update_example_starts_a_new_episode() {
        let mut p = policy(Arc::new(ScriptedModel::new()));
        p.update_example(QUESTION);
        let first = p.episode().unwrap().id();
        assert_eq!(p.episode().unwrap().overall_question(), QUESTION);

        p.update_example("Is Lyon the capital of France?");
        assert_ne!(p.episode().unwrap().id(), first);
        assert_eq!(p.episode().unwrap().overall_question(), "Is Lyon the capital of France?");
    }

    #[tokio::test]
    async fn fast_reward_uses_default_confidence() {
        // Yes mass = 0.5, default confidence 0.8, alpha 0.5.
        let mut p = policy(Arc::new(ScriptedModel::new()));
        p.update_example(QUESTION);
        let (reward, diag) = p
            .fast_reward(&ReasoningState::new(), &Action::from("Where is Paris?"))
            .await
            .unwrap();
        assert!((reward - (0.5f64 * 0.8).sqrt()).abs() < 1e-12);
        assert_eq!(diag, RewardComponents::useful(0.5));
        assert_eq!(diag.with_confidence(0.8).reward(p.combiner()), reward);
    }

    #[tokio::test]
    async fn fast_reward_is_deterministic() {
        let model = Arc::new(ScriptedModel::new().with_default_logits([1.3, -0.4]));
        let mut p = policy(model);
        p.update_example(QUESTION);
        let state: ReasoningState =
            vec![SubStep::new("What is the capital of France?", "Paris.")].into();
        let action = Action::from("Is Paris in Europe?");

        let a = p.fast_reward(&state, &action).await.unwrap();
        let b = p.fast_reward(&state, &action).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn final_reward_requires_confidence() {
        let mut p = policy(Arc::new(ScriptedModel::new()));
        p.update_example(QUESTION);
        let state = ReasoningState::new();
        let action = Action::from("Where is Paris?");

        let err = p.reward(&state, &action, Some(0.9), None).unwrap_err();
        assert!(matches!(err, PolicyError::MissingRewardComponent("r_conf")));
        let err = p.reward(&state, &action, None, Some(0.9)).unwrap_err();
        assert!(matches!(err, PolicyError::MissingRewardComponent("r_useful")));

        let (reward, components) = p.reward(&state, &action, Some(0.81), Some(0.64)).unwrap();
        assert!((reward - 0.72).abs() < 1e-12);
        assert_eq!(components, RewardComponents::useful(0.81).with_confidence(0.64));
    }

    #[tokio::test]
    async fn score_actions_keeps_proposal_order() {
        let model = Arc::new(
            ScriptedModel::new()
                .with_generations([
                    "Where is Paris?",
                    "Is Paris big?",
                    "Where is Paris?",
                    "Who lives in Paris?",
                ])
                .with_logits_for("Is Paris big?", [0.0, 5.0]),
        );
        let mut p = policy(model);
        p.update_example(QUESTION);
        let state: ReasoningState =
            vec![SubStep::new("What is the capital of France?", "Paris.")].into();

        let scored = p.score_actions(&state).await.unwrap();
        let texts: Vec<&str> = scored.iter().map(|s| s.action.as_str()).collect();
        assert_eq!(texts, vec!["Where is Paris?", "Is Paris big?", "Who lives in Paris?"]);
        assert!(scored[1].fast_reward < scored[0].fast_reward);
        assert_eq!(scored[0].fast_reward, scored[2].fast_reward);
    }
}
