//! PolicyBuilder - policy の構築とワイヤリング
//!
//! # Fail-fast 設計
//! - build() 時に設定値とテンプレートをすべて検証
//! - モデル・テンプレートが未設定なら ConfigError::MissingComponent
//! - extractor は未設定なら QuotedListExtractor

use std::sync::Arc;

use super::policy::DecompositionPolicy;
use super::proposer::ActionProposer;
use super::scorer::UsefulnessScorer;
use crate::domain::{
    ConfigError, DecompositionTemplate, PolicyConfig, PolicySettings, RewardCombiner,
    UsefulnessTemplate,
};
use crate::impls::QuotedListExtractor;
use crate::ports::{LanguageModel, SubquestionExtractor};

/// PolicyBuilder は DecompositionPolicy を構築
///
/// # 使用例
/// ```ignore
/// let policy = PolicyBuilder::new()
///     .settings(PolicySettings::load("settings.json")?)
///     .model(Arc::new(my_model))
///     .build()?;
/// ```
#[derive(Default)]
pub struct PolicyBuilder {
    config: PolicyConfig,
    decomposition: Option<DecompositionTemplate>,
    usefulness: Option<UsefulnessTemplate>,
    model: Option<Arc<dyn LanguageModel>>,
    extractor: Option<Arc<dyn SubquestionExtractor>>,
}

impl PolicyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Config and both templates at once.
    pub fn settings(self, settings: PolicySettings) -> Self {
        self.config(settings.config)
            .decomposition(settings.decomposition)
            .usefulness(settings.usefulness)
    }

    pub fn config(mut self, config: PolicyConfig) -> Self {
        self.config = config;
        self
    }

    pub fn decomposition(mut self, template: DecompositionTemplate) -> Self {
        self.decomposition = Some(template);
        self
    }

    pub fn usefulness(mut self, template: UsefulnessTemplate) -> Self {
        self.usefulness = Some(template);
        self
    }

    pub fn model(mut self, model: Arc<dyn LanguageModel>) -> Self {
        self.model = Some(model);
        self
    }

    pub fn extractor(mut self, extractor: Arc<dyn SubquestionExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    pub fn build(self) -> Result<DecompositionPolicy, ConfigError> {
        self.config.validate()?;
        let decomposition = self
            .decomposition
            .ok_or(ConfigError::MissingComponent("decomposition template"))?;
        decomposition.validate()?;
        let usefulness = self
            .usefulness
            .ok_or(ConfigError::MissingComponent("usefulness template"))?;
        usefulness.validate()?;
        let model = self.model.ok_or(ConfigError::MissingComponent("model"))?;
        let extractor: Arc<dyn SubquestionExtractor> = match self.extractor {
            Some(extractor) => extractor,
            None => Arc::new(QuotedListExtractor),
        };

        let combiner =
            RewardCombiner::new(self.config.reward_alpha, self.config.default_confidence);
        let proposer = ActionProposer::new(model.clone(), extractor, decomposition, self.config);
        let scorer = UsefulnessScorer::new(model, usefulness);
        Ok(DecompositionPolicy::new(proposer, scorer, combiner))
    }
}
