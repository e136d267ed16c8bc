//! Policy settings (sampling, reward weights, forcing flags, templates).
//!
//! Every numeric field has a default so a settings file only needs the
//! templates. `validate()` is called before any policy is built.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::template::{DecompositionTemplate, UsefulnessTemplate};

/// Sampling / reward knobs of the policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Samples requested per proposal (before deduplication).
    pub n_actions: usize,

    /// Maximum prompts per `generate` call. Throughput only; never changes results.
    pub batch_size: usize,

    pub temperature: f64,

    /// Weight of usefulness against confidence in the reward.
    pub reward_alpha: f64,

    /// Confidence assumed for proxy rewards, before the action is executed.
    pub default_confidence: f64,

    /// Chain length at which the policy steers toward the overall question.
    pub depth_limit: usize,

    pub force_terminating_on_depth_limit: bool,

    /// Outputs equal (case-insensitively) to the overall question are
    /// reframed with the overall-question prefix.
    pub force_overall_prompt_on_overall_question: bool,

    /// Outputs containing the overall-question prefix are replaced by the
    /// canonical overall question.
    pub force_overall_question_on_overall_prompt: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            n_actions: 4,
            batch_size: 2,
            temperature: 0.8,
            reward_alpha: 0.5,
            default_confidence: 0.8,
            depth_limit: 5,
            force_terminating_on_depth_limit: true,
            force_overall_prompt_on_overall_question: true,
            force_overall_question_on_overall_prompt: true,
        }
    }
}

impl PolicyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        at_least_one("n_actions", self.n_actions)?;
        at_least_one("batch_size", self.batch_size)?;
        at_least_one("depth_limit", self.depth_limit)?;
        if !(self.temperature.is_finite() && self.temperature >= 0.0) {
            return Err(ConfigError::OutOfRange {
                name: "temperature",
                value: self.temperature,
                expected: "a finite value >= 0",
            });
        }
        unit_interval("reward_alpha", self.reward_alpha)?;
        unit_interval("default_confidence", self.default_confidence)?;
        Ok(())
    }
}

fn at_least_one(name: &'static str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::OutOfRange {
            name,
            value: 0.0,
            expected: ">= 1",
        });
    }
    Ok(())
}

fn unit_interval(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::OutOfRange {
            name,
            value,
            expected: "[0, 1]",
        });
    }
    Ok(())
}

/// The whole settings document: knobs plus both templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicySettings {
    #[serde(default)]
    pub config: PolicyConfig,
    pub decomposition: DecompositionTemplate,
    pub usefulness: UsefulnessTemplate,
}

impl PolicySettings {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.config.validate()?;
        self.decomposition.validate()?;
        self.usefulness.validate()
    }
}
