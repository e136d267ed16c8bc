//! ScriptedModel - テスト・デモ用の決定的な LanguageModel
//!
//! # 実装詳細
//! - 生成結果は VecDeque から 1 prompt につき 1 件ずつ取り出す
//! - logit は「prompt に含まれる文字列」ルールで決める（先に登録したものが優先）
//! - すべての呼び出しを記録し、テストから検査できる
//!
//! # 使用例
//! ```ignore
//! let model = ScriptedModel::new()
//!     .with_generations(["Is Paris a city?", "Where is Paris?"])
//!     .with_logits_for("Where is Paris?", [0.0, 2.0]);
//! ```

use std::collections::VecDeque;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::ports::{GenerateRequest, LanguageModel, ModelError};

/// Logits returned when a scoring prompt contains `contains`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogitRule {
    pub contains: String,
    pub logits: Vec<f64>,
}

/// Serializable description of a `ScriptedModel`, used by the CLI demo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelScript {
    /// Generations handed out in order, one per prompt slot.
    pub generations: Vec<String>,

    /// Logits for prompts no rule matches. `None` means `[0.0, 0.0]`.
    pub default_logits: Option<Vec<f64>>,

    pub rules: Vec<LogitRule>,
}

#[derive(Default)]
struct Journal {
    generate_calls: Vec<GenerateRequest>,
    logit_prompts: Vec<String>,
}

/// ScriptedModel は台本どおりに応答するモデル
pub struct ScriptedModel {
    generations: Mutex<VecDeque<String>>,
    default_logits: Vec<f64>,
    rules: Vec<LogitRule>,
    generation_failure: Option<String>,
    logits_failure: Option<String>,
    journal: Mutex<Journal>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self {
            generations: Mutex::new(VecDeque::new()),
            default_logits: vec![0.0, 0.0],
            rules: Vec::new(),
            generation_failure: None,
            logits_failure: None,
            journal: Mutex::new(Journal::default()),
        }
    }

    pub fn from_script(script: ModelScript) -> Self {
        let mut model = Self::new()
            .with_generations(script.generations)
            .with_rules(script.rules);
        if let Some(logits) = script.default_logits {
            model = model.with_default_logits(logits);
        }
        model
    }

    /// Queue generations; they are handed out in order across calls.
    pub fn with_generations<I, S>(mut self, outputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let queue = self.generations.get_mut();
        for output in outputs {
            queue.push_back(output.into());
        }
        self
    }

    pub fn with_default_logits(mut self, logits: impl Into<Vec<f64>>) -> Self {
        self.default_logits = logits.into();
        self
    }

    pub fn with_logits_for(
        mut self,
        contains: impl Into<String>,
        logits: impl Into<Vec<f64>>,
    ) -> Self {
        self.rules.push(LogitRule {
            contains: contains.into(),
            logits: logits.into(),
        });
        self
    }

    fn with_rules(mut self, rules: Vec<LogitRule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Make every `generate` call fail with `ModelError::Generation`.
    pub fn failing_generation(mut self, message: impl Into<String>) -> Self {
        self.generation_failure = Some(message.into());
        self
    }

    /// Make every `next_token_logits` call fail with `ModelError::Logits`.
    pub fn failing_logits(mut self, message: impl Into<String>) -> Self {
        self.logits_failure = Some(message.into());
        self
    }

    /// Every `generate` request received so far, in call order.
    pub async fn generate_calls(&self) -> Vec<GenerateRequest> {
        self.journal.lock().await.generate_calls.clone()
    }

    /// Every scoring prompt received so far, in call order.
    pub async fn logit_prompts(&self) -> Vec<String> {
        self.journal.lock().await.logit_prompts.clone()
    }

    pub async fn remaining_generations(&self) -> usize {
        self.generations.lock().await.len()
    }
}

impl Default for ScriptedModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn generate(&self, request: GenerateRequest) -> Result<Vec<String>, ModelError> {
        let wanted = request.prompts.len();
        self.journal.lock().await.generate_calls.push(request);

        if let Some(message) = &self.generation_failure {
            return Err(ModelError::Generation(message.clone()));
        }

        let mut queue = self.generations.lock().await;
        if queue.len() < wanted {
            return Err(ModelError::Generation(format!(
                "script exhausted: {} generations left, {wanted} requested",
                queue.len()
            )));
        }
        Ok(queue.drain(..wanted).collect())
    }

    async fn next_token_logits(
        &self,
        prompt: &str,
        candidates: &[&str],
    ) -> Result<Vec<f64>, ModelError> {
        self.journal.lock().await.logit_prompts.push(prompt.to_string());

        if let Some(message) = &self.logits_failure {
            return Err(ModelError::Logits(message.clone()));
        }

        let logits = self
            .rules
            .iter()
            .find(|rule| prompt.contains(&rule.contains))
            .map(|rule| &rule.logits)
            .unwrap_or(&self.default_logits);
        if logits.len() != candidates.len() {
            return Err(ModelError::ShapeMismatch {
                expected: candidates.len(),
                got: logits.len(),
            });
        }
        Ok(logits.clone())
    }
}
