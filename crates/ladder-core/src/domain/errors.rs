//! Errors - エラー型と分類
//!
//! 呼び出し側（探索アルゴリズム）が retry / branch 放棄を判断できるよう、
//! すべてのエラーは `ErrorKind` で分類されます。policy 自身は retry しません。

use thiserror::Error;

use crate::ports::ModelError;

/// ErrorKind は policy エラーの分類
///
/// - Configuration: テンプレート・設定の不備（起動時に検出、retry 無意味）
/// - Parse: 初手の出力から sub-question を取り出せない
/// - Precondition: 必要な値がそろっていない（assert 相当）
/// - Upstream: モデル側の失敗（そのまま伝播）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    Parse,
    Precondition,
    Upstream,
}

/// Errors raised while loading templates or settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("pattern {pattern:?} must contain exactly one `{{}}` placeholder (found {found})")]
    MalformedPattern { pattern: String, found: usize },

    #[error("template slot `{0}` must not be empty")]
    EmptySlot(&'static str),

    #[error("setting `{name}` is out of range: {value} (expected {expected})")]
    OutOfRange {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("policy builder is missing `{0}`")]
    MissingComponent(&'static str),

    #[error("json decode: {0}")]
    Json(#[from] serde_json::Error),

    #[error("read settings: {0}")]
    Io(#[from] std::io::Error),
}

/// PolicyError はこのクレートの公開エラー
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("could not extract a sub-question from first-step output {output:?}")]
    Parse { output: String },

    #[error("reward requires `{0}` but it was not supplied")]
    MissingRewardComponent(&'static str),

    #[error("reward component `{name}` must be a probability in [0, 1], got {value}")]
    ComponentOutOfRange { name: &'static str, value: f64 },

    #[error("no example is bound; call update_example first")]
    ExampleNotBound,

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl PolicyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PolicyError::Config(_) => ErrorKind::Configuration,
            PolicyError::Parse { .. } => ErrorKind::Parse,
            PolicyError::MissingRewardComponent(_)
            | PolicyError::ComponentOutOfRange { .. }
            | PolicyError::ExampleNotBound => ErrorKind::Precondition,
            PolicyError::Model(_) => ErrorKind::Upstream,
        }
    }
}
