//! LanguageModel port - モデル実行環境の抽象化
//!
//! token 生成と logit 計算は外部のモデルサーバーが担当します。
//! policy は 1 回の呼び出しを 1 つのブロッキング操作として扱い、
//! 同じ proposal の batch を並行に投げることはありません。
//!
//! # 実装
//! - **ScriptedModel**: テスト・デモ用（`impls::scripted_model`）
//! - 本番用の実装（HTTP 推論サーバーなど）は別クレートに置く想定

use async_trait::async_trait;
use thiserror::Error;

/// One batched generation call. All prompts share the same parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub prompts: Vec<String>,

    /// Generation stops at the first occurrence of this sequence.
    pub stop: String,

    pub do_sample: bool,
    pub temperature: f64,

    /// Return only the continuation, not the prompt.
    pub hide_input: bool,
}

/// ModelError は上流（モデルサーバー）の失敗
///
/// policy はこれを変換せずに呼び出し側へ返します（retry なし）。
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("generation failed: {0}")]
    Generation(String),

    #[error("logit scoring failed: {0}")]
    Logits(String),

    #[error("model returned {got} results for {expected} inputs")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("model returned a non-finite logit: {0}")]
    NonFiniteLogit(f64),
}

/// LanguageModel はテキスト生成と次トークン logit を提供
///
/// # 契約
/// - `generate`: prompt 1 件につき出力 1 件、順序は入力どおり
/// - `next_token_logits`: candidate 1 件につき logit 1 件、次の 1 トークン位置のみ
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate(&self, request: GenerateRequest) -> Result<Vec<String>, ModelError>;

    async fn next_token_logits(
        &self,
        prompt: &str,
        candidates: &[&str],
    ) -> Result<Vec<f64>, ModelError>;
}
