//! SearchConfig port - 探索アルゴリズムが消費する policy の契約
//!
//! 探索アルゴリズム（MCTS など）はこの trait だけを通して policy を使います。
//! 木の展開・backup・終了判定は探索側の責務です。
//!
//! # 2 段階 reward の契約
//! 1. node 展開時: `propose` → 各 action に `fast_reward`
//!    （実行前の安価な推定。diagnostics に `r_useful` が入る）
//! 2. action 実行後: state transition が `r_conf` を返す
//! 3. backup 時: node が保持していた `r_useful` と `r_conf` を `reward` に渡す
//!
//! node は 1 と 2 の値を保持しておく必要があります。
//! `reward` はどちらかが欠けていれば Precondition エラーを返し、
//! 既定値で補うことはしません。

use async_trait::async_trait;

use crate::domain::{Action, PolicyError, ReasoningState, RewardComponents};

/// The policy a search algorithm drives.
#[async_trait]
pub trait SearchConfig: Send + Sync {
    /// Bind the overall question for a new episode.
    fn update_example(&mut self, example: &str);

    /// Candidate next sub-questions for `state`, distinct and in stable order.
    async fn propose(&self, state: &ReasoningState) -> Result<Vec<Action>, PolicyError>;

    /// Proxy reward, computed before `action` is executed.
    async fn fast_reward(
        &self,
        state: &ReasoningState,
        action: &Action,
    ) -> Result<(f64, RewardComponents), PolicyError>;

    /// Final reward, computed once the action's confidence is known.
    fn reward(
        &self,
        state: &ReasoningState,
        action: &Action,
        r_useful: Option<f64>,
        r_conf: Option<f64>,
    ) -> Result<(f64, RewardComponents), PolicyError>;
}
