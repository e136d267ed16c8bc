//! ladder-core
//!
//! Decision policy for a search-based question-decomposition reasoner:
//! proposes the next sub-question and scores how useful it is.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（state, action, reward, template, config, errors）
//! - **ports**: 抽象化レイヤー（LanguageModel, SubquestionExtractor, SearchConfig）
//! - **app**: policy のロジック（prompt, proposer, scorer, policy, builder）
//! - **impls**: ports の実装（QuotedListExtractor, ScriptedModel）
//! - **collections**: 順序を保つ dedup

pub mod app;
pub mod collections;
pub mod domain;
pub mod impls;
pub mod ports;

#[cfg(test)]
pub(crate) mod test_support;

pub use app::{DecompositionPolicy, PolicyBuilder, ScoredAction};
pub use domain::{Action, ErrorKind, PolicyError, PolicySettings, ReasoningState, SubStep};
pub use ports::SearchConfig;
