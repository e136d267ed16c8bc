//! Domain identifiers.
//!
//! # EpisodeId
//! `update_example` のたびに ULID を発行します。
//! - **時刻でソート可能**: ログを episode 順に並べられる
//! - **分散生成可能**: 複数 worker が調整なしで発行できる
//!
//! ID はログの相関にだけ使い、prompt や action の順序には影響しません。

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Identifier of one reasoning episode (one overall question).
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EpisodeId(Ulid);

impl EpisodeId {
    pub fn generate() -> Self {
        Self(Ulid::new())
    }
}

impl fmt::Display for EpisodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "episode-{}", self.0)
    }
}
