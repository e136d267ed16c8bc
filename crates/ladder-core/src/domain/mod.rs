//! Domain model (state, actions, rewards, templates, settings, errors).
//!
//! 非同期処理を持たない型だけを置きます（I/O は `PolicySettings::load` のみ）。

pub mod action;
pub mod config;
pub mod episode;
pub mod errors;
pub mod ids;
pub mod reward;
pub mod state;
pub mod template;

pub use self::action::Action;
pub use self::config::{PolicyConfig, PolicySettings};
pub use self::episode::Episode;
pub use self::errors::{ConfigError, ErrorKind, PolicyError};
pub use self::ids::EpisodeId;
pub use self::reward::{RewardCombiner, RewardComponents};
pub use self::state::{ReasoningState, SubStep};
pub use self::template::{DecompositionTemplate, IndexedPattern, UsefulnessTemplate};
