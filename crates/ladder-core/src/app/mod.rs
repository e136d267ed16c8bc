//! App - アプリケーション層
//!
//! ports を組み合わせて policy のロジックを実装します。
//!
//! # 主要コンポーネント
//! - **prompt**: prompt 組み立て（純粋関数）
//! - **ActionProposer**: 次の sub-question 候補の生成
//! - **UsefulnessScorer**: 候補の有用性評価
//! - **DecompositionPolicy**: 上記を束ねた SearchConfig 実装
//! - **PolicyBuilder**: 構築とワイヤリング（起動時検証）

pub mod builder;
pub mod policy;
pub mod prompt;
pub mod proposer;
pub mod scorer;

// 主要な型を再エクスポート
pub use self::builder::PolicyBuilder;
pub use self::policy::{DecompositionPolicy, ScoredAction};
pub use self::proposer::ActionProposer;
pub use self::scorer::UsefulnessScorer;
