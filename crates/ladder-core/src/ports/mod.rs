//! Ports - 抽象化レイヤー
//!
//! policy の外側にいる協調者（モデルサーバー、テキスト解析、探索アルゴリズム）
//! とのインターフェースを定義します。実装の詳細はここには置きません。

pub mod language_model;
pub mod search_config;
pub mod subquestion_extractor;

// 主要な trait を再エクスポート
pub use self::language_model::{GenerateRequest, LanguageModel, ModelError};
pub use self::search_config::SearchConfig;
pub use self::subquestion_extractor::SubquestionExtractor;
