//! Impls - ports の実装（開発用・テスト用）
//!
//! # 含まれる実装
//! - **QuotedListExtractor**: デフォルトの SubquestionExtractor
//! - **ScriptedModel**: 台本どおりに応答する LanguageModel（テスト・デモ用）
//!
//! # 本番用実装
//! 推論サーバーに接続する LanguageModel は別クレートに配置します。

pub mod quoted_list;
pub mod scripted_model;

// 主要な型を再エクスポート
pub use self::quoted_list::QuotedListExtractor;
pub use self::scripted_model::{LogitRule, ModelScript, ScriptedModel};
