//! SubquestionExtractor port - 初手の出力から sub-question を取り出す
//!
//! 初手（state が空）のモデル出力は `["q1", "q2"]` のような小さなリストです。
//! 文字列解析のヒューリスティックは policy から切り離し、この trait の裏に置きます。
//!
//! # 実装
//! - **QuotedListExtractor**: デフォルト実装（`impls::quoted_list`）

/// SubquestionExtractor は出力テキストを順序付きの sub-question 列に分解
///
/// 取り出せなければ空の Vec を返します（エラー化は policy 側の責務）。
pub trait SubquestionExtractor: Send + Sync {
    fn extract_subquestions(&self, text: &str) -> Vec<String>;
}
