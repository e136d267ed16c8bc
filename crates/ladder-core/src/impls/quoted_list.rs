//! QuotedListExtractor - デフォルトの SubquestionExtractor
//!
//! 初手の出力は `"q1", "q2"` や `["q1", "q2"]` の形をしています。
//! ダブルクォートで囲まれた部分を順番に取り出し、クォートが無ければ
//! 括弧を外したテキスト全体を 1 件として返します。

use crate::ports::SubquestionExtractor;

#[derive(Debug, Clone, Copy, Default)]
pub struct QuotedListExtractor;

impl SubquestionExtractor for QuotedListExtractor {
    fn extract_subquestions(&self, text: &str) -> Vec<String> {
        let quoted: Vec<String> = text
            .split('"')
            .skip(1)
            .step_by(2)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("\"{s}\""))
            .collect();
        // An odd number of quotes leaves the last piece unterminated; it is
        // still taken, the way a truncated generation usually looks.
        if text.contains('"') {
            return quoted;
        }

        let bare = text
            .trim()
            .trim_start_matches('[')
            .trim_end_matches(|c: char| c == ']' || c == '.')
            .trim();
        if bare.is_empty() {
            Vec::new()
        } else {
            vec![bare.to_string()]
        }
    }
}
