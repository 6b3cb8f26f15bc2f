//! 文本规范化
//!
//! 纯函数，不依赖任何外部资源

use std::sync::OnceLock;

use regex::Regex;

fn whitespace_run() -> &'static Regex {
    static WHITESPACE_RUN: OnceLock<Regex> = OnceLock::new();
    WHITESPACE_RUN.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace regex"))
}

/// 规范化页面文本
///
/// 1. 按空白切分，只保留前 `max_words` 个词
/// 2. 用单个空格重新拼接
/// 3. 去掉 7 位 ASCII 以外的字符
/// 4. 合并连续空白并去掉首尾空白
///
/// 输出的词数不超过 `max_words`，且对同一个 `max_words` 是幂等的
pub fn normalize(text: &str, max_words: usize) -> String {
    let capped = text
        .split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ");

    let ascii: String = capped.chars().filter(char::is_ascii).collect();

    whitespace_run().replace_all(&ascii, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize("  Hello   world  \n\n  test  ", 100), "Hello world test");
    }

    #[test]
    fn test_caps_word_count() {
        assert_eq!(normalize("one two three four five", 3), "one two three");
        assert_eq!(normalize("one two", 0), "");
    }

    #[test]
    fn test_strips_non_ascii() {
        assert_eq!(normalize("café — naïve résumé", 10), "caf nave rsum");
        assert_eq!(normalize("中文 only", 10), "only");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize("", 10), "");
        assert_eq!(normalize(" \t\n ", 10), "");
    }

    #[test]
    fn test_output_is_ascii_and_bounded() {
        let samples = [
            "Rust’s ownership model — explained in 5 minutes",
            "\u{00a0}non\u{2003}breaking\u{3000}spaces and tabs\t\tmixed",
            "emoji 🦀 crab 🦀🦀 and more words here to cut",
            "a\u{0301}b combining marks",
        ];
        for sample in samples {
            for max_words in [0, 1, 3, 8, 100] {
                let out = normalize(sample, max_words);
                assert!(out.is_ascii(), "非 ASCII 输出: {:?}", out);
                assert!(out.split_whitespace().count() <= max_words);
                assert!(!out.contains("  "));
                assert_eq!(out, out.trim());
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "  lots   of\nspace ",
            "mixed ünïcödé text — with dashes",
            "😀 😀 😀 words after emoji-only tokens",
            "",
        ];
        for sample in samples {
            for max_words in [1, 2, 5, 1500] {
                let once = normalize(sample, max_words);
                assert_eq!(normalize(&once, max_words), once);
            }
        }
    }
}
