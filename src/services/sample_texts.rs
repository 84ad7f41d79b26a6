//! 内置示例文本 - 业务能力层
//!
//! 文本分析体验任务未提供文本时使用的各语言示例

use crate::models::text_analysis::Language;
use phf::phf_map;

/// 英文示例（其他语言缺失时的兜底）
const ENGLISH_SAMPLE: &str = "The students was very happy with there test results. \
They recieve good grades and was excited to share the news with there parents. \
Me and my friend decided to celebrate at the libary.";

/// 各语言的示例文本（均刻意包含若干错误）
static SAMPLE_TEXTS: phf::Map<&'static str, &'static str> = phf_map! {
    "english" => ENGLISH_SAMPLE,
    "urdu" => "یہ ایک نمونہ متن ہے جس میں کچھ غلطیاں ہو سکتی ہیں۔",
    "spanish" => "Los estudiantes estaba muy feliz con sus resultados. Ellos recibio buenas notas.",
    "french" => "Les étudiants était très heureux avec leurs résultats. Ils a reçu de bonnes notes.",
};

/// 取指定语言的示例文本
pub fn sample_text(language: Language) -> &'static str {
    SAMPLE_TEXTS
        .get(language.as_str())
        .copied()
        .unwrap_or(ENGLISH_SAMPLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_language_has_a_sample() {
        for language in [
            Language::English,
            Language::Urdu,
            Language::Spanish,
            Language::French,
        ] {
            assert!(!sample_text(language).is_empty());
        }
    }
}
