//! 文本分析（体验版）的请求/响应数据结构
//!
//! 对应分析服务 /api/analyze 接口

use crate::models::analysis::deserialize_string_or_number;
use serde::{Deserialize, Serialize};

/// 分析类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisType {
    GrammarSpelling,
    GrammarOnly,
    SpellingOnly,
}

impl Default for AnalysisType {
    fn default() -> Self {
        AnalysisType::GrammarSpelling
    }
}

/// 支持的语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Urdu,
    Spanish,
    French,
}

impl Default for Language {
    fn default() -> Self {
        Language::English
    }
}

impl Language {
    /// 接口使用的小写语言名
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Urdu => "urdu",
            Language::Spanish => "spanish",
            Language::French => "french",
        }
    }
}

/// 文本分析请求
#[derive(Debug, Clone, Serialize)]
pub struct TextAnalysisRequest {
    pub text: String,
    pub analysis_type: AnalysisType,
    pub language: Language,
}

/// 文本分析响应
#[derive(Debug, Clone, Deserialize)]
pub struct TextAnalysisResult {
    #[serde(default)]
    pub total_mistakes: u32,
    #[serde(default)]
    pub text_length: u32,
    #[serde(default)]
    pub mistakes: Vec<Mistake>,
}

/// 单个错误项
#[derive(Debug, Clone, Deserialize)]
pub struct Mistake {
    #[serde(rename = "type")]
    pub mistake_type: String,
    /// 服务端返回的位置信息可能是偏移量或描述文本
    #[serde(default, deserialize_with = "deserialize_opt_string_or_number")]
    pub position: Option<String>,
    pub original: String,
    pub corrected: String,
    #[serde(default)]
    pub explanation: String,
}

fn deserialize_opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    deserialize_string_or_number(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_values() {
        let request = TextAnalysisRequest {
            text: "The students was happy".to_string(),
            analysis_type: AnalysisType::GrammarSpelling,
            language: Language::English,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["analysis_type"], "grammar_spelling");
        assert_eq!(json["language"], "english");
    }

    #[test]
    fn test_result_parses_mistakes() {
        let raw = r#"{
            "total_mistakes": 1,
            "text_length": 22,
            "mistakes": [
                { "type": "grammar", "position": 4, "original": "was",
                  "corrected": "were", "explanation": "subject-verb agreement" }
            ]
        }"#;

        let result: TextAnalysisResult = serde_json::from_str(raw).unwrap();
        assert_eq!(result.total_mistakes, 1);
        assert_eq!(result.mistakes[0].mistake_type, "grammar");
        assert_eq!(result.mistakes[0].position.as_deref(), Some("4"));
    }

    #[test]
    fn test_result_tolerates_missing_fields() {
        let raw = r#"{ "mistakes": [ { "type": "spelling", "original": "libary",
                        "corrected": "library" } ] }"#;
        let result: TextAnalysisResult = serde_json::from_str(raw).unwrap();
        assert_eq!(result.total_mistakes, 0);
        assert!(result.mistakes[0].position.is_none());
        assert_eq!(result.mistakes[0].explanation, "");
    }
}
