//! MCQ 批量分析的请求/响应数据结构
//!
//! 与分析服务 /api/analyze-mcq-batch 接口的 JSON 契约一一对应

use crate::models::answer_key::AnswerKey;
use crate::models::answer_sheet::AnswerSheetBatch;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 答案键中的一项：题号 + 正确答案
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnswerKeyEntry {
    pub question_number: u32,
    pub correct_answer: String,
}

/// 批量分析请求
#[derive(Debug, Clone, Serialize)]
pub struct McqBatchRequest {
    /// 客户端生成的临时答案键标识（基于当前时间）
    pub answer_key_id: String,
    pub answer_key: Vec<AnswerKeyEntry>,
    /// 每名学生一个 题号→选项 映射；序列化后键为字符串
    pub student_answers: Vec<BTreeMap<u32, String>>,
    pub user_plan: String,
}

impl McqBatchRequest {
    /// 组装一次批量分析请求
    pub fn new(answer_key: &AnswerKey, batch: &AnswerSheetBatch, user_plan: &str) -> Self {
        Self {
            answer_key_id: format!("temp_key_{}", chrono::Utc::now().timestamp_millis()),
            answer_key: answer_key.to_entries(),
            student_answers: batch.to_wire(),
            user_plan: user_plan.to_string(),
        }
    }

    /// 提交的答题卡份数
    pub fn sheet_count(&self) -> usize {
        self.student_answers.len()
    }
}

/// 批量分析响应
#[derive(Debug, Clone, Deserialize)]
pub struct McqBatchResult {
    #[serde(default)]
    pub total_sheets_analyzed: u32,
    /// 汇总字段缺失时取全 0 默认值
    #[serde(default)]
    pub summary: ScoreSummary,
    #[serde(default)]
    pub individual_results: Vec<StudentResult>,
}

/// 批次汇总
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ScoreSummary {
    #[serde(default)]
    pub average_percentage: f64,
    #[serde(default)]
    pub highest_score: f64,
    #[serde(default)]
    pub lowest_score: f64,
}

/// 单个学生的批改结果
#[derive(Debug, Clone, Deserialize)]
pub struct StudentResult {
    /// 服务端可能返回字符串或整数，统一为字符串
    #[serde(deserialize_with = "deserialize_string_or_number")]
    pub student_id: String,
    pub score: f64,
    pub total_questions: u32,
    pub score_percentage: f64,
    pub grade: String,
}

/// 把字符串或整数反序列化为字符串
pub(crate) fn deserialize_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct StringOrNumberVisitor;

    impl<'de> Visitor<'de> for StringOrNumberVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or number")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(StringOrNumberVisitor)
}
