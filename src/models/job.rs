//! 分析任务描述
//!
//! 一个 TOML 文件定义一个任务，可以包含 MCQ 批改、文本分析体验或两者

use crate::models::text_analysis::{AnalysisType, Language};
use serde::Deserialize;

/// 一个待执行的分析任务
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisJob {
    pub name: String,
    #[serde(default)]
    pub mcq: Option<McqJob>,
    #[serde(default)]
    pub text_analysis: Option<TextAnalysisJob>,
    #[serde(skip)]
    pub file_path: Option<String>,
}

impl AnalysisJob {
    /// 任务是否为空（两种分析都未配置）
    pub fn is_empty(&self) -> bool {
        self.mcq.is_none() && self.text_analysis.is_none()
    }

    pub fn with_file_path(mut self, file_path: String) -> Self {
        self.file_path = Some(file_path);
        self
    }
}

/// MCQ 批改任务
#[derive(Debug, Clone, Deserialize)]
pub struct McqJob {
    /// 逗号分隔的标准答案，例如 "A,B,C,D"
    pub answer_key: String,
    /// 学生答题内容，每行一名学生
    #[serde(default)]
    pub student_answers: Option<String>,
    /// 学生答题内容所在文件（相对于任务文件所在目录）
    #[serde(default)]
    pub student_answers_file: Option<String>,
}

impl McqJob {
    /// 取出学生答题文本，未配置时为空串（由向导的校验兜底）
    pub fn student_answers_text(&self) -> &str {
        self.student_answers.as_deref().unwrap_or("")
    }
}

/// 文本分析体验任务
#[derive(Debug, Clone, Deserialize)]
pub struct TextAnalysisJob {
    /// 待分析文本；缺省时使用对应语言的内置示例
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub analysis_type: AnalysisType,
    #[serde(default)]
    pub language: Language,
}
