//! 答案键模型
//!
//! 一份试卷的标准答案序列，从逗号分隔的文本解析而来

use crate::error::ValidationError;
use crate::models::analysis::AnswerKeyEntry;
use regex::Regex;

/// 答案键
///
/// 选项已统一为大写；长度即试卷的题目数量
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerKey {
    choices: Vec<String>,
}

impl AnswerKey {
    /// 从逗号分隔的文本解析答案键
    ///
    /// 每个选项先去除首尾空白再转为大写，例如 "a, b ,C,d" → A,B,C,D。
    /// 空文本、或出现非单字母的选项时返回校验错误。
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if input.trim().is_empty() {
            return Err(ValidationError::EmptyAnswerKey);
        }

        let choices: Vec<String> = input
            .split(',')
            .map(|token| token.trim().to_uppercase())
            .collect();

        // 选项必须是单个大写字母
        if let Ok(re) = Regex::new(r"^[A-Z]$") {
            for token in &choices {
                if !re.is_match(token) {
                    return Err(ValidationError::InvalidAnswerKeyFormat {
                        token: token.clone(),
                    });
                }
            }
        }

        Ok(Self { choices })
    }

    /// 题目数量
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// 大写化后的选项序列
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    /// 转换为请求所需的 (题号, 正确答案) 序列，题号从 1 开始
    pub fn to_entries(&self) -> Vec<AnswerKeyEntry> {
        self.choices
            .iter()
            .enumerate()
            .map(|(index, choice)| AnswerKeyEntry {
                question_number: (index + 1) as u32,
                correct_answer: choice.clone(),
            })
            .collect()
    }
}
