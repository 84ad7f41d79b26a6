//! 学生答题卡模型
//!
//! 每行文本对应一名学生；行内逗号分隔的选项按 1 开始的题号对齐

use crate::error::ValidationError;
use std::collections::BTreeMap;

/// 一名学生的答题卡
///
/// 题号 → 选项的有序映射，题号从 1 开始且连续
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSheet {
    answers: BTreeMap<u32, String>,
}

impl AnswerSheet {
    /// 解析一行答题记录
    ///
    /// 选项去除空白并大写化，按位置配上 1 开始的题号
    pub fn parse_line(line: &str) -> Self {
        let answers = line
            .split(',')
            .map(|token| token.trim().to_uppercase())
            .enumerate()
            .map(|(index, choice)| ((index + 1) as u32, choice))
            .collect();

        Self { answers }
    }

    /// 题号 → 选项映射
    pub fn answers(&self) -> &BTreeMap<u32, String> {
        &self.answers
    }

    /// 答题数量
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// 取某一题的作答
    pub fn answer(&self, question_number: u32) -> Option<&str> {
        self.answers.get(&question_number).map(String::as_str)
    }

    /// 转换为请求体使用的映射
    pub fn into_wire(self) -> BTreeMap<u32, String> {
        self.answers
    }
}

/// 一批学生答题卡
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSheetBatch {
    sheets: Vec<AnswerSheet>,
}

impl AnswerSheetBatch {
    /// 从多行文本解析答题卡批次
    ///
    /// 空白行会被跳过；每行的题数必须与答案键的题数一致，
    /// 不一致的行按行号报错而不是静默错位。
    pub fn parse(input: &str, expected_questions: usize) -> Result<Self, ValidationError> {
        if input.trim().is_empty() {
            return Err(ValidationError::EmptyStudentAnswers);
        }

        let mut sheets = Vec::new();

        for (index, line) in input
            .lines()
            .filter(|line| !line.trim().is_empty())
            .enumerate()
        {
            let sheet = AnswerSheet::parse_line(line);

            if sheet.len() != expected_questions {
                return Err(ValidationError::SheetLengthMismatch {
                    line: index + 1,
                    expected: expected_questions,
                    actual: sheet.len(),
                });
            }

            sheets.push(sheet);
        }

        Ok(Self { sheets })
    }

    /// 统计文本中非空白行的数量（即提交的答题卡份数）
    ///
    /// 配额检查在完整解析之前进行，只需要行数
    pub fn count_sheets(input: &str) -> usize {
        input.lines().filter(|line| !line.trim().is_empty()).count()
    }

    /// 答题卡份数
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    pub fn sheets(&self) -> &[AnswerSheet] {
        &self.sheets
    }

    /// 转换为请求体使用的映射序列
    pub fn to_wire(&self) -> Vec<BTreeMap<u32, String>> {
        self.sheets
            .iter()
            .map(|sheet| sheet.answers.clone())
            .collect()
    }
}
