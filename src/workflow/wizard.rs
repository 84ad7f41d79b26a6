//! MCQ 分析向导 - 流程层
//!
//! 三步状态机：录入答案键 → 录入学生答题 → 展示结果。
//! 校验、请求组装都在发起网络调用之前完成；配额为 0 的套餐
//! 在整个会话中处于 Disabled 状态，只能通过升级套餐解除。

use crate::clients::AnalysisClient;
use crate::error::{AppError, AppResult, ValidationError};
use crate::models::analysis::{McqBatchRequest, McqBatchResult};
use crate::models::answer_key::AnswerKey;
use crate::models::answer_sheet::AnswerSheetBatch;
use crate::models::plan::mcq_quota;
use tracing::{debug, warn};

/// 网络或服务失败时展示给用户的统一提示（不透出服务端错误详情）
const GENERIC_FAILURE_MESSAGE: &str = "Failed to analyze MCQ sheets. Please try again.";

/// 向导当前所处的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    /// 套餐配额为 0，功能在本次会话中不可用
    Disabled,
    /// 第一步：录入答案键
    AnswerKeyEntry,
    /// 第二步：录入学生答题
    StudentAnswersEntry,
    /// 第三步：展示分析结果
    ResultsDisplay,
}

/// MCQ 分析向导
///
/// - 持有一次会话的全部输入、结果与错误状态
/// - 状态迁移全部通过显式方法完成
/// - 每个实例同一时刻至多一次分析调用在途
pub struct McqWizard {
    plan: String,
    quota: usize,
    state: WizardState,
    answer_key_input: String,
    student_answers_input: String,
    answer_key: Option<AnswerKey>,
    result: Option<McqBatchResult>,
    error: Option<String>,
    analyzing: bool,
}

impl McqWizard {
    /// 按套餐创建向导
    ///
    /// 配额为 0 的套餐直接进入 Disabled 状态
    pub fn new(plan: &str) -> Self {
        let quota = mcq_quota(plan);
        let state = if quota == 0 {
            WizardState::Disabled
        } else {
            WizardState::AnswerKeyEntry
        };

        Self {
            plan: plan.to_string(),
            quota,
            state,
            answer_key_input: String::new(),
            student_answers_input: String::new(),
            answer_key: None,
            result: None,
            error: None,
            analyzing: false,
        }
    }

    // ========== 状态访问 ==========

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn plan(&self) -> &str {
        &self.plan
    }

    /// 当前套餐允许的答题卡数量
    pub fn quota(&self) -> usize {
        self.quota
    }

    pub fn is_disabled(&self) -> bool {
        self.state == WizardState::Disabled
    }

    /// 是否有分析调用在途
    pub fn is_analyzing(&self) -> bool {
        self.analyzing
    }

    /// 当前展示给用户的错误信息
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// 第一步通过校验后的答案键
    pub fn answer_key(&self) -> Option<&AnswerKey> {
        self.answer_key.as_ref()
    }

    pub fn answer_key_input(&self) -> &str {
        &self.answer_key_input
    }

    pub fn student_answers_input(&self) -> &str {
        &self.student_answers_input
    }

    /// 分析结果（仅在 ResultsDisplay 状态存在）
    pub fn result(&self) -> Option<&McqBatchResult> {
        self.result.as_ref()
    }

    // ========== 输入录入 ==========

    pub fn set_answer_key_input(&mut self, text: impl Into<String>) {
        self.answer_key_input = text.into();
    }

    pub fn set_student_answers_input(&mut self, text: impl Into<String>) {
        self.student_answers_input = text.into();
    }

    // ========== 状态迁移 ==========

    /// 第一步 → 第二步："继续"
    ///
    /// 答案键文本必须非空且每个选项都是单字母；
    /// 校验失败时设置错误信息并停留在当前状态
    pub fn submit_answer_key(&mut self) -> AppResult<()> {
        self.ensure_enabled()?;

        if self.state != WizardState::AnswerKeyEntry {
            return Err(AppError::Other(
                "只能在录入答案键的步骤继续下一步".to_string(),
            ));
        }

        match AnswerKey::parse(&self.answer_key_input) {
            Ok(key) => {
                debug!("答案键通过校验: {} 道题", key.len());
                self.answer_key = Some(key);
                self.error = None;
                self.state = WizardState::StudentAnswersEntry;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(AppError::Validation(e))
            }
        }
    }

    /// 第二步 → 第一步："返回"，无条件允许，不做校验
    pub fn back_to_answer_key(&mut self) {
        if self.state == WizardState::StudentAnswersEntry {
            self.state = WizardState::AnswerKeyEntry;
        }
    }

    /// 组装批量分析请求
    ///
    /// 按顺序校验：答题文本非空 → 份数不超过配额 → 按答案键
    /// 重新解析原始文本并对齐每行题数。任何一步失败都不会发起网络调用。
    pub fn prepare_request(&self) -> Result<McqBatchRequest, ValidationError> {
        if self.quota == 0 {
            return Err(ValidationError::PlanRestricted {
                plan: self.plan.clone(),
            });
        }

        if self.student_answers_input.trim().is_empty() {
            return Err(ValidationError::EmptyStudentAnswers);
        }

        let submitted = AnswerSheetBatch::count_sheets(&self.student_answers_input);
        if submitted > self.quota {
            return Err(ValidationError::QuotaExceeded {
                plan: self.plan.clone(),
                quota: self.quota,
                submitted,
            });
        }

        // 组装请求时基于原始文本重新解析答案键
        let answer_key = AnswerKey::parse(&self.answer_key_input)?;
        let batch = AnswerSheetBatch::parse(&self.student_answers_input, answer_key.len())?;

        Ok(McqBatchRequest::new(&answer_key, &batch, &self.plan))
    }

    /// 第二步 → 第三步："分析"
    ///
    /// 校验通过后恰好发起一次网络调用；失败时停留在第二步并
    /// 设置统一的错误提示，由用户自行重试
    pub async fn analyze(&mut self, client: &AnalysisClient) -> AppResult<()> {
        self.ensure_enabled()?;

        if self.state != WizardState::StudentAnswersEntry {
            return Err(AppError::Other(
                "只能在录入学生答题的步骤发起分析".to_string(),
            ));
        }

        if self.analyzing {
            return Err(AppError::Other("上一次分析尚未完成".to_string()));
        }

        let request = match self.prepare_request() {
            Ok(request) => request,
            Err(e) => {
                self.error = Some(e.to_string());
                return Err(AppError::Validation(e));
            }
        };

        self.analyzing = true;
        self.error = None;

        let outcome = client.analyze_mcq_batch(&request).await;

        self.analyzing = false;

        match outcome {
            Ok(result) => {
                self.complete_analysis(result);
                Ok(())
            }
            Err(e) => {
                self.fail_analysis();
                Err(e)
            }
        }
    }

    /// 应用一次成功的分析响应，进入结果展示状态
    ///
    /// 由 `analyze` 在收到响应后调用；自行驱动传输的调用方也可直接使用
    pub fn complete_analysis(&mut self, result: McqBatchResult) {
        debug!("分析完成: 共 {} 份答题卡", result.total_sheets_analyzed);
        self.result = Some(result);
        self.error = None;
        self.state = WizardState::ResultsDisplay;
    }

    /// 应用一次失败的分析调用：停留在第二步，设置统一错误提示
    pub fn fail_analysis(&mut self) {
        warn!("批量分析失败，停留在答题录入步骤");
        self.error = Some(GENERIC_FAILURE_MESSAGE.to_string());
    }

    /// "重新分析"：清空全部输入、结果与错误
    ///
    /// 配额为 0 时回到 Disabled，否则回到第一步
    pub fn reset(&mut self) {
        self.answer_key_input.clear();
        self.student_answers_input.clear();
        self.answer_key = None;
        self.result = None;
        self.error = None;
        self.analyzing = false;
        self.state = if self.quota == 0 {
            WizardState::Disabled
        } else {
            WizardState::AnswerKeyEntry
        };
    }

    fn ensure_enabled(&self) -> AppResult<()> {
        if self.state == WizardState::Disabled {
            return Err(AppError::Validation(ValidationError::PlanRestricted {
                plan: self.plan.clone(),
            }));
        }
        Ok(())
    }
}
