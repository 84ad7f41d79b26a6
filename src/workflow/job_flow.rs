//! 任务处理流程 - 流程层
//!
//! 定义"一个分析任务"的完整处理流程：
//! 1. MCQ 批改：向导三步走（答案键 → 学生答题 → 分析）
//! 2. 文本分析体验：示例文本兜底 → 调用分析接口
//!
//! 被拒绝的任务写入报告文件；传输层失败向上冒泡由编排层计数

use anyhow::Result;
use tracing::{error, info, warn};

use crate::clients::AnalysisClient;
use crate::config::Config;
use crate::error::{AppError, AppResult, ValidationError};
use crate::models::answer_sheet::AnswerSheetBatch;
use crate::models::job::{AnalysisJob, McqJob, TextAnalysisJob};
use crate::models::text_analysis::TextAnalysisRequest;
use crate::services::{sample_text, ReportWriter};
use crate::utils::logging;
use crate::workflow::job_ctx::JobCtx;
use crate::workflow::wizard::McqWizard;

/// 任务处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    /// 处理成功
    Success,
    /// 被拒绝（校验未通过或套餐受限）
    Rejected,
}

/// 任务处理流程
///
/// - 编排单个任务的完整处理过程
/// - 不持有任务列表，也不关心并发
/// - 只依赖客户端与业务能力（services）
pub struct JobFlow {
    client: AnalysisClient,
    report_writer: ReportWriter,
    user_plan: String,
    verbose_logging: bool,
}

impl JobFlow {
    /// 创建新的任务处理流程
    pub fn new(config: &Config) -> AppResult<Self> {
        Ok(Self {
            client: AnalysisClient::new(config)?,
            report_writer: ReportWriter::with_path(&config.report_file),
            user_plan: config.user_plan.clone(),
            verbose_logging: config.verbose_logging,
        })
    }

    /// 处理一个任务
    pub async fn run(&self, job: &AnalysisJob, ctx: &JobCtx) -> Result<JobOutcome> {
        let mut outcome = JobOutcome::Success;

        if let Some(mcq) = &job.mcq {
            if self.run_mcq(mcq, ctx).await? == JobOutcome::Rejected {
                outcome = JobOutcome::Rejected;
            }
        }

        if let Some(text_job) = &job.text_analysis {
            if self.run_text_analysis(text_job, ctx).await? == JobOutcome::Rejected {
                outcome = JobOutcome::Rejected;
            }
        }

        Ok(outcome)
    }

    /// MCQ 批改流程：驱动向导走完三步
    async fn run_mcq(&self, mcq: &McqJob, ctx: &JobCtx) -> Result<JobOutcome> {
        let mut wizard = McqWizard::new(&self.user_plan);

        // 套餐受限：整个会话不可用，提示升级
        if wizard.is_disabled() {
            warn!("{} ⚠️ 当前套餐 {} 不支持 MCQ 分析", ctx, self.user_plan);
            logging::log_upgrade_hint();
            let reason = ValidationError::PlanRestricted {
                plan: self.user_plan.clone(),
            };
            self.report(ctx, &reason.to_string()).await?;
            return Ok(JobOutcome::Rejected);
        }

        info!("{} 🔑 校验答案键...", ctx);
        wizard.set_answer_key_input(&mcq.answer_key);

        if wizard.submit_answer_key().is_err() {
            let reason = wizard.error().unwrap_or("invalid answer key").to_string();
            warn!("{} ⚠️ 答案键未通过校验: {}", ctx, reason);
            self.report(ctx, &reason).await?;
            return Ok(JobOutcome::Rejected);
        }

        if let Some(key) = wizard.answer_key() {
            info!("{} ✓ 答案键包含 {} 道题", ctx, key.len());
        }

        wizard.set_student_answers_input(mcq.student_answers_text());

        info!(
            "{} 📤 正在提交批量分析 ({} 份答题卡)...",
            ctx,
            AnswerSheetBatch::count_sheets(wizard.student_answers_input())
        );

        match wizard.analyze(&self.client).await {
            Ok(()) => {
                if let Some(result) = wizard.result() {
                    logging::log_mcq_summary(ctx, result, self.verbose_logging);
                }
                Ok(JobOutcome::Success)
            }
            Err(AppError::Validation(e)) => {
                warn!("{} ⚠️ 输入未通过校验: {}", ctx, e);
                self.report(ctx, &e.to_string()).await?;
                Ok(JobOutcome::Rejected)
            }
            Err(e) => {
                // 传输层失败：向导停留在录入步骤并持有通用提示，
                // 批处理模式下直接计入失败
                error!("{} ❌ 分析调用失败: {}", ctx, e);
                Err(e.into())
            }
        }
    }

    /// 文本分析体验流程
    async fn run_text_analysis(&self, text_job: &TextAnalysisJob, ctx: &JobCtx) -> Result<JobOutcome> {
        let text = match &text_job.text {
            Some(text) => text.clone(),
            None => {
                info!(
                    "{} 使用内置示例文本 ({})",
                    ctx,
                    text_job.language.as_str()
                );
                sample_text(text_job.language).to_string()
            }
        };

        if text.trim().is_empty() {
            let reason = ValidationError::EmptyAnalysisText;
            warn!("{} ⚠️ 待分析文本为空", ctx);
            self.report(ctx, &reason.to_string()).await?;
            return Ok(JobOutcome::Rejected);
        }

        info!(
            "{} 📤 正在提交文本分析 ({} 字符)...",
            ctx,
            text.chars().count()
        );

        let request = TextAnalysisRequest {
            text,
            analysis_type: text_job.analysis_type,
            language: text_job.language,
        };

        match self.client.analyze_text(&request).await {
            Ok(result) => {
                logging::log_text_summary(ctx, &result, self.verbose_logging);
                Ok(JobOutcome::Success)
            }
            Err(e) => {
                error!("{} ❌ 文本分析失败: {}", ctx, e);
                Err(e.into())
            }
        }
    }

    /// 写入拒绝报告
    async fn report(&self, ctx: &JobCtx, reason: &str) -> Result<()> {
        self.report_writer.write(&ctx.job_name, reason).await?;
        warn!("{} 已写入拒绝报告", ctx);
        Ok(())
    }
}
