//! 日志工具模块
//!
//! 提供启动横幅、汇总输出等辅助函数

use anyhow::Result;
use std::fs;
use tracing::info;

use crate::models::analysis::McqBatchResult;
use crate::models::plan::mcq_capable_plans;
use crate::models::text_analysis::TextAnalysisResult;
use crate::workflow::job_ctx::JobCtx;

/// 初始化日志文件
///
/// 在文件开头写入一段带时间戳的表头
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n分析任务日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(plan: &str, quota: usize, max_concurrent: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 批量分析模式");
    info!("📋 当前套餐: {} (单批最多 {} 份答题卡)", plan, quota);
    info!("📊 最大并发数: {}", max_concurrent);
    info!("{}", "=".repeat(60));
}

/// 记录任务加载信息
pub fn log_jobs_loaded(total: usize, max_concurrent: usize) {
    info!("✓ 找到 {} 个待处理的任务", total);
    info!("📋 将以每批 {} 个的方式处理\n", max_concurrent);
}

/// 套餐受限时输出升级指引
pub fn log_upgrade_hint() {
    info!("💡 MCQ 分析仅以下套餐可用:");
    for plan in mcq_capable_plans() {
        info!(
            "   • {} ({}/{}): {} MCQ analyses",
            plan.name,
            plan.price,
            plan.duration,
            crate::models::plan::mcq_quota(plan.name)
        );
    }
}

/// 输出一次 MCQ 批量分析的结果汇总
///
/// verbose 模式下追加每名学生的得分明细
pub fn log_mcq_summary(ctx: &JobCtx, result: &McqBatchResult, verbose: bool) {
    info!("{}", "─".repeat(60));
    info!("{} ✓ 分析完成", ctx);
    info!("👥 学生数: {}", result.total_sheets_analyzed);
    info!("📈 平均分: {:.1}%", result.summary.average_percentage);
    info!("🏆 最高分: {}", result.summary.highest_score);
    info!("📉 最低分: {}", result.summary.lowest_score);

    if verbose {
        for student in &result.individual_results {
            info!(
                "   学生 {} | {}/{} | {:.1}% | {}",
                student.student_id,
                student.score,
                student.total_questions,
                student.score_percentage,
                student.grade
            );
        }
    }
    info!("{}", "─".repeat(60));
}

/// 输出一次文本分析的结果汇总
pub fn log_text_summary(ctx: &JobCtx, result: &TextAnalysisResult, verbose: bool) {
    info!("{}", "─".repeat(60));
    info!(
        "{} ✓ 文本分析完成: {} 字符, {} 处错误",
        ctx, result.text_length, result.total_mistakes
    );

    if result.total_mistakes == 0 {
        info!("✅ 未发现错误");
    } else if verbose {
        for mistake in &result.mistakes {
            info!(
                "   [{}] {} → {} ({})",
                mistake.mistake_type,
                mistake.original,
                mistake.corrected,
                truncate_text(&mistake.explanation, 60)
            );
        }
    }
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(
    success: usize,
    rejected: usize,
    failed: usize,
    total: usize,
    log_file_path: &str,
) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", success, total);
    info!("🚫 被拒绝: {}", rejected);
    info!("❌ 失败: {}", failed);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
