//! 拒绝报告写入服务 - 业务能力层
//!
//! 只负责"把被拒绝的任务记到报告文件"这一件事，不关心流程

use crate::error::{AppError, AppResult};
use std::fs::OpenOptions;
use std::io::Write;
use tracing::debug;

/// 拒绝报告写入服务
pub struct ReportWriter {
    report_file_path: String,
}

impl ReportWriter {
    /// 创建新的报告写入服务
    pub fn new() -> Self {
        Self {
            report_file_path: "rejected.txt".to_string(),
        }
    }

    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            report_file_path: path.into(),
        }
    }

    /// 记录一条被拒绝的任务
    ///
    /// # 参数
    /// - `job_name`: 任务名称
    /// - `reason`: 拒绝原因（用户可见的校验信息）
    pub async fn write(&self, job_name: &str, reason: &str) -> AppResult<()> {
        debug!("写入拒绝报告: 任务 {} | 原因: {}", job_name, reason);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.report_file_path)
            .map_err(|e| AppError::file_write_failed(&self.report_file_path, e))?;

        let line = format!("任务 {} | 原因: {}\n", job_name, reason);

        file.write_all(line.as_bytes())
            .map_err(|e| AppError::file_write_failed(&self.report_file_path, e))?;

        Ok(())
    }
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new()
    }
}
