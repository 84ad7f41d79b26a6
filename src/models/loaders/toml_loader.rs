use crate::models::job::AnalysisJob;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 从 TOML 文件加载数据并转换为 AnalysisJob 对象
pub async fn load_toml_to_job(toml_file_path: &Path) -> Result<AnalysisJob> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取TOML文件: {}", toml_file_path.display()))?;

    let mut job: AnalysisJob = toml::from_str(&content)
        .with_context(|| format!("无法解析TOML文件: {}", toml_file_path.display()))?;

    // 学生答题内容允许放在独立文件中，路径相对于任务文件所在目录
    if let Some(mcq) = job.mcq.as_mut() {
        if mcq.student_answers.is_none() {
            if let Some(file) = mcq.student_answers_file.as_deref() {
                let base_dir = toml_file_path.parent().unwrap_or_else(|| Path::new("."));
                let answers_path = base_dir.join(file);
                let answers = fs::read_to_string(&answers_path)
                    .await
                    .with_context(|| format!("无法读取答题文件: {}", answers_path.display()))?;
                mcq.student_answers = Some(answers);
            }
        }
    }

    // 记录来源文件路径
    job.file_path = Some(toml_file_path.to_string_lossy().to_string());

    Ok(job)
}

/// 从文件夹中加载所有 TOML 文件并转换为 AnalysisJob 对象列表
pub async fn load_all_toml_files(folder_path: &str) -> Result<Vec<AnalysisJob>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        anyhow::bail!("文件夹不存在: {}", folder_path);
    }

    let mut jobs = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            tracing::info!(
                "正在加载: {}",
                path.file_name().unwrap_or_default().to_string_lossy()
            );

            match load_toml_to_job(&path).await {
                Ok(job) => {
                    if job.is_empty() {
                        tracing::warn!("任务 {} 未配置任何分析内容，跳过", job.name);
                        continue;
                    }
                    jobs.push(job);
                }
                Err(e) => {
                    tracing::warn!("加载文件失败 {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(jobs)
}
