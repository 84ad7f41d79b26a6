//! 应用编排层
//!
//! 加载任务列表，按并发上限处理所有任务并汇总统计

use crate::config::Config;
use crate::models::job::AnalysisJob;
use crate::models::loaders::load_all_toml_files;
use crate::models::plan::mcq_quota;
use crate::utils::logging;
use crate::workflow::{JobCtx, JobFlow, JobOutcome};
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    flow: Arc<JobFlow>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        logging::init_log_file(&config.output_log_file)?;

        logging::log_startup(
            &config.user_plan,
            mcq_quota(&config.user_plan),
            config.max_concurrent_jobs,
        );

        let flow = Arc::new(JobFlow::new(&config)?);

        Ok(Self { config, flow })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        let all_jobs = load_jobs(&self.config).await?;

        if all_jobs.is_empty() {
            warn!("⚠️ 没有找到待处理的任务文件，程序结束");
            return Ok(());
        }

        let total_jobs = all_jobs.len();
        logging::log_jobs_loaded(total_jobs, self.config.max_concurrent_jobs);

        let stats = process_all_jobs(self.flow.clone(), all_jobs, &self.config).await?;

        logging::print_final_stats(
            stats.success,
            stats.rejected,
            stats.failed,
            stats.total,
            &self.config.output_log_file,
        );

        Ok(())
    }
}

/// 处理统计
#[derive(Debug, Default)]
struct ProcessingStats {
    success: usize,
    rejected: usize,
    failed: usize,
    total: usize,
}

/// 加载任务
async fn load_jobs(config: &Config) -> Result<Vec<AnalysisJob>> {
    info!("\n📁 正在扫描待处理的任务...");
    load_all_toml_files(&config.jobs_folder).await
}

/// 处理所有任务
///
/// 每个任务独享一个向导实例；并发量由信号量限制
async fn process_all_jobs(
    flow: Arc<JobFlow>,
    all_jobs: Vec<AnalysisJob>,
    config: &Config,
) -> Result<ProcessingStats> {
    let semaphore = Arc::new(Semaphore::new(config.max_concurrent_jobs));
    let mut stats = ProcessingStats {
        total: all_jobs.len(),
        ..Default::default()
    };

    let mut handles = Vec::new();

    for (idx, job) in all_jobs.into_iter().enumerate() {
        let job_index = idx + 1;
        let permit = semaphore.clone().acquire_owned().await?;
        let flow = flow.clone();
        let ctx = JobCtx::new(job.name.clone(), job_index);

        let handle = tokio::spawn(async move {
            let _permit = permit;
            match flow.run(&job, &ctx).await {
                Ok(outcome) => Ok(outcome),
                Err(e) => {
                    error!("{} ❌ 处理过程中发生错误: {}", ctx, e);
                    Err(e)
                }
            }
        });
        handles.push((job_index, handle));
    }

    // 等待所有任务完成
    for (job_index, handle) in handles {
        match handle.await {
            Ok(Ok(JobOutcome::Success)) => stats.success += 1,
            Ok(Ok(JobOutcome::Rejected)) => stats.rejected += 1,
            Ok(Err(_)) => stats.failed += 1,
            Err(e) => {
                error!("[任务 {}] 任务执行失败: {}", job_index, e);
                stats.failed += 1;
            }
        }
    }

    Ok(stats)
}
