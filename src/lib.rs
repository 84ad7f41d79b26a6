//! # MCQ Batch Analysis
//!
//! Paper Analyzer 分析服务的批量客户端：按套餐配额校验学生答题卡、
//! 组装批量批改请求并展示结果，同时提供文本分析体验入口。
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 模型层（Models）
//! - `models/` - 答案键、答题卡、套餐配额与接口数据结构
//! - TOML 任务文件的加载器
//!
//! ### ② 客户端层（Clients）
//! - `clients/AnalysisClient` - 分析服务的 HTTP 调用能力
//!
//! ### ③ 业务能力层（Services）
//! - `services/ReportWriter` - 写拒绝报告能力
//! - `services/sample_texts` - 内置示例文本
//!
//! ### ④ 流程层（Workflow）
//! - `workflow/McqWizard` - MCQ 分析向导状态机
//! - `workflow/JobFlow` - 单个任务的完整处理流程
//!
//! ### ⑤ 编排层（App）
//! - `app` - 任务加载、并发控制与统计

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use clients::AnalysisClient;
pub use config::Config;
pub use error::{AppError, AppResult, ValidationError};
pub use models::{
    mcq_quota, AnalysisJob, AnswerKey, AnswerSheet, AnswerSheetBatch, McqBatchRequest,
    McqBatchResult,
};
pub use workflow::{JobCtx, JobFlow, JobOutcome, McqWizard, WizardState};
