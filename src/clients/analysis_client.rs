//! 分析服务 API 客户端
//!
//! 封装所有与分析服务相关的调用逻辑

use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use crate::models::analysis::{McqBatchRequest, McqBatchResult};
use crate::models::text_analysis::{TextAnalysisRequest, TextAnalysisResult};
use std::time::Duration;
use tracing::debug;

/// MCQ 批量分析接口路径
const MCQ_BATCH_ENDPOINT: &str = "/api/analyze-mcq-batch";
/// 文本分析接口路径
const TEXT_ANALYSIS_ENDPOINT: &str = "/api/analyze";

/// 分析服务客户端
pub struct AnalysisClient {
    http: reqwest::Client,
    base_url: String,
}

impl AnalysisClient {
    /// 创建新的分析服务客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        Self::build(&config.api_base_url, config.request_timeout_secs)
    }

    /// 创建指定地址的客户端（使用默认超时）
    pub fn with_base_url(base_url: impl Into<String>) -> AppResult<Self> {
        Self::build(&base_url.into(), Config::default().request_timeout_secs)
    }

    fn build(base_url: &str, timeout_secs: u64) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| {
                AppError::Api(ApiError::ClientBuildFailed {
                    source: Box::new(e),
                })
            })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 提交一批答题卡进行批改
    ///
    /// 单次调用，不做重试；非 2xx 状态一律视为传输失败
    pub async fn analyze_mcq_batch(&self, request: &McqBatchRequest) -> AppResult<McqBatchResult> {
        debug!(
            "提交批量分析: {} 份答题卡, 答案键 {}",
            request.sheet_count(),
            request.answer_key_id
        );

        let url = format!("{}{}", self.base_url, MCQ_BATCH_ENDPOINT);

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(MCQ_BATCH_ENDPOINT, e))?;

        let status = response.status();
        if !status.is_success() {
            // 错误响应体不参与解析，统一按传输失败处理
            return Err(AppError::api_bad_status(MCQ_BATCH_ENDPOINT, status.as_u16()));
        }

        let result: McqBatchResult = response
            .json()
            .await
            .map_err(|e| AppError::api_json_parse_failed(MCQ_BATCH_ENDPOINT, e))?;

        debug!("批量分析完成: 共 {} 份", result.total_sheets_analyzed);

        Ok(result)
    }

    /// 提交一段文本进行语法/拼写分析
    pub async fn analyze_text(&self, request: &TextAnalysisRequest) -> AppResult<TextAnalysisResult> {
        debug!(
            "提交文本分析: {} 字符, 类型 {:?}",
            request.text.len(),
            request.analysis_type
        );

        let url = format!("{}{}", self.base_url, TEXT_ANALYSIS_ENDPOINT);

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(TEXT_ANALYSIS_ENDPOINT, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::api_bad_status(
                TEXT_ANALYSIS_ENDPOINT,
                status.as_u16(),
            ));
        }

        let result: TextAnalysisResult = response
            .json()
            .await
            .map_err(|e| AppError::api_json_parse_failed(TEXT_ANALYSIS_ENDPOINT, e))?;

        debug!("文本分析完成: {} 处错误", result.total_mistakes);

        Ok(result)
    }
}
