/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 分析服务 API 根地址
    pub api_base_url: String,
    /// 当前账号的订阅套餐（free / basic / standard / premium）
    pub user_plan: String,
    /// 分析任务 TOML 文件存放目录
    pub jobs_folder: String,
    /// 同时处理的任务数量
    pub max_concurrent_jobs: usize,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    /// 被拒绝任务的报告文件
    pub report_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5001".to_string(),
            user_plan: "free".to_string(),
            jobs_folder: "jobs".to_string(),
            max_concurrent_jobs: 4,
            request_timeout_secs: 30,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            report_file: "rejected.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_base_url: std::env::var("ANALYSIS_API_BASE_URL").unwrap_or(default.api_base_url),
            user_plan: std::env::var("USER_PLAN").unwrap_or(default.user_plan),
            jobs_folder: std::env::var("JOBS_FOLDER").unwrap_or(default.jobs_folder),
            max_concurrent_jobs: std::env::var("MAX_CONCURRENT_JOBS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_jobs),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            report_file: std::env::var("REPORT_FILE").unwrap_or(default.report_file),
        }
    }
}
