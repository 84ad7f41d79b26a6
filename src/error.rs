use std::fmt;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// 输入校验错误（发起网络请求之前产生）
    Validation(ValidationError),
    /// 分析服务 API 调用错误
    Api(ApiError),
    /// 文件操作错误
    File(FileError),
    /// 配置错误
    Config(ConfigError),
    /// 其他错误（用于包装第三方库错误）
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(e) => write!(f, "校验错误: {}", e),
            AppError::Api(e) => write!(f, "API错误: {}", e),
            AppError::File(e) => write!(f, "文件错误: {}", e),
            AppError::Config(e) => write!(f, "配置错误: {}", e),
            AppError::Other(msg) => write!(f, "错误: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Validation(e) => Some(e),
            AppError::Api(e) => Some(e),
            AppError::File(e) => Some(e),
            AppError::Config(e) => Some(e),
            AppError::Other(_) => None,
        }
    }
}

/// 输入校验错误
///
/// 这些错误信息会原样展示给终端用户，因此文案保持英文（产品界面语言）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// 答案键为空
    EmptyAnswerKey,
    /// 答案键格式非法（出现非单字母选项）
    InvalidAnswerKeyFormat {
        token: String,
    },
    /// 学生答题内容为空
    EmptyStudentAnswers,
    /// 待分析文本为空
    EmptyAnalysisText,
    /// 答题卡数量超过套餐配额
    QuotaExceeded {
        plan: String,
        quota: usize,
        submitted: usize,
    },
    /// 某行答题卡的题数与答案键不一致
    SheetLengthMismatch {
        line: usize,
        expected: usize,
        actual: usize,
    },
    /// 当前套餐无权使用 MCQ 分析
    PlanRestricted {
        plan: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyAnswerKey => {
                write!(f, "Please enter the answer key")
            }
            ValidationError::InvalidAnswerKeyFormat { token } => {
                write!(
                    f,
                    "Invalid answer key format: '{}' is not a single letter. \
                     Please use comma-separated values (e.g., A,B,C,D)",
                    token
                )
            }
            ValidationError::EmptyStudentAnswers => {
                write!(f, "Please enter student answers")
            }
            ValidationError::EmptyAnalysisText => {
                write!(f, "Please enter some text to analyze")
            }
            ValidationError::QuotaExceeded {
                plan,
                quota,
                submitted,
            } => {
                write!(
                    f,
                    "Your {} plan allows maximum {} MCQ analyses. \
                     You provided {} student sheets.",
                    plan, quota, submitted
                )
            }
            ValidationError::SheetLengthMismatch {
                line,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Student sheet on line {} has {} answers but the answer key \
                     has {} questions.",
                    line, actual, expected
                )
            }
            ValidationError::PlanRestricted { plan } => {
                write!(
                    f,
                    "MCQ analysis is not available on the {} plan. \
                     Please upgrade to Standard or Premium.",
                    plan
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// 分析服务 API 调用错误
#[derive(Debug)]
pub enum ApiError {
    /// 网络请求失败
    RequestFailed {
        endpoint: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 服务返回非成功状态码
    BadStatus {
        endpoint: String,
        status: u16,
    },
    /// 响应 JSON 解析失败
    JsonParseFailed {
        endpoint: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// HTTP 客户端构建失败
    ClientBuildFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::RequestFailed { endpoint, source } => {
                write!(f, "API请求失败 ({}): {}", endpoint, source)
            }
            ApiError::BadStatus { endpoint, status } => {
                write!(f, "API返回错误状态码 ({}): {}", endpoint, status)
            }
            ApiError::JsonParseFailed { endpoint, source } => {
                write!(f, "响应JSON解析失败 ({}): {}", endpoint, source)
            }
            ApiError::ClientBuildFailed { source } => {
                write!(f, "HTTP客户端构建失败: {}", source)
            }
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::RequestFailed { source, .. }
            | ApiError::JsonParseFailed { source, .. }
            | ApiError::ClientBuildFailed { source } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            ApiError::BadStatus { .. } => None,
        }
    }
}

/// 文件操作错误
#[derive(Debug)]
pub enum FileError {
    /// 读取文件失败
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 写入文件失败
    WriteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// TOML 解析失败
    TomlParseFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 目录不存在
    DirectoryNotFound {
        path: String,
    },
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::ReadFailed { path, source } => {
                write!(f, "读取文件失败 ({}): {}", path, source)
            }
            FileError::WriteFailed { path, source } => {
                write!(f, "写入文件失败 ({}): {}", path, source)
            }
            FileError::TomlParseFailed { path, source } => {
                write!(f, "TOML解析失败 ({}): {}", path, source)
            }
            FileError::DirectoryNotFound { path } => write!(f, "目录不存在: {}", path),
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::ReadFailed { source, .. }
            | FileError::WriteFailed { source, .. }
            | FileError::TomlParseFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            FileError::DirectoryNotFound { .. } => None,
        }
    }
}

/// 配置错误
#[derive(Debug)]
pub enum ConfigError {
    /// 环境变量解析失败
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EnvVarParseFailed {
                var_name,
                value,
                expected_type,
            } => {
                write!(
                    f,
                    "环境变量 {} 解析失败: 值 '{}' 无法转换为 {}",
                    var_name, value, expected_type
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ========== 从常见错误类型转换 ==========
// 注意：不需要手动实现 From<AppError> for anyhow::Error，
// anyhow 已经为所有实现了 std::error::Error 的类型提供了自动实现

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Api(ApiError::JsonParseFailed {
            endpoint: String::new(),
            source: Box::new(err),
        })
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::File(FileError::TomlParseFailed {
            path: String::new(), // TOML错误本身不携带路径信息
            source: Box::new(err),
        })
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: String::new(),
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建API请求失败错误
    pub fn api_request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }

    /// 创建非成功状态码错误
    pub fn api_bad_status(endpoint: impl Into<String>, status: u16) -> Self {
        AppError::Api(ApiError::BadStatus {
            endpoint: endpoint.into(),
            status,
        })
    }

    /// 创建响应解析失败错误
    pub fn api_json_parse_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Api(ApiError::JsonParseFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 是否为校验错误
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
