use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum LinkdashError {
    InvalidUrl(String),
    InvalidFormat(String),
    Conflict(String),
    AllocationExhausted(String),
    NotFound(String),
    Store(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    FileOperation(String),
    Serialization(String),
    Template(String),
}

impl LinkdashError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            LinkdashError::InvalidUrl(_) => "E001",
            LinkdashError::InvalidFormat(_) => "E002",
            LinkdashError::Conflict(_) => "E003",
            LinkdashError::AllocationExhausted(_) => "E004",
            LinkdashError::NotFound(_) => "E005",
            LinkdashError::Store(_) => "E006",
            LinkdashError::DatabaseConfig(_) => "E007",
            LinkdashError::DatabaseConnection(_) => "E008",
            LinkdashError::FileOperation(_) => "E009",
            LinkdashError::Serialization(_) => "E010",
            LinkdashError::Template(_) => "E011",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            LinkdashError::InvalidUrl(_) => "Invalid URL",
            LinkdashError::InvalidFormat(_) => "Invalid Code Format",
            LinkdashError::Conflict(_) => "Code Conflict",
            LinkdashError::AllocationExhausted(_) => "Code Allocation Exhausted",
            LinkdashError::NotFound(_) => "Link Not Found",
            LinkdashError::Store(_) => "Store Error",
            LinkdashError::DatabaseConfig(_) => "Database Configuration Error",
            LinkdashError::DatabaseConnection(_) => "Database Connection Error",
            LinkdashError::FileOperation(_) => "File Operation Error",
            LinkdashError::Serialization(_) => "Serialization Error",
            LinkdashError::Template(_) => "Template Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            LinkdashError::InvalidUrl(msg)
            | LinkdashError::InvalidFormat(msg)
            | LinkdashError::Conflict(msg)
            | LinkdashError::AllocationExhausted(msg)
            | LinkdashError::NotFound(msg)
            | LinkdashError::Store(msg)
            | LinkdashError::DatabaseConfig(msg)
            | LinkdashError::DatabaseConnection(msg)
            | LinkdashError::FileOperation(msg)
            | LinkdashError::Serialization(msg)
            | LinkdashError::Template(msg) => msg,
        }
    }

    /// HTTP status the error maps to when it reaches an HTTP client
    pub fn http_status(&self) -> StatusCode {
        match self {
            LinkdashError::InvalidUrl(_) | LinkdashError::InvalidFormat(_) => {
                StatusCode::BAD_REQUEST
            }
            LinkdashError::Conflict(_) => StatusCode::CONFLICT,
            LinkdashError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为彩色输出（用于 CLI 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for LinkdashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LinkdashError {}

// 便捷的构造函数
impl LinkdashError {
    pub fn invalid_url<T: Into<String>>(msg: T) -> Self {
        LinkdashError::InvalidUrl(msg.into())
    }

    pub fn invalid_format<T: Into<String>>(msg: T) -> Self {
        LinkdashError::InvalidFormat(msg.into())
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        LinkdashError::Conflict(msg.into())
    }

    pub fn allocation_exhausted<T: Into<String>>(msg: T) -> Self {
        LinkdashError::AllocationExhausted(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        LinkdashError::NotFound(msg.into())
    }

    pub fn store<T: Into<String>>(msg: T) -> Self {
        LinkdashError::Store(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        LinkdashError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        LinkdashError::DatabaseConnection(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        LinkdashError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        LinkdashError::Serialization(msg.into())
    }

    pub fn template<T: Into<String>>(msg: T) -> Self {
        LinkdashError::Template(msg.into())
    }
}

impl From<sea_orm::DbErr> for LinkdashError {
    fn from(err: sea_orm::DbErr) -> Self {
        LinkdashError::Store(err.to_string())
    }
}

impl From<std::io::Error> for LinkdashError {
    fn from(err: std::io::Error) -> Self {
        LinkdashError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for LinkdashError {
    fn from(err: serde_json::Error) -> Self {
        LinkdashError::Serialization(err.to_string())
    }
}

impl From<minijinja::Error> for LinkdashError {
    fn from(err: minijinja::Error) -> Self {
        LinkdashError::Template(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LinkdashError>;
