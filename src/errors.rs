use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinklisterError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    Serialization(String),
    Validation(String),
    NotFound(String),
    DuplicateKey(String),
    Forbidden(String),
    Protected(String),
    AuthFailed(String),
}

impl LinklisterError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            LinklisterError::DatabaseConfig(_) => "E001",
            LinklisterError::DatabaseConnection(_) => "E002",
            LinklisterError::DatabaseOperation(_) => "E003",
            LinklisterError::FileOperation(_) => "E004",
            LinklisterError::Serialization(_) => "E005",
            LinklisterError::Validation(_) => "E006",
            LinklisterError::NotFound(_) => "E007",
            LinklisterError::DuplicateKey(_) => "E008",
            LinklisterError::Forbidden(_) => "E009",
            LinklisterError::Protected(_) => "E010",
            LinklisterError::AuthFailed(_) => "E011",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            LinklisterError::DatabaseConfig(_) => "Database Configuration Error",
            LinklisterError::DatabaseConnection(_) => "Database Connection Error",
            LinklisterError::DatabaseOperation(_) => "Database Operation Error",
            LinklisterError::FileOperation(_) => "File Operation Error",
            LinklisterError::Serialization(_) => "Serialization Error",
            LinklisterError::Validation(_) => "Validation Error",
            LinklisterError::NotFound(_) => "Resource Not Found",
            LinklisterError::DuplicateKey(_) => "Duplicate Key",
            LinklisterError::Forbidden(_) => "Forbidden",
            LinklisterError::Protected(_) => "Protected Resource",
            LinklisterError::AuthFailed(_) => "Authentication Failed",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            LinklisterError::DatabaseConfig(msg)
            | LinklisterError::DatabaseConnection(msg)
            | LinklisterError::DatabaseOperation(msg)
            | LinklisterError::FileOperation(msg)
            | LinklisterError::Serialization(msg)
            | LinklisterError::Validation(msg)
            | LinklisterError::NotFound(msg)
            | LinklisterError::DuplicateKey(msg)
            | LinklisterError::Forbidden(msg)
            | LinklisterError::Protected(msg)
            | LinklisterError::AuthFailed(msg) => msg,
        }
    }

    /// HTTP status used when the error escapes to a request boundary
    pub fn http_status(&self) -> StatusCode {
        match self {
            LinklisterError::Validation(_) => StatusCode::BAD_REQUEST,
            LinklisterError::NotFound(_) => StatusCode::NOT_FOUND,
            LinklisterError::DuplicateKey(_) | LinklisterError::Protected(_) => {
                StatusCode::CONFLICT
            }
            LinklisterError::Forbidden(_) | LinklisterError::AuthFailed(_) => {
                StatusCode::UNAUTHORIZED
            }
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

impl fmt::Display for LinklisterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LinklisterError {}

// 便捷的构造函数
impl LinklisterError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        LinklisterError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        LinklisterError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        LinklisterError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        LinklisterError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        LinklisterError::Serialization(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        LinklisterError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        LinklisterError::NotFound(msg.into())
    }

    pub fn duplicate_key<T: Into<String>>(msg: T) -> Self {
        LinklisterError::DuplicateKey(msg.into())
    }

    pub fn forbidden<T: Into<String>>(msg: T) -> Self {
        LinklisterError::Forbidden(msg.into())
    }

    pub fn protected<T: Into<String>>(msg: T) -> Self {
        LinklisterError::Protected(msg.into())
    }

    pub fn auth_failed<T: Into<String>>(msg: T) -> Self {
        LinklisterError::AuthFailed(msg.into())
    }
}

// 唯一约束冲突 -> DuplicateKey，外键约束冲突 -> Protected
impl From<sea_orm::DbErr> for LinklisterError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) => {
                LinklisterError::DuplicateKey(msg)
            }
            Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(msg)) => {
                LinklisterError::Protected(msg)
            }
            _ => LinklisterError::DatabaseOperation(err.to_string()),
        }
    }
}

impl From<std::io::Error> for LinklisterError {
    fn from(err: std::io::Error) -> Self {
        LinklisterError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for LinklisterError {
    fn from(err: serde_json::Error) -> Self {
        LinklisterError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LinklisterError>;
