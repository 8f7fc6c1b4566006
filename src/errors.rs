use std::fmt;

#[derive(Debug, Clone)]
pub enum CaptureError {
    InvalidUserAgent(String),
    DetectorUnavailable(String),
    NotFound(String),
    Conflict(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Configuration(String),
    Serialization(String),
    FileOperation(String),
}

impl CaptureError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            CaptureError::InvalidUserAgent(_) => "E001",
            CaptureError::DetectorUnavailable(_) => "E002",
            CaptureError::NotFound(_) => "E003",
            CaptureError::Conflict(_) => "E004",
            CaptureError::DatabaseConfig(_) => "E005",
            CaptureError::DatabaseConnection(_) => "E006",
            CaptureError::DatabaseOperation(_) => "E007",
            CaptureError::Configuration(_) => "E008",
            CaptureError::Serialization(_) => "E009",
            CaptureError::FileOperation(_) => "E010",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            CaptureError::InvalidUserAgent(_) => "Invalid User Agent",
            CaptureError::DetectorUnavailable(_) => "Device Detector Unavailable",
            CaptureError::NotFound(_) => "Record Not Found",
            CaptureError::Conflict(_) => "Record Already Exists",
            CaptureError::DatabaseConfig(_) => "Database Configuration Error",
            CaptureError::DatabaseConnection(_) => "Database Connection Error",
            CaptureError::DatabaseOperation(_) => "Database Operation Error",
            CaptureError::Configuration(_) => "Configuration Error",
            CaptureError::Serialization(_) => "Serialization Error",
            CaptureError::FileOperation(_) => "File Operation Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            CaptureError::InvalidUserAgent(msg)
            | CaptureError::DetectorUnavailable(msg)
            | CaptureError::NotFound(msg)
            | CaptureError::Conflict(msg)
            | CaptureError::DatabaseConfig(msg)
            | CaptureError::DatabaseConnection(msg)
            | CaptureError::DatabaseOperation(msg)
            | CaptureError::Configuration(msg)
            | CaptureError::Serialization(msg)
            | CaptureError::FileOperation(msg) => msg,
        }
    }

    /// Lookup miss: the caller should fall back to an empty record.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CaptureError::NotFound(_))
    }

    /// Uniqueness violation on `order_id`.
    pub fn is_conflict(&self) -> bool {
        matches!(self, CaptureError::Conflict(_))
    }

    /// 格式化为彩色输出（用于 CLI 错误输出）
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

    /// 格式化为简洁输出（用于日志）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CaptureError {}

// 便捷的构造函数
impl CaptureError {
    pub fn invalid_user_agent<T: Into<String>>(msg: T) -> Self {
        CaptureError::InvalidUserAgent(msg.into())
    }

    pub fn detector_unavailable<T: Into<String>>(msg: T) -> Self {
        CaptureError::DetectorUnavailable(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        CaptureError::NotFound(msg.into())
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        CaptureError::Conflict(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        CaptureError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        CaptureError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        CaptureError::DatabaseOperation(msg.into())
    }

    pub fn configuration<T: Into<String>>(msg: T) -> Self {
        CaptureError::Configuration(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        CaptureError::Serialization(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        CaptureError::FileOperation(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for CaptureError {
    fn from(err: sea_orm::DbErr) -> Self {
        // 唯一约束冲突单独归类，协调器据此判定为重复投递
        if let Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
            return CaptureError::Conflict(detail);
        }
        CaptureError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for CaptureError {
    fn from(err: std::io::Error) -> Self {
        CaptureError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for CaptureError {
    fn from(err: serde_json::Error) -> Self {
        CaptureError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for CaptureError {
    fn from(err: config::ConfigError) -> Self {
        CaptureError::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CaptureError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique() {
        let errors = [
            CaptureError::invalid_user_agent("x"),
            CaptureError::detector_unavailable("x"),
            CaptureError::not_found("x"),
            CaptureError::conflict("x"),
            CaptureError::database_config("x"),
            CaptureError::database_connection("x"),
            CaptureError::database_operation("x"),
            CaptureError::configuration("x"),
            CaptureError::serialization("x"),
            CaptureError::file_operation("x"),
        ];
        let mut codes: Vec<&str> = errors.iter().map(|e| e.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_display_uses_simple_format() {
        let err = CaptureError::invalid_user_agent("Unable to detect user agent.");
        assert_eq!(
            err.to_string(),
            "Invalid User Agent: Unable to detect user agent."
        );
        assert_eq!(err.message(), "Unable to detect user agent.");
    }

    #[test]
    fn test_predicates() {
        assert!(CaptureError::not_found("order 1").is_not_found());
        assert!(!CaptureError::not_found("order 1").is_conflict());
        assert!(CaptureError::conflict("order 1").is_conflict());
        assert!(!CaptureError::database_operation("boom").is_not_found());
    }

    #[test]
    fn test_from_db_err_plain() {
        let err: CaptureError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert_eq!(err.code(), "E007");
        assert!(err.message().contains("boom"));
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CaptureError = io.into();
        assert_eq!(err.code(), "E010");
    }
}
