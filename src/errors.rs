use std::fmt;

use crate::storage::LoadError;

#[derive(Debug, Clone)]
pub enum IpCountryError {
    Config(String),
    FileOperation(String),
    Serialization(String),
    DatasetLoad(String),
}

impl IpCountryError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            IpCountryError::Config(_) => "E001",
            IpCountryError::FileOperation(_) => "E002",
            IpCountryError::Serialization(_) => "E003",
            IpCountryError::DatasetLoad(_) => "E004",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            IpCountryError::Config(_) => "Configuration Error",
            IpCountryError::FileOperation(_) => "File Operation Error",
            IpCountryError::Serialization(_) => "Serialization Error",
            IpCountryError::DatasetLoad(_) => "Dataset Load Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            IpCountryError::Config(msg) => msg,
            IpCountryError::FileOperation(msg) => msg,
            IpCountryError::Serialization(msg) => msg,
            IpCountryError::DatasetLoad(msg) => msg,
        }
    }

    /// 格式化为彩色输出（启动失败时打印到 stderr）
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

impl fmt::Display for IpCountryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for IpCountryError {}

impl IpCountryError {
    pub fn config<T: Into<String>>(msg: T) -> Self {
        IpCountryError::Config(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        IpCountryError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        IpCountryError::Serialization(msg.into())
    }

    pub fn dataset_load<T: Into<String>>(msg: T) -> Self {
        IpCountryError::DatasetLoad(msg.into())
    }
}

impl From<std::io::Error> for IpCountryError {
    fn from(err: std::io::Error) -> Self {
        IpCountryError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for IpCountryError {
    fn from(err: serde_json::Error) -> Self {
        IpCountryError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for IpCountryError {
    fn from(err: csv::Error) -> Self {
        IpCountryError::Serialization(err.to_string())
    }
}

impl From<::config::ConfigError> for IpCountryError {
    fn from(err: ::config::ConfigError) -> Self {
        IpCountryError::Config(err.to_string())
    }
}

impl From<LoadError> for IpCountryError {
    fn from(err: LoadError) -> Self {
        IpCountryError::DatasetLoad(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, IpCountryError>;
