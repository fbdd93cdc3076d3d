use std::fmt;

/// Why a dataset load was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    /// The record's address is not a valid IPv4/IPv6 literal.
    InvalidAddress,
    /// The record does not have exactly three fields.
    MalformedRecord,
}

/// 数据集加载失败：任一记录非法都会使整个加载失败
///
/// `position` 是从 1 开始的记录序号（JSON 中即数组下标 + 1）。CSV 空行会被跳过，
/// 所以它不一定等于文件行号。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadError {
    pub kind: LoadErrorKind,
    pub position: usize,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LoadErrorKind::InvalidAddress => {
                write!(f, "invalid IP address at record {}", self.position)
            }
            LoadErrorKind::MalformedRecord => write!(
                f,
                "malformed record {}: expected 3 fields (ip, city, country)",
                self.position
            ),
        }
    }
}

impl std::error::Error for LoadError {}

/// Outcome of a failed store lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    InvalidAddress,
    NotFound,
    /// The store has not completed a successful load.
    NotReady,
    /// Backend specific failure.
    Backend(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::InvalidAddress => write!(f, "invalid IP address format"),
            StoreError::NotFound => write!(f, "IP address not found"),
            StoreError::NotReady => write!(f, "lookup store is not loaded"),
            StoreError::Backend(msg) => write!(f, "lookup backend failure: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}
