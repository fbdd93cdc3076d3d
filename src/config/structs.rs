use serde::{Deserialize, Serialize};

use crate::errors::{IpCountryError, Result};

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 环境变量前缀，示例：IPC__RATE_LIMIT__RPS=25
pub const ENV_PREFIX: &str = "IPC";

/// Unprefixed variables accepted for existing deployments, with the key each
/// one sets. They rank below `IPC__*` variables.
pub const LEGACY_ENV_KEYS: [(&str, &str); 4] = [
    ("PORT", "SERVER__PORT"),
    ("RATE_LIMIT_RPS", "RATE_LIMIT__RPS"),
    ("DATASTORE_TYPE", "DATASTORE__TYPE"),
    ("DATASTORE_FILE", "DATASTORE__FILE"),
];

/// 数据集文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DatastoreKind {
    #[default]
    Csv,
    Json,
}

impl std::fmt::Display for DatastoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for DatastoreKind {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(format!(
                "unsupported datastore type: '{}'. Valid: csv, json",
                s
            )),
        }
    }
}

/// 静态配置（启动时加载，运行期间不变）
///
/// - server: 监听地址、端口、worker 数量
/// - rate_limit: 全局每秒请求数上限
/// - datastore: 数据集文件
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub datastore: DatastoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Values given on the command line, applied over file and environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub port: Option<u16>,
    pub rps: Option<f64>,
    pub datastore_kind: Option<DatastoreKind>,
    pub datastore_file: Option<String>,
}

impl AppConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：IPC__* 环境变量 > 旧版环境变量 (PORT 等) > 配置文件 > 默认值
    /// `path` 为 None 时读取可选的 config.toml；显式指定的文件必须存在。
    pub fn load(path: Option<&str>) -> Result<Self> {
        use ::config::{Config, Environment, File};

        let required = path.is_some();
        let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

        let settings = Config::builder()
            .add_source(File::with_name(path).required(required))
            .add_source(
                Environment::default()
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(legacy_env_vars())),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config = settings.try_deserialize::<AppConfig>()?;
        if std::path::Path::new(path).exists() {
            eprintln!("[INFO] Configuration loaded from: {}", path);
        }
        Ok(config)
    }

    /// Load, apply command-line overrides, then validate.
    pub fn load_with_overrides(path: Option<&str>, overrides: &ConfigOverrides) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(rps) = overrides.rps {
            self.rate_limit.rps = rps;
        }
        if let Some(kind) = overrides.datastore_kind {
            self.datastore.kind = kind;
        }
        if let Some(ref file) = overrides.datastore_file {
            self.datastore.file = file.clone();
        }
    }

    pub fn validate(&self) -> Result<()> {
        super::validators::validate_config(self)
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> Result<String> {
        toml::to_string_pretty(&Self::default()).map_err(|e| {
            IpCountryError::serialization(format!("Error generating sample config: {}", e))
        })
    }
}

/// Legacy variables that are set and non-empty, renamed to their `__` keys.
fn legacy_env_vars() -> ::config::Map<String, String> {
    LEGACY_ENV_KEYS
        .iter()
        .filter_map(|(name, key)| {
            std::env::var(name)
                .ok()
                .filter(|value| !value.is_empty())
                .map(|value| (key.to_string(), value))
        })
        .collect()
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
    #[serde(default = "default_keep_alive_secs")]
    pub keep_alive_secs: u64,
    #[serde(default = "default_client_request_timeout_ms")]
    pub client_request_timeout_ms: u64,
}

/// 限流配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Requests per second admitted across the whole process
    #[serde(default = "default_rps")]
    pub rps: f64,
}

/// 数据集配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatastoreConfig {
    #[serde(rename = "type")]
    #[serde(default)]
    pub kind: DatastoreKind,
    #[serde(default = "default_datastore_file")]
    pub file: String,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions
// ============================================================

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_keep_alive_secs() -> u64 {
    60
}

fn default_client_request_timeout_ms() -> u64 {
    5000
}

fn default_rps() -> f64 {
    10.0
}

fn default_datastore_file() -> String {
    "testdata/sample_ips.csv".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
            keep_alive_secs: default_keep_alive_secs(),
            client_request_timeout_ms: default_client_request_timeout_ms(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self { rps: default_rps() }
    }
}

impl Default for DatastoreConfig {
    fn default() -> Self {
        Self {
            kind: DatastoreKind::default(),
            file: default_datastore_file(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}
