use crate::utils::error::{ReconError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_one_of, validate_path, validate_range, Validate,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "reconset.toml";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

static ENV_VAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub redis: RedisConfig,
    pub logging: LoggingConfig,
    pub printer: Option<PrinterConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
    pub db: i64,
    pub password: Option<String>,
    /// Full `redis://` URL; takes precedence over host/port/db/password.
    pub url: Option<String>,
    pub timeout_seconds: u64,
    pub key_prefix: String,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 6379,
            db: 0,
            password: None,
            url: None,
            timeout_seconds: 5,
            key_prefix: "project:".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrinterConfig {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl AppConfig {
    /// 載入配置: 指定的檔案必須存在；未指定時若預設檔存在則讀取，否則使用預設值
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => {
                if !Path::new(path).exists() {
                    return Err(ReconError::ConfigError {
                        message: format!("Config file '{}' does not exist", path),
                    });
                }
                Self::from_file(path)
            }
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ReconError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${REDIS_PASSWORD})，未設定的變數替換為空字串
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                std::env::var(&caps[1]).unwrap_or_default()
            })
            .into_owned()
    }

    /// Applies `REDIS_HOST` / `REDIS_PORT`. Returns warnings for values that
    /// were ignored; the logger is not up yet when this runs.
    pub fn apply_env_overrides(&mut self) -> Vec<String> {
        self.apply_overrides_from(|name| std::env::var(name).ok())
    }

    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Vec<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut warnings = Vec::new();

        if let Some(host) = lookup("REDIS_HOST").filter(|h| !h.trim().is_empty()) {
            self.redis.host = host;
        }

        if let Some(port) = lookup("REDIS_PORT") {
            match port.trim().parse::<u16>() {
                Ok(port) => self.redis.port = port,
                Err(_) => warnings.push(format!("Invalid REDIS_PORT value: {}", port)),
            }
        }

        warnings
    }
}

impl RedisConfig {
    pub fn connection_url(&self) -> Result<Url> {
        if let Some(url) = &self.url {
            return Url::parse(url).map_err(|e| ReconError::InvalidConfigValueError {
                field: "redis.url".to_string(),
                value: url.clone(),
                reason: e.to_string(),
            });
        }

        let raw = format!("redis://{}:{}/{}", self.host, self.port, self.db);
        let mut url = Url::parse(&raw).map_err(|e| ReconError::InvalidConfigValueError {
            field: "redis.host".to_string(),
            value: self.host.clone(),
            reason: e.to_string(),
        })?;

        if let Some(password) = self.password.as_deref().filter(|p| !p.is_empty()) {
            url.set_password(Some(password))
                .map_err(|_| ReconError::ConfigError {
                    message: "Redis URL cannot carry a password".to_string(),
                })?;
        }

        Ok(url)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("redis.host", &self.redis.host)?;
        validate_range("redis.port", self.redis.port, 1, u16::MAX)?;
        validate_range("redis.db", self.redis.db, 0, 15)?;
        validate_range("redis.timeout_seconds", self.redis.timeout_seconds, 1, 300)?;
        validate_one_of("logging.level", &self.logging.level, &LOG_LEVELS)?;

        if let Some(file) = &self.logging.file {
            validate_path("logging.file", file)?;
        }

        if let Some(printer) = &self.printer {
            validate_non_empty_string("printer.command", &printer.command)?;
        }

        self.redis.connection_url()?;

        Ok(())
    }
}
