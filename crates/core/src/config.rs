use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub chat: ChatConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    pub graceful_shutdown_secs: u64,
}

#[derive(Clone, Debug)]
pub struct LlmConfig {
    /// Gemini API key. Stays server-side; never logged, never serialized.
    pub api_key: Option<SecretString>,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct ChatConfig {
    pub rate_limit_max_requests: usize,
    pub rate_limit_window_secs: i64,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind_address: "127.0.0.1".to_string(),
                port: 8080,
                graceful_shutdown_secs: 15,
            },
            llm: LlmConfig {
                api_key: None,
                base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
                model: "gemini-1.5-flash-latest".to_string(),
                timeout_secs: 30,
            },
            chat: ChatConfig { rate_limit_max_requests: 4, rate_limit_window_secs: 60 },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    server: Option<ServerPatch>,
    llm: Option<LlmPatch>,
    chat: Option<ChatPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerPatch {
    bind_address: Option<String>,
    port: Option<u16>,
    graceful_shutdown_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct LlmPatch {
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct ChatPatch {
    rate_limit_max_requests: Option<usize>,
    rate_limit_window_secs: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("cartwheel.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(server) = patch.server {
            if let Some(bind_address) = server.bind_address {
                self.server.bind_address = bind_address;
            }
            if let Some(port) = server.port {
                self.server.port = port;
            }
            if let Some(graceful_shutdown_secs) = server.graceful_shutdown_secs {
                self.server.graceful_shutdown_secs = graceful_shutdown_secs;
            }
        }

        if let Some(llm) = patch.llm {
            if let Some(llm_api_key_value) = llm.api_key {
                self.llm.api_key = Some(llm_api_key_value.into());
            }
            if let Some(base_url) = llm.base_url {
                self.llm.base_url = base_url;
            }
            if let Some(model) = llm.model {
                self.llm.model = model;
            }
            if let Some(timeout_secs) = llm.timeout_secs {
                self.llm.timeout_secs = timeout_secs;
            }
        }

        if let Some(chat) = patch.chat {
            if let Some(max_requests) = chat.rate_limit_max_requests {
                self.chat.rate_limit_max_requests = max_requests;
            }
            if let Some(window_secs) = chat.rate_limit_window_secs {
                self.chat.rate_limit_window_secs = window_secs;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(bind_address) = env::var("CARTWHEEL_BIND_ADDRESS") {
            self.server.bind_address = bind_address;
        }
        if let Ok(port) = env::var("CARTWHEEL_PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidEnvOverride {
                key: "CARTWHEEL_PORT".to_string(),
                value: port.clone(),
            })?;
        }
        if let Ok(gemini_api_key_value) = env::var("GEMINI_API_KEY") {
            if !gemini_api_key_value.is_empty() {
                self.llm.api_key = Some(gemini_api_key_value.into());
            }
        }
        if let Ok(base_url) = env::var("CARTWHEEL_LLM_BASE_URL") {
            self.llm.base_url = base_url;
        }
        if let Ok(model) = env::var("CARTWHEEL_LLM_MODEL") {
            self.llm.model = model;
        }
        if let Ok(level) = env::var("CARTWHEEL_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = env::var("CARTWHEEL_LOG_FORMAT") {
            self.logging.format = format.parse()?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind_address.trim().is_empty() {
            return Err(ConfigError::Validation("server.bind_address must not be empty".into()));
        }
        if self.llm.base_url.trim().is_empty() {
            return Err(ConfigError::Validation("llm.base_url must not be empty".into()));
        }
        if self.llm.model.trim().is_empty() {
            return Err(ConfigError::Validation("llm.model must not be empty".into()));
        }
        if self.llm.timeout_secs == 0 {
            return Err(ConfigError::Validation("llm.timeout_secs must be positive".into()));
        }
        if self.chat.rate_limit_max_requests == 0 {
            return Err(ConfigError::Validation(
                "chat.rate_limit_max_requests must be positive".into(),
            ));
        }
        if self.chat.rate_limit_window_secs <= 0 {
            return Err(ConfigError::Validation(
                "chat.rate_limit_window_secs must be positive".into(),
            ));
        }
        Ok(())
    }
}

fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return path.exists().then(|| path.to_path_buf());
    }
    let default_path = PathBuf::from("cartwheel.toml");
    default_path.exists().then_some(default_path)
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;
    toml::from_str(&raw)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}
