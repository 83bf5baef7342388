use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default model used when a request does not name one.
pub const DEFAULT_MODEL: &str = "meta-llama/Llama-3.2-11B-Vision-Instruct-Turbo";

/// Default provider endpoint (OpenAI-compatible chat completions).
pub const DEFAULT_API_BASE: &str = "https://api.together.xyz/v1";

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of the OpenAI-compatible provider API
    pub api_base: String,
    /// Provider API key. Required; the service refuses to start without it.
    pub api_key: String,
    /// Model used when the request omits one
    pub default_model: String,
    /// Per-request timeout for the remote chat call
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

impl Config {
    /// Load configuration with environment variable override support
    ///
    /// Loading order:
    /// 1. Load from config.toml file
    /// 2. Override with environment variables
    /// 3. Validate the final configuration
    pub fn load() -> Result<Self, anyhow::Error> {
        Self::load_from(None)
    }

    /// Load configuration, preferring an explicitly given file path
    /// (e.g. from the command line) over the conventional locations.
    pub fn load_from(path: Option<&str>) -> Result<Self, anyhow::Error> {
        // 1. Load from config file
        let mut config = if let Some(config_path) = path.map(str::to_string).or_else(Self::find_config_file) {
            Self::from_toml(&config_path)?
        } else {
            tracing::warn!("Configuration file not found, using defaults");
            Config::default()
        };

        // 2. Override with environment variables
        config.apply_env_overrides();

        // 3. Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - APP_SERVER_HOST: Server host (default: 0.0.0.0)
    /// - APP_SERVER_PORT: Server port (default: 8080)
    /// - TOGETHER_API_KEY: Provider API key (required)
    /// - APP_LLM_API_BASE: Provider API base URL
    /// - APP_LLM_DEFAULT_MODEL: Model used when a request omits one
    /// - APP_LLM_TIMEOUT_SECS: Remote call timeout in seconds
    /// - APP_LOG_LEVEL: Logging level (e.g., "info,code_chat_api=debug")
    /// - APP_ENV: Deployment flag; "prod" lowers the default log level
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("APP_SERVER_HOST") {
            self.server.host = host;
            tracing::info!("Override server.host from env: {}", self.server.host);
        }

        if let Ok(port) = std::env::var("APP_SERVER_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
                tracing::info!("Override server.port from env: {}", self.server.port);
            }
        }

        if let Ok(key) = std::env::var("TOGETHER_API_KEY") {
            self.llm.api_key = key;
            tracing::info!("Override llm.api_key from env");
        }

        if let Ok(base) = std::env::var("APP_LLM_API_BASE") {
            self.llm.api_base = base;
            tracing::info!("Override llm.api_base from env: {}", self.llm.api_base);
        }

        if let Ok(model) = std::env::var("APP_LLM_DEFAULT_MODEL") {
            self.llm.default_model = model;
            tracing::info!(
                "Override llm.default_model from env: {}",
                self.llm.default_model
            );
        }

        if let Ok(timeout) = std::env::var("APP_LLM_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(val) => {
                    self.llm.timeout_seconds = val;
                    tracing::info!(
                        "Override llm.timeout_seconds from env: {}",
                        self.llm.timeout_seconds
                    );
                },
                Err(e) => tracing::warn!(
                    "Invalid APP_LLM_TIMEOUT_SECS '{}': {} (keep {})",
                    timeout,
                    e,
                    self.llm.timeout_seconds
                ),
            }
        }

        if let Ok(level) = std::env::var("APP_LOG_LEVEL") {
            self.logging.level = level;
            tracing::info!("Override logging.level from env: {}", self.logging.level);
        } else if let Ok(env) = std::env::var("APP_ENV") {
            // Deployment flag only picks a default verbosity; an explicit
            // APP_LOG_LEVEL always wins.
            if env == "prod" {
                self.logging.level = "warn".to_string();
                tracing::info!("APP_ENV=prod, lowering default log level to warn");
            }
        }
    }

    /// Validate configuration
    fn validate(&self) -> Result<(), anyhow::Error> {
        if self.llm.api_key.trim().is_empty() {
            anyhow::bail!(
                "Provider API key is not configured. Set TOGETHER_API_KEY or llm.api_key in config.toml"
            );
        }

        if self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }

        if self.llm.api_base.is_empty() {
            anyhow::bail!("llm.api_base cannot be empty");
        }

        if self.llm.default_model.is_empty() {
            anyhow::bail!("llm.default_model cannot be empty");
        }

        if self.llm.timeout_seconds == 0 {
            anyhow::bail!("llm.timeout_seconds must be > 0");
        }

        Ok(())
    }

    fn find_config_file() -> Option<String> {
        let possible_paths =
            ["conf/config.toml", "config.toml", "./conf/config.toml", "./config.toml"];

        for path in &possible_paths {
            if Path::new(path).exists() {
                return Some(path.to_string());
            }
        }
        None
    }

    fn from_toml(path: &str) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 8080 }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: String::new(),
            default_model: DEFAULT_MODEL.to_string(),
            timeout_seconds: 60,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info,code_chat_api=debug".to_string(), file: None }
    }
}
