use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub ai: AiConfig,
    pub data: DataConfig,
    pub cors: CorsConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
}

/// Upstream completion API settings. Every field is optional here: a missing
/// value must not block startup, it is reported per request instead.
#[derive(Clone, Debug)]
pub struct AiConfig {
    pub api_key: Option<SecretString>,
    pub api_url: Option<String>,
    pub model: Option<String>,
}

#[derive(Clone, Debug)]
pub struct DataConfig {
    pub path: PathBuf,
}

#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origin: String,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub environment: Option<Environment>,
    pub data_path: Option<PathBuf>,
    pub ai_api_key: Option<String>,
    pub ai_api_url: Option<String>,
    pub ai_model: Option<String>,
    pub allowed_origin: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                environment: Environment::Development,
            },
            ai: AiConfig { api_key: None, api_url: None, model: None },
            data: DataConfig { path: PathBuf::from("dummyData.json") },
            cors: CorsConfig { allowed_origin: "http://localhost:3000".to_string() },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

fn secret_value(value: String) -> SecretString {
    value.into()
}

impl std::str::FromStr for Environment {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            other => Err(ConfigError::Validation(format!(
                "unsupported environment `{other}` (expected development|production)"
            ))),
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

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("repdash.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(server) = patch.server {
            if let Some(host) = server.host {
                self.server.host = host;
            }
            if let Some(port) = server.port {
                self.server.port = port;
            }
            if let Some(environment) = server.environment {
                self.server.environment = environment;
            }
        }

        if let Some(ai) = patch.ai {
            if let Some(ai_api_key_value) = ai.api_key {
                self.ai.api_key = Some(secret_value(ai_api_key_value));
            }
            if let Some(api_url) = ai.api_url {
                self.ai.api_url = Some(api_url);
            }
            if let Some(model) = ai.model {
                self.ai.model = Some(model);
            }
        }

        if let Some(data) = patch.data {
            if let Some(path) = data.path {
                self.data.path = path;
            }
        }

        if let Some(cors) = patch.cors {
            if let Some(allowed_origin) = cors.allowed_origin {
                self.cors.allowed_origin = allowed_origin;
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
        if let Some(value) = read_env("REPDASH_SERVER_HOST") {
            self.server.host = value;
        }
        if let Some(value) = read_env("REPDASH_SERVER_PORT") {
            self.server.port = parse_u16("REPDASH_SERVER_PORT", &value)?;
        }
        let environment =
            read_env("REPDASH_SERVER_ENVIRONMENT").or_else(|| read_env("REPDASH_ENVIRONMENT"));
        if let Some(value) = environment {
            self.server.environment = value.parse()?;
        }

        if let Some(value) = read_env("REPDASH_AI_API_KEY") {
            self.ai.api_key = Some(secret_value(value));
        }
        if let Some(value) = read_env("REPDASH_AI_API_URL") {
            self.ai.api_url = Some(value);
        }
        if let Some(value) = read_env("REPDASH_AI_MODEL") {
            self.ai.model = Some(value);
        }

        if let Some(value) = read_env("REPDASH_DATA_PATH") {
            self.data.path = PathBuf::from(value);
        }

        if let Some(value) = read_env("REPDASH_CORS_ALLOWED_ORIGIN") {
            self.cors.allowed_origin = value;
        }

        let log_level = read_env("REPDASH_LOGGING_LEVEL").or_else(|| read_env("REPDASH_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("REPDASH_LOGGING_FORMAT").or_else(|| read_env("REPDASH_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(host) = overrides.host {
            self.server.host = host;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(environment) = overrides.environment {
            self.server.environment = environment;
        }
        if let Some(data_path) = overrides.data_path {
            self.data.path = data_path;
        }
        if let Some(ai_api_key) = overrides.ai_api_key {
            self.ai.api_key = Some(secret_value(ai_api_key));
        }
        if let Some(ai_api_url) = overrides.ai_api_url {
            self.ai.api_url = Some(ai_api_url);
        }
        if let Some(ai_model) = overrides.ai_model {
            self.ai.model = Some(ai_model);
        }
        if let Some(allowed_origin) = overrides.allowed_origin {
            self.cors.allowed_origin = allowed_origin;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
    }

    /// The ai section is deliberately not validated here: incomplete
    /// completion credentials surface as request-time errors, not as a
    /// refusal to start.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_server(&self.server)?;
        validate_cors(&self.cors)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("repdash.toml"), PathBuf::from("config/repdash.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_server(server: &ServerConfig) -> Result<(), ConfigError> {
    if server.host.trim().is_empty() {
        return Err(ConfigError::Validation("server.host must not be empty".to_string()));
    }

    if server.port == 0 {
        return Err(ConfigError::Validation(
            "server.port must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn validate_cors(cors: &CorsConfig) -> Result<(), ConfigError> {
    let origin = cors.allowed_origin.trim();
    if !origin.starts_with("http://") && !origin.starts_with("https://") {
        return Err(ConfigError::Validation(
            "cors.allowed_origin must start with http:// or https://".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u16(key: &str, value: &str) -> Result<u16, ConfigError> {
    value.parse::<u16>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    server: Option<ServerPatch>,
    ai: Option<AiPatch>,
    data: Option<DataPatch>,
    cors: Option<CorsPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerPatch {
    host: Option<String>,
    port: Option<u16>,
    environment: Option<Environment>,
}

#[derive(Debug, Default, Deserialize)]
struct AiPatch {
    api_key: Option<String>,
    api_url: Option<String>,
    model: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct DataPatch {
    path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct CorsPatch {
    allowed_origin: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
