use serde::{Deserialize, Serialize};
use std::time::Duration;
use anyhow::Result;

const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash-latest";
const DEFAULT_LINE_API_BASE_URL: &str = "https://api.line.me";
const DEFAULT_GOOGLE_TRANSLATE_BASE_URL: &str = "https://translation.googleapis.com";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Flat view of every setting, as it appears in the environment
/// (`LINE_CHANNEL_SECRET` -> `line_channel_secret`) or in a config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub line_channel_secret: String,
    #[serde(default)]
    pub line_channel_access_token: String,
    #[serde(default = "default_line_api_base_url")]
    pub line_api_base_url: String,
    #[serde(default)]
    pub gemini_api_key: String,
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,
    #[serde(default = "default_gemini_base_url")]
    pub gemini_base_url: String,
    #[serde(default)]
    pub google_translate_api_key: String,
    #[serde(default = "default_google_translate_base_url")]
    pub google_translate_base_url: String,
    #[serde(default = "default_target_language_code")]
    pub translate_target_language_code: String,
    #[serde(default = "default_target_language_name")]
    pub translate_target_language_name: String,
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_line_api_base_url() -> String {
    DEFAULT_LINE_API_BASE_URL.to_string()
}

fn default_gemini_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

fn default_gemini_base_url() -> String {
    DEFAULT_GEMINI_BASE_URL.to_string()
}

fn default_google_translate_base_url() -> String {
    DEFAULT_GOOGLE_TRANSLATE_BASE_URL.to_string()
}

fn default_target_language_code() -> String {
    "en".to_string()
}

fn default_target_language_name() -> String {
    "English".to_string()
}

fn default_http_timeout_secs() -> u64 {
    30
}

/// Immutable process configuration, resolved once in `main`.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub line: LineConfig,
    pub providers: ProviderConfig,
    pub target_language: TargetLanguage,
    pub http_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct LineConfig {
    pub channel_secret: String,
    pub channel_access_token: String,
    pub api_base_url: String,
}

/// Credentials for each translation backend. `None` disables the backend.
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    pub google_translate: Option<GoogleTranslateCredentials>,
    pub gemini: Option<GeminiCredentials>,
}

#[derive(Debug, Clone)]
pub struct GoogleTranslateCredentials {
    pub api_key: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct GeminiCredentials {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetLanguage {
    pub name: String,
    pub code: String,
}

impl Config {
    /// Load configuration from an optional file, then the process environment.
    /// Environment variables win over file values.
    pub fn load(path: Option<&str>) -> Result<Self> {
        Self::load_from(path, config::Environment::default())
    }

    pub(crate) fn load_from(path: Option<&str>, environment: config::Environment) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }
        let settings: Settings = builder
            .add_source(environment)
            .build()?
            .try_deserialize()?;
        Ok(Self::from(settings))
    }
}

impl From<Settings> for Config {
    fn from(settings: Settings) -> Self {
        let google_translate = non_empty(settings.google_translate_api_key).map(|api_key| {
            GoogleTranslateCredentials {
                api_key,
                base_url: settings.google_translate_base_url,
            }
        });
        let gemini = non_empty(settings.gemini_api_key).map(|api_key| GeminiCredentials {
            api_key,
            model: settings.gemini_model,
            base_url: settings.gemini_base_url,
        });

        Self {
            server: ServerConfig {
                host: settings.host,
                port: settings.port,
            },
            line: LineConfig {
                channel_secret: settings.line_channel_secret,
                channel_access_token: settings.line_channel_access_token,
                api_base_url: settings.line_api_base_url,
            },
            providers: ProviderConfig {
                google_translate,
                gemini,
            },
            target_language: TargetLanguage {
                name: settings.translate_target_language_name,
                code: settings.translate_target_language_code,
            },
            http_timeout: Duration::from_secs(settings.http_timeout_secs),
        }
    }
}

// An empty key is treated the same as an unset one.
fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
