//! Configuration loaded from TOML, with secrets from the environment.

use coursewright_error::{ConfigError, CourseResult};
use coursewright_models::{OPENAI_CHAT_URL, UNSPLASH_API_BASE, YOUTUBE_API_BASE, YOUTUBE_WATCH_BASE};
use coursewright_structured::{DEFAULT_MODEL, GenerationSettings};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};

/// Environment variable holding the chat completions API key.
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
/// Environment variable holding the YouTube Data API key.
pub const YOUTUBE_API_KEY: &str = "YOUTUBE_API_KEY";
/// Environment variable holding the Unsplash access key.
pub const UNSPLASH_API_KEY: &str = "UNSPLASH_API_KEY";

/// Top-level configuration.
///
/// Every section is optional; a missing file yields the defaults.
///
/// # Examples
///
/// ```
/// use coursewright::CoursewrightConfig;
///
/// let config: CoursewrightConfig = r#"
///     [generation]
///     max_retries = 5
///
///     [user]
///     name = "ada"
/// "#
/// .parse()
/// .expect("valid config");
///
/// assert_eq!(*config.generation().max_retries(), 5);
/// assert_eq!(config.user().name(), "ada");
/// assert_eq!(*config.openai().timeout_secs(), 120);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct CoursewrightConfig {
    /// Model settings for every structured generation call
    generation: GenerationSettings,
    /// Chat completions endpoint
    openai: OpenAIConfig,
    /// Video search and transcripts
    youtube: YouTubeConfig,
    /// Cover images
    unsplash: UnsplashConfig,
    /// The local user
    user: UserConfig,
}

impl CoursewrightConfig {
    /// Load configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> CourseResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        content.parse()
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> CourseResult<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!(path = %path.as_ref().display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }
}

impl std::str::FromStr for CoursewrightConfig {
    type Err = coursewright_error::CourseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)).into())
    }
}

/// Chat completions endpoint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct OpenAIConfig {
    /// Full URL of the chat completions endpoint
    base_url: String,
    /// Model used when a request does not name one
    model: String,
    /// Request timeout in seconds
    timeout_secs: u64,
}

impl OpenAIConfig {
    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            base_url: OPENAI_CHAT_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: 120,
        }
    }
}

/// YouTube endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct YouTubeConfig {
    /// Data API base URL
    api_base: String,
    /// Watch page base URL
    watch_base: String,
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            api_base: YOUTUBE_API_BASE.to_string(),
            watch_base: YOUTUBE_WATCH_BASE.to_string(),
        }
    }
}

/// Unsplash endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct UnsplashConfig {
    /// API base URL
    api_base: String,
}

impl Default for UnsplashConfig {
    fn default() -> Self {
        Self {
            api_base: UNSPLASH_API_BASE.to_string(),
        }
    }
}

/// The user courses are created for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct UserConfig {
    /// Display name, used to find the user in the store
    name: String,
    /// Credits given to a newly created user
    credits: i64,
    /// Subscribers may create courses without credits
    subscribed: bool,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            name: "local".to_string(),
            credits: 10,
            subscribed: false,
        }
    }
}

/// API keys read from the environment.
#[derive(Clone, Getters)]
pub struct Secrets {
    /// Chat completions API key
    openai_api_key: String,
    /// YouTube Data API key
    youtube_api_key: String,
    /// Unsplash access key
    unsplash_api_key: String,
}

impl Secrets {
    /// Reads every key from the process environment.
    pub fn from_env() -> CourseResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads every key through `lookup`, failing on the first missing one.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> CourseResult<Self> {
        let require = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| ConfigError::new(format!("{} not set", name)))
        };
        Ok(Self {
            openai_api_key: require(OPENAI_API_KEY)?,
            youtube_api_key: require(YOUTUBE_API_KEY)?,
            unsplash_api_key: require(UNSPLASH_API_KEY)?,
        })
    }
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets").finish_non_exhaustive()
    }
}
