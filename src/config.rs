use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Process-wide settings, loaded once at start-up and handed to whoever needs them
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// HTTP fetch settings
    #[serde(default)]
    pub fetch: FetchConfig,
    /// Image conversion settings
    #[serde(default)]
    pub images: ImageConfig,
}

/// Settings for outgoing page and image requests
#[derive(Debug, Deserialize, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ImageConfig {
    /// Replace scraped image URLs with the converted PNG bytes
    #[serde(default)]
    pub inline: bool,
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; RecipeKeeper/0.3)".to_string()
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_KEEPER__ prefix
    /// 2. recipe-keeper.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_KEEPER__FETCH__TIMEOUT
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration, see [`AppConfig::load`]
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe-keeper").required(false))
        .add_source(
            Environment::with_prefix("RECIPE_KEEPER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
