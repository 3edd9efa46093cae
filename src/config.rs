use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Engine configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct EngineConfig {
    /// Failure diagnostics configuration
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
    /// Strategy registry configuration
    #[serde(default)]
    pub extractors: ExtractorsConfig,
    /// HTTP fetching, used by the host adapter only
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// Configuration for the diagnostics profiler
#[derive(Debug, Deserialize, Clone)]
pub struct DiagnosticsConfig {
    /// Attach a diagnostic bundle to every failed extraction
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Maximum candidate containers recorded across ingredients and steps
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
    /// Text samples kept per candidate container
    #[serde(default = "default_samples_per_candidate")]
    pub samples_per_candidate: usize,
    /// Samples are truncated to this many characters
    #[serde(default = "default_sample_chars")]
    pub sample_chars: usize,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_candidates: default_max_candidates(),
            samples_per_candidate: default_samples_per_candidate(),
            sample_chars: default_sample_chars(),
        }
    }
}

/// Configuration for the strategy registry
#[derive(Debug, Deserialize, Clone)]
pub struct ExtractorsConfig {
    /// Publisher strategies to leave out of the registry, by name
    #[serde(default)]
    pub disabled: Vec<String>,
    /// Run the universal structured-metadata pass when a strategy fails
    #[serde(default = "default_true")]
    pub structured_fallback: bool,
    /// Run the generic heuristic pass for unmatched locators
    #[serde(default = "default_true")]
    pub generic_fallback: bool,
}

impl Default for ExtractorsConfig {
    fn default() -> Self {
        Self {
            disabled: Vec::new(),
            structured_fallback: true,
            generic_fallback: true,
        }
    }
}

/// Configuration for fetching pages over HTTP
#[derive(Debug, Deserialize, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

// Default value functions
fn default_true() -> bool {
    true
}

fn default_max_candidates() -> usize {
    10
}

fn default_samples_per_candidate() -> usize {
    2
}

fn default_sample_chars() -> usize {
    50
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; RecipeExtract/0.1)".to_string()
}

impl EngineConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_EXTRACT__ prefix
    /// 2. recipe-extract.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_EXTRACT__DIAGNOSTICS__ENABLED
    pub fn load() -> Result<Self, ConfigError> {
        load_config("recipe-extract")
    }
}

/// Load configuration from the named file (extension optional) and the environment.
pub fn load_config(file: &str) -> Result<EngineConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name(file).required(false))
        // Use double underscore for nested: RECIPE_EXTRACT__FETCH__TIMEOUT
        .add_source(
            Environment::with_prefix("RECIPE_EXTRACT")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("extractors.disabled")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
