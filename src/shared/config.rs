//! Application configuration. KEGG endpoint, HTTP policy, export location.

use crate::adapters::kegg::DEFAULT_BASE_URL;
use crate::adapters::ui::banner::{DEFAULT_SUBTITLE, DEFAULT_TITLE};
use serde::Deserialize;
use std::time::Duration;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Default initial retry backoff. Only used when `max_retries > 0`.
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 500;
pub const DEFAULT_OUTPUT_DIR: &str = "./kegg_results";
/// Env var naming an optional config file (TOML/YAML/JSON, by extension).
pub const CONFIG_PATH_ENV: &str = "KEGG_FINDER_CONFIG";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// KEGG REST base URL. Read from KEGG_FINDER_BASE_URL.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds. Read from KEGG_FINDER_TIMEOUT_SECS.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Extra attempts on transport errors and 5xx (default 0). Read from KEGG_FINDER_MAX_RETRIES.
    #[serde(default)]
    pub max_retries: Option<u32>,

    /// Initial retry backoff in ms; doubled per attempt. Read from KEGG_FINDER_RETRY_BACKOFF_MS.
    #[serde(default)]
    pub retry_backoff_ms: Option<u64>,

    /// Max in-flight lookups per pipeline stage (default 1 = sequential). Read from KEGG_FINDER_CONCURRENCY.
    #[serde(default)]
    pub concurrency: Option<usize>,

    /// Export root directory. Read from KEGG_FINDER_OUTPUT_DIR.
    #[serde(default)]
    pub output_dir: Option<String>,

    /// Export without asking (batch mode). Read from KEGG_FINDER_AUTO_EXPORT.
    #[serde(default)]
    pub auto_export: Option<bool>,

    /// User-Agent header. Read from KEGG_FINDER_USER_AGENT.
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Figlet title of the welcome banner. Read from KEGG_FINDER_BANNER_TITLE.
    #[serde(default)]
    pub banner_title: Option<String>,

    /// Line under the banner. Read from KEGG_FINDER_BANNER_SUBTITLE.
    #[serde(default)]
    pub banner_subtitle: Option<String>,
}

impl AppConfig {
    /// Path of the config file named by KEGG_FINDER_CONFIG, if any.
    pub fn explicit_path() -> Option<String> {
        std::env::var(CONFIG_PATH_ENV).ok().filter(|p| !p.trim().is_empty())
    }

    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        Self::load_from(Self::explicit_path().as_deref())
    }

    /// Load from an optional config file (required when given) plus KEGG_FINDER_* env vars.
    pub fn load_from(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut c = config::Config::builder();
        if let Some(path) = path {
            c = c.add_source(config::File::with_name(path).required(true));
        }
        // Environment overrides the config file.
        c = c.add_source(config::Environment::with_prefix("KEGG_FINDER").try_parsing(true));
        c.build()?.try_deserialize()
    }

    /// Returns the KEGG base URL. Defaults to https://rest.kegg.jp.
    pub fn base_url_or_default(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Returns the request timeout. Defaults to 30s.
    pub fn timeout_or_default(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Returns retry count. Defaults to 0 (single attempt).
    pub fn max_retries_or_default(&self) -> u32 {
        self.max_retries.unwrap_or(0)
    }

    pub fn retry_backoff_or_default(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms.unwrap_or(DEFAULT_RETRY_BACKOFF_MS))
    }

    /// Returns lookup concurrency. Defaults to 1; 0 is treated as 1.
    pub fn concurrency_or_default(&self) -> usize {
        self.concurrency.unwrap_or(1).max(1)
    }

    pub fn output_dir_or_default(&self) -> String {
        self.output_dir
            .clone()
            .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string())
    }

    pub fn auto_export_or_default(&self) -> bool {
        self.auto_export.unwrap_or(false)
    }

    /// Returns the User-Agent. Defaults to `kegg-finder/<version>`.
    pub fn user_agent_or_default(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("kegg-finder/{}", env!("CARGO_PKG_VERSION")))
    }

    pub fn banner_title_or_default(&self) -> String {
        self.banner_title
            .clone()
            .unwrap_or_else(|| DEFAULT_TITLE.to_string())
    }

    pub fn banner_subtitle_or_default(&self) -> String {
        self.banner_subtitle
            .clone()
            .unwrap_or_else(|| DEFAULT_SUBTITLE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.base_url_or_default(), "https://rest.kegg.jp");
        assert_eq!(cfg.timeout_or_default(), Duration::from_secs(30));
        assert_eq!(cfg.max_retries_or_default(), 0);
        assert_eq!(cfg.retry_backoff_or_default(), Duration::from_millis(500));
        assert_eq!(cfg.concurrency_or_default(), 1);
        assert_eq!(cfg.output_dir_or_default(), "./kegg_results");
        assert!(!cfg.auto_export_or_default());
        assert!(cfg.user_agent_or_default().starts_with("kegg-finder/"));
        assert_eq!(cfg.banner_title_or_default(), "KEGG-FINDER");
    }

    #[test]
    fn test_zero_concurrency_is_sequential() {
        let cfg = AppConfig {
            concurrency: Some(0),
            ..Default::default()
        };
        assert_eq!(cfg.concurrency_or_default(), 1);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(AppConfig::load_from(missing.to_str()).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kegg.toml");
        std::fs::write(
            &path,
            "base_url = \"http://localhost:9000\"\nconcurrency = 4\nauto_export = true\nbanner_subtitle = \"Insulin screen\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load_from(path.to_str()).unwrap();
        assert_eq!(cfg.base_url_or_default(), "http://localhost:9000");
        assert_eq!(cfg.concurrency_or_default(), 4);
        assert!(cfg.auto_export_or_default());
        assert_eq!(cfg.banner_subtitle_or_default(), "Insulin screen");
    }
}
