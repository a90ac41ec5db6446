use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use engine_logging::engine_info;
use linkboard_engine::FetchSettings;
use serde::{Deserialize, Serialize};

use crate::cli::GlobalArgs;

pub const DEFAULT_CONFIG_FILE: &str = "linkboard.ron";
pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/blackmatrix7/ios_rule_script/refs/heads/master/rule/Clash/README.md";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source_url: String,
    /// Falls back to the system temp dir.
    pub cache_dir: Option<PathBuf>,
    /// Falls back to the system temp dir.
    pub state_dir: Option<PathBuf>,
    pub revalidate_secs: u64,
    pub fetch: FetchConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub redirect_limit: usize,
    pub max_bytes: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            cache_dir: None,
            state_dir: None,
            revalidate_secs: 3600,
            fetch: FetchConfig::default(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        let settings = FetchSettings::default();
        Self {
            connect_timeout_secs: settings.connect_timeout.as_secs(),
            request_timeout_secs: settings.request_timeout.as_secs(),
            redirect_limit: settings.redirect_limit,
            max_bytes: settings.max_bytes,
        }
    }
}

impl Config {
    /// Read `path`, or `./linkboard.ron` when no path is given.
    ///
    /// Only the implicit default file may be absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound && !required => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read config {path:?}"));
            }
        };
        let config = Self::parse(&content).with_context(|| format!("invalid config {path:?}"))?;
        engine_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(ron::from_str(content)?)
    }

    pub fn apply_overrides(&mut self, args: &GlobalArgs) {
        if let Some(url) = &args.source_url {
            self.source_url = url.clone();
        }
        if let Some(dir) = &args.cache_dir {
            self.cache_dir = Some(dir.clone());
        }
        if let Some(dir) = &args.state_dir {
            self.state_dir = Some(dir.clone());
        }
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    pub fn state_dir(&self) -> PathBuf {
        self.state_dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    pub fn revalidate(&self) -> Duration {
        Duration::from_secs(self.revalidate_secs)
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: Duration::from_secs(self.fetch.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.fetch.request_timeout_secs),
            redirect_limit: self.fetch.redirect_limit,
            max_bytes: self.fetch.max_bytes,
            ..FetchSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = Config::parse(
            r#"(
                revalidate_secs: 60,
                state_dir: Some("/var/lib/linkboard"),
                fetch: (max_bytes: 1024),
            )"#,
        )
        .unwrap();

        assert_eq!(config.source_url, DEFAULT_SOURCE_URL);
        assert_eq!(config.revalidate(), Duration::from_secs(60));
        assert_eq!(config.state_dir(), PathBuf::from("/var/lib/linkboard"));
        assert_eq!(config.cache_dir(), std::env::temp_dir());

        let settings = config.fetch_settings();
        assert_eq!(settings.max_bytes, 1024);
        assert_eq!(settings.redirect_limit, 5);
        assert_eq!(settings.request_timeout, Duration::from_secs(30));
        assert_eq!(
            settings.allowed_content_types,
            FetchSettings::default().allowed_content_types
        );
    }

    #[test]
    fn overrides_win_over_file() {
        let mut config = Config::parse(r#"(source_url: "https://a.example/x.md")"#).unwrap();
        config.apply_overrides(&GlobalArgs {
            source_url: Some("https://b.example/y.md".into()),
            cache_dir: Some(PathBuf::from("/c")),
            ..GlobalArgs::default()
        });

        assert_eq!(config.source_url, "https://b.example/y.md");
        assert_eq!(config.cache_dir(), PathBuf::from("/c"));
        assert_eq!(config.state_dir, None);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        assert!(Config::load(Some(&temp.path().join("nope.ron"))).is_err());
    }

    #[test]
    fn explicit_file_is_read() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("linkboard.ron");
        fs::write(&path, "(revalidate_secs: 5)").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.revalidate_secs, 5);
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(Config::parse("(revalidate_secs: \"soon\")").is_err());
    }
}
