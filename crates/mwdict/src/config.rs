//! User configuration for the [`Client`].
//!
//! [`Client`]: crate::client::Client

use {
    anyhow::{Context, Result},
    directories::ProjectDirs,
    serde::{Deserialize, Serialize},
    std::{
        io,
        path::{Path, PathBuf},
        time::Duration,
    },
    tracing::debug,
};

/// Default request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Name of the config file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Settings for fetching entries, loaded from a JSON file.
///
/// Every field is optional in the file.
///
/// ```json
/// {
///   "api_key": "00000000-0000-0000-0000-000000000000",
///   "cache_dir": "/home/user/.cache/mwdict",
///   "timeout_secs": 10
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Key for the collegiate dictionary API.
    pub api_key: Option<String>,
    /// Directory that responses are cached in.
    ///
    /// If unset, [`default_cache_dir`] is used.
    pub cache_dir: Option<PathBuf>,
    /// Whether to read and write cached responses at all.
    pub cache: bool,
    /// How long to wait for a response before giving up.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            cache_dir: None,
            cache: true,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Loads a config file.
    ///
    /// # Errors
    ///
    /// Errors if the file cannot be read, or is not a valid config.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read config file {path:?}"))?;
        serde_json::from_str(&text).with_context(|| format!("failed to parse config file {path:?}"))
    }

    /// Loads a config file, or returns the default config if it does not
    /// exist.
    ///
    /// # Errors
    ///
    /// Errors if the file exists, but cannot be read or is not a valid
    /// config.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match tokio::fs::metadata(path).await {
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(?path, "Config file does not exist, using defaults");
                Ok(Self::default())
            }
            _ => Self::load(path).await,
        }
    }

    /// Gets the directory that responses are cached in, if caching is
    /// enabled.
    #[must_use]
    pub fn cache_dir(&self) -> Option<PathBuf> {
        if !self.cache {
            return None;
        }
        self.cache_dir.clone().or_else(default_cache_dir)
    }

    /// Gets the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "mwdict")
}

/// Gets the default path of the config file in the platform's config
/// directory.
///
/// Returns [`None`] if there is no home directory.
#[must_use]
pub fn default_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Gets the default response cache directory in the platform's cache
/// directory.
///
/// Returns [`None`] if there is no home directory.
#[must_use]
pub fn default_cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        tokio::fs::write(&path, r#"{ "api_key": "secret" }"#)
            .await
            .unwrap();

        let config = Config::load(&path).await.unwrap();
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert!(config.cache);
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[tokio::test]
    async fn rejects_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        tokio::fs::write(&path, r#"{ "apikey": "secret" }"#)
            .await
            .unwrap();

        assert!(Config::load(&path).await.is_err());
        assert!(Config::load_or_default(&path).await.is_err());
    }

    #[tokio::test]
    async fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        assert!(Config::load(&path).await.is_err());
        assert_eq!(
            Config::load_or_default(&path).await.unwrap(),
            Config::default()
        );
    }

    #[test]
    fn cache_dir() {
        let config = Config {
            cache_dir: Some("/tmp/mwdict".into()),
            ..Default::default()
        };
        assert_eq!(config.cache_dir(), Some(PathBuf::from("/tmp/mwdict")));

        let config = Config {
            cache: false,
            ..config
        };
        assert_eq!(config.cache_dir(), None);
    }
}
