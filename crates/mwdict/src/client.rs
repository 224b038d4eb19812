//! Fetches raw entries from the collegiate dictionary API, with an on-disk
//! response cache.

use {
    crate::config::Config,
    anyhow::{Context, Result, anyhow},
    reqwest::Url,
    serde_json::Value,
    std::{
        io,
        path::{Path, PathBuf},
    },
    tracing::{debug, warn},
};

/// Base URL of the collegiate dictionary API.
pub const API_URL: &str = "https://dictionaryapi.com/api/v3/references/collegiate/json";

/// Fetches API responses for words.
#[derive(Debug, Clone)]
pub struct Client {
    http_client: reqwest::Client,
    api_key: String,
    cache: Option<Cache>,
}

impl Client {
    /// Creates a client from its config.
    ///
    /// # Errors
    ///
    /// Errors if the config has no API key, or the HTTP client cannot be
    /// created.
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .context("no API key configured")?;
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .context("failed to create HTTP client")?;
        Ok(Self {
            http_client,
            api_key,
            cache: config.cache_dir().map(Cache::new),
        })
    }

    /// Gets the response cache, if caching is enabled.
    #[must_use]
    pub const fn cache(&self) -> Option<&Cache> {
        self.cache.as_ref()
    }

    /// Fetches the API response body for `word`.
    ///
    /// A cached response is returned if there is one. Otherwise, the API is
    /// queried once, and the response is cached if it is valid JSON.
    ///
    /// # Errors
    ///
    /// Errors if the request fails, the API returns an error status, the body
    /// is not JSON, or the response cannot be cached.
    pub async fn fetch(&self, word: &str) -> Result<Value> {
        if let Some(cache) = &self.cache {
            if let Some(response) = cache.get(word).await? {
                debug!(word, "Using cached response");
                return Ok(response);
            }
        }

        let url = request_url(word, &self.api_key)?;
        debug!(word, "Requesting entries");
        let body = self
            .http_client
            .get(url)
            .send()
            .await
            .context("failed to send request")?
            .error_for_status()
            .context("HTTP error")?
            .text()
            .await
            .context("failed to receive response")?;
        let response = serde_json::from_str::<Value>(&body).context("response is not JSON")?;

        if let Some(cache) = &self.cache {
            cache.put(word, &body).await?;
        }
        Ok(response)
    }
}

/// Builds the API request URL for `word`.
///
/// # Errors
///
/// Errors if [`API_URL`] cannot be used as a base URL.
pub fn request_url(word: &str, api_key: &str) -> Result<Url> {
    let mut url = Url::parse(API_URL).context("invalid API URL")?;
    url.path_segments_mut()
        .map_err(|()| anyhow!("API URL cannot be a base"))?
        .push(word);
    url.query_pairs_mut().append_pair("key", api_key);
    Ok(url)
}

/// Directory of raw API responses, one file per word.
#[derive(Debug, Clone)]
pub struct Cache {
    dir: PathBuf,
}

impl Cache {
    /// Creates a cache in `dir`, which is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Gets the directory that responses are stored in.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Gets the path of the file storing the response for `word`.
    ///
    /// The word is URL-encoded, so that it cannot escape the cache
    /// directory.
    #[must_use]
    pub fn path_of(&self, word: &str) -> PathBuf {
        let name = form_urlencoded::byte_serialize(word.as_bytes()).collect::<String>();
        self.dir.join(format!("response_{name}.json"))
    }

    /// Reads the cached response for `word`.
    ///
    /// A cached file which is not valid JSON is treated as missing.
    ///
    /// # Errors
    ///
    /// Errors if the file exists but cannot be read.
    pub async fn get(&self, word: &str) -> Result<Option<Value>> {
        let path = self.path_of(word);
        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read cached response {path:?}"));
            }
        };
        match serde_json::from_str(&text) {
            Ok(response) => Ok(Some(response)),
            Err(err) => {
                warn!(?path, "Ignoring invalid cached response: {err}");
                Ok(None)
            }
        }
    }

    /// Stores the raw response body for `word`.
    ///
    /// # Errors
    ///
    /// Errors if the cache directory or file cannot be written.
    pub async fn put(&self, word: &str, body: &str) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("failed to create cache directory {:?}", self.dir))?;
        let path = self.path_of(word);
        tokio::fs::write(&path, body)
            .await
            .with_context(|| format!("failed to write cached response {path:?}"))
    }
}
