//! Domain table sources: HTTPS fetch of `xrp-ledger.toml`, or a local file.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};
use validator_domain_core::TableSource;

/// Path under which a domain publishes its validator table.
pub const TABLE_PATH: &str = "/.well-known/xrp-ledger.toml";

/// HTTP client settings for table fetches.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Whole-request timeout.
    pub timeout: Duration,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: concat!("validator-domain/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Reasons a domain table could not be obtained.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The HTTP client could not be constructed.
    #[error("cannot build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    /// The request failed or returned a non-success status.
    #[error("Error Fetching {url}: {source}")]
    Http {
        /// Requested URL.
        url: String,
        /// Underlying error.
        #[source]
        source: reqwest::Error,
    },
    /// A local table file could not be read.
    #[error("cannot read {path}: {source}")]
    Read {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The table is not valid TOML.
    #[error("{origin} is not valid TOML: {source}")]
    Parse {
        /// URL or path the table came from.
        origin: String,
        /// Underlying error.
        #[source]
        source: toml::de::Error,
    },
}

/// URL of the table published by `domain`.
pub fn table_url(domain: &str) -> String {
    format!("https://{}{}", domain, TABLE_PATH)
}

fn parse_table(origin: String, text: &str) -> Result<toml::Table, FetchError> {
    toml::from_str(text).map_err(|source| FetchError::Parse { origin, source })
}

/// Fetches tables over HTTPS.
pub struct HttpTableSource {
    client: reqwest::blocking::Client,
}

impl HttpTableSource {
    /// Builds a source with the given client settings.
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
}

impl TableSource for HttpTableSource {
    type Error = FetchError;

    fn fetch(&self, domain: &str) -> Result<toml::Table, FetchError> {
        let url = table_url(domain);
        debug!(%url, "fetching domain table");

        let text = self
            .client
            .get(&url)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(|source| {
                warn!(%url, error = %source, "domain table fetch failed");
                FetchError::Http {
                    url: url.clone(),
                    source,
                }
            })?;

        parse_table(url, &text)
    }
}

/// Serves a table from a local file regardless of the domain asked for.
pub struct FileTableSource {
    path: PathBuf,
}

impl FileTableSource {
    /// Creates a source reading `path`.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TableSource for FileTableSource {
    type Error = FetchError;

    fn fetch(&self, domain: &str) -> Result<toml::Table, FetchError> {
        debug!(%domain, path = %self.path.display(), "reading domain table from file");
        let text = std::fs::read_to_string(&self.path).map_err(|source| FetchError::Read {
            path: self.path.clone(),
            source,
        })?;
        parse_table(self.path.display().to_string(), &text)
    }
}
