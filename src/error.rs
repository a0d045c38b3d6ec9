use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can abort a page download. Unresolvable references inside
/// a page are not errors; they are skipped where they are found.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not a valid absolute URL: {url}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("only http and https pages can be mirrored: {url}")]
    UnsupportedScheme { url: String },

    #[error("failed to build the HTTP client")]
    Client {
        #[source]
        source: reqwest::Error,
    },

    #[error("request for {url} failed")]
    Fetch {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to save {filename}")]
    Save {
        filename: String,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub fn fetch(url: &str, source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Error::Fetch {
            url: url.to_string(),
            source: source.into(),
        }
    }
}
