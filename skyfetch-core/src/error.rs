//! Error types shared across the crate.
//!
//! Expected absences (a cache miss, an unconfigured provider, a weather
//! field the page does not expose) are modeled as `Option`s at the call
//! sites; the variants here cover genuinely failed operations.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure while fetching a page.
    #[error("request to {url} failed")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered, but not with a usable page.
    #[error("request to {url} returned status {status}")]
    FetchStatus { url: String, status: u16 },

    /// The fetched body is not UTF-8 text.
    #[error("page at {url} is not valid UTF-8")]
    Decode { url: String },

    #[error("failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),

    /// Cache writes are fatal for the fetch that triggered them: the
    /// freshly fetched page could not be persisted.
    #[error("failed to write cache entry {path}")]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read config file {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("failed to serialize configuration")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("could not determine platform config directory")]
    NoProjectDirs,

    #[error(
        "unknown command or provider '{name}'.\n\
         Hint: run `skyfetch providers` to list the available providers."
    )]
    UnknownName { name: String },

    /// An out-of-range pick during interactive configuration. Never
    /// turned into an out-of-bounds access.
    #[error("selection {index} is out of range: {count} locations available")]
    InvalidSelection { index: usize, count: usize },

    /// The operator backed out of an interactive flow.
    #[error("selection cancelled")]
    Cancelled,

    /// A browse page yielded no locations before anything was chosen.
    #[error("no locations found at {url}")]
    NoLocations { url: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
