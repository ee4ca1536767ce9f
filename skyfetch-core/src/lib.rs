//! Core library for the `skyfetch` weather aggregator.
//!
//! This crate defines:
//! - The page cache and the cache-first fetch path
//! - A generic name → factory registry shared by providers and commands
//! - Configuration handling
//! - The provider abstraction and the built-in site adapters
//!
//! It is used by `skyfetch-cli`, but can also be reused by other binaries or services.

pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod model;
pub mod provider;
pub mod registry;

pub use cache::PageCache;
pub use config::Config;
pub use error::{Error, Result};
pub use fetch::{FetchPage, HttpFetcher, PageLoader};
pub use model::{Location, WeatherInfo, WeatherReport};
pub use provider::{AppContext, Provider, SelectLocation};
pub use registry::Registry;
