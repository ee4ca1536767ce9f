//! Page fetching behind the cache.
//!
//! `PageLoader::load` is the single read path every provider operation
//! goes through: cache-first unless the caller asks for a refresh, and
//! every fetched page is written back before it is returned.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::{
    cache::PageCache,
    error::{Error, Result},
};

/// User agent sent with every request. Some weather sites reject the
/// default client string.
pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Fedora; Linux x86_64;)";

/// Upper bound on a single request, so a dead site surfaces as a fetch
/// error instead of an indefinite hang.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches raw bytes for a URL.
#[async_trait]
pub trait FetchPage: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// `FetchPage` implementation backed by a real HTTP client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(Error::HttpClient)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl FetchPage for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await.map_err(|source| Error::Fetch {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::FetchStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|source| Error::Fetch {
            url: url.to_string(),
            source,
        })?;

        Ok(bytes.to_vec())
    }
}

/// Cache-first page loading.
pub struct PageLoader {
    cache: PageCache,
    fetcher: Box<dyn FetchPage>,
}

impl PageLoader {
    pub fn new(cache: PageCache, fetcher: Box<dyn FetchPage>) -> Self {
        Self { cache, fetcher }
    }

    /// Page text for `url`.
    ///
    /// With `refresh` the cache is bypassed and the entry overwritten;
    /// otherwise a fresh cached copy wins and a miss or expired entry
    /// falls through to the network.
    pub async fn load(&self, url: &str, refresh: bool) -> Result<String> {
        if !refresh {
            if let Some(bytes) = self.cache.get(url) {
                tracing::debug!(url, "cache hit");
                return decode(url, bytes);
            }
        }

        tracing::debug!(url, "fetching");
        let bytes = self.fetcher.fetch(url).await?;
        self.cache.put(url, &bytes)?;
        decode(url, bytes)
    }
}

fn decode(url: &str, bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|_| Error::Decode {
        url: url.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };
    use tempfile::TempDir;

    struct CountingFetcher {
        body: Vec<u8>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl FetchPage for CountingFetcher {
        async fn fetch(&self, _url: &str) -> Result<Vec<u8>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.body.clone())
        }
    }

    fn loader_with_body(ttl: Duration, body: &[u8]) -> (TempDir, PageLoader, Arc<AtomicUsize>) {
        let temp = TempDir::new().unwrap();
        let calls = Arc::new(AtomicUsize::new(0));
        let fetcher = CountingFetcher {
            body: body.to_vec(),
            calls: Arc::clone(&calls),
        };
        let loader = PageLoader::new(
            PageCache::new(temp.path(), ttl),
            Box::new(fetcher),
        );
        (temp, loader, calls)
    }

    #[tokio::test]
    async fn consecutive_loads_within_ttl_fetch_once() {
        let (_temp, loader, calls) = loader_with_body(Duration::from_secs(60), b"page");

        let first = loader.load("https://example.com/a", false).await.unwrap();
        let second = loader.load("https://example.com/a", false).await.unwrap();

        assert_eq!(first, "page");
        assert_eq!(second, "page");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn refresh_always_fetches_and_overwrites() {
        let (_temp, loader, calls) = loader_with_body(Duration::from_secs(60), b"page");

        loader.load("https://example.com/a", true).await.unwrap();
        loader.load("https://example.com/a", true).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);

        // The refreshed entry is still served from cache afterwards.
        loader.load("https://example.com/a", false).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn expired_entry_falls_through_to_the_network() {
        let (_temp, loader, calls) = loader_with_body(Duration::ZERO, b"page");

        loader.load("https://example.com/a", false).await.unwrap();
        loader.load("https://example.com/a", false).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn non_utf8_body_is_a_decode_error() {
        let (_temp, loader, _calls) = loader_with_body(Duration::from_secs(60), &[0xff, 0xfe, 0x00]);

        let err = loader.load("https://example.com/a", false).await.unwrap_err();

        assert!(matches!(err, Error::Decode { .. }));
    }

    #[tokio::test]
    async fn http_fetcher_sends_the_custom_user_agent() {
        let server = httpmock::MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(httpmock::Method::GET)
                    .path("/page")
                    .header("user-agent", USER_AGENT);
                then.status(200).body("hello");
            })
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let bytes = fetcher.fetch(&server.url("/page")).await.unwrap();

        mock.assert_async().await;
        assert_eq!(bytes, b"hello");
    }

    #[tokio::test]
    async fn non_success_status_is_a_fetch_error() {
        let server = httpmock::MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(httpmock::Method::GET).path("/down");
                then.status(503);
            })
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let err = fetcher.fetch(&server.url("/down")).await.unwrap_err();

        assert!(matches!(err, Error::FetchStatus { status: 503, .. }));
    }
}
