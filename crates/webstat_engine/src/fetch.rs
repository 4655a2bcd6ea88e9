use std::io::Read;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;

use engine_logging::{engine_debug, engine_info};
use reqwest::header::CONTENT_TYPE;

use crate::decode::decode_text;
use crate::{FailureKind, FetchError, FetchMetadata, FetchOutput, PageContent};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 10,
            max_bytes: 20 * 1024 * 1024,
            user_agent: concat!("webstat/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Blocking retrieval of the raw bytes behind a URL.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError>;
}

/// Fetch `url` and decode the body as text.
pub fn fetch_page(fetcher: &dyn Fetcher, url: &str) -> Result<PageContent, FetchError> {
    let output = fetcher.fetch(url)?;
    let decoded = decode_text(&output.bytes, output.metadata.content_type.as_deref());
    engine_debug!(
        "Decoded {} bytes from {} as {}",
        output.metadata.byte_len,
        output.metadata.final_url,
        decoded.encoding_label
    );
    Ok(PageContent {
        text: decoded.text,
        encoding_label: decoded.encoding_label,
        metadata: output.metadata,
    })
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    fn build_client(
        &self,
        redirect_counter: Arc<AtomicUsize>,
    ) -> Result<reqwest::blocking::Client, FetchError> {
        let redirect_limit = self.settings.redirect_limit;
        let policy = reqwest::redirect::Policy::custom(move |attempt| {
            // `previous()` already holds the original URL, so this is the
            // number of the redirect being attempted.
            let count = attempt.previous().len();
            if count > redirect_limit {
                attempt.error("redirect limit exceeded")
            } else {
                redirect_counter.store(count, Ordering::Relaxed);
                attempt.follow()
            }
        });

        reqwest::blocking::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .user_agent(self.settings.user_agent.clone())
            .redirect(policy)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }

    fn too_large(&self, actual: u64) -> FetchError {
        FetchError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual: Some(actual),
            },
            "response too large",
        )
    }
}

impl Fetcher for ReqwestFetcher {
    fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
        let parsed = url::Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let redirect_counter = Arc::new(AtomicUsize::new(0));
        let client = self.build_client(redirect_counter.clone())?;

        engine_info!("GET {}", parsed);
        let response = client.get(parsed).send().map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        // Read one byte past the limit so an oversized body without a
        // Content-Length header is still detected.
        let mut bytes = Vec::new();
        response
            .take(self.settings.max_bytes + 1)
            .read_to_end(&mut bytes)
            .map_err(map_io_error)?;
        let byte_len = bytes.len() as u64;
        if byte_len > self.settings.max_bytes {
            return Err(self.too_large(byte_len));
        }

        let redirect_count = redirect_counter.load(Ordering::Relaxed);
        engine_info!(
            "Fetched {} bytes from {} ({} redirects)",
            byte_len,
            final_url,
            redirect_count
        );

        let metadata = FetchMetadata {
            original_url: url.to_string(),
            final_url,
            redirect_count,
            content_type,
            byte_len,
        };

        Ok(FetchOutput { bytes, metadata })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return FetchError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}

fn map_io_error(err: std::io::Error) -> FetchError {
    if let Some(inner) = err
        .get_ref()
        .and_then(|inner| inner.downcast_ref::<reqwest::Error>())
    {
        if inner.is_timeout() {
            return FetchError::new(FailureKind::Timeout, err.to_string());
        }
    }
    if err.kind() == std::io::ErrorKind::TimedOut {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
