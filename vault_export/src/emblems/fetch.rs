//! HTTP retrieval of remote emblems.

use std::io::Write;
use std::time::Duration;

use crate::error::EmblemError;

/// Sent with every request; some origins reject anonymous clients.
pub const USER_AGENT: &str = concat!("fmg-vault/", env!("CARGO_PKG_VERSION"), " (emblem fetcher)");

/// Upper bound for one emblem download.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Retrieves a remote emblem into a writer.
pub trait EmblemFetcher {
    /// Stream the body of `url` into `dest`, returning the number of bytes written.
    fn fetch(&self, url: &str, dest: &mut dyn Write) -> Result<u64, EmblemError>;
}

/// Blocking reqwest client, built once and reused for every emblem.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

impl EmblemFetcher for HttpFetcher {
    fn fetch(&self, url: &str, dest: &mut dyn Write) -> Result<u64, EmblemError> {
        let http = |source| EmblemError::Http {
            url: url.to_string(),
            source,
        };

        let mut response = self
            .client
            .get(url)
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(http)?;

        // copy_to reads the body in chunks, never buffering it whole.
        let mut dest = dest;
        response.copy_to(&mut dest).map_err(http)
    }
}

/// True for references that must go through the fetcher.
pub fn is_remote(reference: &str) -> bool {
    reference.starts_with("http://") || reference.starts_with("https://")
}
