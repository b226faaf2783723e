//! reqwest-backed liveness checks and page fetches.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{redirect, Client};
use std::time::{Duration, Instant};

use super::{BaseLivenessChecker, BasePageFetcher, FetchedPage};

pub const USER_AGENT: &str = "Company Hub Bot/1.0";
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);
pub const MAX_REDIRECTS: usize = 5;
/// Audits read at most this much of a page; the rest is dropped
pub const MAX_PAGE_BYTES: usize = 2 * 1024 * 1024;

/// Outbound HTTP client shared by the uptime sweep, backlink checks and audits
#[derive(Clone)]
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    pub fn new() -> Result<Self> {
        Self::with_timeout(PROBE_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl BaseLivenessChecker for HttpProbe {
    async fn check_url(&self, url: &str) -> bool {
        match self.client.head(url).send().await {
            Ok(response) => {
                let status = response.status();
                tracing::debug!(url, status = status.as_u16(), "Liveness probe answered");
                status.is_success() || status.is_redirection()
            }
            Err(e) => {
                tracing::debug!(url, error = %e, "Liveness probe failed");
                false
            }
        }
    }
}

#[async_trait]
impl BasePageFetcher for HttpProbe {
    async fn fetch_page(&self, url: &str) -> Result<FetchedPage> {
        let started = Instant::now();
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let final_url = response.url().to_string();

        let mut response = response;
        let mut bytes: Vec<u8> = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            let room = MAX_PAGE_BYTES - bytes.len();
            if chunk.len() >= room {
                bytes.extend_from_slice(&chunk[..room]);
                tracing::debug!(url, limit = MAX_PAGE_BYTES, "Page truncated for audit");
                break;
            }
            bytes.extend_from_slice(&chunk);
        }
        let body = String::from_utf8_lossy(&bytes).into_owned();

        Ok(FetchedPage {
            status,
            final_url,
            elapsed_ms: started.elapsed().as_millis() as u64,
            body,
        })
    }
}
