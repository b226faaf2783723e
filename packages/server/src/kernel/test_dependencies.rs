// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{BaseLivenessChecker, BaseMailer, BasePageFetcher, FetchedPage, ServerDeps};
use crate::common::CredentialCodec;

pub const TEST_ENCRYPTION_KEY: &str = "test-encryption-key";

// =============================================================================
// Mock Liveness Checker
// =============================================================================

/// Answers from a URL -> up/down table; unknown URLs use the default
pub struct MockLivenessChecker {
    answers: Arc<Mutex<HashMap<String, bool>>>,
    default_up: bool,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockLivenessChecker {
    pub fn new(default_up: bool) -> Self {
        Self {
            answers: Arc::new(Mutex::new(HashMap::new())),
            default_up,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_answer(self, url: &str, up: bool) -> Self {
        self.set_answer(url, up);
        self
    }

    pub fn set_answer(&self, url: &str, up: bool) {
        self.answers.lock().unwrap().insert(url.to_string(), up);
    }

    /// Get all URLs that were probed
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseLivenessChecker for MockLivenessChecker {
    async fn check_url(&self, url: &str) -> bool {
        self.calls.lock().unwrap().push(url.to_string());
        self.answers
            .lock()
            .unwrap()
            .get(url)
            .copied()
            .unwrap_or(self.default_up)
    }
}

// =============================================================================
// Mock Page Fetcher
// =============================================================================

pub struct MockPageFetcher {
    page: Option<FetchedPage>,
}

impl MockPageFetcher {
    pub fn with_html(status: u16, html: &str) -> Self {
        Self {
            page: Some(FetchedPage {
                status,
                final_url: String::new(),
                elapsed_ms: 42,
                body: html.to_string(),
            }),
        }
    }

    /// Every fetch fails, as if the host were unreachable
    pub fn failing() -> Self {
        Self { page: None }
    }
}

#[async_trait]
impl BasePageFetcher for MockPageFetcher {
    async fn fetch_page(&self, url: &str) -> Result<FetchedPage> {
        match &self.page {
            Some(page) => Ok(FetchedPage {
                final_url: url.to_string(),
                ..page.clone()
            }),
            None => anyhow::bail!("connection refused: {}", url),
        }
    }
}

// =============================================================================
// Recording Mailer
// =============================================================================

#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

pub struct RecordingMailer {
    sent: Arc<Mutex<Vec<SentMail>>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for RecordingMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseMailer for RecordingMailer {
    async fn send_html(&self, to: &str, subject: &str, html: &str) -> Result<()> {
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            html: html.to_string(),
        });
        Ok(())
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Bundle of mocks; keep the handles to assert on calls after the fact
pub struct TestDependencies {
    pub liveness: Arc<MockLivenessChecker>,
    pub page_fetcher: Arc<MockPageFetcher>,
    pub mailer: Arc<RecordingMailer>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            liveness: Arc::new(MockLivenessChecker::new(true)),
            page_fetcher: Arc::new(MockPageFetcher::with_html(200, "<html></html>")),
            mailer: Arc::new(RecordingMailer::new()),
        }
    }

    pub fn with_liveness(mut self, liveness: MockLivenessChecker) -> Self {
        self.liveness = Arc::new(liveness);
        self
    }

    pub fn with_page_fetcher(mut self, fetcher: MockPageFetcher) -> Self {
        self.page_fetcher = Arc::new(fetcher);
        self
    }

    pub fn server_deps(&self, db_pool: PgPool) -> ServerDeps {
        ServerDeps::new(
            db_pool,
            Arc::new(CredentialCodec::new(TEST_ENCRYPTION_KEY)),
            self.liveness.clone(),
            self.page_fetcher.clone(),
            self.mailer.clone(),
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
