// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Domain code (uptime sweeps, audits, alerts) takes these through ServerDeps.
//
// Naming convention: Base* for trait names (e.g., BaseLivenessChecker, BaseMailer)

use anyhow::Result;
use async_trait::async_trait;

// =============================================================================
// Liveness Trait (Infrastructure - HTTP reachability)
// =============================================================================

#[async_trait]
pub trait BaseLivenessChecker: Send + Sync {
    /// Probe a URL. Any 2xx/3xx answer is up; errors, timeouts and other
    /// statuses are down.
    async fn check_url(&self, url: &str) -> bool;
}

// =============================================================================
// Page Fetch Trait (Infrastructure - used by SEO audits)
// =============================================================================

/// A fetched HTML page with the numbers an audit needs
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub final_url: String,
    pub elapsed_ms: u64,
    pub body: String,
}

#[async_trait]
pub trait BasePageFetcher: Send + Sync {
    /// GET a page, following redirects
    async fn fetch_page(&self, url: &str) -> Result<FetchedPage>;
}

// =============================================================================
// Mail Trait (Infrastructure - outbound email)
// =============================================================================

#[async_trait]
pub trait BaseMailer: Send + Sync {
    /// Send an HTML email to a single recipient
    async fn send_html(&self, to: &str, subject: &str, html: &str) -> Result<()>;
}
