//! Server dependencies for handlers and scheduled jobs (using traits for testability)
//!
//! Everything that talks to the outside world sits behind a `Base*` trait so
//! tests can swap in the mocks from `test_dependencies`.

use anyhow::Result;
use sqlx::PgPool;
use std::sync::Arc;

use crate::common::CredentialCodec;
use crate::config::Config;
use crate::kernel::{
    BaseLivenessChecker, BaseMailer, BasePageFetcher, HttpProbe, LogMailer, WebhookMailer,
};

/// Shared services handed to every request handler and cron job
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    /// Site credential encryption (key derived from ENCRYPTION_KEY)
    pub codec: Arc<CredentialCodec>,
    pub liveness: Arc<dyn BaseLivenessChecker>,
    pub page_fetcher: Arc<dyn BasePageFetcher>,
    pub mailer: Arc<dyn BaseMailer>,
}

impl ServerDeps {
    pub fn new(
        db_pool: PgPool,
        codec: Arc<CredentialCodec>,
        liveness: Arc<dyn BaseLivenessChecker>,
        page_fetcher: Arc<dyn BasePageFetcher>,
        mailer: Arc<dyn BaseMailer>,
    ) -> Self {
        Self {
            db_pool,
            codec,
            liveness,
            page_fetcher,
            mailer,
        }
    }

    /// Production wiring: reqwest probe plus relay or log mailer
    pub fn from_config(db_pool: PgPool, config: &Config) -> Result<Self> {
        let probe = Arc::new(HttpProbe::new()?);

        let mailer: Arc<dyn BaseMailer> = match &config.mail_webhook_url {
            Some(url) => Arc::new(WebhookMailer::new(
                reqwest::Client::new(),
                url.clone(),
                config.mail_from.clone(),
            )),
            None => {
                tracing::warn!("MAIL_WEBHOOK_URL not set, downtime emails will only be logged");
                Arc::new(LogMailer)
            }
        };

        Ok(Self::new(
            db_pool,
            Arc::new(CredentialCodec::new(&config.encryption_key)),
            probe.clone(),
            probe,
            mailer,
        ))
    }
}
