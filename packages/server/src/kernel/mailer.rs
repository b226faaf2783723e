//! Outbound mail. Deployments point `MAIL_WEBHOOK_URL` at a relay that accepts
//! `{from, to, subject, html}`; without one, mail is only logged.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{error, info};

use super::BaseMailer;

#[derive(Debug, Serialize)]
struct RelayMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

/// Posts each message as JSON to an HTTP mail relay
pub struct WebhookMailer {
    client: Client,
    endpoint: String,
    from: String,
}

impl WebhookMailer {
    pub fn new(client: Client, endpoint: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            from: from.into(),
        }
    }
}

#[async_trait]
impl BaseMailer for WebhookMailer {
    async fn send_html(&self, to: &str, subject: &str, html: &str) -> Result<()> {
        let message = RelayMessage {
            from: &self.from,
            to,
            subject,
            html,
        };

        info!(to, subject, "Sending mail via relay");
        let response = self.client.post(&self.endpoint).json(&message).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Mail relay failed {}: {}", status, body);
            anyhow::bail!("Mail relay error {}: {}", status, body);
        }

        Ok(())
    }
}

/// Fallback when no relay is configured
pub struct LogMailer;

#[async_trait]
impl BaseMailer for LogMailer {
    async fn send_html(&self, to: &str, subject: &str, _html: &str) -> Result<()> {
        info!(to, subject, "Mail relay not configured, message dropped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn posts_message_to_relay() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/send"))
            .and(body_json(serde_json::json!({
                "from": "hub@example.com",
                "to": "admin@example.com",
                "subject": "Site down",
                "html": "<p>down</p>"
            })))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        let mailer = WebhookMailer::new(
            Client::new(),
            format!("{}/send", server.uri()),
            "hub@example.com",
        );
        mailer
            .send_html("admin@example.com", "Site down", "<p>down</p>")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn relay_error_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let mailer = WebhookMailer::new(Client::new(), server.uri(), "hub@example.com");
        assert!(mailer.send_html("a@example.com", "x", "y").await.is_err());
    }
}
