use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::common::sanitize::{clean_opt, clean_req, clean_text, clean_url, Sanitize};

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateRuleRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "trigger is required"))]
    pub trigger: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "action is required"))]
    pub action: String,
    pub conditions: Option<Value>,
    #[validate(url)]
    pub webhook_url: Option<String>,
    pub email_template: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateWebhookRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(url(message = "webhook_url must be a valid URL"))]
    pub webhook_url: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "trigger is required"))]
    pub trigger: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Sanitize for CreateRuleRequest {
    fn sanitize(&mut self) {
        clean_req(&mut self.name, clean_text);
        clean_req(&mut self.trigger, clean_text);
        clean_req(&mut self.action, clean_text);
        clean_opt(&mut self.webhook_url, clean_url);
        // Templates are HTML on purpose; only line endings are normalised.
        self.email_template = self
            .email_template
            .take()
            .map(|t| t.replace("\r\n", "\n").trim().to_string())
            .filter(|t| !t.is_empty());
    }
}

impl Sanitize for CreateWebhookRequest {
    fn sanitize(&mut self) {
        clean_req(&mut self.name, clean_text);
        clean_req(&mut self.webhook_url, clean_url);
        clean_req(&mut self.trigger, clean_text);
    }
}
