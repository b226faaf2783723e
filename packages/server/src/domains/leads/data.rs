use serde::Deserialize;
use validator::Validate;

use crate::common::sanitize::{
    clean_email, clean_opt, clean_req, clean_text, clean_textarea, Sanitize,
};
use crate::common::UserId;
use crate::domains::leads::models::LeadStatus;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateLeadRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "name is required"))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    pub company: Option<String>,
    pub source: Option<String>,
    pub status: Option<LeadStatus>,
    pub assigned_to: Option<UserId>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateLeadRequest {
    #[validate(length(min = 1, max = 255, message = "name cannot be empty"))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    pub company: Option<String>,
    pub source: Option<String>,
    pub status: Option<LeadStatus>,
    pub assigned_to: Option<UserId>,
    pub notes: Option<String>,
}

/// `GET /leads?status=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadFilter {
    pub status: Option<LeadStatus>,
}

impl Sanitize for CreateLeadRequest {
    fn sanitize(&mut self) {
        clean_req(&mut self.name, clean_text);
        clean_opt(&mut self.email, clean_email);
        clean_opt(&mut self.phone, clean_text);
        clean_opt(&mut self.company, clean_text);
        clean_opt(&mut self.source, clean_text);
        clean_opt(&mut self.notes, clean_textarea);
    }
}

impl Sanitize for UpdateLeadRequest {
    fn sanitize(&mut self) {
        if let Some(name) = self.name.as_mut() {
            clean_req(name, clean_text);
        }
        clean_opt(&mut self.email, clean_email);
        clean_opt(&mut self.phone, clean_text);
        clean_opt(&mut self.company, clean_text);
        clean_opt(&mut self.source, clean_text);
        clean_opt(&mut self.notes, clean_textarea);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lead_needs_a_name() {
        let mut req = CreateLeadRequest::default();
        req.sanitize();
        assert!(req.validate().is_err());

        req.name = "Ana Souza".to_string();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn email_is_normalized_then_checked() {
        let mut req = CreateLeadRequest {
            name: "Ana".to_string(),
            email: Some("  ANA@Example.com ".to_string()),
            ..Default::default()
        };
        req.sanitize();
        assert_eq!(req.email.as_deref(), Some("ana@example.com"));
        assert!(req.validate().is_ok());

        req.email = Some("not-an-email".to_string());
        assert!(req.validate().is_err());
    }
}
