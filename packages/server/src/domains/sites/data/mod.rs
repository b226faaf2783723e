use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::common::sanitize::{
    clean_opt, clean_patch, clean_req, clean_text, clean_textarea, clean_url, Sanitize,
};
use crate::common::{CredentialCodec, UserId};
use crate::domains::sites::models::{
    DnsStatus, HostingType, IndexationStatus, SiteStatus, SiteWithResponsible, SslStatus,
    UptimeStatus,
};

/// Body of `POST /sites`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateSiteRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(url(message = "primary_url must be a valid URL"))]
    pub primary_url: String,
    pub other_urls: Option<String>,
    pub category: Option<String>,
    pub cms: Option<String>,
    pub server: Option<String>,
    pub hosting_provider: Option<String>,
    pub hosting_type: Option<HostingType>,
    pub responsible_user_id: Option<UserId>,
    pub team_members: Option<String>,
    pub external_providers: Option<String>,
    /// Plain string or JSON object; encrypted before storage
    pub ftp_credentials: Option<serde_json::Value>,
    pub ssh_credentials: Option<serde_json::Value>,
    pub db_credentials: Option<serde_json::Value>,
    pub google_analytics_id: Option<String>,
    #[validate(url)]
    pub search_console_url: Option<String>,
    pub tag_manager_id: Option<String>,
    pub facebook_pixel_id: Option<String>,
    pub webhook_urls: Option<String>,
    pub main_keywords: Option<String>,
    #[validate(range(min = 0))]
    pub backlinks_count: Option<i32>,
    pub last_audit_date: Option<NaiveDate>,
    pub indexation_status: Option<IndexationStatus>,
    pub hosting_cost: Option<Decimal>,
    pub extra_costs: Option<Decimal>,
    pub estimated_revenue: Option<Decimal>,
    pub roi: Option<Decimal>,
    pub status: Option<SiteStatus>,
    pub ssl_status: Option<SslStatus>,
    pub dns_status: Option<DnsStatus>,
    pub domain_expiry: Option<NaiveDate>,
    pub uptime_alerts: Option<bool>,
    pub internal_notes: Option<String>,
}

/// Body of `PUT /sites/{id}`. Absent fields are left unchanged; an empty
/// string clears an optional text field or credential.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSiteRequest {
    #[validate(length(min = 1, max = 255, message = "name cannot be empty"))]
    pub name: Option<String>,
    #[validate(url(message = "primary_url must be a valid URL"))]
    pub primary_url: Option<String>,
    pub other_urls: Option<String>,
    pub category: Option<String>,
    pub cms: Option<String>,
    pub server: Option<String>,
    pub hosting_provider: Option<String>,
    pub hosting_type: Option<HostingType>,
    pub responsible_user_id: Option<UserId>,
    pub team_members: Option<String>,
    pub external_providers: Option<String>,
    pub ftp_credentials: Option<serde_json::Value>,
    pub ssh_credentials: Option<serde_json::Value>,
    pub db_credentials: Option<serde_json::Value>,
    pub google_analytics_id: Option<String>,
    #[validate(custom(function = "blank_or_url"))]
    pub search_console_url: Option<String>,
    pub tag_manager_id: Option<String>,
    pub facebook_pixel_id: Option<String>,
    pub webhook_urls: Option<String>,
    pub main_keywords: Option<String>,
    #[validate(range(min = 0))]
    pub backlinks_count: Option<i32>,
    pub last_audit_date: Option<NaiveDate>,
    pub indexation_status: Option<IndexationStatus>,
    pub hosting_cost: Option<Decimal>,
    pub extra_costs: Option<Decimal>,
    pub estimated_revenue: Option<Decimal>,
    pub roi: Option<Decimal>,
    pub status: Option<SiteStatus>,
    pub ssl_status: Option<SslStatus>,
    pub dns_status: Option<DnsStatus>,
    pub domain_expiry: Option<NaiveDate>,
    pub uptime_alerts: Option<bool>,
    pub internal_notes: Option<String>,
}

impl Sanitize for CreateSiteRequest {
    fn sanitize(&mut self) {
        clean_req(&mut self.name, clean_text);
        clean_req(&mut self.primary_url, clean_url);
        clean_opt(&mut self.other_urls, clean_textarea);
        clean_opt(&mut self.category, clean_text);
        clean_opt(&mut self.cms, clean_text);
        clean_opt(&mut self.server, clean_text);
        clean_opt(&mut self.hosting_provider, clean_text);
        clean_opt(&mut self.team_members, clean_textarea);
        clean_opt(&mut self.external_providers, clean_textarea);
        clean_opt(&mut self.google_analytics_id, clean_text);
        clean_opt(&mut self.search_console_url, clean_url);
        clean_opt(&mut self.tag_manager_id, clean_text);
        clean_opt(&mut self.facebook_pixel_id, clean_text);
        clean_opt(&mut self.webhook_urls, clean_textarea);
        clean_opt(&mut self.main_keywords, clean_textarea);
        clean_opt(&mut self.internal_notes, clean_textarea);
    }
}

impl Sanitize for UpdateSiteRequest {
    fn sanitize(&mut self) {
        // A blank name stays Some("") so validation rejects it
        if let Some(name) = self.name.as_mut() {
            clean_req(name, clean_text);
        }
        clean_opt(&mut self.primary_url, clean_url);
        clean_patch(&mut self.other_urls, clean_textarea);
        clean_patch(&mut self.category, clean_text);
        clean_patch(&mut self.cms, clean_text);
        clean_patch(&mut self.server, clean_text);
        clean_patch(&mut self.hosting_provider, clean_text);
        clean_patch(&mut self.team_members, clean_textarea);
        clean_patch(&mut self.external_providers, clean_textarea);
        clean_patch(&mut self.google_analytics_id, clean_text);
        clean_patch(&mut self.search_console_url, clean_url);
        clean_patch(&mut self.tag_manager_id, clean_text);
        clean_patch(&mut self.facebook_pixel_id, clean_text);
        clean_patch(&mut self.webhook_urls, clean_textarea);
        clean_patch(&mut self.main_keywords, clean_textarea);
        clean_patch(&mut self.internal_notes, clean_textarea);
    }
}

fn blank_or_url(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || url::Url::parse(value).is_ok() {
        Ok(())
    } else {
        Err(ValidationError::new("url"))
    }
}

/// Site as returned by the API, credentials decrypted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteData {
    pub id: String,
    pub name: String,
    pub primary_url: String,
    pub other_urls: Option<String>,
    pub category: Option<String>,
    pub cms: Option<String>,
    pub server: Option<String>,
    pub hosting_provider: Option<String>,
    pub hosting_type: HostingType,
    pub responsible_user_id: Option<String>,
    pub responsible_name: Option<String>,
    pub team_members: Option<String>,
    pub external_providers: Option<String>,
    pub ftp_credentials: String,
    pub ssh_credentials: String,
    pub db_credentials: String,
    pub google_analytics_id: Option<String>,
    pub search_console_url: Option<String>,
    pub tag_manager_id: Option<String>,
    pub facebook_pixel_id: Option<String>,
    pub webhook_urls: Option<String>,
    pub main_keywords: Option<String>,
    pub backlinks_count: i32,
    pub last_audit_date: Option<NaiveDate>,
    pub indexation_status: IndexationStatus,
    pub hosting_cost: Decimal,
    pub extra_costs: Decimal,
    pub estimated_revenue: Decimal,
    pub roi: Decimal,
    pub status: SiteStatus,
    pub ssl_status: SslStatus,
    pub dns_status: DnsStatus,
    pub domain_expiry: Option<NaiveDate>,
    pub uptime_status: UptimeStatus,
    pub last_uptime_check: Option<DateTime<Utc>>,
    pub uptime_alerts: bool,
    pub internal_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SiteData {
    /// Build the API view. Undecryptable credentials come back empty.
    pub fn from_row(row: SiteWithResponsible, codec: &CredentialCodec) -> Self {
        let SiteWithResponsible {
            site,
            responsible_name,
        } = row;
        let decrypt = |blob: Option<String>| {
            blob.map(|b| codec.decrypt_or_empty(&b)).unwrap_or_default()
        };

        Self {
            id: site.id.to_string(),
            name: site.name,
            primary_url: site.primary_url,
            other_urls: site.other_urls,
            category: site.category,
            cms: site.cms,
            server: site.server,
            hosting_provider: site.hosting_provider,
            hosting_type: site.hosting_type,
            responsible_user_id: site.responsible_user_id.map(|id| id.to_string()),
            responsible_name,
            team_members: site.team_members,
            external_providers: site.external_providers,
            ftp_credentials: decrypt(site.ftp_credentials),
            ssh_credentials: decrypt(site.ssh_credentials),
            db_credentials: decrypt(site.db_credentials),
            google_analytics_id: site.google_analytics_id,
            search_console_url: site.search_console_url,
            tag_manager_id: site.tag_manager_id,
            facebook_pixel_id: site.facebook_pixel_id,
            webhook_urls: site.webhook_urls,
            main_keywords: site.main_keywords,
            backlinks_count: site.backlinks_count,
            last_audit_date: site.last_audit_date,
            indexation_status: site.indexation_status,
            hosting_cost: site.hosting_cost,
            extra_costs: site.extra_costs,
            estimated_revenue: site.estimated_revenue,
            roi: site.roi,
            status: site.status,
            ssl_status: site.ssl_status,
            dns_status: site.dns_status,
            domain_expiry: site.domain_expiry,
            uptime_status: site.uptime_status,
            last_uptime_check: site.last_uptime_check,
            uptime_alerts: site.uptime_alerts,
            internal_notes: site.internal_notes,
            created_at: site.created_at,
            updated_at: site.updated_at,
        }
    }
}

/// Result of a manual uptime check
#[derive(Debug, Clone, Serialize)]
pub struct UptimeCheckData {
    pub success: bool,
    pub status: UptimeStatus,
    pub is_up: bool,
    pub checked_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateSiteRequest {
        CreateSiteRequest {
            name: "Acme Store".to_string(),
            primary_url: "https://acme.example".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn accepts_minimal_site() {
        let mut req = valid_request();
        req.sanitize();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn rejects_blank_name_after_sanitizing() {
        let mut req = valid_request();
        req.name = "  <b> </b> ".to_string();
        req.sanitize();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn rejects_missing_or_bad_url() {
        let mut req = valid_request();
        req.primary_url = String::new();
        assert!(req.validate().is_err());

        req.primary_url = "not a url".to_string();
        req.sanitize();
        assert!(req.validate().is_err());
    }

    #[test]
    fn update_rejects_explicit_empty_name() {
        let mut req = UpdateSiteRequest {
            name: Some("   ".to_string()),
            ..Default::default()
        };
        req.sanitize();
        assert!(req.validate().is_err());

        let mut untouched = UpdateSiteRequest::default();
        untouched.sanitize();
        assert!(untouched.validate().is_ok());
    }

    #[test]
    fn update_keeps_blank_optional_fields_for_clearing() {
        let mut req = UpdateSiteRequest {
            cms: Some("  ".to_string()),
            search_console_url: Some(" ".to_string()),
            primary_url: Some(" ".to_string()),
            ..Default::default()
        };
        req.sanitize();
        assert_eq!(req.cms.as_deref(), Some(""));
        assert_eq!(req.search_console_url.as_deref(), Some(""));
        assert_eq!(req.primary_url, None);
        assert!(req.validate().is_ok());

        req.search_console_url = Some("not a url".to_string());
        assert!(req.validate().is_err());
    }

    #[test]
    fn credentials_accept_string_or_object() {
        let req: CreateSiteRequest = serde_json::from_value(serde_json::json!({
            "name": "A",
            "primary_url": "https://a.example",
            "ftp_credentials": "user:pass",
            "ssh_credentials": {"user": "root", "key": "..."}
        }))
        .unwrap();
        assert!(req.ftp_credentials.unwrap().is_string());
        assert!(req.ssh_credentials.unwrap().is_object());
    }
}
