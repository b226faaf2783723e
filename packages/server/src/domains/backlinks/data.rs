use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::common::sanitize::{clean_opt, clean_req, clean_text, clean_url, Sanitize};
use crate::common::SiteId;
use crate::domains::backlinks::models::{BacklinkStatus, BacklinkType};

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateBacklinkRequest {
    #[serde(default)]
    #[validate(url(message = "source_url is required"))]
    pub source_url: String,
    #[serde(default)]
    #[validate(url(message = "target_url is required"))]
    pub target_url: String,
    pub anchor_text: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<BacklinkType>,
    pub status: Option<BacklinkStatus>,
    pub site_id: Option<SiteId>,
    #[validate(range(min = 0, max = 100))]
    pub domain_authority: Option<i32>,
    #[validate(range(min = 0, max = 100))]
    pub page_authority: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBacklinkRequest {
    #[validate(url)]
    pub source_url: Option<String>,
    #[validate(url)]
    pub target_url: Option<String>,
    pub anchor_text: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<BacklinkType>,
    pub status: Option<BacklinkStatus>,
    pub site_id: Option<SiteId>,
    #[validate(range(min = 0, max = 100))]
    pub domain_authority: Option<i32>,
    #[validate(range(min = 0, max = 100))]
    pub page_authority: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BacklinkFilter {
    pub status: Option<BacklinkStatus>,
}

impl Sanitize for CreateBacklinkRequest {
    fn sanitize(&mut self) {
        clean_req(&mut self.source_url, clean_url);
        clean_req(&mut self.target_url, clean_url);
        clean_opt(&mut self.anchor_text, clean_text);
    }
}

impl Sanitize for UpdateBacklinkRequest {
    fn sanitize(&mut self) {
        clean_opt(&mut self.source_url, clean_url);
        clean_opt(&mut self.target_url, clean_url);
        clean_opt(&mut self.anchor_text, clean_text);
    }
}

/// Response of `POST /backlinks/{id}/check`
#[derive(Debug, Clone, Serialize)]
pub struct BacklinkCheckData {
    pub success: bool,
    pub status: BacklinkStatus,
    pub is_active: bool,
    pub checked_at: DateTime<Utc>,
}
