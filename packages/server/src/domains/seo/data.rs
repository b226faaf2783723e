use serde::Deserialize;
use validator::Validate;

use crate::common::sanitize::{clean_opt, clean_req, clean_text, clean_url, Sanitize};
use crate::common::SiteId;
use crate::domains::seo::models::{KeywordDifficulty, KeywordInput, RankingInput};

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct KeywordRequest {
    #[validate(length(min = 1, max = 255, message = "keyword is required"))]
    pub keyword: Option<String>,
    #[validate(url)]
    pub target_url: Option<String>,
    pub site_id: Option<SiteId>,
    #[validate(range(min = 0))]
    pub search_volume: Option<i32>,
    pub difficulty: Option<KeywordDifficulty>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RankingRequest {
    #[validate(length(min = 1, max = 255, message = "keyword is required"))]
    pub keyword: Option<String>,
    #[validate(url)]
    pub target_url: Option<String>,
    pub site_id: Option<SiteId>,
    #[validate(range(min = 1))]
    pub current_position: Option<i32>,
    #[validate(range(min = 1))]
    pub target_position: Option<i32>,
}

/// `GET /seo/keywords?site_id=` and `GET /seo/rankings?site_id=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeoFilter {
    pub site_id: Option<SiteId>,
}

impl Sanitize for KeywordRequest {
    fn sanitize(&mut self) {
        if let Some(keyword) = self.keyword.as_mut() {
            clean_req(keyword, clean_text);
        }
        clean_opt(&mut self.target_url, clean_url);
    }
}

impl Sanitize for RankingRequest {
    fn sanitize(&mut self) {
        if let Some(keyword) = self.keyword.as_mut() {
            clean_req(keyword, clean_text);
        }
        clean_opt(&mut self.target_url, clean_url);
    }
}

impl From<KeywordRequest> for KeywordInput {
    fn from(req: KeywordRequest) -> Self {
        Self {
            keyword: req.keyword,
            target_url: req.target_url,
            site_id: req.site_id,
            search_volume: req.search_volume,
            difficulty: req.difficulty,
        }
    }
}

impl From<RankingRequest> for RankingInput {
    fn from(req: RankingRequest) -> Self {
        Self {
            keyword: req.keyword,
            target_url: req.target_url,
            site_id: req.site_id,
            current_position: req.current_position,
            target_position: req.target_position,
        }
    }
}
