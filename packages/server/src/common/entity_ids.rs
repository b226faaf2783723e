//! Typed ID definitions for all domain entities.
//!
//! ```rust
//! use company_hub::common::{LeadId, SiteId};
//!
//! let site_id: SiteId = SiteId::new();
//! let lead_id: LeadId = LeadId::new();
//! // let wrong: LeadId = site_id; // compile error
//! # let _ = (site_id, lead_id);
//! ```

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for panel users (admins and collaborators).
pub struct User;

/// Marker type for managed sites.
pub struct Site;

pub struct Lead;

pub struct Task;

pub struct Backlink;

pub struct SeoKeyword;

pub struct SeoRanking;

pub struct SeoAudit;

/// Marker type for income/expense entries.
pub struct FinancialRecord;

pub struct AutomationRule;

pub struct AutomationWebhook;

/// Marker type for append-only audit trail entries.
pub struct ActivityLogEntry;

pub struct Notification;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

pub type UserId = Id<User>;
pub type SiteId = Id<Site>;
pub type LeadId = Id<Lead>;
pub type TaskId = Id<Task>;
pub type BacklinkId = Id<Backlink>;
pub type SeoKeywordId = Id<SeoKeyword>;
pub type SeoRankingId = Id<SeoRanking>;
pub type SeoAuditId = Id<SeoAudit>;
pub type FinancialRecordId = Id<FinancialRecord>;
pub type AutomationRuleId = Id<AutomationRule>;
pub type AutomationWebhookId = Id<AutomationWebhook>;
pub type ActivityLogId = Id<ActivityLogEntry>;
pub type NotificationId = Id<Notification>;
