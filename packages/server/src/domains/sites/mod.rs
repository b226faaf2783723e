//! Sites domain - managed sites, encrypted credentials and uptime monitoring

pub mod activities;
pub mod data;
pub mod models;

pub use data::{CreateSiteRequest, SiteData, UpdateSiteRequest};
pub use models::{Site, SiteStatus, UptimeStatus};
