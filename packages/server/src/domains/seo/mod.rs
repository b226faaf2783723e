//! SEO domain - tracked keywords, search rankings and page audits

pub mod activities;
pub mod data;
pub mod models;

pub use models::{SeoAudit, SeoKeyword, SeoRanking};
