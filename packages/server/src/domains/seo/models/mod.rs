pub mod audit;
pub mod keyword;
pub mod ranking;

pub use audit::{AuditStatus, SeoAudit, SeoAuditWithSite};
pub use keyword::{KeywordDifficulty, KeywordInput, SeoKeyword};
pub use ranking::{RankingInput, SeoRanking};
