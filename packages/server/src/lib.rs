// Company Hub - API Core
//
// Backend for the Company Hub admin panel: CRUD over sites, leads, tasks,
// financial records, backlinks and SEO data, plus credential encryption,
// uptime/backlink liveness checks and the activity log.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;

/// Schema migrations embedded at compile time
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
