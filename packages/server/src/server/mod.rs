// HTTP server setup (Axum REST API + SPA shell)
pub mod app;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod shell;
pub mod static_files;

pub use app::*;
pub use error::{ApiError, ApiResult};
