pub mod audit;
pub mod crud;

pub use audit::{analyze_page, run_audit, AuditReport};
pub use crud::*;
