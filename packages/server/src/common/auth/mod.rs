//! Role-based authorization primitives.
//!
//! ```rust
//! use company_hub::common::auth::Permission;
//!
//! assert!(Permission::ManageSites.requires_admin());
//! ```

mod capability;
mod errors;

pub use capability::Permission;
pub use errors::AuthError;
