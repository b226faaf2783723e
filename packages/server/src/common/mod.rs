// Common types and utilities shared across the application

pub mod auth;
pub mod crypto;
pub mod entity_ids;
pub mod id;
pub mod money;
pub mod sanitize;

pub use auth::{AuthError, Permission};
pub use crypto::{CredentialCodec, CredentialError};
pub use entity_ids::*;
pub use id::Id;
