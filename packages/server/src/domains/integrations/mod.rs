//! Integrations domain - third-party connection settings

pub mod activities;
pub mod data;
pub mod models;

pub use models::{Integration, IntegrationStatus};
