//! Leads domain - sales pipeline contacts

pub mod activities;
pub mod data;
pub mod models;

pub use models::{Lead, LeadStatus};
