//! Backlinks domain - inbound/outbound links and their liveness

pub mod activities;
pub mod data;
pub mod models;

pub use models::{Backlink, BacklinkStatus, BacklinkType};
