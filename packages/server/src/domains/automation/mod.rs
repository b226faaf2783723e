//! Automation domain - trigger/action rules and outbound webhooks

pub mod activities;
pub mod data;
pub mod models;

pub use models::{AutomationRule, AutomationWebhook};
