//! Financial domain - income and expense ledger

pub mod activities;
pub mod data;
pub mod models;

pub use models::{FinancialRecord, FinancialType};
