//! Tasks domain - internal to-do items

pub mod activities;
pub mod data;
pub mod models;

pub use models::{Task, TaskPriority, TaskStatus};
