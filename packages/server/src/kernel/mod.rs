//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod http_probe;
pub mod mailer;
pub mod scheduled_tasks;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use http_probe::HttpProbe;
pub use mailer::{LogMailer, WebhookMailer};
pub use test_dependencies::{
    MockLivenessChecker, MockPageFetcher, RecordingMailer, TestDependencies,
};
pub use traits::*;
