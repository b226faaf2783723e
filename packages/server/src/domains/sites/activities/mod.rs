pub mod mutations;
pub mod queries;
pub mod uptime;

pub use mutations::{create_site, delete_site, update_site};
pub use queries::{get_site, list_sites};
pub use uptime::{check_site, run_uptime_sweep, should_alert, SweepSummary, UptimeCheck};
