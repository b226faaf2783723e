pub mod lead;

pub use lead::{CreateLead, Lead, LeadStatus, LeadWithAssignee, UpdateLead};
