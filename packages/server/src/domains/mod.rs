// Business domains
pub mod activity;
pub mod auth;
pub mod automation;
pub mod backlinks;
pub mod dashboard;
pub mod financial;
pub mod integrations;
pub mod leads;
pub mod seo;
pub mod sites;
pub mod tasks;
