pub mod rule;
pub mod webhook;

pub use rule::*;
pub use webhook::*;
