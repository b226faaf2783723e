pub mod backlink;

pub use backlink::*;
