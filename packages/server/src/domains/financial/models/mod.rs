pub mod financial_record;

pub use financial_record::*;
