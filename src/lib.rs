pub mod core;
pub mod ixbrl;
pub mod model;
pub mod utils;

// Re-exports
pub use ixbrl::{generate, parse, IxbrlError};
pub use model::AnnualReport;
