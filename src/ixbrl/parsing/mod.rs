//! Decoding an iXBRL document back into a report.
//!
//! Three passes: [`extract_facts`] scans the markup into a flat list,
//! [`FactIndex`] keys it by concept and context, [`map_report`] fills the
//! record.
mod facts;
mod index;
mod mapping;
pub mod types;

pub use facts::extract_facts;
pub use index::{member_amount, member_text, FactIndex};
pub use mapping::{map_report, FIXED_ASSET_CATEGORIES};
