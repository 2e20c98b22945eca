//! The K2 iXBRL codec.
//!
//! [`generate`] writes a report as an Inline XBRL document and [`parse`]
//! reads one back. Both directions share the concept names in [`concepts`]
//! and the context naming in [`context`].
pub mod concepts;
pub mod context;
pub mod encoder;
pub mod error;
pub mod format;
pub mod generate;
pub mod parsing;

pub use error::{IxbrlError, Result};

use crate::model::AnnualReport;
use log::info;
use std::io::Write;

pub const IX_NAMESPACE: &str = "http://www.xbrl.org/2013/inlineXBRL";

/// Write `report` as a complete iXBRL document.
///
/// Output stops at the first failed write and that failure is returned.
pub fn generate<W: Write>(sink: &mut W, report: &AnnualReport) -> Result<()> {
    generate::write_document(sink, report)?;
    Ok(())
}

/// Generate into memory.
pub fn generate_to_bytes(report: &AnnualReport) -> Result<Vec<u8>> {
    generate::write_document(Vec::new(), report)
}

/// Rebuild a report from an iXBRL document.
///
/// Malformed markup is an error. Facts the record has no field for are
/// ignored and fields without a fact keep their defaults.
pub fn parse(content: &str) -> Result<AnnualReport> {
    let extraction = parsing::extract_facts(content)?;
    let index = parsing::FactIndex::new(&extraction);
    let report = parsing::map_report(&index)?;
    info!(
        "Parsed iXBRL report for {} ({}) from {} facts",
        report.company.name,
        report.company.org_nr,
        extraction.facts.len()
    );
    Ok(report)
}
