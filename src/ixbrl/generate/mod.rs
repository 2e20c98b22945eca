//! Encoding a report into an iXBRL document.
//!
//! The document is a plain sectioned XHTML page. Every value in the record
//! is written as a tagged fact through [`FactWriter`].
mod balance;
mod cover;
mod header;
mod income;
mod management;
mod notes;
mod signatures;

use super::context::{ContextRef, ContextRegistry, Unit, YearIndex};
use super::encoder::{FactWriter, NonFraction};
use super::error::Result;
use super::format::NumberFormat;
use crate::model::{AnnualReport, YearComparison};
use log::{debug, info};
use std::io::Write;

pub const TAXONOMY_VERSION: &str = "2024-09-12";
pub const DEFAULT_ENTRY_POINT: &str = "risbs";
pub const CERTIFICATION_SCHEMA: &str =
    "http://xbrl.taxonomier.se/se/fr/gaap/k2/rcoa/2020-12-01/se-k2-rcoa-2020-12-01.xsd";

const NAMESPACES: &[(&str, &str)] = &[
    ("iso4217", "http://www.xbrl.org/2003/iso4217"),
    ("ixt", "http://www.xbrl.org/inlineXBRL/transformation/2010-04-20"),
    ("xlink", "http://www.w3.org/1999/xlink"),
    ("link", "http://www.xbrl.org/2003/linkbase"),
    ("xbrli", "http://www.xbrl.org/2003/instance"),
    ("ix", super::IX_NAMESPACE),
    ("se-gen-base", "http://www.taxonomier.se/se/fr/gen-base/2021-10-31"),
    ("se-cd-base", "http://www.taxonomier.se/se/fr/cd-base/2021-10-31"),
    ("se-bol-base", "http://www.bolagsverket.se/se/fr/comp-base/2017-09-30"),
    ("se-k2-type", "http://www.taxonomier.se/se/fr/k2/datatype"),
];

pub fn schema_url(entry_point: &str) -> String {
    let variant = if entry_point.is_empty() {
        DEFAULT_ENTRY_POINT
    } else {
        entry_point
    };
    format!(
        "http://xbrl.taxonomier.se/se/fr/gaap/k2-all/ab/{v}/{t}/se-k2-ab-{v}-{t}.xsd",
        v = variant,
        t = TAXONOMY_VERSION
    )
}

/// Number of fiscal years the document needs contexts for.
///
/// One per multi-year overview column, and at least three when a
/// fixed-asset note opens the previous year (that balance sits at balans2).
pub fn history_years(report: &AnnualReport) -> usize {
    let overview = report.management_report.multi_year_overview.years.len();
    let needs_balans2 = report.notes.fixed_asset_notes.iter().any(|note| {
        note.opening_acquisition_values.previous.is_some()
            || note.opening_depreciation.previous.is_some()
    });
    let mut years = overview.max(2);
    if needs_balans2 {
        years = years.max(3);
    }
    years.min(4)
}

pub fn write_document<W: Write>(sink: W, report: &AnnualReport) -> Result<W> {
    let registry = ContextRegistry::new(
        &report.company.org_nr,
        &report.fiscal_year.start_date,
        &report.fiscal_year.end_date,
        history_years(report),
    );
    debug!(
        "Declaring {} contexts for {}",
        registry.contexts().len(),
        report.company.org_nr
    );

    let mut w = FactWriter::new(sink);
    w.line(r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    write_html_open(&mut w)?;
    w.indent();
    header::write_head(&mut w, report)?;
    w.line("<body>")?;
    w.indent();
    header::write_ix_header(&mut w, report, &registry)?;

    w.line(r#"<div id="wrapper">"#)?;
    w.indent();
    cover::write_cover(&mut w, report)?;
    debug!("Wrote cover and certification");
    management::write_management_report(&mut w, report)?;
    debug!("Wrote management report");
    income::write_income_statement(&mut w, report)?;
    balance::write_balance_sheet(&mut w, report)?;
    debug!("Wrote income statement and balance sheet");
    notes::write_notes(&mut w, report)?;
    signatures::write_signatures(&mut w, report)?;
    debug!("Wrote notes and signatures");
    w.outdent();
    w.line("</div>")?;

    w.outdent();
    w.line("</body>")?;
    w.outdent();
    w.line("</html>")?;
    w.flush()?;

    info!(
        "Generated iXBRL report for {} ({})",
        report.company.name, report.company.org_nr
    );
    Ok(w.into_inner())
}

fn write_html_open<W: Write>(w: &mut FactWriter<W>) -> Result<()> {
    w.line(r#"<html xmlns="http://www.w3.org/1999/xhtml""#)?;
    w.indent();
    w.indent();
    for (i, (prefix, uri)) in NAMESPACES.iter().enumerate() {
        let close = if i + 1 == NAMESPACES.len() { ">" } else { "" };
        w.line(&format!(r#"xmlns:{}="{}"{}"#, prefix, uri, close))?;
    }
    w.outdent();
    w.outdent();
    Ok(())
}

/// Display label of the fiscal year, e.g. "2016".
pub(crate) fn year_label(end_date: &str) -> &str {
    end_date.get(..4).unwrap_or(end_date)
}

/// How a two-column amount row is displayed.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct RowStyle {
    /// Show a minus outside the tag: the value is a cost stored positive.
    pub neg_prefix: bool,
    /// Tag with `sign="-"`: the value is stored as the negation of the display.
    pub invert_sign: bool,
    pub wrap: Option<&'static str>,
}

impl RowStyle {
    pub const PLAIN: RowStyle = RowStyle {
        neg_prefix: false,
        invert_sign: false,
        wrap: None,
    };
    pub const EXPENSE: RowStyle = RowStyle {
        neg_prefix: true,
        invert_sign: false,
        wrap: None,
    };
    pub const SUM: RowStyle = RowStyle {
        neg_prefix: false,
        invert_sign: false,
        wrap: Some("sum"),
    };

    pub fn with_wrap(mut self, class: &'static str) -> Self {
        self.wrap = Some(class);
        self
    }

    fn apply<'a>(&self, mut fact: NonFraction<'a>) -> NonFraction<'a> {
        if self.neg_prefix {
            fact = fact.neg_prefix();
        }
        if self.invert_sign {
            fact = fact.invert_sign();
        }
        if let Some(class) = self.wrap {
            fact = fact.wrap(class);
        }
        fact
    }
}

/// A table row with a label, an optional note reference and one cell per
/// year. Rows with nothing reported are skipped.
pub(crate) struct AmountRow<'a> {
    pub label: &'a str,
    pub notes: &'a [u32],
    pub concept: &'a str,
    pub value: &'a YearComparison,
    pub contexts: (ContextRef, ContextRef),
    pub unit: Unit,
    pub format: NumberFormat,
    pub style: RowStyle,
    /// Statements carry a "Not" column, note tables do not.
    pub note_column: bool,
}

impl<'a> AmountRow<'a> {
    pub fn new(label: &'a str, concept: &'a str, value: &'a YearComparison) -> Self {
        Self {
            label,
            notes: &[],
            concept,
            value,
            contexts: (ContextRef::PERIOD0, ContextRef::PERIOD1),
            unit: Unit::Sek,
            format: NumberFormat::SpaceComma,
            style: RowStyle::PLAIN,
            note_column: true,
        }
    }

    pub fn in_note(mut self) -> Self {
        self.note_column = false;
        self
    }

    pub fn balance(mut self) -> Self {
        self.contexts = (ContextRef::BALANS0, ContextRef::BALANS1);
        self
    }

    pub fn contexts(mut self, current: ContextRef, previous: ContextRef) -> Self {
        self.contexts = (current, previous);
        self
    }

    pub fn notes(mut self, notes: &'a [u32]) -> Self {
        self.notes = notes;
        self
    }

    pub fn unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    pub fn format(mut self, format: NumberFormat) -> Self {
        self.format = format;
        self
    }

    pub fn style(mut self, style: RowStyle) -> Self {
        self.style = style;
        self
    }

    pub fn write<W: Write>(&self, w: &mut FactWriter<W>) -> Result<()> {
        if self.value.is_empty() {
            return Ok(());
        }
        w.line("<tr>")?;
        w.indent();
        w.line(&format!("<td>{}</td>", self.label))?;
        if self.note_column {
            w.begin_line()?;
            w.raw("<td>")?;
            for (i, note) in self.notes.iter().filter(|n| **n > 0).enumerate() {
                if i > 0 {
                    w.raw(", ")?;
                }
                w.raw(&format!(r##"<a href="#note-{0}">{0}</a>"##, note))?;
            }
            w.raw("</td>")?;
            w.end_line()?;
        }
        let cells = [
            (self.value.current, self.contexts.0),
            (self.value.previous, self.contexts.1),
        ];
        for (amount, context) in cells {
            w.begin_line()?;
            w.raw("<td>")?;
            if let Some(amount) = amount {
                let fact = NonFraction::new(self.concept, context, self.unit, amount)
                    .format(self.format.clone());
                w.non_fraction(&self.style.apply(fact))?;
            }
            w.raw("</td>")?;
            w.end_line()?;
        }
        w.outdent();
        w.line("</tr>")
    }
}

/// `<tbody>` opening with a row-group heading spanning the table.
pub(crate) fn open_group<W: Write>(w: &mut FactWriter<W>, heading: &str) -> Result<()> {
    w.line("<tbody>")?;
    w.indent();
    w.line(&format!(
        r#"<tr><th colspan="4" scope="rowgroup">{}</th></tr>"#,
        heading
    ))
}

pub(crate) fn close_group<W: Write>(w: &mut FactWriter<W>) -> Result<()> {
    w.outdent();
    w.line("</tbody>")
}

/// Table header naming the two reported years.
pub(crate) fn open_table<W: Write>(
    w: &mut FactWriter<W>,
    caption: &str,
    columns: (&str, &str),
) -> Result<()> {
    w.line("<table>")?;
    w.indent();
    w.line("<thead>")?;
    w.indent();
    w.line(&format!(
        r#"<tr><th scope="col">{}</th><th scope="col">Not</th><th scope="col">{}</th><th scope="col">{}</th></tr>"#,
        caption,
        html_escape::encode_text(columns.0),
        html_escape::encode_text(columns.1)
    ))?;
    w.outdent();
    w.line("</thead>")
}

/// Note table header: an empty corner cell and one heading per year.
/// Headings are written as given.
pub(crate) fn open_note_table<W: Write>(
    w: &mut FactWriter<W>,
    columns: (&str, &str),
) -> Result<()> {
    w.line(r#"<table class="ar-note">"#)?;
    w.indent();
    w.line(r#"<colgroup><col /><col class="kr" span="2" /></colgroup>"#)?;
    w.line(&format!(
        r#"<thead><tr><th></th><th scope="col"><span>{}</span></th><th scope="col"><span>{}</span></th></tr></thead>"#,
        columns.0, columns.1
    ))
}

pub(crate) fn close_table<W: Write>(w: &mut FactWriter<W>) -> Result<()> {
    w.outdent();
    w.line("</table>")
}

/// The previous fiscal year's label, derived from the current one.
pub(crate) fn previous_year_label(end_date: &str) -> String {
    year_label(end_date)
        .parse::<i32>()
        .map(|year| (year - 1).to_string())
        .unwrap_or_default()
}

pub(crate) fn overview_contexts(column: usize) -> Option<(ContextRef, ContextRef)> {
    YearIndex::from_offset(column).map(|year| (ContextRef::Duration(year), ContextRef::Instant(year)))
}
