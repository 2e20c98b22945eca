use super::{schema_url, CERTIFICATION_SCHEMA};
use crate::ixbrl::concepts::cd_base;
use crate::ixbrl::context::{Context, ContextRef, ContextRegistry, Period, ENTITY_SCHEME};
use crate::ixbrl::encoder::{FactWriter, NonNumeric};
use crate::ixbrl::error::Result;
use crate::model::AnnualReport;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::io::Write;

pub(super) fn write_head<W: Write>(w: &mut FactWriter<W>, r: &AnnualReport) -> Result<()> {
    w.line("<head>")?;
    w.indent();
    w.element(
        "title",
        &format!("{} {} - Årsredovisning", r.company.org_nr, r.company.name),
    )?;
    for (name, content) in [
        ("programvara", &r.meta.software),
        ("programversion", &r.meta.software_version),
    ] {
        w.line(&format!(
            r#"<meta name="{}" content="{}" />"#,
            name,
            encode_double_quoted_attribute(content)
        ))?;
    }
    w.outdent();
    w.line("</head>")
}

/// The hidden `ix:header`: metadata facts, schema references, contexts and
/// units.
pub(super) fn write_ix_header<W: Write>(
    w: &mut FactWriter<W>,
    r: &AnnualReport,
    registry: &ContextRegistry,
) -> Result<()> {
    w.line(r#"<div style="display:none">"#)?;
    w.indent();
    w.line("<ix:header>")?;
    w.indent();

    w.line("<ix:hidden>")?;
    w.indent();
    let hidden = [
        (cd_base::LANGUAGE, &r.meta.language),
        (cd_base::COUNTRY, &r.meta.country),
        (cd_base::CURRENCY, &r.meta.currency),
        (cd_base::AMOUNT_FORMAT, &r.meta.amount_format),
        (cd_base::FISCAL_YEAR_FIRST_DAY, &r.fiscal_year.start_date),
        (cd_base::FISCAL_YEAR_LAST_DAY, &r.fiscal_year.end_date),
    ];
    for (concept, value) in hidden {
        w.begin_line()?;
        w.non_numeric(&NonNumeric::new(concept, ContextRef::PERIOD0), value)?;
        w.end_line()?;
    }
    w.outdent();
    w.line("</ix:hidden>")?;

    w.line("<ix:references>")?;
    w.indent();
    for href in [schema_url(&r.meta.entry_point), CERTIFICATION_SCHEMA.to_string()] {
        w.line(&format!(
            r#"<link:schemaRef xlink:type="simple" xlink:href="{}" />"#,
            encode_double_quoted_attribute(&href)
        ))?;
    }
    w.outdent();
    w.line("</ix:references>")?;

    w.line("<ix:resources>")?;
    w.indent();
    for context in registry.contexts() {
        write_context(w, registry.org_nr(), context)?;
    }
    for unit in registry.units() {
        w.line(&format!(r#"<xbrli:unit id="{}">"#, unit.id()))?;
        w.indent();
        w.element("xbrli:measure", unit.measure())?;
        w.outdent();
        w.line("</xbrli:unit>")?;
    }
    w.outdent();
    w.line("</ix:resources>")?;

    w.outdent();
    w.line("</ix:header>")?;
    w.outdent();
    w.line("</div>")
}

fn write_context<W: Write>(w: &mut FactWriter<W>, org_nr: &str, context: &Context) -> Result<()> {
    w.line(&format!(r#"<xbrli:context id="{}">"#, context.reference))?;
    w.indent();
    w.line("<xbrli:entity>")?;
    w.indent();
    w.line(&format!(
        r#"<xbrli:identifier scheme="{}">{}</xbrli:identifier>"#,
        ENTITY_SCHEME,
        encode_text(org_nr)
    ))?;
    w.outdent();
    w.line("</xbrli:entity>")?;
    w.line("<xbrli:period>")?;
    w.indent();
    match &context.period {
        Period::Duration { start, end } => {
            w.element("xbrli:startDate", start)?;
            w.element("xbrli:endDate", end)?;
        }
        Period::Instant(date) => w.element("xbrli:instant", date)?,
    }
    w.outdent();
    w.line("</xbrli:period>")?;
    w.outdent();
    w.line("</xbrli:context>")
}
