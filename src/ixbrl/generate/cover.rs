use super::year_label;
use crate::ixbrl::concepts::{bol_base, cd_base, gen_base};
use crate::ixbrl::context::ContextRef;
use crate::ixbrl::encoder::{FactWriter, NonNumeric};
use crate::ixbrl::error::Result;
use crate::model::AnnualReport;
use std::io::Write;

pub const CERTIFICATION_CONTINUATION: &str = "intygande_forts";
pub const SIGNING_DATE_ID: &str = "ID_DATUM_UNDERTECKNANDE_FASTSTALLELSEINTYG";

pub(super) fn write_cover<W: Write>(w: &mut FactWriter<W>, r: &AnnualReport) -> Result<()> {
    w.line(r#"<div class="ar-page" id="ar-page-1">"#)?;
    w.indent();

    w.line("<p>")?;
    w.indent();
    w.begin_line()?;
    w.non_numeric(
        &NonNumeric::new(cd_base::COMPANY_NAME, ContextRef::PERIOD0),
        &r.company.name,
    )?;
    w.raw("<br />Org nr ")?;
    w.non_numeric(
        &NonNumeric::new(cd_base::ORG_NR, ContextRef::PERIOD0),
        &r.company.org_nr,
    )?;
    w.end_line()?;
    w.outdent();
    w.line("</p>")?;

    w.element(
        "h2",
        &format!(
            "Årsredovisning för räkenskapsåret {}",
            year_label(&r.fiscal_year.end_date)
        ),
    )?;

    w.begin_line()?;
    w.raw("<p>")?;
    w.non_numeric(
        &NonNumeric::new(gen_base::INTRO_SENTENCE, ContextRef::PERIOD0),
        &r.management_report.intro_text,
    )?;
    w.raw(".</p>")?;
    w.end_line()?;
    w.line("<p>Om inte annat särskilt anges, redovisas alla belopp i hela kronor. Uppgifter inom parentes avser föregående år.</p>")?;

    write_certification(w, r)?;

    w.outdent();
    w.line("</div>")
}

/// Fastställelseintyg. The outer certification fact wraps three others and
/// continues in a second paragraph holding the original-content statement.
fn write_certification<W: Write>(w: &mut FactWriter<W>, r: &AnnualReport) -> Result<()> {
    let cert = &r.certification;
    let balans0 = ContextRef::BALANS0;

    w.line(r#"<div id="ar-certification">"#)?;
    w.indent();
    w.line("<strong>Fastställelseintyg</strong><br />")?;

    w.begin_line()?;
    w.raw("<p>")?;
    w.open_non_numeric(
        &NonNumeric::new(bol_base::CERTIFICATION, balans0).continued_at(CERTIFICATION_CONTINUATION),
    )?;
    w.non_numeric(
        &NonNumeric::new(bol_base::CONFIRMATION, balans0),
        &cert.confirmation_text,
    )?;
    w.raw(" ")?;
    w.non_numeric(
        &NonNumeric::new(bol_base::MEETING_DATE, balans0),
        &cert.meeting_date,
    )?;
    w.raw(". <br />")?;
    w.non_numeric(
        &NonNumeric::new(bol_base::DISPOSITION_DECISION, balans0),
        &cert.disposition_decision,
    )?;
    w.close_non_numeric()?;
    w.raw("</p>")?;
    w.end_line()?;

    w.begin_line()?;
    w.raw("<p>")?;
    w.open_continuation(CERTIFICATION_CONTINUATION)?;
    w.non_numeric(
        &NonNumeric::new(bol_base::ORIGINAL_CONTENT, balans0),
        &cert.original_content_certification,
    )?;
    w.close_continuation()?;
    w.raw("</p>")?;
    w.end_line()?;

    w.line("<p>")?;
    w.indent();
    w.begin_line()?;
    w.raw("<strong>")?;
    w.non_numeric(
        &NonNumeric::new(bol_base::ELECTRONIC_SIGNATURE, balans0),
        &cert.electronic_signature_label,
    )?;
    w.raw(":</strong><br />")?;
    w.end_line()?;

    let signatory = &cert.signatory;
    w.begin_line()?;
    w.non_numeric(
        &NonNumeric::new(bol_base::SIGNATORY_FIRST_NAME, ContextRef::PERIOD0),
        &signatory.first_name,
    )?;
    w.raw(" ")?;
    w.non_numeric(
        &NonNumeric::new(bol_base::SIGNATORY_LAST_NAME, ContextRef::PERIOD0),
        &signatory.last_name,
    )?;
    w.raw(", ")?;
    w.non_numeric(
        &NonNumeric::new(bol_base::SIGNATORY_ROLE, ContextRef::PERIOD0),
        &signatory.role,
    )?;
    w.raw("<br />")?;
    w.end_line()?;

    w.begin_line()?;
    w.non_numeric(
        &NonNumeric::new(bol_base::SIGNING_DATE, balans0).id(SIGNING_DATE_ID),
        &cert.signing_date,
    )?;
    w.end_line()?;
    w.outdent();
    w.line("</p>")?;

    w.outdent();
    w.line("</div>")
}
