use crate::ixbrl::concepts::gen_base;
use crate::ixbrl::context::ContextRef;
use crate::ixbrl::encoder::{tuple_ids, FactWriter, NonNumeric};
use crate::ixbrl::error::Result;
use crate::model::AnnualReport;
use html_escape::encode_text;
use std::io::Write;

/// Ort, datum and one tuple-grouped block per signatory.
pub(super) fn write_signatures<W: Write>(w: &mut FactWriter<W>, r: &AnnualReport) -> Result<()> {
    let sigs = &r.signatures;
    let period0 = ContextRef::PERIOD0;

    w.line(r#"<div class="ar-signature">"#)?;
    w.indent();

    w.begin_line()?;
    w.raw("<p>")?;
    w.non_numeric(&NonNumeric::new(gen_base::SIGNING_CITY, period0), &sigs.city)?;
    w.raw(" ")?;
    w.non_numeric(&NonNumeric::new(gen_base::SIGNING_DATE, period0), &sigs.date)?;
    w.raw("</p>")?;
    w.end_line()?;

    let ids = tuple_ids(gen_base::SIGNATORY_TUPLE, sigs.signatories.len());
    for id in &ids {
        w.tuple(gen_base::SIGNATORY_TUPLE, id)?;
    }

    for (signatory, tuple_ref) in sigs.signatories.iter().zip(&ids) {
        w.line(r#"<div class="name">"#)?;
        w.indent();
        w.line(&format!(
            "<i>{} {}</i><br />",
            encode_text(&signatory.first_name),
            encode_text(&signatory.last_name)
        ))?;
        w.begin_line()?;
        w.non_numeric(
            &NonNumeric::new(gen_base::SIGNATORY_FIRST_NAME, period0).member(tuple_ref, 1),
            &signatory.first_name,
        )?;
        w.raw(" ")?;
        w.non_numeric(
            &NonNumeric::new(gen_base::SIGNATORY_LAST_NAME, period0).member(tuple_ref, 2),
            &signatory.last_name,
        )?;
        if !signatory.role.is_empty() {
            w.raw("<br />")?;
            w.non_numeric(
                &NonNumeric::new(gen_base::SIGNATORY_ROLE, period0).member(tuple_ref, 3),
                &signatory.role,
            )?;
        }
        w.end_line()?;
        w.outdent();
        w.line("</div>")?;
    }

    w.outdent();
    w.line("</div>")
}
