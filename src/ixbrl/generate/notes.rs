use super::{close_table, open_note_table, AmountRow, RowStyle};
use crate::ixbrl::concepts::gen_base::{self, roll_forward};
use crate::ixbrl::context::{years_before, ContextRef, Unit};
use crate::ixbrl::encoder::{tuple_ids, FactWriter, NonFraction, NonNumeric};
use crate::ixbrl::error::Result;
use crate::ixbrl::format::NumberFormat;
use crate::model::{
    AccountingPolicies, AnnualReport, ContingentLiabilitiesNote, EmployeesNote, FixedAssetNote,
    LongTermLiabilitiesNote, MultiPostEntry, MultiPostNote, PledgesNote,
};
use html_escape::encode_text;
use std::io::Write;

const TOTAL: RowStyle = RowStyle {
    neg_prefix: false,
    invert_sign: false,
    wrap: Some("total"),
};

/// Column headings shared by the note tables of one document.
struct Headings {
    /// Closing dates, for instant tables.
    balance: (String, String),
    /// `start<br />–end` for the two fiscal years.
    period: (String, String),
}

impl Headings {
    fn new(r: &AnnualReport) -> Self {
        let fy = &r.fiscal_year;
        let prev_start = years_before(&fy.start_date, 1).unwrap_or_default();
        let prev_end = years_before(&fy.end_date, 1).unwrap_or_default();
        let span = |start: &str, end: &str| format!("{}<br />–{}", encode_text(start), encode_text(end));
        Self {
            balance: (
                encode_text(&fy.end_date).into_owned(),
                encode_text(&prev_end).into_owned(),
            ),
            period: (span(&fy.start_date, &fy.end_date), span(&prev_start, &prev_end)),
        }
    }

    fn balance(&self) -> (&str, &str) {
        (&self.balance.0, &self.balance.1)
    }

    fn period(&self) -> (&str, &str) {
        (&self.period.0, &self.period.1)
    }
}

pub(super) fn write_notes<W: Write>(w: &mut FactWriter<W>, r: &AnnualReport) -> Result<()> {
    let notes = &r.notes;
    let headings = Headings::new(r);

    w.line(r#"<div class="ar-page" id="ar-page-5">"#)?;
    w.indent();
    w.line("<h2>Noter</h2>")?;

    write_accounting_policies(w, &notes.accounting_policies)?;
    if let Some(employees) = &notes.employees {
        write_employees(w, &headings, employees)?;
    }
    for (i, note) in notes.fixed_asset_notes.iter().enumerate() {
        write_fixed_asset_note(w, &headings, note, i == 0)?;
    }
    if let Some(note) = &notes.long_term_liabilities_note {
        write_long_term_liabilities(w, &headings, note)?;
    }
    if let Some(note) = &notes.pledges {
        write_pledges(w, &headings, note)?;
    }
    if let Some(note) = &notes.contingent_liabilities {
        write_contingent_liabilities(w, &headings, note)?;
    }
    if let Some(note) = &notes.multi_post_note {
        write_multi_post_note(w, note)?;
    }

    w.outdent();
    w.line("</div>")
}

fn write_heading<W: Write>(
    w: &mut FactWriter<W>,
    number: u32,
    section: Option<&str>,
    title: &str,
) -> Result<()> {
    match section {
        Some(section) => w.line(&format!(
            r#"<h3 id="note-{0}">{1}<br /><span class="note">Not {0}</span> {2}</h3>"#,
            number, section, title
        )),
        None => w.line(&format!(
            r#"<h3 id="note-{0}"><span class="note">Not {0}</span> {1}</h3>"#,
            number, title
        )),
    }
}

/// A paragraph holding one text fact, skipped when the text is empty.
fn write_text_paragraph<W: Write>(
    w: &mut FactWriter<W>,
    concept: &str,
    context: ContextRef,
    text: &str,
) -> Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    w.begin_line()?;
    w.raw("<p>")?;
    w.non_numeric(&NonNumeric::new(concept, context), text)?;
    w.raw("</p>")?;
    w.end_line()
}

fn write_accounting_policies<W: Write>(
    w: &mut FactWriter<W>,
    ap: &AccountingPolicies,
) -> Result<()> {
    if ap.description.is_empty() && ap.depreciations.is_empty() {
        return Ok(());
    }
    write_heading(w, ap.note_number, None, "Redovisnings- och värderingsprinciper")?;
    write_text_paragraph(w, gen_base::ACCOUNTING_POLICIES, ContextRef::PERIOD0, &ap.description)?;

    if !ap.depreciations.is_empty() {
        w.line(r#"<h4 class="join">Avskrivningar</h4>"#)?;
        w.line(r#"<p class="join">Tillämpade avskrivningstider:</p>"#)?;
        w.line(r#"<table class="ar-depreciation">"#)?;
        w.indent();
        w.line("<tbody>")?;
        w.indent();
        for dep in &ap.depreciations {
            w.begin_line()?;
            w.raw(&format!("<tr><td>{}</td><td>", encode_text(&dep.category)))?;
            w.non_numeric(
                &NonNumeric::new(&dep.concept, ContextRef::PERIOD0),
                &dep.years.to_string(),
            )?;
            w.raw(" år</td></tr>")?;
            w.end_line()?;
        }
        w.outdent();
        w.line("</tbody>")?;
        close_table(w)?;
    }

    write_text_paragraph(
        w,
        gen_base::DEPRECIATION_COMMENT,
        ContextRef::PERIOD0,
        &ap.depreciation_comment,
    )?;
    if !ap.manufactured_goods_policy.is_empty() {
        w.line(r#"<h4 class="join">Anskaffningsvärde för egentillverkade varor</h4>"#)?;
        write_text_paragraph(
            w,
            gen_base::MANUFACTURED_GOODS_POLICY,
            ContextRef::PERIOD0,
            &ap.manufactured_goods_policy,
        )?;
    }

    w.line(r#"<h4 class="join">Nyckeltalsdefinitioner</h4>"#)?;
    w.line("<dl><dt>Soliditet</dt><dd>Eget kapital och obeskattade reserver (med avdrag för uppskjuten skatt) i förhållande till balansomslutningen.</dd></dl>")
}

fn write_employees<W: Write>(
    w: &mut FactWriter<W>,
    headings: &Headings,
    note: &EmployeesNote,
) -> Result<()> {
    write_heading(
        w,
        note.note_number,
        Some("Upplysningar till resultaträkningen"),
        "Medelantalet anställda",
    )?;
    open_note_table(w, headings.period())?;
    w.line("<tbody>")?;
    w.indent();
    AmountRow::new(
        "Medelantalet anställda",
        gen_base::AVERAGE_EMPLOYEES,
        &note.average_employees,
    )
    .unit(Unit::Employees)
    .format(NumberFormat::Plain)
    .in_note()
    .write(w)?;
    w.outdent();
    w.line("</tbody>")?;
    close_table(w)
}

/// Roll-forward of one asset category: acquisition values, then
/// depreciation when the category is depreciated, then carrying value.
fn write_fixed_asset_note<W: Write>(
    w: &mut FactWriter<W>,
    headings: &Headings,
    note: &FixedAssetNote,
    first: bool,
) -> Result<()> {
    let stem = note.concept_prefix.as_str();
    let acquisition = gen_base::qualified(stem, roll_forward::ACQUISITION_VALUES);
    let purchases = gen_base::qualified(stem, roll_forward::PURCHASES);
    let sales = gen_base::qualified(stem, roll_forward::SALES);
    let depreciation = gen_base::qualified(stem, roll_forward::DEPRECIATION);
    let year_depreciation = gen_base::qualified(stem, roll_forward::YEAR_DEPRECIATION);
    let carrying = gen_base::qualified(stem, "");

    let section = first.then_some("Upplysningar till balansräkningen");
    write_heading(w, note.note_number, section, &encode_text(&note.title))?;
    open_note_table(w, headings.balance())?;

    let opening = (ContextRef::BALANS1, ContextRef::BALANS2);
    let closing = (ContextRef::BALANS0, ContextRef::BALANS1);
    let period = (ContextRef::PERIOD0, ContextRef::PERIOD1);

    w.line("<tbody>")?;
    w.indent();
    let rows = [
        ("Ingående anskaffningsvärden", &acquisition, &note.opening_acquisition_values, opening, RowStyle::PLAIN),
        ("- Inköp", &purchases, &note.purchases, period, RowStyle::SUM),
        ("- Försäljningar", &sales, &note.sales, period, RowStyle::EXPENSE.with_wrap("sum")),
        ("Utgående anskaffningsvärden", &acquisition, &note.closing_acquisition_values, closing, RowStyle::PLAIN),
    ];
    for (label, concept, value, (current, previous), style) in rows {
        AmountRow::new(label, concept, value)
            .contexts(current, previous)
            .style(style)
            .in_note()
            .write(w)?;
    }
    w.outdent();
    w.line("</tbody>")?;

    w.line("<tbody>")?;
    w.indent();
    if note.has_depreciation() {
        let rows = [
            ("Ingående avskrivningar", &depreciation, &note.opening_depreciation, opening, RowStyle::EXPENSE),
            (
                "- Årets avskrivningar",
                &year_depreciation,
                &note.year_depreciation,
                period,
                RowStyle::EXPENSE.with_wrap("sum"),
            ),
            (
                "Utgående avskrivningar",
                &depreciation,
                &note.closing_depreciation,
                closing,
                RowStyle::EXPENSE.with_wrap("sum"),
            ),
        ];
        for (label, concept, value, (current, previous), style) in rows {
            AmountRow::new(label, concept, value)
                .contexts(current, previous)
                .style(style)
                .in_note()
                .write(w)?;
        }
    }
    AmountRow::new("Redovisat värde", &carrying, &note.carrying_value)
        .balance()
        .style(TOTAL)
        .in_note()
        .write(w)?;
    w.outdent();
    w.line("</tbody>")?;
    close_table(w)
}

fn write_long_term_liabilities<W: Write>(
    w: &mut FactWriter<W>,
    headings: &Headings,
    note: &LongTermLiabilitiesNote,
) -> Result<()> {
    write_heading(w, note.note_number, None, "Långfristiga skulder")?;
    open_note_table(w, headings.balance())?;
    w.line("<tbody>")?;
    w.indent();
    w.line("<tr><td>Långfristiga skulder som förfaller till betalning senare än fem år efter balansdagen:</td><td></td><td></td></tr>")?;
    AmountRow::new("Summa", gen_base::DUE_AFTER_FIVE_YEARS, &note.due_after_five_years)
        .balance()
        .style(TOTAL)
        .in_note()
        .write(w)?;
    w.outdent();
    w.line("</tbody>")?;
    close_table(w)
}

fn write_pledges<W: Write>(
    w: &mut FactWriter<W>,
    headings: &Headings,
    note: &PledgesNote,
) -> Result<()> {
    write_heading(w, note.note_number, None, "Ställda säkerheter")?;
    open_note_table(w, headings.balance())?;
    w.line("<tbody>")?;
    w.indent();
    AmountRow::new("Företagsinteckning", gen_base::CORPORATE_MORTGAGES, &note.corporate_mortgages)
        .balance()
        .in_note()
        .write(w)?;
    AmountRow::new(
        "Fastighetsinteckning",
        gen_base::REAL_ESTATE_MORTGAGES,
        &note.real_estate_mortgages,
    )
    .balance()
    .in_note()
    .write(w)?;
    AmountRow::new("Summa ställda säkerheter", gen_base::PLEDGES, &note.total_pledges)
        .balance()
        .style(TOTAL)
        .in_note()
        .write(w)?;
    w.outdent();
    w.line("</tbody>")?;
    close_table(w)
}

fn write_contingent_liabilities<W: Write>(
    w: &mut FactWriter<W>,
    headings: &Headings,
    note: &ContingentLiabilitiesNote,
) -> Result<()> {
    write_heading(w, note.note_number, None, "Eventualförpliktelser")?;
    open_note_table(w, headings.balance())?;
    w.line("<tbody>")?;
    w.indent();
    AmountRow::new("Summa", gen_base::CONTINGENT_LIABILITIES, &note.total_contingent)
        .balance()
        .style(TOTAL)
        .in_note()
        .write(w)?;
    w.outdent();
    w.line("</tbody>")?;
    close_table(w)
}

/// Consecutive entries sharing a heading, with their positions in the note.
fn group_by_heading(entries: &[MultiPostEntry]) -> Vec<(&str, Vec<usize>)> {
    let mut groups: Vec<(&str, Vec<usize>)> = Vec::new();
    for (i, entry) in entries.iter().enumerate() {
        if let Some((heading, members)) = groups.last_mut() {
            if *heading == entry.heading {
                members.push(i);
                continue;
            }
        }
        groups.push((&entry.heading, vec![i]));
    }
    groups
}

fn write_multi_post_note<W: Write>(w: &mut FactWriter<W>, note: &MultiPostNote) -> Result<()> {
    write_heading(
        w,
        note.note_number,
        None,
        "Tillgångar, avsättningar och skulder som avser flera poster",
    )?;
    write_text_paragraph(w, gen_base::MULTI_POST_NOTE, ContextRef::BALANS0, &note.description)?;

    let ids = tuple_ids(gen_base::MULTI_POST_TUPLE, note.entries.len());
    for id in &ids {
        w.tuple(gen_base::MULTI_POST_TUPLE, id)?;
    }

    let groups = group_by_heading(&note.entries);
    let last_entry = note.entries.len().checked_sub(1);
    for (heading, members) in &groups {
        w.line(&format!(r#"<h4 class="join">{}</h4>"#, encode_text(heading)))?;
        w.line(r#"<table class="ar-note-multi">"#)?;
        w.indent();
        w.line("<tbody>")?;
        w.indent();
        for &i in members {
            let entry = &note.entries[i];
            let tuple_ref = ids[i].as_str();
            w.line("<tr>")?;
            w.indent();
            w.begin_line()?;
            w.raw("<td>")?;
            w.non_numeric(
                &NonNumeric::new(gen_base::MULTI_POST_NAME, ContextRef::BALANS0).member(tuple_ref, 1),
                &entry.post_name,
            )?;
            w.raw("</td>")?;
            w.end_line()?;
            w.begin_line()?;
            w.raw("<td>")?;
            if let Some(amount) = entry.amount {
                let mut fact = NonFraction::new(
                    gen_base::MULTI_POST_AMOUNT,
                    ContextRef::BALANS0,
                    Unit::Sek,
                    amount,
                )
                .member(tuple_ref, 2);
                if Some(i) == last_entry {
                    fact = fact.wrap("sum");
                }
                w.non_fraction(&fact)?;
            }
            w.raw("</td>")?;
            w.end_line()?;
            w.outdent();
            w.line("</tr>")?;
        }
        w.outdent();
        w.line("</tbody>")?;
        close_table(w)?;
    }
    Ok(())
}
