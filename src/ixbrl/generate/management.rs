use super::overview_contexts;
use crate::ixbrl::concepts::gen_base;
use crate::ixbrl::context::{ContextRef, Unit};
use crate::ixbrl::encoder::{FactWriter, NonFraction, NonNumeric};
use crate::ixbrl::error::Result;
use crate::ixbrl::format::NumberFormat;
use crate::model::{AnnualReport, EquityChanges, MultiYearOverview, ProfitDisposition};
use html_escape::encode_text;
use log::warn;
use std::io::Write;

pub const EVENTS_CONTINUATION: &str = "vasentliga_handelser_forts";

pub(super) fn write_management_report<W: Write>(
    w: &mut FactWriter<W>,
    r: &AnnualReport,
) -> Result<()> {
    let mr = &r.management_report;

    w.line(r#"<div class="ar-page" id="ar-page-2">"#)?;
    w.indent();
    w.line("<h2>Förvaltningsberättelse</h2>")?;
    w.line("<h3>Verksamheten</h3>")?;
    w.line("<h4>Allmänt om verksamheten</h4>")?;

    // Trusted markup from the record.
    w.begin_line()?;
    w.non_numeric_raw(
        &NonNumeric::new(gen_base::BUSINESS_DESCRIPTION, ContextRef::PERIOD0),
        &mr.business_description,
    )?;
    w.end_line()?;

    w.line("<h4>Väsentliga händelser under räkenskapsåret</h4>")?;
    write_significant_events(w, &mr.significant_events)?;

    write_multi_year_overview(w, &mr.multi_year_overview)?;
    write_equity_changes(w, &mr.equity_changes)?;
    write_profit_disposition(w, &mr.profit_disposition)?;

    if !mr.board_dividend_statement.is_empty() {
        w.line("<h3>Styrelsens yttrande över den föreslagna vinstutdelningen</h3>")?;
        w.begin_line()?;
        w.non_numeric_raw(
            &NonNumeric::new(gen_base::BOARD_DIVIDEND_STATEMENT, ContextRef::BALANS0),
            &mr.board_dividend_statement,
        )?;
        w.end_line()?;
    }

    w.outdent();
    w.line("</div>")
}

/// First paragraph inline, the rest continued in a second paragraph.
fn write_significant_events<W: Write>(w: &mut FactWriter<W>, text: &str) -> Result<()> {
    let fact = NonNumeric::new(gen_base::SIGNIFICANT_EVENTS, ContextRef::PERIOD0);
    w.begin_line()?;
    w.raw("<p>")?;
    match text.split_once("\n\n") {
        Some((head, tail)) if !tail.trim().is_empty() => {
            let pending = w.split_non_numeric(&fact, head, tail, EVENTS_CONTINUATION)?;
            w.raw("</p>")?;
            w.end_line()?;
            w.begin_line()?;
            w.raw("<p>")?;
            pending.emit(w)?;
        }
        _ => w.non_numeric(&fact, text)?,
    }
    w.raw("</p>")?;
    w.end_line()
}

fn write_multi_year_overview<W: Write>(
    w: &mut FactWriter<W>,
    overview: &MultiYearOverview,
) -> Result<()> {
    if overview.years.is_empty() {
        return Ok(());
    }
    if overview.years.len() > 4 {
        warn!(
            "Multi-year overview has {} columns; only the first four are tagged",
            overview.years.len()
        );
    }
    let columns: Vec<_> = overview
        .years
        .iter()
        .enumerate()
        .filter_map(|(i, year)| overview_contexts(i).map(|ctx| (year, ctx)))
        .collect();

    w.line("<h3>Flerårsöversikt</h3>")?;
    w.line("<table>")?;
    w.indent();
    w.begin_line()?;
    w.raw("<thead><tr><th></th>")?;
    for (year, _) in &columns {
        w.raw(&format!(r#"<th scope="col">{}</th>"#, encode_text(&year.year)))?;
    }
    w.raw("</tr></thead>")?;
    w.end_line()?;
    w.line("<tbody>")?;
    w.indent();

    // Amounts shown in thousands.
    let rows = [
        (
            "Nettoomsättning, <abbr>tkr</abbr>",
            gen_base::NET_SALES,
            columns.iter().map(|(y, _)| y.net_sales).collect::<Vec<_>>(),
        ),
        (
            "Resultat efter finansiella poster, <abbr>tkr</abbr>",
            gen_base::RESULT_AFTER_FINANCIAL_ITEMS,
            columns
                .iter()
                .map(|(y, _)| y.result_after_financial_items)
                .collect(),
        ),
    ];
    for (label, concept, values) in &rows {
        w.line("<tr>")?;
        w.indent();
        w.line(&format!("<td>{}</td>", label))?;
        for (value, (_, (period, _))) in values.iter().zip(&columns) {
            w.begin_line()?;
            w.raw("<td>")?;
            if let Some(amount) = value {
                w.non_fraction(&NonFraction::new(concept, *period, Unit::Sek, *amount).scale(3))?;
            }
            w.raw("</td>")?;
            w.end_line()?;
        }
        w.outdent();
        w.line("</tr>")?;
    }

    w.line("<tr>")?;
    w.indent();
    w.line("<td>Soliditet, %</td>")?;
    for (year, (_, balance)) in &columns {
        w.begin_line()?;
        w.raw("<td>")?;
        if let Some(solidity) = &year.solidity {
            w.non_fraction(
                &NonFraction::preformatted(gen_base::SOLIDITY, *balance, Unit::Percent, solidity)
                    .scale(-2)
                    .format(NumberFormat::Comma),
            )?;
        }
        w.raw("</td>")?;
        w.end_line()?;
    }
    w.outdent();
    w.line("</tr>")?;

    w.outdent();
    w.line("</tbody>")?;
    w.outdent();
    w.line("</table>")?;

    if !overview.comment.is_empty() {
        w.begin_line()?;
        w.raw("<p>")?;
        w.non_numeric(
            &NonNumeric::new(gen_base::OVERVIEW_COMMENT, ContextRef::PERIOD0),
            &overview.comment,
        )?;
        w.raw("</p>")?;
        w.end_line()?;
    }
    Ok(())
}

/// A cell in the equity table. `None` concept means the column has no
/// movement in this row.
struct EquityCell<'a> {
    concept: &'a str,
    context: ContextRef,
    value: Option<i64>,
    negative: bool,
}

fn write_equity_row<W: Write>(
    w: &mut FactWriter<W>,
    label: &str,
    cells: &[Option<EquityCell<'_>>],
) -> Result<()> {
    w.line("<tr>")?;
    w.indent();
    w.line(&format!("<td>{}</td>", label))?;
    for cell in cells {
        w.begin_line()?;
        w.raw("<td>")?;
        match cell {
            Some(EquityCell {
                concept,
                context,
                value: Some(amount),
                negative,
            }) => {
                let mut fact = NonFraction::new(concept, *context, Unit::Sek, *amount);
                if *negative {
                    fact = fact.neg_prefix();
                }
                w.non_fraction(&fact)?;
            }
            Some(_) => {}
            None => w.raw("–")?,
        }
        w.raw("</td>")?;
        w.end_line()?;
    }
    w.outdent();
    w.line("</tr>")
}

fn cell(concept: &str, context: ContextRef, value: Option<i64>) -> Option<EquityCell<'_>> {
    Some(EquityCell {
        concept,
        context,
        value,
        negative: false,
    })
}

fn write_equity_changes<W: Write>(w: &mut FactWriter<W>, ec: &EquityChanges) -> Result<()> {
    use gen_base::*;

    w.line("<h3>Förändringar i eget kapital</h3>")?;
    w.line("<table>")?;
    w.indent();
    w.line(r#"<thead><tr><th></th><th scope="col">Aktiekapital</th><th scope="col">Reservfond</th><th scope="col">Balanserat resultat</th><th scope="col">Årets resultat</th><th scope="col">Totalt</th></tr></thead>"#)?;
    w.line("<tbody>")?;
    w.indent();

    let opening = ContextRef::BALANS1;
    write_equity_row(
        w,
        "Belopp vid årets ingång",
        &[
            cell(SHARE_CAPITAL, opening, ec.opening_share_capital),
            cell(RESERVE_FUND, opening, ec.opening_reserve_fund),
            cell(RETAINED_EARNINGS, opening, ec.opening_retained_earnings),
            cell(NET_INCOME_EQUITY, opening, ec.opening_net_income),
            cell(EQUITY_CHANGE_TOTAL, opening, ec.opening_total),
        ],
    )?;

    if ec.dividend_net_income.is_some() || ec.dividend_total.is_some() {
        let dividend = |concept, value| {
            Some(EquityCell {
                concept,
                context: ContextRef::PERIOD0,
                value,
                negative: true,
            })
        };
        write_equity_row(
            w,
            "Utdelning",
            &[
                None,
                None,
                None,
                dividend(EQUITY_CHANGE_NET_INCOME_DIVIDEND, ec.dividend_net_income),
                dividend(EQUITY_CHANGE_TOTAL_DIVIDEND, ec.dividend_total),
            ],
        )?;
    }

    write_equity_row(
        w,
        "Årets resultat",
        &[
            None,
            None,
            None,
            cell(
                EQUITY_CHANGE_NET_INCOME_YEAR_RESULT,
                ContextRef::PERIOD0,
                ec.year_result_net_income,
            ),
            cell(
                EQUITY_CHANGE_TOTAL_YEAR_RESULT,
                ContextRef::PERIOD0,
                ec.year_result_total,
            ),
        ],
    )?;

    let closing = ContextRef::BALANS0;
    write_equity_row(
        w,
        "Belopp vid årets utgång",
        &[
            cell(SHARE_CAPITAL, closing, ec.closing_share_capital),
            cell(RESERVE_FUND, closing, ec.closing_reserve_fund),
            cell(RETAINED_EARNINGS, closing, ec.closing_retained_earnings),
            cell(NET_INCOME_EQUITY, closing, ec.closing_net_income),
            cell(EQUITY_CHANGE_TOTAL, closing, ec.closing_total),
        ],
    )?;

    w.outdent();
    w.line("</tbody>")?;
    w.outdent();
    w.line("</table>")
}

fn write_disposition_row<W: Write>(
    w: &mut FactWriter<W>,
    label: &str,
    concept: &str,
    value: Option<i64>,
) -> Result<()> {
    w.begin_line()?;
    w.raw(&format!("<tr><td>{}</td><td>", label))?;
    if let Some(amount) = value {
        w.non_fraction(&NonFraction::new(concept, ContextRef::BALANS0, Unit::Sek, amount))?;
    }
    w.raw("</td></tr>")?;
    w.end_line()
}

fn write_profit_disposition<W: Write>(w: &mut FactWriter<W>, pd: &ProfitDisposition) -> Result<()> {
    w.line("<h3>Resultatdisposition</h3>")?;
    w.line("<p>Till årsstämmans förfogande står följande vinstmedel:</p>")?;
    w.line("<table>")?;
    w.indent();
    w.line("<tbody>")?;
    w.indent();
    write_disposition_row(w, "Balanserat resultat", gen_base::RETAINED_EARNINGS, pd.retained_earnings)?;
    write_disposition_row(w, "Årets resultat", gen_base::NET_INCOME_EQUITY, pd.net_income)?;
    write_disposition_row(w, "Totalt", gen_base::FUNDS_AVAILABLE, pd.total_available)?;
    w.outdent();
    w.line("</tbody>")?;
    w.outdent();
    w.line("</table>")?;

    w.line("<p>Styrelsen och verkställande direktören föreslår att vinstmedlen disponeras enligt följande</p>")?;
    w.line("<table>")?;
    w.indent();
    w.line("<tbody>")?;
    w.indent();
    if pd.dividend.is_some() {
        write_disposition_row(w, "Utdelning till ägarna", gen_base::PROPOSED_DIVIDEND, pd.dividend)?;
    }
    write_disposition_row(
        w,
        "Balanseras i ny räkning",
        gen_base::PROPOSED_CARRIED_FORWARD,
        pd.carried_forward,
    )?;
    write_disposition_row(w, "Totalt", gen_base::PROPOSED_DISPOSITION, pd.total_disposition)?;
    w.outdent();
    w.line("</tbody>")?;
    w.outdent();
    w.line("</table>")
}
