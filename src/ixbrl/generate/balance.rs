use super::{close_group, close_table, open_group, open_table, AmountRow, RowStyle};
use crate::ixbrl::concepts::gen_base::*;
use crate::ixbrl::context::years_before;
use crate::ixbrl::encoder::FactWriter;
use crate::ixbrl::error::Result;
use crate::model::{AnnualReport, YearComparison};
use std::io::Write;

const NO_NOTES: &[u32] = &[];

/// One balance sheet line: label, concept, value, note references, style.
type Line<'a> = (&'a str, &'a str, &'a YearComparison, &'a [u32], RowStyle);

fn write_lines<W: Write>(w: &mut FactWriter<W>, heading: &str, lines: &[Line<'_>]) -> Result<()> {
    open_group(w, heading)?;
    for (label, concept, value, notes, style) in lines {
        AmountRow::new(label, concept, value)
            .balance()
            .notes(notes)
            .style(*style)
            .write(w)?;
    }
    close_group(w)
}

pub(super) fn write_balance_sheet<W: Write>(w: &mut FactWriter<W>, r: &AnnualReport) -> Result<()> {
    let current = &r.fiscal_year.end_date;
    let previous = years_before(current, 1).unwrap_or_default();

    w.line(r#"<div class="ar-page" id="ar-page-4">"#)?;
    w.indent();
    open_table(w, "Balansräkning", (current.as_str(), previous.as_str()))?;
    write_assets(w, r)?;
    write_equity_and_liabilities(w, r)?;
    close_table(w)?;
    w.outdent();
    w.line("</div>")
}

fn write_assets<W: Write>(w: &mut FactWriter<W>, r: &AnnualReport) -> Result<()> {
    let assets = &r.balance_sheet.assets;
    let tangible = &assets.fixed_assets.tangible;
    let financial = &assets.fixed_assets.financial;
    let plain = RowStyle::PLAIN;
    let sum = RowStyle::SUM;
    let total = RowStyle::PLAIN.with_wrap("total");

    let buildings_note = [tangible.buildings_and_land_note];
    let machinery_note = [tangible.machinery_and_equipment_note];
    let fixtures_note = [tangible.fixtures_and_fittings_note];
    let securities_note = [financial.other_long_term_securities_note];

    write_lines(
        w,
        "Anläggningstillgångar",
        &[
            ("Byggnader och mark", BUILDINGS_AND_LAND, &tangible.buildings_and_land, &buildings_note[..], plain),
            (
                "Maskiner och andra tekniska anläggningar",
                MACHINERY_AND_EQUIPMENT,
                &tangible.machinery_and_equipment,
                &machinery_note[..],
                plain,
            ),
            (
                "Inventarier, verktyg och installationer",
                FIXTURES_AND_FITTINGS,
                &tangible.fixtures_and_fittings,
                &fixtures_note[..],
                sum,
            ),
            ("Summa materiella anläggningstillgångar", TANGIBLE_FIXED_ASSETS, &tangible.total_tangible, NO_NOTES, plain),
            (
                "Andra långfristiga värdepappersinnehav",
                OTHER_LONG_TERM_SECURITIES,
                &financial.other_long_term_securities,
                &securities_note[..],
                sum,
            ),
            ("Summa finansiella anläggningstillgångar", FINANCIAL_FIXED_ASSETS, &financial.total_financial, NO_NOTES, plain),
            ("Summa anläggningstillgångar", FIXED_ASSETS, &assets.fixed_assets.total_fixed_assets, NO_NOTES, sum),
        ],
    )?;

    let ca = &assets.current_assets;
    let inv = &ca.inventory;
    let rec = &ca.short_term_receivables;
    let cash = &ca.cash_and_bank;
    write_lines(
        w,
        "Omsättningstillgångar",
        &[
            ("Råvaror och förnödenheter", RAW_MATERIALS_INVENTORY, &inv.raw_materials, NO_NOTES, plain),
            ("Varor under tillverkning", WORK_IN_PROGRESS, &inv.work_in_progress, NO_NOTES, plain),
            ("Färdiga varor och handelsvaror", FINISHED_GOODS, &inv.finished_goods, NO_NOTES, sum),
            ("Summa varulager", INVENTORY_TOTAL, &inv.total_inventory, NO_NOTES, plain),
            ("Kundfordringar", TRADE_RECEIVABLES, &rec.trade_receivables, NO_NOTES, plain),
            ("Övriga fordringar", OTHER_RECEIVABLES, &rec.other_receivables, NO_NOTES, plain),
            (
                "Förutbetalda kostnader och upplupna intäkter",
                PREPAID_EXPENSES,
                &rec.prepaid_expenses,
                NO_NOTES,
                sum,
            ),
            ("Summa kortfristiga fordringar", SHORT_TERM_RECEIVABLES, &rec.total_short_term_receivables, NO_NOTES, plain),
            ("Kassa och bank", CASH_AND_BANK_EXCL, &cash.cash_and_bank_excl, NO_NOTES, sum),
            ("Summa kassa och bank", CASH_AND_BANK, &cash.total_cash_and_bank, NO_NOTES, plain),
            ("Summa omsättningstillgångar", CURRENT_ASSETS, &ca.total_current_assets, NO_NOTES, sum),
            ("Summa tillgångar", TOTAL_ASSETS, &assets.total_assets, NO_NOTES, total),
        ],
    )
}

fn write_equity_and_liabilities<W: Write>(w: &mut FactWriter<W>, r: &AnnualReport) -> Result<()> {
    let el = &r.balance_sheet.equity_and_liabilities;
    let plain = RowStyle::PLAIN;
    let sum = RowStyle::SUM;
    let total = RowStyle::PLAIN.with_wrap("total");

    let eq = &el.equity;
    write_lines(
        w,
        "Eget kapital",
        &[
            ("Aktiekapital", SHARE_CAPITAL, &eq.share_capital, NO_NOTES, plain),
            ("Reservfond", RESERVE_FUND, &eq.reserve_fund, NO_NOTES, sum),
            ("Summa bundet eget kapital", RESTRICTED_EQUITY, &eq.total_restricted_equity, NO_NOTES, plain),
            ("Balanserat resultat", RETAINED_EARNINGS, &eq.retained_earnings, NO_NOTES, plain),
            ("Årets resultat", NET_INCOME_EQUITY, &eq.net_income, NO_NOTES, sum),
            ("Summa fritt eget kapital", UNRESTRICTED_EQUITY, &eq.total_unrestricted_equity, NO_NOTES, plain),
            ("Summa eget kapital", EQUITY, &eq.total_equity, NO_NOTES, sum),
        ],
    )?;

    let ur = &el.untaxed_reserves;
    write_lines(
        w,
        "Obeskattade reserver",
        &[
            ("Periodiseringsfonder", TAX_ALLOCATION_RESERVES, &ur.tax_allocation_reserves, NO_NOTES, plain),
            (
                "Ackumulerade överavskrivningar",
                ACCUMULATED_EXCESS_DEPRECIATION,
                &ur.accumulated_excess_depreciation,
                NO_NOTES,
                sum,
            ),
            ("Summa obeskattade reserver", UNTAXED_RESERVES, &ur.total_untaxed_reserves, NO_NOTES, plain),
        ],
    )?;

    let prov = &el.provisions;
    write_lines(
        w,
        "Avsättningar",
        &[
            (
                "Avsättningar för pensioner och liknande förpliktelser enligt lagen (1967:531) om tryggande av pensionsutfästelse <abbr>m.m.</abbr>",
                PENSION_PROVISIONS,
                &prov.pension_provisions,
                NO_NOTES,
                plain,
            ),
            ("Övriga avsättningar", OTHER_PROVISIONS, &prov.other_provisions, NO_NOTES, sum),
            ("Summa avsättningar", PROVISIONS, &prov.total_provisions, NO_NOTES, plain),
        ],
    )?;

    let lt = &el.long_term_liabilities;
    let mut bank_loan_notes = lt.bank_loans_notes.clone();
    if lt.long_term_liabilities_note > 0 && !bank_loan_notes.contains(&lt.long_term_liabilities_note) {
        bank_loan_notes.insert(0, lt.long_term_liabilities_note);
    }
    write_lines(
        w,
        "Långfristiga skulder",
        &[
            (
                "Övriga skulder till kreditinstitut",
                BANK_LOANS,
                &lt.bank_loans,
                bank_loan_notes.as_slice(),
                plain,
            ),
            ("Övriga skulder", OTHER_LONG_TERM_LIABILITIES, &lt.other_long_term_liabilities, NO_NOTES, sum),
            ("Summa långfristiga skulder", LONG_TERM_LIABILITIES, &lt.total_long_term_liabilities, NO_NOTES, plain),
        ],
    )?;

    let st = &el.short_term_liabilities;
    let other_note = [st.other_short_term_liabilities_note];
    write_lines(
        w,
        "Kortfristiga skulder",
        &[
            ("Leverantörsskulder", TRADE_PAYABLES, &st.trade_payables, NO_NOTES, plain),
            ("Skatteskulder", TAX_LIABILITIES, &st.tax_liabilities, NO_NOTES, plain),
            ("Övriga skulder", OTHER_SHORT_TERM_LIABILITIES, &st.other_short_term_liabilities, &other_note[..], plain),
            (
                "Upplupna kostnader och förutbetalda intäkter",
                ACCRUED_EXPENSES,
                &st.accrued_expenses,
                NO_NOTES,
                sum,
            ),
            ("Summa kortfristiga skulder", SHORT_TERM_LIABILITIES, &st.total_short_term_liabilities, NO_NOTES, plain),
            (
                "Summa eget kapital och skulder",
                EQUITY_AND_LIABILITIES,
                &el.total_equity_and_liabilities,
                NO_NOTES,
                total,
            ),
        ],
    )
}
