use super::{
    close_group, close_table, open_group, open_table, previous_year_label, year_label, AmountRow,
    RowStyle,
};
use crate::ixbrl::concepts::gen_base::*;
use crate::ixbrl::encoder::FactWriter;
use crate::ixbrl::error::Result;
use crate::model::AnnualReport;
use std::io::Write;

/// Appropriations are tagged sign-inverted: a positive record value is a
/// transfer to reserves and reduces the result.
const APPROPRIATION: RowStyle = RowStyle {
    neg_prefix: true,
    invert_sign: true,
    wrap: None,
};

pub(super) fn write_income_statement<W: Write>(
    w: &mut FactWriter<W>,
    r: &AnnualReport,
) -> Result<()> {
    let is = &r.income_statement;
    let current = year_label(&r.fiscal_year.end_date);
    let previous = previous_year_label(&r.fiscal_year.end_date);

    w.line(r#"<div class="ar-page" id="ar-page-3">"#)?;
    w.indent();
    open_table(w, "Resultaträkning", (current, previous.as_str()))?;

    let rev = &is.revenue;
    open_group(w, "Rörelseintäkter, lagerförändringar <abbr>m.m.</abbr>")?;
    AmountRow::new("Nettoomsättning", NET_SALES, &rev.net_sales).write(w)?;
    AmountRow::new(
        "Förändring av lager av produkter i arbete, färdiga varor och pågående arbete för annans räkning",
        INVENTORY_CHANGE,
        &rev.inventory_change,
    )
    .write(w)?;
    AmountRow::new("Övriga rörelseintäkter", OTHER_OPERATING_INCOME, &rev.other_operating_income)
        .style(RowStyle::SUM)
        .write(w)?;
    AmountRow::new(
        "Summa rörelseintäkter, lagerförändringar <abbr>m.m.</abbr>",
        OPERATING_INCOME_TOTAL,
        &rev.total_revenue,
    )
    .write(w)?;
    close_group(w)?;

    let exp = &is.expenses;
    let personnel_note = [exp.personnel_expenses_note];
    open_group(w, "Rörelsekostnader")?;
    let expense_rows = [
        ("Råvaror och förnödenheter", RAW_MATERIALS_EXPENSES, &exp.raw_materials),
        ("Handelsvaror", TRADING_GOODS_EXPENSES, &exp.trading_goods),
        ("Övriga externa kostnader", OTHER_EXTERNAL_EXPENSES, &exp.other_external_expenses),
    ];
    for (label, concept, value) in expense_rows {
        AmountRow::new(label, concept, value)
            .style(RowStyle::EXPENSE)
            .write(w)?;
    }
    AmountRow::new("Personalkostnader", PERSONNEL_EXPENSES, &exp.personnel_expenses)
        .notes(&personnel_note)
        .style(RowStyle::EXPENSE)
        .write(w)?;
    AmountRow::new(
        "Av- och nedskrivningar av materiella och immateriella anläggningstillgångar",
        DEPRECIATION_AMORTIZATION,
        &exp.depreciation_amortization,
    )
    .style(RowStyle::EXPENSE)
    .write(w)?;
    AmountRow::new("Övriga rörelsekostnader", OTHER_OPERATING_EXPENSES, &exp.other_operating_expenses)
        .style(RowStyle::EXPENSE.with_wrap("sum"))
        .write(w)?;
    AmountRow::new("Summa rörelsekostnader", OPERATING_EXPENSES_TOTAL, &exp.total_expenses)
        .style(RowStyle::EXPENSE)
        .write(w)?;
    AmountRow::new("Rörelseresultat", OPERATING_RESULT, &is.operating_result)
        .style(RowStyle::SUM)
        .write(w)?;
    close_group(w)?;

    let fin = &is.financial_items;
    open_group(w, "Finansiella poster")?;
    AmountRow::new(
        "Resultat från övriga finansiella anläggningstillgångar",
        RESULT_OTHER_FINANCIAL_ASSETS,
        &fin.result_other_financial_assets,
    )
    .write(w)?;
    AmountRow::new(
        "Övriga ränteintäkter och liknande resultatposter",
        OTHER_INTEREST_INCOME,
        &fin.other_interest_income,
    )
    .write(w)?;
    AmountRow::new(
        "Räntekostnader och liknande resultatposter",
        INTEREST_EXPENSES,
        &fin.interest_expenses,
    )
    .style(RowStyle::EXPENSE.with_wrap("sum"))
    .write(w)?;
    AmountRow::new("Summa finansiella poster", FINANCIAL_ITEMS_TOTAL, &fin.total_financial_items)
        .write(w)?;
    AmountRow::new(
        "Resultat efter finansiella poster",
        RESULT_AFTER_FINANCIAL_ITEMS,
        &is.result_after_financial_items,
    )
    .style(RowStyle::SUM)
    .write(w)?;
    close_group(w)?;

    let app = &is.appropriations;
    open_group(w, "Bokslutsdispositioner")?;
    AmountRow::new(
        "Förändring av periodiseringsfonder",
        TAX_ALLOCATION_RESERVE_CHANGE,
        &app.tax_allocation_reserve,
    )
    .style(APPROPRIATION)
    .write(w)?;
    AmountRow::new(
        "Förändring av överavskrivningar",
        EXCESS_DEPRECIATION_CHANGE,
        &app.excess_depreciation,
    )
    .style(APPROPRIATION.with_wrap("sum"))
    .write(w)?;
    AmountRow::new(
        "Summa bokslutsdispositioner",
        APPROPRIATIONS_TOTAL,
        &app.total_appropriations,
    )
    .style(APPROPRIATION)
    .write(w)?;
    AmountRow::new("Resultat före skatt", RESULT_BEFORE_TAX, &is.result_before_tax)
        .style(RowStyle::SUM)
        .write(w)?;
    close_group(w)?;

    open_group(w, "Skatter")?;
    AmountRow::new("Skatt på årets resultat", INCOME_TAX, &is.tax.income_tax)
        .style(RowStyle::EXPENSE.with_wrap("sum"))
        .write(w)?;
    AmountRow::new("Årets resultat", NET_RESULT, &is.net_result)
        .style(RowStyle::SUM.with_wrap("total"))
        .write(w)?;
    close_group(w)?;

    close_table(w)?;
    w.outdent();
    w.line("</div>")
}
