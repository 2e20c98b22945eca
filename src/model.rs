//! The structured K2 annual report (årsredovisning).
//!
//! This is the record both directions of the codec exchange: the generator
//! reads it, the parser rebuilds it. Amounts are whole kronor. Every numeric
//! field is an `Option<i64>` so that "not reported" (`None`) stays distinct
//! from a reported zero.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnnualReport {
    pub company: Company,
    pub fiscal_year: FiscalYear,
    pub meta: Meta,

    pub certification: Certification,
    pub management_report: ManagementReport,
    pub income_statement: IncomeStatement,
    pub balance_sheet: BalanceSheet,
    pub notes: Notes,
    pub signatures: Signatures,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    pub org_nr: String,
}

/// Reporting period boundaries as `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FiscalYear {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Meta {
    pub language: String,
    pub country: String,
    pub currency: String,
    pub amount_format: String,
    /// Taxonomy entry point variant: "risbs", "risab", "raibs" or "raiab".
    pub entry_point: String,
    pub software: String,
    pub software_version: String,
}

/// Fastställelseintyg.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Certification {
    pub confirmation_text: String,
    pub meeting_date: String,
    pub disposition_decision: String,
    pub original_content_certification: String,
    pub electronic_signature_label: String,
    pub signatory: CertificationSignatory,
    pub signing_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CertificationSignatory {
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

/// Förvaltningsberättelse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ManagementReport {
    pub intro_text: String,
    pub business_description: String,
    pub significant_events: String,
    pub multi_year_overview: MultiYearOverview,
    pub equity_changes: EquityChanges,
    pub profit_disposition: ProfitDisposition,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub board_dividend_statement: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MultiYearOverview {
    /// Column 0 is the current year, column N is N years back.
    pub years: Vec<MultiYearOverviewYear>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comment: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MultiYearOverviewYear {
    pub year: String,
    /// Full kronor; displayed in thousands.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_sales: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_after_financial_items: Option<i64>,
    /// Display string such as "33,7"; kept opaque.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solidity: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EquityChanges {
    pub opening_share_capital: Option<i64>,
    pub opening_reserve_fund: Option<i64>,
    pub opening_retained_earnings: Option<i64>,
    pub opening_net_income: Option<i64>,
    pub opening_total: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dividend_net_income: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dividend_total: Option<i64>,

    pub year_result_net_income: Option<i64>,
    pub year_result_total: Option<i64>,

    pub closing_share_capital: Option<i64>,
    pub closing_reserve_fund: Option<i64>,
    pub closing_retained_earnings: Option<i64>,
    pub closing_net_income: Option<i64>,
    pub closing_total: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfitDisposition {
    pub retained_earnings: Option<i64>,
    pub net_income: Option<i64>,
    pub total_available: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dividend: Option<i64>,
    pub carried_forward: Option<i64>,
    pub total_disposition: Option<i64>,
}

/// A value for the current and the previous year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YearComparison {
    pub current: Option<i64>,
    pub previous: Option<i64>,
}

impl YearComparison {
    pub fn new(current: i64, previous: i64) -> Self {
        Self {
            current: Some(current),
            previous: Some(previous),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none() && self.previous.is_none()
    }
}

/// Resultaträkning, cost-type classification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IncomeStatement {
    pub revenue: IncomeStatementRevenue,
    pub expenses: IncomeStatementExpenses,
    pub operating_result: YearComparison,
    pub financial_items: IncomeStatementFinancialItems,
    pub result_after_financial_items: YearComparison,
    pub appropriations: IncomeStatementAppropriations,
    pub result_before_tax: YearComparison,
    pub tax: IncomeStatementTax,
    pub net_result: YearComparison,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IncomeStatementRevenue {
    pub net_sales: YearComparison,
    pub inventory_change: YearComparison,
    pub other_operating_income: YearComparison,
    pub total_revenue: YearComparison,
}

/// Expenses are stored positive and displayed with a leading minus.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IncomeStatementExpenses {
    pub raw_materials: YearComparison,
    pub trading_goods: YearComparison,
    pub other_external_expenses: YearComparison,
    pub personnel_expenses: YearComparison,
    #[serde(skip_serializing_if = "is_zero")]
    pub personnel_expenses_note: u32,
    pub depreciation_amortization: YearComparison,
    pub other_operating_expenses: YearComparison,
    pub total_expenses: YearComparison,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IncomeStatementFinancialItems {
    pub result_other_financial_assets: YearComparison,
    pub other_interest_income: YearComparison,
    pub interest_expenses: YearComparison,
    pub total_financial_items: YearComparison,
}

/// Bokslutsdispositioner. Stored positive, tagged sign-inverted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IncomeStatementAppropriations {
    pub tax_allocation_reserve: YearComparison,
    pub excess_depreciation: YearComparison,
    pub total_appropriations: YearComparison,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IncomeStatementTax {
    pub income_tax: YearComparison,
}

/// Balansräkning. Current year-end is balans0, previous is balans1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BalanceSheet {
    pub assets: Assets,
    pub equity_and_liabilities: EquityAndLiabilities,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Assets {
    pub fixed_assets: FixedAssets,
    pub current_assets: CurrentAssets,
    pub total_assets: YearComparison,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FixedAssets {
    pub tangible: TangibleFixedAssets,
    pub financial: FinancialFixedAssets,
    pub total_fixed_assets: YearComparison,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TangibleFixedAssets {
    pub buildings_and_land: YearComparison,
    #[serde(skip_serializing_if = "is_zero")]
    pub buildings_and_land_note: u32,
    pub machinery_and_equipment: YearComparison,
    #[serde(skip_serializing_if = "is_zero")]
    pub machinery_and_equipment_note: u32,
    pub fixtures_and_fittings: YearComparison,
    #[serde(skip_serializing_if = "is_zero")]
    pub fixtures_and_fittings_note: u32,
    pub total_tangible: YearComparison,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FinancialFixedAssets {
    pub other_long_term_securities: YearComparison,
    #[serde(skip_serializing_if = "is_zero")]
    pub other_long_term_securities_note: u32,
    pub total_financial: YearComparison,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CurrentAssets {
    pub inventory: Inventory,
    pub short_term_receivables: ShortTermReceivables,
    pub cash_and_bank: CashAndBank,
    pub total_current_assets: YearComparison,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Inventory {
    pub raw_materials: YearComparison,
    pub work_in_progress: YearComparison,
    pub finished_goods: YearComparison,
    pub total_inventory: YearComparison,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShortTermReceivables {
    pub trade_receivables: YearComparison,
    pub other_receivables: YearComparison,
    pub prepaid_expenses: YearComparison,
    pub total_short_term_receivables: YearComparison,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CashAndBank {
    pub cash_and_bank_excl: YearComparison,
    pub total_cash_and_bank: YearComparison,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EquityAndLiabilities {
    pub equity: Equity,
    pub untaxed_reserves: UntaxedReserves,
    pub provisions: Provisions,
    pub long_term_liabilities: LongTermLiabilities,
    pub short_term_liabilities: ShortTermLiabilities,
    pub total_equity_and_liabilities: YearComparison,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Equity {
    pub share_capital: YearComparison,
    pub reserve_fund: YearComparison,
    pub total_restricted_equity: YearComparison,
    pub retained_earnings: YearComparison,
    pub net_income: YearComparison,
    pub total_unrestricted_equity: YearComparison,
    pub total_equity: YearComparison,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UntaxedReserves {
    pub tax_allocation_reserves: YearComparison,
    pub accumulated_excess_depreciation: YearComparison,
    pub total_untaxed_reserves: YearComparison,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Provisions {
    pub pension_provisions: YearComparison,
    pub other_provisions: YearComparison,
    pub total_provisions: YearComparison,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LongTermLiabilities {
    #[serde(skip_serializing_if = "is_zero")]
    pub long_term_liabilities_note: u32,
    pub bank_loans: YearComparison,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bank_loans_notes: Vec<u32>,
    pub other_long_term_liabilities: YearComparison,
    pub total_long_term_liabilities: YearComparison,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShortTermLiabilities {
    pub trade_payables: YearComparison,
    pub tax_liabilities: YearComparison,
    pub other_short_term_liabilities: YearComparison,
    #[serde(skip_serializing_if = "is_zero")]
    pub other_short_term_liabilities_note: u32,
    pub accrued_expenses: YearComparison,
    pub total_short_term_liabilities: YearComparison,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Notes {
    pub accounting_policies: AccountingPolicies,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employees: Option<EmployeesNote>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fixed_asset_notes: Vec<FixedAssetNote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_term_liabilities_note: Option<LongTermLiabilitiesNote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pledges: Option<PledgesNote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contingent_liabilities: Option<ContingentLiabilitiesNote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_post_note: Option<MultiPostNote>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccountingPolicies {
    pub note_number: u32,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub depreciations: Vec<DepreciationPolicy>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub depreciation_comment: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub manufactured_goods_policy: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DepreciationPolicy {
    pub category: String,
    /// Fully qualified concept carrying the number of years.
    pub concept: String,
    pub years: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmployeesNote {
    pub note_number: u32,
    pub average_employees: YearComparison,
}

/// Roll-forward note for one fixed-asset category.
///
/// Opening balances of the current year sit at balans1 and of the previous
/// year at balans2; closing balances at balans0 and balans1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FixedAssetNote {
    pub note_number: u32,
    pub title: String,
    /// Concept stem without namespace, e.g. "ByggnaderMark".
    pub concept_prefix: String,

    pub opening_acquisition_values: YearComparison,
    pub purchases: YearComparison,
    pub sales: YearComparison,
    pub closing_acquisition_values: YearComparison,

    pub opening_depreciation: YearComparison,
    pub year_depreciation: YearComparison,
    pub closing_depreciation: YearComparison,

    pub carrying_value: YearComparison,
}

impl FixedAssetNote {
    pub fn has_depreciation(&self) -> bool {
        !self.opening_depreciation.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LongTermLiabilitiesNote {
    pub note_number: u32,
    pub due_after_five_years: YearComparison,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PledgesNote {
    pub note_number: u32,
    pub corporate_mortgages: YearComparison,
    pub real_estate_mortgages: YearComparison,
    pub total_pledges: YearComparison,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContingentLiabilitiesNote {
    pub note_number: u32,
    pub total_contingent: YearComparison,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MultiPostNote {
    pub note_number: u32,
    pub description: String,
    pub entries: Vec<MultiPostEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MultiPostEntry {
    /// Display heading only; not tagged.
    pub heading: String,
    pub post_name: String,
    pub amount: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Signatures {
    pub city: String,
    pub date: String,
    pub signatories: Vec<Signatory>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Signatory {
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub role: String,
}

fn is_zero(n: &u32) -> bool {
    *n == 0
}
