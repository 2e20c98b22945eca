//! Rebuilding the record from indexed facts.
//!
//! Lookups never fail: a fact that is not in the document leaves its field
//! at the default. Note numbers are not tagged and are assigned in the
//! order the generator lays the notes out. The one failure is a numeral
//! that is not a number on a concept read as an amount.
use super::index::{member_amount, member_text, FactIndex};
use crate::ixbrl::error::{IxbrlError, Result};
use crate::ixbrl::concepts::gen_base::{self, roll_forward};
use crate::ixbrl::concepts::{bol_base, cd_base};
use crate::ixbrl::context::{ContextRef, YearIndex};
use crate::model::*;
use strum::IntoEnumIterator;

const ACCOUNTING_POLICIES_NOTE: u32 = 1;
const EMPLOYEES_NOTE: u32 = 2;
const FIRST_FIXED_ASSET_NOTE: u32 = 3;
const LONG_TERM_LIABILITIES_NOTE: u32 = 7;
const PLEDGES_NOTE: u32 = 8;
const CONTINGENT_LIABILITIES_NOTE: u32 = 9;
const MULTI_POST_NOTE: u32 = 10;

/// Fixed-asset categories with a roll-forward note: concept stem and title.
pub const FIXED_ASSET_CATEGORIES: &[(&str, &str)] = &[
    ("ByggnaderMark", "Byggnader och mark"),
    ("MaskinerAndraTekniskaAnlaggningar", "Maskiner och andra tekniska anläggningar"),
    ("InventarierVerktygInstallationer", "Inventarier, verktyg och installationer"),
    ("AndraLangfristigaVardepappersinnehav", "Andra långfristiga värdepappersinnehav"),
];

const DEPRECIATION_CATEGORIES: &[(&str, &str)] = &[
    (gen_base::DEPRECIATION_YEARS_BUILDINGS, "Byggnader"),
    (gen_base::DEPRECIATION_YEARS_MACHINERY, "Maskiner och andra tekniska anläggningar"),
    (gen_base::DEPRECIATION_YEARS_FIXTURES, "Inventarier, verktyg och installationer"),
];

/// Concepts kept as their display string, so any numeral is accepted.
const DISPLAY_ONLY: &[&str] = &[gen_base::SOLIDITY];

/// Fails on the first numeral that is not a number, unless its concept is
/// only ever read for its display.
pub fn map_report(ix: &FactIndex<'_>) -> Result<AnnualReport> {
    if let Some(fact) = ix
        .unreadable()
        .iter()
        .find(|f| !DISPLAY_ONLY.contains(&f.concept.as_str()))
    {
        return Err(IxbrlError::Numeral {
            concept: fact.concept.clone(),
            context: fact.context.clone(),
            display: fact.display.clone(),
        });
    }

    let mut report = AnnualReport {
        company: Company {
            name: ix.text(cd_base::COMPANY_NAME, ContextRef::PERIOD0),
            org_nr: ix.text(cd_base::ORG_NR, ContextRef::PERIOD0),
        },
        fiscal_year: FiscalYear {
            start_date: ix.text(cd_base::FISCAL_YEAR_FIRST_DAY, ContextRef::PERIOD0),
            end_date: ix.text(cd_base::FISCAL_YEAR_LAST_DAY, ContextRef::PERIOD0),
        },
        meta: map_meta(ix),
        certification: map_certification(ix),
        management_report: map_management_report(ix),
        income_statement: map_income_statement(ix),
        balance_sheet: map_balance_sheet(ix),
        notes: map_notes(ix),
        signatures: map_signatures(ix),
    };
    link_notes(&mut report);
    Ok(report)
}

fn is_empty_year(year: &MultiYearOverviewYear) -> bool {
    year.net_sales.is_none() && year.result_after_financial_items.is_none() && year.solidity.is_none()
}

fn map_meta(ix: &FactIndex<'_>) -> Meta {
    let p0 = ContextRef::PERIOD0;
    Meta {
        language: ix.text(cd_base::LANGUAGE, p0),
        country: ix.text(cd_base::COUNTRY, p0),
        currency: ix.text(cd_base::CURRENCY, p0),
        amount_format: ix.text(cd_base::AMOUNT_FORMAT, p0),
        ..Default::default()
    }
}

fn map_certification(ix: &FactIndex<'_>) -> Certification {
    let b0 = ContextRef::BALANS0;
    let p0 = ContextRef::PERIOD0;
    Certification {
        confirmation_text: ix.text(bol_base::CONFIRMATION, b0),
        meeting_date: ix.text(bol_base::MEETING_DATE, b0),
        disposition_decision: ix.text(bol_base::DISPOSITION_DECISION, b0),
        original_content_certification: ix.text(bol_base::ORIGINAL_CONTENT, b0),
        electronic_signature_label: ix.text(bol_base::ELECTRONIC_SIGNATURE, b0),
        signatory: CertificationSignatory {
            first_name: ix.text(bol_base::SIGNATORY_FIRST_NAME, p0),
            last_name: ix.text(bol_base::SIGNATORY_LAST_NAME, p0),
            role: ix.text(bol_base::SIGNATORY_ROLE, p0),
        },
        signing_date: ix.text(bol_base::SIGNING_DATE, b0),
    }
}

fn map_management_report(ix: &FactIndex<'_>) -> ManagementReport {
    use gen_base::*;
    let p0 = ContextRef::PERIOD0;
    let b0 = ContextRef::BALANS0;
    let b1 = ContextRef::BALANS1;

    // Column i sits in periodi/balansi, so an empty year between two filled
    // ones keeps its place. Only trailing empty columns are dropped.
    let mut years: Vec<_> = YearIndex::iter()
        .map(|year| MultiYearOverviewYear {
            year: String::new(),
            net_sales: ix.amount_with_scale(NET_SALES, ContextRef::Duration(year), 3),
            result_after_financial_items: ix.amount_with_scale(
                RESULT_AFTER_FINANCIAL_ITEMS,
                ContextRef::Duration(year),
                3,
            ),
            solidity: ix.display(SOLIDITY, ContextRef::Instant(year)),
        })
        .collect();
    while years.last().map_or(false, is_empty_year) {
        years.pop();
    }

    ManagementReport {
        intro_text: ix.text(INTRO_SENTENCE, p0),
        business_description: ix.text(BUSINESS_DESCRIPTION, p0),
        significant_events: ix.text_continued(SIGNIFICANT_EVENTS, p0),
        multi_year_overview: MultiYearOverview {
            years,
            comment: ix.text(OVERVIEW_COMMENT, p0),
        },
        equity_changes: EquityChanges {
            opening_share_capital: ix.amount(SHARE_CAPITAL, b1),
            opening_reserve_fund: ix.amount(RESERVE_FUND, b1),
            opening_retained_earnings: ix.amount(RETAINED_EARNINGS, b1),
            opening_net_income: ix.amount(NET_INCOME_EQUITY, b1),
            opening_total: ix.amount(EQUITY_CHANGE_TOTAL, b1),
            dividend_net_income: ix.amount(EQUITY_CHANGE_NET_INCOME_DIVIDEND, p0),
            dividend_total: ix.amount(EQUITY_CHANGE_TOTAL_DIVIDEND, p0),
            year_result_net_income: ix.amount(EQUITY_CHANGE_NET_INCOME_YEAR_RESULT, p0),
            year_result_total: ix.amount(EQUITY_CHANGE_TOTAL_YEAR_RESULT, p0),
            closing_share_capital: ix.amount(SHARE_CAPITAL, b0),
            closing_reserve_fund: ix.amount(RESERVE_FUND, b0),
            closing_retained_earnings: ix.amount(RETAINED_EARNINGS, b0),
            closing_net_income: ix.amount(NET_INCOME_EQUITY, b0),
            closing_total: ix.amount(EQUITY_CHANGE_TOTAL, b0),
        },
        profit_disposition: ProfitDisposition {
            retained_earnings: ix.amount(RETAINED_EARNINGS, b0),
            net_income: ix.amount(NET_INCOME_EQUITY, b0),
            total_available: ix.amount(FUNDS_AVAILABLE, b0),
            dividend: ix.amount(PROPOSED_DIVIDEND, b0),
            carried_forward: ix.amount(PROPOSED_CARRIED_FORWARD, b0),
            total_disposition: ix.amount(PROPOSED_DISPOSITION, b0),
        },
        board_dividend_statement: ix.text(BOARD_DIVIDEND_STATEMENT, b0),
    }
}

fn map_income_statement(ix: &FactIndex<'_>) -> IncomeStatement {
    use gen_base::*;
    IncomeStatement {
        revenue: IncomeStatementRevenue {
            net_sales: ix.period(NET_SALES),
            inventory_change: ix.period(INVENTORY_CHANGE),
            other_operating_income: ix.period(OTHER_OPERATING_INCOME),
            total_revenue: ix.period(OPERATING_INCOME_TOTAL),
        },
        expenses: IncomeStatementExpenses {
            raw_materials: ix.period(RAW_MATERIALS_EXPENSES),
            trading_goods: ix.period(TRADING_GOODS_EXPENSES),
            other_external_expenses: ix.period(OTHER_EXTERNAL_EXPENSES),
            personnel_expenses: ix.period(PERSONNEL_EXPENSES),
            personnel_expenses_note: 0,
            depreciation_amortization: ix.period(DEPRECIATION_AMORTIZATION),
            other_operating_expenses: ix.period(OTHER_OPERATING_EXPENSES),
            total_expenses: ix.period(OPERATING_EXPENSES_TOTAL),
        },
        operating_result: ix.period(OPERATING_RESULT),
        financial_items: IncomeStatementFinancialItems {
            result_other_financial_assets: ix.period(RESULT_OTHER_FINANCIAL_ASSETS),
            other_interest_income: ix.period(OTHER_INTEREST_INCOME),
            interest_expenses: ix.period(INTEREST_EXPENSES),
            total_financial_items: ix.period(FINANCIAL_ITEMS_TOTAL),
        },
        result_after_financial_items: ix.period(RESULT_AFTER_FINANCIAL_ITEMS),
        appropriations: IncomeStatementAppropriations {
            tax_allocation_reserve: ix.period_negated(TAX_ALLOCATION_RESERVE_CHANGE),
            excess_depreciation: ix.period_negated(EXCESS_DEPRECIATION_CHANGE),
            total_appropriations: ix.period_negated(APPROPRIATIONS_TOTAL),
        },
        result_before_tax: ix.period(RESULT_BEFORE_TAX),
        tax: IncomeStatementTax {
            income_tax: ix.period(INCOME_TAX),
        },
        net_result: ix.period(NET_RESULT),
    }
}

fn map_balance_sheet(ix: &FactIndex<'_>) -> BalanceSheet {
    use gen_base::*;
    BalanceSheet {
        assets: Assets {
            fixed_assets: FixedAssets {
                tangible: TangibleFixedAssets {
                    buildings_and_land: ix.balance(BUILDINGS_AND_LAND),
                    machinery_and_equipment: ix.balance(MACHINERY_AND_EQUIPMENT),
                    fixtures_and_fittings: ix.balance(FIXTURES_AND_FITTINGS),
                    total_tangible: ix.balance(TANGIBLE_FIXED_ASSETS),
                    ..Default::default()
                },
                financial: FinancialFixedAssets {
                    other_long_term_securities: ix.balance(OTHER_LONG_TERM_SECURITIES),
                    total_financial: ix.balance(FINANCIAL_FIXED_ASSETS),
                    ..Default::default()
                },
                total_fixed_assets: ix.balance(FIXED_ASSETS),
            },
            current_assets: CurrentAssets {
                inventory: Inventory {
                    raw_materials: ix.balance(RAW_MATERIALS_INVENTORY),
                    work_in_progress: ix.balance(WORK_IN_PROGRESS),
                    finished_goods: ix.balance(FINISHED_GOODS),
                    total_inventory: ix.balance(INVENTORY_TOTAL),
                },
                short_term_receivables: ShortTermReceivables {
                    trade_receivables: ix.balance(TRADE_RECEIVABLES),
                    other_receivables: ix.balance(OTHER_RECEIVABLES),
                    prepaid_expenses: ix.balance(PREPAID_EXPENSES),
                    total_short_term_receivables: ix.balance(SHORT_TERM_RECEIVABLES),
                },
                cash_and_bank: CashAndBank {
                    cash_and_bank_excl: ix.balance(CASH_AND_BANK_EXCL),
                    total_cash_and_bank: ix.balance(CASH_AND_BANK),
                },
                total_current_assets: ix.balance(CURRENT_ASSETS),
            },
            total_assets: ix.balance(TOTAL_ASSETS),
        },
        equity_and_liabilities: EquityAndLiabilities {
            equity: Equity {
                share_capital: ix.balance(SHARE_CAPITAL),
                reserve_fund: ix.balance(RESERVE_FUND),
                total_restricted_equity: ix.balance(RESTRICTED_EQUITY),
                retained_earnings: ix.balance(RETAINED_EARNINGS),
                net_income: ix.balance(NET_INCOME_EQUITY),
                total_unrestricted_equity: ix.balance(UNRESTRICTED_EQUITY),
                total_equity: ix.balance(EQUITY),
            },
            untaxed_reserves: UntaxedReserves {
                tax_allocation_reserves: ix.balance(TAX_ALLOCATION_RESERVES),
                accumulated_excess_depreciation: ix.balance(ACCUMULATED_EXCESS_DEPRECIATION),
                total_untaxed_reserves: ix.balance(UNTAXED_RESERVES),
            },
            provisions: Provisions {
                pension_provisions: ix.balance(PENSION_PROVISIONS),
                other_provisions: ix.balance(OTHER_PROVISIONS),
                total_provisions: ix.balance(PROVISIONS),
            },
            long_term_liabilities: LongTermLiabilities {
                bank_loans: ix.balance(BANK_LOANS),
                other_long_term_liabilities: ix.balance(OTHER_LONG_TERM_LIABILITIES),
                total_long_term_liabilities: ix.balance(LONG_TERM_LIABILITIES),
                ..Default::default()
            },
            short_term_liabilities: ShortTermLiabilities {
                trade_payables: ix.balance(TRADE_PAYABLES),
                tax_liabilities: ix.balance(TAX_LIABILITIES),
                other_short_term_liabilities: ix.balance(OTHER_SHORT_TERM_LIABILITIES),
                accrued_expenses: ix.balance(ACCRUED_EXPENSES),
                total_short_term_liabilities: ix.balance(SHORT_TERM_LIABILITIES),
                ..Default::default()
            },
            total_equity_and_liabilities: ix.balance(EQUITY_AND_LIABILITIES),
        },
    }
}

fn map_notes(ix: &FactIndex<'_>) -> Notes {
    Notes {
        accounting_policies: map_accounting_policies(ix),
        employees: map_employees(ix),
        fixed_asset_notes: map_fixed_asset_notes(ix),
        long_term_liabilities_note: present(ix.balance(gen_base::DUE_AFTER_FIVE_YEARS)).map(
            |due_after_five_years| LongTermLiabilitiesNote {
                note_number: LONG_TERM_LIABILITIES_NOTE,
                due_after_five_years,
            },
        ),
        pledges: present(ix.balance(gen_base::PLEDGES)).map(|total_pledges| PledgesNote {
            note_number: PLEDGES_NOTE,
            corporate_mortgages: ix.balance(gen_base::CORPORATE_MORTGAGES),
            real_estate_mortgages: ix.balance(gen_base::REAL_ESTATE_MORTGAGES),
            total_pledges,
        }),
        contingent_liabilities: present(ix.balance(gen_base::CONTINGENT_LIABILITIES)).map(
            |total_contingent| ContingentLiabilitiesNote {
                note_number: CONTINGENT_LIABILITIES_NOTE,
                total_contingent,
            },
        ),
        multi_post_note: map_multi_post_note(ix),
    }
}

fn present(value: YearComparison) -> Option<YearComparison> {
    (!value.is_empty()).then_some(value)
}

fn map_accounting_policies(ix: &FactIndex<'_>) -> AccountingPolicies {
    let p0 = ContextRef::PERIOD0;
    let description = ix.text(gen_base::ACCOUNTING_POLICIES, p0);
    if description.is_empty() {
        return AccountingPolicies::default();
    }
    let depreciations = DEPRECIATION_CATEGORIES
        .iter()
        .filter_map(|(concept, category)| {
            let years = ix.text(concept, p0).trim().parse::<u32>().ok()?;
            Some(DepreciationPolicy {
                category: category.to_string(),
                concept: concept.to_string(),
                years,
            })
        })
        .collect();
    AccountingPolicies {
        note_number: ACCOUNTING_POLICIES_NOTE,
        description,
        depreciations,
        depreciation_comment: ix.text(gen_base::DEPRECIATION_COMMENT, p0),
        manufactured_goods_policy: ix.text(gen_base::MANUFACTURED_GOODS_POLICY, p0),
    }
}

fn map_employees(ix: &FactIndex<'_>) -> Option<EmployeesNote> {
    present(ix.period(gen_base::AVERAGE_EMPLOYEES)).map(|average_employees| EmployeesNote {
        note_number: EMPLOYEES_NOTE,
        average_employees,
    })
}

fn map_fixed_asset_notes(ix: &FactIndex<'_>) -> Vec<FixedAssetNote> {
    let opening = (ContextRef::BALANS1, ContextRef::BALANS2);
    let mut notes = Vec::new();
    for (stem, title) in FIXED_ASSET_CATEGORIES {
        let acquisition = gen_base::qualified(stem, roll_forward::ACQUISITION_VALUES);
        let Some(opening_acquisition_values) =
            present(ix.year_comparison(&acquisition, opening.0, opening.1))
        else {
            continue;
        };
        let depreciation = gen_base::qualified(stem, roll_forward::DEPRECIATION);
        notes.push(FixedAssetNote {
            note_number: FIRST_FIXED_ASSET_NOTE + notes.len() as u32,
            title: title.to_string(),
            concept_prefix: stem.to_string(),
            opening_acquisition_values,
            purchases: ix.period(&gen_base::qualified(stem, roll_forward::PURCHASES)),
            sales: ix.period(&gen_base::qualified(stem, roll_forward::SALES)),
            closing_acquisition_values: ix.balance(&acquisition),
            opening_depreciation: ix.year_comparison(&depreciation, opening.0, opening.1),
            year_depreciation: ix.period(&gen_base::qualified(stem, roll_forward::YEAR_DEPRECIATION)),
            closing_depreciation: ix.balance(&depreciation),
            carrying_value: ix.balance(&gen_base::qualified(stem, "")),
        });
    }
    notes
}

fn map_multi_post_note(ix: &FactIndex<'_>) -> Option<MultiPostNote> {
    let description = ix.text(gen_base::MULTI_POST_NOTE, ContextRef::BALANS0);
    if description.is_empty() {
        return None;
    }
    let entries = ix
        .tuples_named(gen_base::MULTI_POST_TUPLE)
        .filter_map(|tuple| {
            let members = ix.members(&tuple.tuple_id);
            let post_name = member_text(members, gen_base::MULTI_POST_NAME);
            if post_name.is_empty() {
                return None;
            }
            Some(MultiPostEntry {
                heading: String::new(),
                post_name,
                amount: member_amount(members, gen_base::MULTI_POST_AMOUNT),
            })
        })
        .collect();
    Some(MultiPostNote {
        note_number: MULTI_POST_NOTE,
        description,
        entries,
    })
}

fn map_signatures(ix: &FactIndex<'_>) -> Signatures {
    let p0 = ContextRef::PERIOD0;
    let signatories = ix
        .tuples_named(gen_base::SIGNATORY_TUPLE)
        .filter_map(|tuple| {
            let members = ix.members(&tuple.tuple_id);
            let signatory = Signatory {
                first_name: member_text(members, gen_base::SIGNATORY_FIRST_NAME),
                last_name: member_text(members, gen_base::SIGNATORY_LAST_NAME),
                role: member_text(members, gen_base::SIGNATORY_ROLE),
            };
            if signatory.first_name.is_empty() && signatory.last_name.is_empty() {
                return None;
            }
            Some(signatory)
        })
        .collect();
    Signatures {
        city: ix.text(gen_base::SIGNING_CITY, p0),
        date: ix.text(gen_base::SIGNING_DATE, p0),
        signatories,
    }
}

/// Point the statement rows at the notes that were found.
fn link_notes(report: &mut AnnualReport) {
    let notes = &report.notes;
    let number_for = |stem: &str| {
        notes
            .fixed_asset_notes
            .iter()
            .find(|n| n.concept_prefix == stem)
            .map_or(0, |n| n.note_number)
    };
    let buildings = number_for(FIXED_ASSET_CATEGORIES[0].0);
    let machinery = number_for(FIXED_ASSET_CATEGORIES[1].0);
    let fixtures = number_for(FIXED_ASSET_CATEGORIES[2].0);
    let securities = number_for(FIXED_ASSET_CATEGORIES[3].0);
    let employees = notes.employees.as_ref().map_or(0, |n| n.note_number);
    let long_term = notes
        .long_term_liabilities_note
        .as_ref()
        .map_or(0, |n| n.note_number);

    let fixed = &mut report.balance_sheet.assets.fixed_assets;
    fixed.tangible.buildings_and_land_note = buildings;
    fixed.tangible.machinery_and_equipment_note = machinery;
    fixed.tangible.fixtures_and_fittings_note = fixtures;
    fixed.financial.other_long_term_securities_note = securities;
    report
        .balance_sheet
        .equity_and_liabilities
        .long_term_liabilities
        .long_term_liabilities_note = long_term;
    report.income_statement.expenses.personnel_expenses_note = employees;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ixbrl::parsing::types::{Extraction, Fact, NumericFact, TextFact, TupleDecl};

    fn amount(concept: &str, context: &str, scale: i32, amount: i64) -> Fact {
        Fact::Numeric(NumericFact {
            concept: concept.to_string(),
            context: context.to_string(),
            unit: "SEK".to_string(),
            scale,
            format: None,
            negated: false,
            display: String::new(),
            amount: Some(amount),
            tuple_ref: None,
            order: None,
        })
    }

    fn text(concept: &str, context: &str, value: &str, group: Option<&str>) -> Fact {
        Fact::Text(TextFact {
            concept: concept.to_string(),
            context: context.to_string(),
            text: value.to_string(),
            id: None,
            continued_at: None,
            tuple_ref: group.map(str::to_string),
            order: None,
        })
    }

    #[test]
    fn test_overview_uses_thousands_facts() {
        let extraction = Extraction {
            facts: vec![
                amount(gen_base::NET_SALES, "period0", 3, 2_650_000),
                amount(gen_base::NET_SALES, "period1", 3, 2_250_000),
                amount(gen_base::NET_SALES, "period0", 0, 2_650_123),
                amount(gen_base::NET_SALES, "period1", 0, 2_250_456),
            ],
            continuations: vec![],
        };
        let index = FactIndex::new(&extraction);
        let report = map_report(&index).unwrap();
        let years = &report.management_report.multi_year_overview.years;
        assert_eq!(years.len(), 2);
        assert_eq!(years[0].net_sales, Some(2_650_000));
        assert_eq!(years[1].net_sales, Some(2_250_000));
        assert_eq!(
            report.income_statement.revenue.net_sales,
            YearComparison::new(2_650_123, 2_250_456)
        );
    }

    #[test]
    fn test_fixed_asset_note_requires_opening_value() {
        let stem = "InventarierVerktygInstallationer";
        let acquisition = gen_base::qualified(stem, roll_forward::ACQUISITION_VALUES);
        let extraction = Extraction {
            facts: vec![
                amount(&gen_base::qualified("ByggnaderMark", ""), "balans0", 0, 500),
                amount(&acquisition, "balans1", 0, 1000),
                amount(&acquisition, "balans0", 0, 1200),
                amount(&gen_base::qualified(stem, ""), "balans0", 0, 900),
            ],
            continuations: vec![],
        };
        let index = FactIndex::new(&extraction);
        let report = map_report(&index).unwrap();
        let notes = &report.notes.fixed_asset_notes;
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].note_number, 3);
        assert_eq!(notes[0].title, "Inventarier, verktyg och installationer");
        assert_eq!(notes[0].closing_acquisition_values.current, Some(1200));
        assert!(!notes[0].has_depreciation());
        let tangible = &report.balance_sheet.assets.fixed_assets.tangible;
        assert_eq!(tangible.fixtures_and_fittings_note, 3);
        assert_eq!(tangible.buildings_and_land_note, 0);
    }

    #[test]
    fn test_signatories_without_names_are_dropped() {
        let extraction = Extraction {
            facts: vec![
                Fact::Tuple(TupleDecl {
                    concept: gen_base::SIGNATORY_TUPLE.to_string(),
                    tuple_id: "S1".to_string(),
                }),
                Fact::Tuple(TupleDecl {
                    concept: gen_base::SIGNATORY_TUPLE.to_string(),
                    tuple_id: "S2".to_string(),
                }),
                text(gen_base::SIGNATORY_LAST_NAME, "period0", "Svensson", Some("S1")),
                text(gen_base::SIGNATORY_ROLE, "period0", "Ledamot", Some("S2")),
            ],
            continuations: vec![],
        };
        let index = FactIndex::new(&extraction);
        let report = map_report(&index).unwrap();
        assert_eq!(
            report.signatures.signatories,
            vec![Signatory {
                first_name: String::new(),
                last_name: "Svensson".to_string(),
                role: String::new(),
            }]
        );
    }

    #[test]
    fn test_overview_keeps_gap_columns() {
        let extraction = Extraction {
            facts: vec![
                amount(gen_base::NET_SALES, "period0", 3, 2_650_000),
                amount(gen_base::NET_SALES, "period2", 3, 1_000_000),
            ],
            continuations: vec![],
        };
        let index = FactIndex::new(&extraction);
        let years = map_report(&index).unwrap().management_report.multi_year_overview.years;
        assert_eq!(years.len(), 3);
        assert_eq!(years[0].net_sales, Some(2_650_000));
        assert!(is_empty_year(&years[1]));
        assert_eq!(years[2].net_sales, Some(1_000_000));
    }

    #[test]
    fn test_only_solidity_may_be_unreadable() {
        let mut solidity = amount(gen_base::SOLIDITY, "balans0", -2, 0);
        if let Fact::Numeric(f) = &mut solidity {
            f.display = "33,7 %".to_string();
            f.amount = None;
        }
        let extraction = Extraction {
            facts: vec![solidity.clone()],
            continuations: vec![],
        };
        let report = map_report(&FactIndex::new(&extraction)).unwrap();
        assert_eq!(
            report.management_report.multi_year_overview.years[0].solidity.as_deref(),
            Some("33,7 %")
        );

        let mut sales = amount(gen_base::NET_SALES, "period1", 0, 0);
        if let Fact::Numeric(f) = &mut sales {
            f.display = "två".to_string();
            f.amount = None;
        }
        let extraction = Extraction {
            facts: vec![solidity, sales],
            continuations: vec![],
        };
        match map_report(&FactIndex::new(&extraction)) {
            Err(IxbrlError::Numeral { concept, context, display }) => {
                assert_eq!(concept, gen_base::NET_SALES);
                assert_eq!(context, "period1");
                assert_eq!(display, "två");
            }
            other => panic!("expected a numeral error, got {:?}", other),
        }
    }
}
