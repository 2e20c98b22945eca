use k2ixbrl::ixbrl::{
    self,
    concepts::gen_base,
    context::{ContextRef, Unit},
    encoder::{FactWriter, NonFraction},
    format::NumberFormat,
    parsing::{extract_facts, types::Fact},
    IX_NAMESPACE,
};
use k2ixbrl::model::{AnnualReport, MultiYearOverviewYear};
use proptest::prelude::*;

fn fixture() -> AnnualReport {
    serde_json::from_str(include_str!("data/report.json")).unwrap()
}

/// What a decoded fixture can hold: decoration that is never tagged drops
/// out, everything else survives.
fn untagged_removed(mut report: AnnualReport) -> AnnualReport {
    report.meta.entry_point.clear();
    report.meta.software.clear();
    report.meta.software_version.clear();
    for year in &mut report.management_report.multi_year_overview.years {
        year.year.clear();
    }
    if let Some(note) = &mut report.notes.multi_post_note {
        for entry in &mut note.entries {
            entry.heading.clear();
        }
    }
    report
}

fn generate_string(report: &AnnualReport) -> String {
    String::from_utf8(ixbrl::generate_to_bytes(report).unwrap()).unwrap()
}

#[test]
fn test_fixture_round_trip() {
    let report = fixture();
    let document = generate_string(&report);
    let decoded = ixbrl::parse(&document).unwrap();
    assert_eq!(decoded, untagged_removed(report));
}

#[test]
fn test_round_trip_is_stable() {
    let once = ixbrl::parse(&generate_string(&fixture())).unwrap();
    let twice = ixbrl::parse(&generate_string(&once)).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_generate_into_writer() {
    let report = fixture();
    let mut out = Vec::new();
    ixbrl::generate(&mut out, &report).unwrap();
    assert_eq!(out, ixbrl::generate_to_bytes(&report).unwrap());
}

#[test]
fn test_output_is_well_formed() {
    let document = generate_string(&fixture());
    let doc = roxmltree::Document::parse(&document).unwrap();
    let root = doc.root_element();
    assert_eq!(root.tag_name().name(), "html");
    assert_eq!(root.lookup_namespace_uri(Some("ix")), Some(IX_NAMESPACE));

    let declared: Vec<&str> = doc
        .descendants()
        .filter(|n| n.tag_name().name() == "context")
        .filter_map(|n| n.attribute("id"))
        .collect();
    let facts: Vec<_> = doc
        .descendants()
        .filter(|n| n.tag_name().namespace() == Some(IX_NAMESPACE))
        .filter(|n| matches!(n.tag_name().name(), "nonFraction" | "nonNumeric"))
        .collect();
    assert!(facts.len() > 100);
    for fact in &facts {
        let context = fact.attribute("contextRef").unwrap();
        assert!(declared.contains(&context), "undeclared context {}", context);
    }
}

#[test]
fn test_contexts_follow_fiscal_year() {
    let document = generate_string(&fixture());
    let doc = roxmltree::Document::parse(&document).unwrap();
    let context = |id: &str| {
        let node = doc
            .descendants()
            .find(|n| n.tag_name().name() == "context" && n.attribute("id") == Some(id))
            .unwrap();
        node.descendants()
            .filter(|n| matches!(n.tag_name().name(), "startDate" | "endDate" | "instant"))
            .filter_map(|n| n.text())
            .collect::<Vec<_>>()
    };
    assert_eq!(context("period0"), vec!["2016-01-01", "2016-12-31"]);
    assert_eq!(context("period1"), vec!["2015-01-01", "2015-12-31"]);
    assert_eq!(context("period3"), vec!["2013-01-01", "2013-12-31"]);
    assert_eq!(context("balans0"), vec!["2016-12-31"]);
    assert_eq!(context("balans1"), vec!["2015-12-31"]);
    assert_eq!(context("balans2"), vec!["2014-12-31"]);
}

#[test]
fn test_overview_gap_keeps_later_years_in_place() {
    let year = |label: &str, net_sales: Option<i64>| MultiYearOverviewYear {
        year: label.to_string(),
        net_sales,
        result_after_financial_items: None,
        solidity: None,
    };
    let mut report = AnnualReport::default();
    report.fiscal_year.start_date = "2016-01-01".to_string();
    report.fiscal_year.end_date = "2016-12-31".to_string();
    report.management_report.multi_year_overview.years = vec![
        year("2016", Some(2_650_000)),
        year("2015", None),
        year("2014", Some(1_000_000)),
    ];

    let decoded = ixbrl::parse(&generate_string(&report)).unwrap();
    let years = &decoded.management_report.multi_year_overview.years;
    assert_eq!(years.len(), 3);
    assert_eq!(years[0].net_sales, Some(2_650_000));
    assert_eq!(years[1], MultiYearOverviewYear::default());
    assert_eq!(years[2].net_sales, Some(1_000_000));

    let again = generate_string(&decoded);
    assert!(again.contains(
        r#"<ix:nonFraction contextRef="period2" name="se-gen-base:Nettoomsattning" unitRef="SEK" decimals="INF" scale="3" format="ixt:numspacecomma">1 000</ix:nonFraction>"#
    ));
    assert!(!again.contains(r#"contextRef="period1" name="se-gen-base:Nettoomsattning""#));
}

fn scale_strategy() -> impl Strategy<Value = i32> {
    prop_oneof![Just(0), Just(3), Just(-2)]
}

fn format_strategy() -> impl Strategy<Value = NumberFormat> {
    prop_oneof![
        Just(NumberFormat::SpaceComma),
        Just(NumberFormat::Comma),
        Just(NumberFormat::DotDecimal),
        Just(NumberFormat::Plain),
    ]
}

proptest! {
    #[test]
    fn prop_amounts_survive_tagging(
        amount in -1_000_000_000_000i64..1_000_000_000_000,
        scale in scale_strategy(),
        format in format_strategy(),
        invert in any::<bool>(),
    ) {
        // A positive scale only shows whole multiples.
        let amount = if scale > 0 { amount / 1000 * 1000 } else { amount };

        let mut fact = NonFraction::new(gen_base::NET_SALES, ContextRef::PERIOD0, Unit::Sek, amount)
            .scale(scale)
            .format(format.clone());
        if invert {
            fact = fact.invert_sign();
        }
        let mut w = FactWriter::new(Vec::new());
        w.raw(&format!(r#"<html xmlns:ix="{}"><body>"#, IX_NAMESPACE)).unwrap();
        w.non_fraction(&fact).unwrap();
        w.raw("</body></html>").unwrap();
        let document = String::from_utf8(w.into_inner()).unwrap();

        let extraction = extract_facts(&document).unwrap();
        prop_assert_eq!(extraction.facts.len(), 1);
        let Fact::Numeric(decoded) = &extraction.facts[0] else {
            panic!("expected a numeric fact");
        };
        let expected = if invert { -amount } else { amount };
        prop_assert_eq!(decoded.amount, Some(expected));
        prop_assert_eq!(decoded.scale, scale);
        prop_assert_eq!(decoded.format.as_deref(), format.code());
        prop_assert_eq!(decoded.context.as_str(), "period0");
    }
}
