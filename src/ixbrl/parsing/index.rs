use super::types::{Continuation, Extraction, Fact, NumericFact, TextFact, TupleDecl};
use crate::ixbrl::context::ContextRef;
use crate::model::YearComparison;
use std::collections::{HashMap, HashSet};

type Key<'a> = (&'a str, &'a str);

/// Decoded facts keyed for lookup. Borrows the extraction it was built from.
///
/// A concept may be tagged more than once in one context (net sales is
/// shown both in the multi-year overview and in the income statement), so
/// every key maps to all its facts in document order.
#[derive(Debug, Default)]
pub struct FactIndex<'a> {
    numeric: HashMap<Key<'a>, Vec<&'a NumericFact>>,
    text: HashMap<Key<'a>, Vec<&'a TextFact>>,
    members: HashMap<&'a str, Vec<&'a Fact>>,
    tuples: Vec<&'a TupleDecl>,
    unreadable: Vec<&'a NumericFact>,
    continuations: HashMap<&'a str, &'a Continuation>,
}

impl<'a> FactIndex<'a> {
    pub fn new(extraction: &'a Extraction) -> Self {
        let mut index = FactIndex::default();
        for fact in &extraction.facts {
            match fact {
                Fact::Numeric(f) => {
                    index
                        .numeric
                        .entry((f.concept.as_str(), f.context.as_str()))
                        .or_default()
                        .push(f);
                    if f.amount.is_none() {
                        index.unreadable.push(f);
                    }
                    if let Some(group) = &f.tuple_ref {
                        index.members.entry(group.as_str()).or_default().push(fact);
                    }
                }
                Fact::Text(f) => {
                    index
                        .text
                        .entry((f.concept.as_str(), f.context.as_str()))
                        .or_default()
                        .push(f);
                    if let Some(group) = &f.tuple_ref {
                        index.members.entry(group.as_str()).or_default().push(fact);
                    }
                }
                Fact::Tuple(t) => index.tuples.push(t),
            }
        }
        for c in &extraction.continuations {
            index.continuations.entry(c.id.as_str()).or_insert(c);
        }
        index
    }

    fn numeric_facts<'s>(&'s self, concept: &'s str, context: ContextRef) -> &'s [&'a NumericFact] {
        self.numeric
            .get(&(concept, context.as_str()))
            .map_or(&[], Vec::as_slice)
    }

    fn text_fact(&self, concept: &str, context: ContextRef) -> Option<&'a TextFact> {
        self.text
            .get(&(concept, context.as_str()))
            .and_then(|facts| facts.first())
            .copied()
    }

    /// Text of the first matching fact, or empty.
    pub fn text(&self, concept: &str, context: ContextRef) -> String {
        self.text_fact(concept, context)
            .map(|f| f.text.clone())
            .unwrap_or_default()
    }

    /// The fact's own text followed by its continuation chain. Non-empty
    /// fragments are joined by a blank line.
    pub fn text_continued(&self, concept: &str, context: ContextRef) -> String {
        let Some(fact) = self.text_fact(concept, context) else {
            return String::new();
        };
        let mut parts: Vec<&str> = Vec::new();
        if !fact.text.is_empty() {
            parts.push(&fact.text);
        }
        let mut seen = HashSet::new();
        let mut next = fact.continued_at.as_deref();
        while let Some(id) = next {
            if !seen.insert(id) {
                break;
            }
            let Some(fragment) = self.continuations.get(id) else {
                break;
            };
            if !fragment.text.is_empty() {
                parts.push(&fragment.text);
            }
            next = fragment.continued_at.as_deref();
        }
        parts.join("\n\n")
    }

    /// The most precise matching amount. The fact with the lowest scale
    /// wins; among facts of that scale the first in document order wins, so
    /// with equal scales this is the first match.
    pub fn amount(&self, concept: &str, context: ContextRef) -> Option<i64> {
        self.numeric_facts(concept, context)
            .iter()
            .min_by_key(|f| f.scale)
            .and_then(|f| f.amount)
    }

    /// For concepts tagged with an inverted sign.
    pub fn amount_negated(&self, concept: &str, context: ContextRef) -> Option<i64> {
        self.amount(concept, context).map(|a| -a)
    }

    pub fn amount_with_scale(&self, concept: &str, context: ContextRef, scale: i32) -> Option<i64> {
        self.numeric_facts(concept, context)
            .iter()
            .find(|f| f.scale == scale)
            .and_then(|f| f.amount)
    }

    /// The displayed numeral of the first match, `None` when absent or blank.
    pub fn display(&self, concept: &str, context: ContextRef) -> Option<String> {
        self.numeric_facts(concept, context)
            .first()
            .map(|f| f.display.clone())
            .filter(|d| !d.is_empty())
    }

    pub fn year_comparison(
        &self,
        concept: &str,
        current: ContextRef,
        previous: ContextRef,
    ) -> YearComparison {
        YearComparison {
            current: self.amount(concept, current),
            previous: self.amount(concept, previous),
        }
    }

    /// period0 / period1.
    pub fn period(&self, concept: &str) -> YearComparison {
        self.year_comparison(concept, ContextRef::PERIOD0, ContextRef::PERIOD1)
    }

    /// balans0 / balans1.
    pub fn balance(&self, concept: &str) -> YearComparison {
        self.year_comparison(concept, ContextRef::BALANS0, ContextRef::BALANS1)
    }

    pub fn period_negated(&self, concept: &str) -> YearComparison {
        YearComparison {
            current: self.amount_negated(concept, ContextRef::PERIOD0),
            previous: self.amount_negated(concept, ContextRef::PERIOD1),
        }
    }

    /// Declarations of `concept`, in document order.
    pub fn tuples_named<'s>(&'s self, concept: &'s str) -> impl Iterator<Item = &'a TupleDecl> + 's {
        self.tuples
            .iter()
            .copied()
            .filter(move |t| t.concept == concept)
    }

    pub fn members(&self, tuple_id: &str) -> &[&'a Fact] {
        self.members.get(tuple_id).map_or(&[], Vec::as_slice)
    }

    /// Numeric facts whose display is not a number, in document order.
    pub fn unreadable(&self) -> &[&'a NumericFact] {
        &self.unreadable
    }
}

/// The text of the first member tagged `concept`, or empty.
pub fn member_text(members: &[&Fact], concept: &str) -> String {
    members
        .iter()
        .find_map(|m| match m {
            Fact::Text(f) if f.concept == concept => Some(f.text.clone()),
            _ => None,
        })
        .unwrap_or_default()
}

pub fn member_amount(members: &[&Fact], concept: &str) -> Option<i64> {
    members.iter().find_map(|m| match m {
        Fact::Numeric(f) if f.concept == concept => f.amount,
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric(concept: &str, context: &str, scale: i32, amount: i64) -> Fact {
        Fact::Numeric(NumericFact {
            concept: concept.to_string(),
            context: context.to_string(),
            unit: "SEK".to_string(),
            scale,
            format: None,
            negated: amount < 0,
            display: amount.unsigned_abs().to_string(),
            amount: Some(amount),
            tuple_ref: None,
            order: None,
        })
    }

    fn text(concept: &str, context: &str, value: &str, continued_at: Option<&str>) -> Fact {
        Fact::Text(TextFact {
            concept: concept.to_string(),
            context: context.to_string(),
            text: value.to_string(),
            id: None,
            continued_at: continued_at.map(str::to_string),
            tuple_ref: None,
            order: None,
        })
    }

    fn member(concept: &str, group: &str, value: &str) -> Fact {
        match text(concept, "period0", value, None) {
            Fact::Text(mut f) => {
                f.tuple_ref = Some(group.to_string());
                Fact::Text(f)
            }
            other => other,
        }
    }

    fn tuple(concept: &str, id: &str) -> Fact {
        Fact::Tuple(TupleDecl {
            concept: concept.to_string(),
            tuple_id: id.to_string(),
        })
    }

    #[test]
    fn test_duplicate_scales() {
        let extraction = Extraction {
            facts: vec![
                numeric("x:Sales", "period0", 3, 2_650_000),
                numeric("x:Sales", "period0", 0, 2_650_400),
            ],
            continuations: vec![],
        };
        let index = FactIndex::new(&extraction);
        assert_eq!(index.amount_with_scale("x:Sales", ContextRef::PERIOD0, 3), Some(2_650_000));
        assert_eq!(index.amount_with_scale("x:Sales", ContextRef::PERIOD0, 0), Some(2_650_400));
        assert_eq!(index.amount("x:Sales", ContextRef::PERIOD0), Some(2_650_400));
        assert_eq!(index.amount_with_scale("x:Sales", ContextRef::PERIOD0, -2), None);
        assert_eq!(index.amount("x:Sales", ContextRef::PERIOD1), None);
    }

    #[test]
    fn test_year_comparisons() {
        let extraction = Extraction {
            facts: vec![
                numeric("x:A", "balans0", 0, 10),
                numeric("x:A", "balans1", 0, 20),
                numeric("x:Disp", "period0", 0, -70_000),
            ],
            continuations: vec![],
        };
        let index = FactIndex::new(&extraction);
        assert_eq!(index.balance("x:A"), YearComparison::new(10, 20));
        assert!(index.period("x:A").is_empty());
        assert_eq!(index.amount("x:Disp", ContextRef::PERIOD0), Some(-70_000));
        assert_eq!(
            index.period_negated("x:Disp"),
            YearComparison {
                current: Some(70_000),
                previous: None
            }
        );
    }

    #[test]
    fn test_text_continued() {
        let extraction = Extraction {
            facts: vec![text("x:Events", "period0", "Första stycket.", Some("c1"))],
            continuations: vec![
                Continuation {
                    id: "c1".to_string(),
                    text: "Andra stycket.".to_string(),
                    continued_at: Some("c2".to_string()),
                },
                Continuation {
                    id: "c2".to_string(),
                    text: "Tredje.".to_string(),
                    continued_at: Some("c1".to_string()),
                },
            ],
        };
        let index = FactIndex::new(&extraction);
        assert_eq!(index.text("x:Events", ContextRef::PERIOD0), "Första stycket.");
        assert_eq!(
            index.text_continued("x:Events", ContextRef::PERIOD0),
            "Första stycket.\n\nAndra stycket.\n\nTredje."
        );
        assert_eq!(index.text_continued("x:Missing", ContextRef::PERIOD0), "");
    }

    #[test]
    fn test_group_members() {
        let extraction = Extraction {
            facts: vec![
                tuple("x:Tuple", "Tuple1"),
                tuple("x:Other", "Other1"),
                tuple("x:Tuple", "Tuple2"),
                member("x:First", "Tuple1", "Anna"),
                member("x:Last", "Tuple1", "Andersson"),
                member("x:First", "Tuple2", "Bo"),
            ],
            continuations: vec![],
        };
        let index = FactIndex::new(&extraction);
        let ids: Vec<_> = index.tuples_named("x:Tuple").map(|t| t.tuple_id.as_str()).collect();
        assert_eq!(ids, vec!["Tuple1", "Tuple2"]);

        let first = index.members("Tuple1");
        assert_eq!(first.len(), 2);
        assert_eq!(member_text(first, "x:Last"), "Andersson");
        let second = index.members("Tuple2");
        assert_eq!(member_text(second, "x:First"), "Bo");
        assert_eq!(member_text(second, "x:Last"), "");
        assert!(index.members("Other1").is_empty());
        assert_eq!(member_amount(first, "x:First"), None);
    }

    #[test]
    fn test_display() {
        let mut fact = numeric("x:Soliditet", "balans0", -2, 0);
        if let Fact::Numeric(f) = &mut fact {
            f.display = "33,7".to_string();
        }
        let extraction = Extraction {
            facts: vec![fact, numeric("x:Blank", "balans0", 0, 0)],
            continuations: vec![],
        };
        let index = FactIndex::new(&extraction);
        assert_eq!(index.display("x:Soliditet", ContextRef::BALANS0).as_deref(), Some("33,7"));
        assert_eq!(index.display("x:Soliditet", ContextRef::BALANS1), None);
    }

    #[test]
    fn test_equal_scales_take_first_match() {
        let extraction = Extraction {
            facts: vec![
                numeric("x:Sales", "period0", 0, 100),
                numeric("x:Sales", "period0", 3, 5_000),
                numeric("x:Sales", "period0", 0, 200),
            ],
            continuations: vec![],
        };
        let index = FactIndex::new(&extraction);
        assert_eq!(index.amount("x:Sales", ContextRef::PERIOD0), Some(100));
        assert_eq!(index.amount_with_scale("x:Sales", ContextRef::PERIOD0, 0), Some(100));
    }

    #[test]
    fn test_unreadable_facts() {
        let mut fact = numeric("x:Soliditet", "balans0", -2, 0);
        if let Fact::Numeric(f) = &mut fact {
            f.display = "33,7 %".to_string();
            f.amount = None;
        }
        let extraction = Extraction {
            facts: vec![numeric("x:A", "balans0", 0, 10), fact],
            continuations: vec![],
        };
        let index = FactIndex::new(&extraction);
        let concepts: Vec<_> = index.unreadable().iter().map(|f| f.concept.as_str()).collect();
        assert_eq!(concepts, vec!["x:Soliditet"]);
        assert_eq!(index.amount("x:Soliditet", ContextRef::BALANS0), None);
        assert_eq!(index.display("x:Soliditet", ContextRef::BALANS0).as_deref(), Some("33,7 %"));
    }
}
