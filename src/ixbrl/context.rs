//! Reporting contexts and measurement units.
//!
//! Every fact points at one of a closed set of contexts: `period0..period3`
//! are the fiscal year and the three years before it, `balans0..balans3` are
//! the closing dates of those years.
use chrono::{Months, NaiveDate};
use log::warn;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use strum::{EnumIter, IntoEnumIterator};

pub const ENTITY_SCHEME: &str = "http://www.bolagsverket.se";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// How many fiscal years back a context lies.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
)]
pub enum YearIndex {
    Current,
    Previous,
    TwoBack,
    ThreeBack,
}

impl YearIndex {
    pub fn offset(self) -> u32 {
        match self {
            YearIndex::Current => 0,
            YearIndex::Previous => 1,
            YearIndex::TwoBack => 2,
            YearIndex::ThreeBack => 3,
        }
    }

    pub fn from_offset(offset: usize) -> Option<Self> {
        YearIndex::iter().nth(offset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextRef {
    /// `periodN`: the whole fiscal year N years back.
    Duration(YearIndex),
    /// `balansN`: the closing date of that year.
    Instant(YearIndex),
}

impl ContextRef {
    pub const PERIOD0: ContextRef = ContextRef::Duration(YearIndex::Current);
    pub const PERIOD1: ContextRef = ContextRef::Duration(YearIndex::Previous);
    pub const BALANS0: ContextRef = ContextRef::Instant(YearIndex::Current);
    pub const BALANS1: ContextRef = ContextRef::Instant(YearIndex::Previous);
    pub const BALANS2: ContextRef = ContextRef::Instant(YearIndex::TwoBack);

    pub fn as_str(&self) -> &'static str {
        match self {
            ContextRef::Duration(YearIndex::Current) => "period0",
            ContextRef::Duration(YearIndex::Previous) => "period1",
            ContextRef::Duration(YearIndex::TwoBack) => "period2",
            ContextRef::Duration(YearIndex::ThreeBack) => "period3",
            ContextRef::Instant(YearIndex::Current) => "balans0",
            ContextRef::Instant(YearIndex::Previous) => "balans1",
            ContextRef::Instant(YearIndex::TwoBack) => "balans2",
            ContextRef::Instant(YearIndex::ThreeBack) => "balans3",
        }
    }

    pub fn year(&self) -> YearIndex {
        match self {
            ContextRef::Duration(y) | ContextRef::Instant(y) => *y,
        }
    }

    pub fn is_instant(&self) -> bool {
        matches!(self, ContextRef::Instant(_))
    }
}

impl fmt::Display for ContextRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ContextRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (instant, digits) = if let Some(rest) = s.strip_prefix("period") {
            (false, rest)
        } else if let Some(rest) = s.strip_prefix("balans") {
            (true, rest)
        } else {
            return Err(format!("unknown context: {}", s));
        };
        let year = digits
            .parse::<usize>()
            .ok()
            .and_then(YearIndex::from_offset)
            .ok_or_else(|| format!("unknown context: {}", s))?;
        Ok(if instant {
            ContextRef::Instant(year)
        } else {
            ContextRef::Duration(year)
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Unit {
    Sek,
    Percent,
    Employees,
}

impl Unit {
    pub fn id(&self) -> &'static str {
        match self {
            Unit::Sek => "SEK",
            Unit::Percent => "procent",
            Unit::Employees => "antal-anstallda",
        }
    }

    pub fn measure(&self) -> &'static str {
        match self {
            Unit::Sek => "iso4217:SEK",
            Unit::Percent => "xbrli:pure",
            Unit::Employees => "se-k2-type:AntalAnstallda",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Period {
    Duration { start: String, end: String },
    Instant(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    pub reference: ContextRef,
    pub period: Period,
}

/// The contexts declared for one document, in declaration order.
#[derive(Debug, Clone)]
pub struct ContextRegistry {
    org_nr: String,
    contexts: Vec<Context>,
}

impl ContextRegistry {
    /// Derive contexts from the fiscal year. `history_years` is the number of
    /// fiscal years covered (current included); it is clamped to 2..=4.
    pub fn new(org_nr: &str, start: &str, end: &str, history_years: usize) -> Self {
        let history_years = history_years.clamp(2, 4);
        let years =
            FiscalDates::parse(start, end).unwrap_or_else(|| FiscalDates::raw(start, end));

        let mut contexts = Vec::with_capacity(history_years * 2);
        let mut push = |reference: ContextRef| {
            let (start, end) = years.shifted(reference.year());
            let period = if reference.is_instant() {
                Period::Instant(end)
            } else {
                Period::Duration { start, end }
            };
            contexts.push(Context { reference, period });
        };

        push(ContextRef::PERIOD0);
        push(ContextRef::BALANS0);
        push(ContextRef::BALANS1);
        push(ContextRef::PERIOD1);
        for year in YearIndex::iter().skip(2).take(history_years - 2) {
            push(ContextRef::Duration(year));
            push(ContextRef::Instant(year));
        }

        Self {
            org_nr: org_nr.to_string(),
            contexts,
        }
    }

    pub fn org_nr(&self) -> &str {
        &self.org_nr
    }

    pub fn contexts(&self) -> &[Context] {
        &self.contexts
    }

    pub fn get(&self, reference: ContextRef) -> Option<&Context> {
        self.contexts.iter().find(|c| c.reference == reference)
    }

    pub fn units(&self) -> impl Iterator<Item = Unit> {
        Unit::iter()
    }
}

enum FiscalDates {
    Parsed(NaiveDate, NaiveDate),
    Raw(String, String),
}

impl FiscalDates {
    fn parse(start: &str, end: &str) -> Option<Self> {
        let s = NaiveDate::parse_from_str(start, DATE_FORMAT).ok()?;
        let e = NaiveDate::parse_from_str(end, DATE_FORMAT).ok()?;
        Some(FiscalDates::Parsed(s, e))
    }

    fn raw(start: &str, end: &str) -> Self {
        warn!(
            "Fiscal year {}..{} is not a pair of YYYY-MM-DD dates; earlier periods are left empty",
            start, end
        );
        FiscalDates::Raw(start.to_string(), end.to_string())
    }

    fn shifted(&self, year: YearIndex) -> (String, String) {
        match self {
            FiscalDates::Parsed(s, e) => (shift_back(*s, year), shift_back(*e, year)),
            FiscalDates::Raw(s, e) if year == YearIndex::Current => (s.clone(), e.clone()),
            FiscalDates::Raw(..) => (String::new(), String::new()),
        }
    }
}

/// Same day of month, `year` years earlier. Feb 29 lands on Feb 28.
fn shift_back(date: NaiveDate, year: YearIndex) -> String {
    date.checked_sub_months(Months::new(12 * year.offset()))
        .map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// `date` moved `years` fiscal years back, or `None` for a malformed date.
pub fn years_before(date: &str, years: u32) -> Option<String> {
    let date = NaiveDate::parse_from_str(date, DATE_FORMAT).ok()?;
    date.checked_sub_months(Months::new(12 * years))
        .map(|d| d.format(DATE_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn duration(registry: &ContextRegistry, reference: ContextRef) -> (String, String) {
        match &registry.get(reference).unwrap().period {
            Period::Duration { start, end } => (start.clone(), end.clone()),
            other => panic!("expected duration, got {:?}", other),
        }
    }

    fn instant(registry: &ContextRegistry, reference: ContextRef) -> String {
        match &registry.get(reference).unwrap().period {
            Period::Instant(date) => date.clone(),
            other => panic!("expected instant, got {:?}", other),
        }
    }

    #[test]
    fn test_calendar_year_contexts() {
        let registry = ContextRegistry::new("556000-0000", "2016-01-01", "2016-12-31", 2);

        assert_eq!(
            duration(&registry, ContextRef::PERIOD0),
            ("2016-01-01".to_string(), "2016-12-31".to_string())
        );
        assert_eq!(
            duration(&registry, ContextRef::PERIOD1),
            ("2015-01-01".to_string(), "2015-12-31".to_string())
        );
        assert_eq!(instant(&registry, ContextRef::BALANS0), "2016-12-31");
        assert_eq!(instant(&registry, ContextRef::BALANS1), "2015-12-31");
        assert!(registry.get(ContextRef::BALANS2).is_none());
    }

    #[test]
    fn test_declaration_order() {
        let registry = ContextRegistry::new("556000-0000", "2016-01-01", "2016-12-31", 4);
        let ids: Vec<_> = registry
            .contexts()
            .iter()
            .map(|c| c.reference.as_str())
            .collect();
        assert_eq!(
            ids,
            vec![
                "period0", "balans0", "balans1", "period1", "period2", "balans2", "period3",
                "balans3"
            ]
        );
    }

    #[test]
    fn test_broken_fiscal_year() {
        let registry = ContextRegistry::new("556000-0000", "2019-07-01", "2020-06-30", 3);
        assert_eq!(
            duration(&registry, ContextRef::Duration(YearIndex::TwoBack)),
            ("2017-07-01".to_string(), "2018-06-30".to_string())
        );
        assert_eq!(instant(&registry, ContextRef::BALANS2), "2018-06-30");
    }

    #[test]
    fn test_leap_day_clamps() {
        let registry = ContextRegistry::new("556000-0000", "2019-03-01", "2020-02-29", 2);
        assert_eq!(instant(&registry, ContextRef::BALANS1), "2019-02-28");
        assert_eq!(years_before("2020-02-29", 1).as_deref(), Some("2019-02-28"));
        assert_eq!(years_before("20200229", 1), None);
    }

    #[test]
    fn test_malformed_dates() {
        let registry = ContextRegistry::new("556000-0000", "2016", "bogus", 2);
        assert_eq!(
            duration(&registry, ContextRef::PERIOD0),
            ("2016".to_string(), "bogus".to_string())
        );
        assert_eq!(instant(&registry, ContextRef::BALANS0), "bogus");
        assert_eq!(instant(&registry, ContextRef::BALANS1), "");
    }

    #[test]
    fn test_context_ref_parsing() {
        for year in YearIndex::iter() {
            for reference in [ContextRef::Duration(year), ContextRef::Instant(year)] {
                assert_eq!(reference.as_str().parse::<ContextRef>(), Ok(reference));
            }
        }
        assert!("period4".parse::<ContextRef>().is_err());
        assert!("balans".parse::<ContextRef>().is_err());
        assert!("instant0".parse::<ContextRef>().is_err());
    }

    #[test]
    fn test_units() {
        let registry = ContextRegistry::new("556000-0000", "2016-01-01", "2016-12-31", 2);
        let units: Vec<_> = registry.units().map(|u| (u.id(), u.measure())).collect();
        assert_eq!(
            units,
            vec![
                ("SEK", "iso4217:SEK"),
                ("procent", "xbrli:pure"),
                ("antal-anstallda", "se-k2-type:AntalAnstallda")
            ]
        );
    }
}
