//! Display conventions for numeric facts.
//!
//! The encoder turns a canonical amount into the displayed numeral and the
//! decoder reverses it. Both sides go through this module so the two stay
//! exact inverses.

pub const NUM_SPACE_COMMA: &str = "ixt:numspacecomma";
pub const NUM_COMMA: &str = "ixt:numcomma";
pub const NUM_DOT_DECIMAL: &str = "ixt:numdotdecimal";

/// The `format` attribute of a numeric fact.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NumberFormat {
    /// `1 234 567,5`
    #[default]
    SpaceComma,
    /// `1234567,5`
    Comma,
    /// `1,234,567.5`
    DotDecimal,
    /// No format attribute at all.
    Plain,
    Other(String),
}

impl NumberFormat {
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            None | Some("") => NumberFormat::Plain,
            Some(NUM_SPACE_COMMA) => NumberFormat::SpaceComma,
            Some(NUM_COMMA) => NumberFormat::Comma,
            Some(NUM_DOT_DECIMAL) => NumberFormat::DotDecimal,
            Some(other) => NumberFormat::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            NumberFormat::SpaceComma => Some(NUM_SPACE_COMMA),
            NumberFormat::Comma => Some(NUM_COMMA),
            NumberFormat::DotDecimal => Some(NUM_DOT_DECIMAL),
            NumberFormat::Plain => None,
            NumberFormat::Other(code) => Some(code),
        }
    }

    fn thousands_separator(&self) -> Option<char> {
        match self {
            NumberFormat::SpaceComma => Some(' '),
            NumberFormat::DotDecimal => Some(','),
            _ => None,
        }
    }
}

/// The displayed numeral for `amount` at `scale`. Always unsigned: the
/// sign travels in the `sign` attribute or outside the tag.
///
/// A positive scale divides and truncates, so `2 650 999` at scale 3 shows
/// as `2 650`.
pub fn display_amount(amount: i64, scale: i32, format: &NumberFormat) -> String {
    let magnitude = amount.unsigned_abs();
    let shown = if scale >= 0 {
        10u64
            .checked_pow(scale.unsigned_abs())
            .map_or(0, |factor| magnitude / factor)
    } else {
        10u64
            .checked_pow(scale.unsigned_abs())
            .map_or(u64::MAX, |factor| magnitude.saturating_mul(factor))
    };
    group_digits(&shown.to_string(), format.thousands_separator())
}

fn group_digits(digits: &str, separator: Option<char>) -> String {
    let Some(separator) = separator else {
        return digits.to_string();
    };
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

/// Reverse a displayed numeral into the unsigned canonical amount:
/// strip spacing, normalise the decimal mark, multiply by `10^scale` and
/// round half away from zero. Returns `None` for text that is not a number
/// or does not fit in an `i64`.
///
/// An empty numeral reads as zero. A leading `-` or `+` is ignored; the
/// `sign` attribute decides the sign.
pub fn parse_numeral(display: &str, format: &NumberFormat, scale: i32) -> Option<i64> {
    let mut cleaned: String = display
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{a0}')
        .collect();
    match format {
        NumberFormat::SpaceComma | NumberFormat::Comma => cleaned = cleaned.replace(',', "."),
        NumberFormat::DotDecimal => cleaned.retain(|c| c != ','),
        NumberFormat::Plain | NumberFormat::Other(_) => {}
    }
    let cleaned = cleaned.trim_start_matches(['-', '+']);
    if cleaned.is_empty() {
        return Some(0);
    }

    let (int_part, frac_part) = cleaned.split_once('.').unwrap_or((cleaned, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    // Move the decimal point `scale` places and keep what lies left of it.
    let digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes())
        .map(|b| b - b'0')
        .collect();
    let point = int_part.len() as i64 + i64::from(scale);
    let whole = usize::try_from(point).unwrap_or(0);

    let mut value: i128 = 0;
    for i in 0..whole {
        if value == 0 && i >= digits.len() {
            break;
        }
        let digit = digits.get(i).copied().unwrap_or(0);
        value = value.checked_mul(10)?.checked_add(i128::from(digit))?;
        if value > i128::from(i64::MAX) {
            return None;
        }
    }
    let rounding_digit = usize::try_from(point)
        .ok()
        .and_then(|p| digits.get(p))
        .copied()
        .unwrap_or(0);
    if rounding_digit >= 5 {
        value += 1;
    }
    i64::try_from(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_grouping() {
        let fmt = NumberFormat::SpaceComma;
        assert_eq!(display_amount(0, 0, &fmt), "0");
        assert_eq!(display_amount(999, 0, &fmt), "999");
        assert_eq!(display_amount(1000, 0, &fmt), "1 000");
        assert_eq!(display_amount(2_650_000, 0, &fmt), "2 650 000");
        assert_eq!(display_amount(-70_000, 0, &fmt), "70 000");
        assert_eq!(
            display_amount(2_650_000, 0, &NumberFormat::DotDecimal),
            "2,650,000"
        );
        assert_eq!(display_amount(2_650_000, 0, &NumberFormat::Comma), "2650000");
        assert_eq!(display_amount(2_650_000, 0, &NumberFormat::Plain), "2650000");
    }

    #[test]
    fn test_display_scaled() {
        let fmt = NumberFormat::SpaceComma;
        assert_eq!(display_amount(2_650_000, 3, &fmt), "2 650");
        assert_eq!(display_amount(2_650_999, 3, &fmt), "2 650");
        assert_eq!(display_amount(999, 3, &fmt), "0");
        assert_eq!(display_amount(34, -2, &NumberFormat::Comma), "3400");
        assert_eq!(display_amount(i64::MIN, 0, &NumberFormat::Plain), "9223372036854775808");
    }

    #[test]
    fn test_parse_plain_numerals() {
        let fmt = NumberFormat::SpaceComma;
        assert_eq!(parse_numeral("2 650 000", &fmt, 0), Some(2_650_000));
        assert_eq!(parse_numeral("2\u{a0}650\u{a0}000", &fmt, 0), Some(2_650_000));
        assert_eq!(parse_numeral("", &fmt, 0), Some(0));
        assert_eq!(parse_numeral("  ", &fmt, 0), Some(0));
        assert_eq!(parse_numeral("-1 500", &fmt, 0), Some(1500));
        assert_eq!(parse_numeral("+1 500", &fmt, 0), Some(1500));
        assert_eq!(
            parse_numeral("2,650,000", &NumberFormat::DotDecimal, 0),
            Some(2_650_000)
        );
    }

    #[test]
    fn test_parse_scaled_numerals() {
        let fmt = NumberFormat::SpaceComma;
        assert_eq!(parse_numeral("2 650", &fmt, 3), Some(2_650_000));
        assert_eq!(parse_numeral("2 650,5", &fmt, 3), Some(2_650_500));
        assert_eq!(parse_numeral("33,7", &NumberFormat::Comma, -2), Some(0));
        assert_eq!(parse_numeral("50", &NumberFormat::Comma, -2), Some(1));
        assert_eq!(parse_numeral("49", &NumberFormat::Comma, -2), Some(0));
        assert_eq!(parse_numeral("1234,5", &NumberFormat::Comma, 0), Some(1235));
        assert_eq!(parse_numeral("1234,4", &NumberFormat::Comma, 0), Some(1234));
        assert_eq!(parse_numeral("0,005", &NumberFormat::Comma, 2), Some(1));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let fmt = NumberFormat::SpaceComma;
        assert_eq!(parse_numeral("abc", &fmt, 0), None);
        assert_eq!(parse_numeral("1.2.3", &fmt, 0), None);
        assert_eq!(parse_numeral(",", &fmt, 0), None);
        assert_eq!(parse_numeral("99999999999999999999", &fmt, 0), None);
        assert_eq!(parse_numeral("9223372036854775807", &fmt, 0), Some(i64::MAX));
    }

    #[test]
    fn test_format_codes() {
        for format in [
            NumberFormat::SpaceComma,
            NumberFormat::Comma,
            NumberFormat::DotDecimal,
            NumberFormat::Plain,
        ] {
            assert_eq!(NumberFormat::from_code(format.code()), format);
        }
        assert_eq!(
            NumberFormat::from_code(Some("ixt:zerodash")),
            NumberFormat::Other("ixt:zerodash".to_string())
        );
    }
}
