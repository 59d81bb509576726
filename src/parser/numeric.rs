use crate::models::RawCell;
use regex::Regex;
use std::sync::OnceLock;

/// Characters dropped before parsing: whitespace (including non-breaking
/// spaces), currency symbols and percent signs.
const NOISE_PATTERN: &str = r"[\s\p{Sc}%]";

static NOISE_REGEX: OnceLock<Regex> = OnceLock::new();

/// How a lone separator in a text cell is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberKind {
    /// Prices: `"1.234"` groups thousands
    Amount,
    /// Percent variations: a lone separator is always the decimal mark
    Percent,
}

/// Coerces a cell to a number, returning `None` when it cannot be read as one.
///
/// Numeric cells pass through. Text cells are cleaned of display formatting and
/// read with Colombian conventions in mind: `.` usually groups thousands and
/// `,` marks decimals, but either separator is accepted.
pub fn coerce_number(cell: &RawCell) -> Option<f64> {
    coerce_cell(cell, NumberKind::Amount)
}

/// Coerces a variation cell. Unlike [`coerce_number`], `"-5.260"` reads as
/// -5.26, since percent changes never need thousands grouping.
pub fn coerce_percent(cell: &RawCell) -> Option<f64> {
    coerce_cell(cell, NumberKind::Percent)
}

fn coerce_cell(cell: &RawCell, kind: NumberKind) -> Option<f64> {
    match cell {
        RawCell::Number(n) if n.is_finite() => Some(*n),
        RawCell::Text(s) => parse_with(s, kind),
        _ => None,
    }
}

/// Parses a display-formatted number such as `"$ 1.234"`, `"-5,3 %"` or
/// `"1.234.567,89"`.
pub fn parse_formatted_number(raw: &str) -> Option<f64> {
    parse_with(raw, NumberKind::Amount)
}

/// Parses a display-formatted percentage such as `"-5.260 %"` or `"12,5%"`.
pub fn parse_formatted_percent(raw: &str) -> Option<f64> {
    parse_with(raw, NumberKind::Percent)
}

fn parse_with(raw: &str, kind: NumberKind) -> Option<f64> {
    let noise = NOISE_REGEX
        .get_or_init(|| Regex::new(NOISE_PATTERN).expect("NOISE_PATTERN is a valid regex pattern"));
    let cleaned = noise.replace_all(raw, "");
    if cleaned.is_empty() {
        return None;
    }

    let normalized = normalize_separators(&cleaned, kind)?;
    normalized.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Rewrites grouping and decimal separators into plain `1234.5` form.
///
/// - both `.` and `,` present: the last one is the decimal mark;
/// - one kind repeated: thousands grouping;
/// - one occurrence followed by exactly three digits after a short, non-zero
///   integer part: thousands grouping (`"1.234"` is 1234), amounts only;
/// - otherwise a single separator is the decimal mark.
fn normalize_separators(s: &str, kind: NumberKind) -> Option<String> {
    let dots = s.matches('.').count();
    let commas = s.matches(',').count();

    match (dots, commas) {
        (0, 0) => Some(s.to_string()),
        (d, c) if d > 0 && c > 0 => {
            let last_dot = s.rfind('.')?;
            let last_comma = s.rfind(',')?;
            let (decimal, grouping, decimal_count) = if last_dot > last_comma {
                ('.', ',', d)
            } else {
                (',', '.', c)
            };
            if decimal_count > 1 {
                return None;
            }
            Some(s.replace(grouping, "").replace(decimal, "."))
        }
        (d, c) => {
            let separator = if d > 0 { '.' } else { ',' };
            let count = d + c;
            if count > 1 {
                return Some(s.replace(separator, ""));
            }

            let (integer, fraction) = s.split_once(separator)?;
            let integer_digits = integer.trim_start_matches(['-', '+']);
            let is_grouping = kind == NumberKind::Amount
                && fraction.len() == 3
                && fraction.chars().all(|ch| ch.is_ascii_digit())
                && (1..=3).contains(&integer_digits.len())
                && !integer_digits.starts_with('0');

            if is_grouping {
                Some(format!("{integer}{fraction}"))
            } else {
                Some(format!("{integer}.{fraction}"))
            }
        }
    }
}
