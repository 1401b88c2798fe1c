//! Currency unformatting and decimal rounding for pricing-API values.
//!
//! Upstream fee fields arrive as numbers, as display strings such as
//! `"$1,250.00"`, or not at all. Everything here is total: a value that
//! cannot be read as a finite number comes back as `None`.

use crate::domain::ports::NumericParser;
use crate::domain::model::RawRate;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

static BRACKETED: OnceLock<Regex> = OnceLock::new();
static CRUFT: OnceLock<Regex> = OnceLock::new();
static LEADING_NUMBER: OnceLock<Regex> = OnceLock::new();

fn bracketed() -> &'static Regex {
    // "(1,200.50)" reads as a negative amount; the opening bracket must be
    // followed by a digit.
    BRACKETED.get_or_init(|| Regex::new(r"\((\d.*)\)").expect("valid bracket pattern"))
}

fn cruft() -> &'static Regex {
    CRUFT.get_or_init(|| Regex::new(r"[^0-9.\-]").expect("valid cruft pattern"))
}

fn leading_number() -> &'static Regex {
    LEADING_NUMBER
        .get_or_init(|| Regex::new(r"^-?(\d+\.?\d*|\.\d+)").expect("valid number pattern"))
}

/// Strip currency formatting and read the remaining numeric prefix.
pub fn unformat(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => unformat_str(s),
        _ => None,
    }
}

fn unformat_str(raw: &str) -> Option<f64> {
    let signed = bracketed().replacen(raw, 1, "-$1");
    let stripped = cruft().replace_all(&signed, "");
    let number = leading_number().find(&stripped)?;

    number
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Round half away from zero at `places` decimal places.
///
/// The shift goes through the decimal exponent rather than multiplying by a
/// power of ten, so `1.0005` rounds to `1.001` and not `1.0`.
pub fn round_to(value: f64, places: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let shifted = format!("{}e{}", value, places)
        .parse::<f64>()
        .unwrap_or(value * 10f64.powi(places));
    let rounded = shifted.round();

    format!("{}e{}", rounded, -places)
        .parse::<f64>()
        .unwrap_or(rounded / 10f64.powi(places))
}

/// Read `field` from a raw rate, falling back to `default` when it is
/// missing, `null` or not numeric, and round to whole dollars.
pub fn numeric_or_default<P: NumericParser + ?Sized>(
    parser: &P,
    raw: &RawRate,
    field: &str,
    default: f64,
) -> i64 {
    let value = raw
        .field(field)
        .and_then(|v| parser.parse(v))
        .unwrap_or(default);

    round_to(value, 0) as i64
}

/// The default parser: accounting-style unformatting of currency strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccountingParser;

impl NumericParser for AccountingParser {
    fn parse(&self, value: &Value) -> Option<f64> {
        unformat(value)
    }
}
