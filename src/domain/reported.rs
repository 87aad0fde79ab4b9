// Numeric values as the aggregation backend reports them
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Marker the backend uses for metrics it could not compute.
pub const NOT_AVAILABLE: &str = "N/A";

/// A metric that is either a number or explicitly not available.
///
/// The backend mixes numbers, numeric strings and the `"N/A"` marker in the
/// same field. Callers must branch on the variant before doing arithmetic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reported {
    Value(f64),
    NotAvailable,
}

impl Reported {
    /// Parse a raw field value; anything other than the marker goes through
    /// the lenient number parser.
    pub fn parse(raw: &str) -> Self {
        if raw.trim() == NOT_AVAILABLE {
            Reported::NotAvailable
        } else {
            Reported::Value(parse_leading_float(raw))
        }
    }
}

impl Serialize for Reported {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Reported::Value(v) => serializer.serialize_f64(*v),
            Reported::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

struct ReportedVisitor;

impl<'de> Visitor<'de> for ReportedVisitor {
    type Value = Reported;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number, a numeric string or \"N/A\"")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Reported, E> {
        Ok(Reported::Value(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Reported, E> {
        Ok(Reported::Value(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Reported, E> {
        Ok(Reported::Value(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Reported, E> {
        Ok(Reported::parse(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Reported, E> {
        Ok(Reported::NotAvailable)
    }
}

impl<'de> Deserialize<'de> for Reported {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ReportedVisitor)
    }
}

struct LenientNumberVisitor;

impl<'de> Visitor<'de> for LenientNumberVisitor {
    type Value = f64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number or a numeric string")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
        Ok(parse_leading_float(v))
    }
}

/// serde `deserialize_with` helper for fields that may arrive as numbers or
/// numeric strings. Unparsable text becomes NaN.
pub fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    deserializer.deserialize_any(LenientNumberVisitor)
}

/// Parse the longest leading decimal number in `raw`, ignoring leading
/// whitespace and anything after the number (such as a `%` suffix).
/// Returns NaN when no number is present.
pub fn parse_leading_float(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if digits > 0 || frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return f64::NAN;
    }

    // optional exponent, only consumed when followed by digits
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().unwrap_or(f64::NAN)
}

/// Render a number the way a browser prints it in a template string:
/// whole values without a fractional part.
pub fn format_number(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

/// Render a number with thousands grouping and at most three fraction digits.
pub fn format_grouped(v: f64) -> String {
    if !v.is_finite() {
        return format_number(v);
    }

    let fixed = format!("{:.3}", v.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = v < 0.0 && (int_part != "0" || !frac_part.is_empty());
    let sign = if negative { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}
