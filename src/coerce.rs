//! Field coercion from the sheet's CSV strings into typed values.
//!
//! Every function here is total: a value that cannot be converted comes back
//! as `None` so a single bad cell never aborts a load. Blank numeric cells
//! read as zero.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse a Brazilian currency string like `"R$ 1.234,56"` into `1234.56`.
/// Strips the `R$` marker and every `.` thousands separator, then treats the
/// first `,` as the decimal point. A blank cell is zero.
pub fn parse_currency(raw: &str) -> Option<f64> {
    let s = raw.replacen("R$", "", 1).replace('.', "").replacen(',', ".", 1);
    let s = s.trim();
    if s.is_empty() {
        return Some(0.0);
    }
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, s),
    };
    let val: f64 = digits.parse().ok()?;
    if !val.is_finite() {
        return None;
    }
    Some(if negative { -val } else { val })
}

/// Parse a numeric code column (branch codes). Accepts integral floats like
/// `"12.0"` as sheets sometimes export them. A blank cell is code 0.
pub fn parse_code(raw: &str) -> Option<i64> {
    let s = raw.trim();
    if s.is_empty() {
        return Some(0);
    }
    if let Ok(n) = s.parse::<i64>() {
        return Some(n);
    }
    let f: f64 = s.parse().ok()?;
    if f.is_finite() && f.fract() == 0.0 {
        Some(f as i64)
    } else {
        None
    }
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d"];

/// Parse a date column. Accepts ISO dates, ISO/RFC 3339 datetimes (date part
/// kept) and `DD/MM/YYYY`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .map(|dt| dt.date())
        .ok()
}

/// Empty or whitespace-only optional text columns load as `None`.
pub fn optional_text(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_currency_brl() {
        assert_eq!(parse_currency("R$ 1.234,56"), Some(1234.56));
        assert_eq!(parse_currency("R$ 1.000.000,00"), Some(1_000_000.0));
        assert_eq!(parse_currency("R$0,99"), Some(0.99));
        assert_eq!(parse_currency("250"), Some(250.0));
    }

    #[test]
    fn test_parse_currency_negative() {
        assert_eq!(parse_currency("-R$ 50,00"), Some(-50.0));
        assert_eq!(parse_currency("R$ -1.500,10"), Some(-1500.1));
    }

    #[test]
    fn test_parse_currency_unavailable() {
        assert_eq!(parse_currency("abc"), None);
        assert_eq!(parse_currency("-"), None);
        assert_eq!(parse_currency("inf"), None);
        assert_eq!(parse_currency("NaN"), None);
    }

    #[test]
    fn test_parse_currency_blank_is_zero() {
        assert_eq!(parse_currency(""), Some(0.0));
        assert_eq!(parse_currency("   "), Some(0.0));
        assert_eq!(parse_currency("R$"), Some(0.0));
        assert_eq!(parse_currency("R$ "), Some(0.0));
    }

    #[test]
    fn test_parse_code() {
        assert_eq!(parse_code("12"), Some(12));
        assert_eq!(parse_code(" 7 "), Some(7));
        assert_eq!(parse_code("3.0"), Some(3));
        assert_eq!(parse_code("3.5"), None);
        assert_eq!(parse_code("x1"), None);
    }

    #[test]
    fn test_parse_code_blank_is_zero() {
        assert_eq!(parse_code(""), Some(0));
        assert_eq!(parse_code("  "), Some(0));
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(1990, 5, 17);
        assert_eq!(parse_date("1990-05-17"), expected);
        assert_eq!(parse_date("17/05/1990"), expected);
        assert_eq!(parse_date("1990-05-17T10:00:00"), expected);
        assert_eq!(parse_date("1990-05-17T10:00:00Z"), expected);
    }

    #[test]
    fn test_parse_date_invalid() {
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("31/02/1990"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(Some("  ".into())), None);
        assert_eq!(optional_text(None), None);
        assert_eq!(optional_text(Some(" MG-1 ".into())), Some("MG-1".into()));
    }
}
