use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

pub const UNAVAILABLE: &str = "Indisponível";

fn non_digits() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^0-9]").unwrap())
}

fn cpf_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([0-9]{3})([0-9]{3})([0-9]{3})([0-9]{2})$").unwrap())
}

fn cnpj_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([0-9]{2})([0-9]{3})([0-9]{3})([0-9]{4})([0-9]{2})$").unwrap())
}

/// Format a CPF (11 digits) as `123.456.789-01` or a CNPJ (14 digits) as
/// `12.345.678/9012-34`. Any other digit count returns the input unchanged.
pub fn tax_id(raw: &str) -> String {
    let digits = non_digits().replace_all(raw, "");
    match digits.len() {
        11 => cpf_pattern().replace(&digits, "$1.$2.$3-$4").into_owned(),
        14 => cnpj_pattern().replace(&digits, "$1.$2.$3/$4-$5").into_owned(),
        _ => raw.to_string(),
    }
}

/// Format a float as Brazilian reais: R$ 1.234,56
pub fn brl(val: f64) -> String {
    let negative = val < 0.0;
    let abs = val.abs();
    let cents = format!("{:.2}", abs);
    let (int_part, dec_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut grouped = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    if negative && abs >= 0.005 {
        format!("-R$ {grouped},{dec_part}")
    } else {
        format!("R$ {grouped},{dec_part}")
    }
}

/// Currency for a coerced field; the sentinel renders as unavailable.
pub fn money(val: Option<f64>) -> String {
    val.map(brl).unwrap_or_else(|| UNAVAILABLE.to_string())
}

/// Dates display as DD/MM/YYYY.
pub fn date(val: Option<NaiveDate>) -> String {
    val.map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| UNAVAILABLE.to_string())
}

pub fn code(val: Option<i64>) -> String {
    val.map(|c| c.to_string()).unwrap_or_else(|| UNAVAILABLE.to_string())
}
