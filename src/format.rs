//! pt-BR display formatting used by the widgets.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

pub const PLACEHOLDER: &str = "—";

/// `R$ 1.234,56`; anything that is not a finite number renders as `—`.
pub fn brl(v: f64) -> String {
    if !v.is_finite() {
        return PLACEHOLDER.to_string();
    }

    let fixed = format!("{:.2}", v.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    // -0.001 rounds to 0,00 and must not print a sign
    let sign = if v < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}R$ {grouped},{frac_part}")
}

/// Two decimals, comma separator, no grouping: what the freight input expects.
pub fn decimal_comma(v: f64) -> String {
    format!("{:.2}", v).replace('.', ",")
}

pub fn quantity(q: f64) -> String {
    if !q.is_finite() {
        PLACEHOLDER.to_string()
    } else if q.fract() == 0.0 {
        format!("{}", q as i64)
    } else {
        format!("{}", q)
    }
}

/// Renders dates as `YYYY-MM-DD`. Inputs with an offset keep their own
/// calendar day. Unrecognised text passes through untouched.
pub fn date(raw: Option<&str>) -> String {
    let Some(s) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return PLACEHOLDER.to_string();
    };

    parse_day(s)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| s.to_string())
}

fn parse_day(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    for fmt in ["%Y-%m-%d", "%d/%m/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    None
}

pub fn refreshed_label<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("Atualizado: {}", at.format("%H:%M:%S"))
}
