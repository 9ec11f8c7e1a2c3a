use chrono::format::{parse_and_remainder, Item, Numeric, Parsed, StrftimeItems};
use chrono::{NaiveDate, NaiveTime};
use std::iter;

pub const DEFAULT_DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d"];
pub const DEFAULT_TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];

pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";
pub const CANONICAL_TIME_FORMAT: &str = "%H:%M:%S";

/// Splits a comma-separated format list, dropping blank entries. An empty
/// result falls back to `defaults`.
pub fn parse_format_list(raw: Option<&str>, defaults: &[&str]) -> Vec<String> {
    let formats: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::to_string)
        .collect();
    clean_format_list(&formats, defaults)
}

/// Trims each entry and drops blank ones. An empty result falls back to
/// `defaults`.
pub fn clean_format_list(formats: &[String], defaults: &[&str]) -> Vec<String> {
    let formats: Vec<String> = formats
        .iter()
        .map(|format| format.trim())
        .filter(|format| !format.is_empty())
        .map(str::to_string)
        .collect();

    if formats.is_empty() {
        defaults.iter().map(|format| format.to_string()).collect()
    } else {
        formats
    }
}

/// Applies `format` to the whole of `value`. `%Y` only matches exactly four
/// digits, so `3/5/23` is not read as year 23.
fn parse_fields(value: &str, format: &str) -> Option<Parsed> {
    let mut parsed = Parsed::new();
    let mut rest = value;

    for item in StrftimeItems::new(format) {
        match item {
            Item::Error => return None,
            Item::Numeric(Numeric::Year, _) => {
                let digits = rest
                    .get(..4)
                    .filter(|digits| digits.bytes().all(|b| b.is_ascii_digit()))?;
                parsed.set_year(digits.parse().ok()?).ok()?;
                rest = &rest[4..];
            }
            item => {
                rest = parse_and_remainder(&mut parsed, rest, iter::once(item)).ok()?;
            }
        }
    }

    rest.is_empty().then_some(parsed)
}

/// Fields the format leaves out default to 1900-01-01.
fn parse_date(value: &str, format: &str) -> Option<NaiveDate> {
    let mut parsed = parse_fields(value, format)?;
    if let Ok(date) = parsed.to_naive_date() {
        return Some(date);
    }

    // Setters refuse to overwrite a parsed field, so only gaps are filled.
    let _ = parsed.set_month(1);
    let _ = parsed.set_day(1);
    if let Ok(date) = parsed.to_naive_date() {
        return Some(date);
    }
    let _ = parsed.set_year(1900);
    parsed.to_naive_date().ok()
}

/// Fields the format leaves out default to zero.
fn parse_time(value: &str, format: &str) -> Option<NaiveTime> {
    let mut parsed = parse_fields(value, format)?;
    if let Ok(time) = parsed.to_naive_time() {
        return Some(time);
    }

    let _ = parsed.set_hour(0);
    let _ = parsed.set_minute(0);
    parsed.to_naive_time().ok()
}

fn first_match<T>(
    value: &str,
    formats: &[String],
    parse: impl Fn(&str, &str) -> Option<T>,
) -> Option<T> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    formats.iter().find_map(|format| parse(value, format.as_str()))
}

/// `YYYY-MM-DD` for the first format that parses the whole value.
pub fn normalize_date(value: &str, formats: &[String]) -> Option<String> {
    first_match(value, formats, parse_date)
        .map(|date| date.format(CANONICAL_DATE_FORMAT).to_string())
}

/// `HH:MM:SS` for the first format that parses the whole value.
pub fn normalize_time(value: &str, formats: &[String]) -> Option<String> {
    first_match(value, formats, parse_time)
        .map(|time| time.format(CANONICAL_TIME_FORMAT).to_string())
}
