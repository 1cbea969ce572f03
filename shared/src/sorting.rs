//! Ordering of bills for display: most recent first.
//!
//! Dates are parsed to calendar dates and compared as such. Bills whose date
//! cannot be parsed go after every dated bill, ordered by descending string
//! comparison. Ties keep their input order.

use crate::Bill;
use chrono::NaiveDate;
use std::cmp::Reverse;

/// Parse a bill date: `2004-04-04`, `4 Avr. 04`, `22 Nov 2021`
pub fn parse_bill_date(date: &str) -> Option<NaiveDate> {
    let date = date.trim();
    if date.is_empty() {
        return None;
    }

    if let Ok(iso) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(iso);
    }

    let parts: Vec<&str> = date.split_whitespace().collect();
    if parts.len() != 3 {
        return None;
    }

    let day = parts[0].parse::<u32>().ok()?;
    let month = month_from_abbreviation(parts[1])?;
    let mut year = parts[2].trim_end_matches('.').parse::<i32>().ok()?;
    if year < 100 {
        year += 2000;
    }

    NaiveDate::from_ymd_opt(year, month, day)
}

// "jui" alone is left out: it is the truncation of both juin and juillet.
fn month_from_abbreviation(token: &str) -> Option<u32> {
    let token = token.trim_end_matches('.').to_lowercase();
    let month = match token.as_str() {
        "jan" | "janv" | "janvier" | "january" => 1,
        "fév" | "fev" | "févr" | "fevr" | "février" | "feb" | "february" => 2,
        "mar" | "mars" | "march" => 3,
        "avr" | "avril" | "apr" | "april" => 4,
        "mai" | "may" => 5,
        "juin" | "jun" | "june" => 6,
        "juil" | "juillet" | "jul" | "july" => 7,
        "aoû" | "aou" | "août" | "aout" | "aug" | "august" => 8,
        "sep" | "sept" | "septembre" | "september" => 9,
        "oct" | "octobre" | "october" => 10,
        "nov" | "novembre" | "november" => 11,
        "déc" | "dec" | "décembre" | "decembre" | "december" => 12,
        _ => return None,
    };
    Some(month)
}

/// Sort bills from the most recent to the oldest
pub fn sort_bills_by_date_desc(bills: &mut [Bill]) {
    bills.sort_by_cached_key(|bill| match parse_bill_date(&bill.date) {
        Some(date) => (Reverse(Some(date)), Reverse(String::new())),
        None => (Reverse(None), Reverse(bill.date.clone())),
    });
}
