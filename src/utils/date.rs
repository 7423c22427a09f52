//! Conversion between the human-entry DD/MM/YYYY form and the canonical
//! YYYY-MM-DD storage form, plus the rolling eligibility cutoff.
//!
//! Conversion is total: strings that parse in neither form are returned
//! unchanged, matching how malformed historical dates are kept verbatim in
//! the ledger.

use chrono::{Months, NaiveDate, Utc};

/// The eligibility window reaches back this far from today.
pub const ELIGIBILITY_MONTHS: u32 = 48;

/// DD/MM/YYYY (or DD.MM.YYYY) -> YYYY-MM-DD; anything unparseable passes
/// through unchanged.
pub fn canonicalize_date(input: &str) -> String {
    let trimmed = input.trim();
    let normalized = trimmed.replace('.', "/");
    match NaiveDate::parse_from_str(&normalized, "%d/%m/%Y") {
        Ok(date) => date.format("%Y-%m-%d").to_string(),
        Err(_) => trimmed.to_string(),
    }
}

/// YYYY-MM-DD -> DD/MM/YYYY; anything unparseable passes through unchanged.
pub fn to_display_date(input: &str) -> String {
    let trimmed = input.trim();
    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(_) => trimmed.to_string(),
    }
}

/// Canonical lower bound of the eligibility window relative to today.
pub fn eligibility_cutoff() -> String {
    cutoff_from(Utc::now().date_naive())
}

fn cutoff_from(today: NaiveDate) -> String {
    today
        .checked_sub_months(Months::new(ELIGIBILITY_MONTHS))
        .unwrap_or(today)
        .format("%Y-%m-%d")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_date() {
        assert_eq!(canonicalize_date("16/12/2025"), "2025-12-16");
        assert_eq!(canonicalize_date("16.12.2025"), "2025-12-16");
        assert_eq!(canonicalize_date("5/3/2021"), "2021-03-05");
        assert_eq!(canonicalize_date(" 01/01/2020 "), "2020-01-01");
    }

    #[test]
    fn test_canonicalize_date_passthrough() {
        assert_eq!(canonicalize_date("2025-12-16"), "2025-12-16");
        assert_eq!(canonicalize_date("not a date"), "not a date");
        assert_eq!(canonicalize_date("31/02/2020"), "31/02/2020");
    }

    #[test]
    fn test_to_display_date() {
        assert_eq!(to_display_date("2025-12-16"), "16/12/2025");
        assert_eq!(to_display_date("garbage"), "garbage");
    }

    #[test]
    fn test_cutoff_from() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        assert_eq!(cutoff_from(today), "2022-08-06");
        // month-end clamping
        let leap = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(cutoff_from(leap), "2020-02-29");
    }
}
