//! Calendar date parsing and age calculation.

use chrono::{Datelike, NaiveDate};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d"];

/// Parse a date typed in one of the accepted formats.
///
/// Accepted: `YYYY-MM-DD`, `DD/MM/YYYY`, `DD-MM-YYYY`, `YYYY/MM/DD`.
/// An ISO timestamp is reduced to its date part.
pub fn parse_clinical_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let date_part = trimmed.split(['T', ' ']).next().unwrap_or(trimmed);
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(date_part, format).ok())
}

/// Completed years between `birth` and `reference`.
///
/// One year is borrowed when the reference month/day precedes the birth
/// month/day. Returns `None` when the reference date precedes the birth.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use eco_normalization::datetime::age_in_years;
///
/// let birth = NaiveDate::from_ymd_opt(1980, 6, 15).unwrap();
/// let before_birthday = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
/// let birthday = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
/// assert_eq!(age_in_years(birth, before_birthday), Some(43));
/// assert_eq!(age_in_years(birth, birthday), Some(44));
/// ```
pub fn age_in_years(birth: NaiveDate, reference: NaiveDate) -> Option<u32> {
    let mut years = reference.year() - birth.year();
    if (reference.month(), reference.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_accepted_formats() {
        assert_eq!(parse_clinical_date("2024-03-05"), Some(date(2024, 3, 5)));
        assert_eq!(parse_clinical_date("05/03/2024"), Some(date(2024, 3, 5)));
        assert_eq!(parse_clinical_date("05-03-2024"), Some(date(2024, 3, 5)));
        assert_eq!(
            parse_clinical_date("2024-03-05T10:30:00"),
            Some(date(2024, 3, 5))
        );
    }

    #[test]
    fn rejects_invalid_dates() {
        assert_eq!(parse_clinical_date(""), None);
        assert_eq!(parse_clinical_date("31/02/2024"), None);
        assert_eq!(parse_clinical_date("ayer"), None);
    }

    #[test]
    fn age_borrows_month_and_day() {
        let birth = date(1990, 12, 31);
        assert_eq!(age_in_years(birth, date(2024, 12, 30)), Some(33));
        assert_eq!(age_in_years(birth, date(2024, 12, 31)), Some(34));
        assert_eq!(age_in_years(birth, date(1990, 12, 31)), Some(0));
        assert_eq!(age_in_years(birth, date(1990, 12, 30)), None);
    }

    #[test]
    fn leap_day_birth() {
        let birth = date(2000, 2, 29);
        assert_eq!(age_in_years(birth, date(2023, 2, 28)), Some(22));
        assert_eq!(age_in_years(birth, date(2023, 3, 1)), Some(23));
    }
}
