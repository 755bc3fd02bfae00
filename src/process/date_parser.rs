use chrono::NaiveDate;
use thiserror::Error;

/// Why a birthdate string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    #[error("expected D/M/YYYY, got {0:?}")]
    Shape(String),
    #[error("bad {field} component {value:?}")]
    Field { field: &'static str, value: String },
    #[error("{0:?} is not a calendar date")]
    OutOfRange(String),
}

/// Parse `"D/M/YYYY"` (day and month 1–2 digits, year exactly 4) into a date.
pub fn parse_birthdate(s: &str) -> Result<NaiveDate, DateParseError> {
    let mut parts = s.split('/');
    let (Some(d), Some(m), Some(y), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(DateParseError::Shape(s.to_string()));
    };

    let day = numeric_field("day", d, 1..=2)?;
    let month = numeric_field("month", m, 1..=2)?;
    let year = numeric_field("year", y, 4..=4)?;

    // chrono's proleptic calendar has a year 0; birthdates don't
    if year == 0 {
        return Err(DateParseError::OutOfRange(s.to_string()));
    }

    NaiveDate::from_ymd_opt(year as i32, month, day)
        .ok_or_else(|| DateParseError::OutOfRange(s.to_string()))
}

/// `YYYY-MM-DD`
pub fn format_birthdate(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn numeric_field(
    field: &'static str,
    raw: &str,
    width: std::ops::RangeInclusive<usize>,
) -> Result<u32, DateParseError> {
    // only ASCII digits; `parse` alone would let a leading '+' through
    if !width.contains(&raw.len()) || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DateParseError::Field {
            field,
            value: raw.to_string(),
        });
    }
    raw.parse().map_err(|_| DateParseError::Field {
        field,
        value: raw.to_string(),
    })
}
