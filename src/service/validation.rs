//! Field-level rules for author and book payloads. Storage-dependent checks
//! (author existence, isbn uniqueness) live in the catalog service.

use crate::error::AppError;
use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

/// 10 to 13 ASCII digits, single hyphens allowed between digits.
const ISBN_PATTERN: &str = r"^(?:[0-9]-?){9,12}[0-9]$";

fn isbn_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(ISBN_PATTERN).expect("isbn pattern compiles"))
}

pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Author name on create: required, not blank. Stored as supplied.
pub fn author_name(name: Option<&str>) -> Result<String, AppError> {
    match name {
        Some(n) if !is_blank(n) => Ok(n.to_string()),
        _ => Err(AppError::validation(
            "name is required and must contain at least one non-whitespace character",
        )),
    }
}

/// Optional text field on update: if supplied it must not be blank; the trimmed value is returned.
pub fn trimmed_non_blank(field: &str, value: &str) -> Result<String, AppError> {
    let t = value.trim();
    if t.is_empty() {
        return Err(AppError::validation(format!("{} cannot be only whitespace", field)));
    }
    Ok(t.to_string())
}

/// `YYYY-MM-DD`. Absent and empty strings both mean "no date".
pub fn birth_date(value: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match value {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| AppError::validation("birth_date must use the YYYY-MM-DD format")),
    }
}

/// Title: present, not blank, at least one alphabetic character. Stored as supplied.
pub fn title(value: Option<&str>) -> Result<String, AppError> {
    match value {
        Some(t) if !is_blank(t) && t.chars().any(char::is_alphabetic) => Ok(t.to_string()),
        _ => Err(AppError::validation(
            "title is required and must contain at least one letter",
        )),
    }
}

/// Shape check only; no checksum. The value is returned exactly as entered.
pub fn isbn(value: Option<&str>) -> Result<String, AppError> {
    match value {
        Some(s) if isbn_regex().is_match(s) => Ok(s.to_string()),
        _ => Err(AppError::validation(
            "isbn must have between 10 and 13 digits and may include hyphens (-) between digits",
        )),
    }
}

/// Required on create.
pub fn publication_year(value: Option<i64>) -> Result<i64, AppError> {
    let year = value.ok_or_else(|| AppError::validation("publication_year must be an integer"))?;
    positive_year(year)
}

pub fn positive_year(year: i64) -> Result<i64, AppError> {
    if year <= 0 {
        return Err(AppError::validation("publication_year must be greater than 0"));
    }
    Ok(year)
}

pub fn genre(value: Option<&str>) -> Result<Option<String>, AppError> {
    value.map(|g| trimmed_non_blank("genre", g)).transpose()
}
