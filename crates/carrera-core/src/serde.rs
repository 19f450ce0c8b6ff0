//! Deserialization helpers for browser form input.
//!
//! HTML forms submit every field as a string and send `""` for blank inputs
//! and unselected `<select>`s. These helpers read such fields as `None`.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

/// Reads an optional field where an empty (or whitespace-only) string means absent.
pub fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Reads a required field through `FromStr`, trimming surrounding whitespace.
pub fn from_trimmed_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let s = String::deserialize(deserializer)?;
    s.trim().parse::<T>().map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct GradeForm {
        #[serde(default, deserialize_with = "empty_string_as_none")]
        grade: Option<f64>,
        #[serde(deserialize_with = "from_trimmed_str")]
        year: i32,
    }

    #[test]
    fn test_empty_grade_is_none() {
        let form: GradeForm = serde_urlencoded::from_str("grade=&year=1").unwrap();
        assert_eq!(form.grade, None);
        assert_eq!(form.year, 1);
    }

    #[test]
    fn test_missing_grade_is_none() {
        let form: GradeForm = serde_urlencoded::from_str("year=2").unwrap();
        assert_eq!(form.grade, None);
    }

    #[test]
    fn test_grade_is_parsed() {
        let form: GradeForm = serde_urlencoded::from_str("grade=7.5&year=+3+").unwrap();
        assert_eq!(form.grade, Some(7.5));
        assert_eq!(form.year, 3);
    }

    #[test]
    fn test_invalid_value_is_rejected() {
        let result: Result<GradeForm, _> = serde_urlencoded::from_str("grade=abc&year=1");
        assert!(result.is_err());
    }
}
