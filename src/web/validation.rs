use chrono::NaiveDate;
use serde_json::Value;

use super::error::ApiError;

pub const INVOICE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Rejects a missing or null field. Anything else, the empty string included,
/// is stored exactly as sent.
pub fn required_text(field: &str, value: Option<String>) -> Result<String, ApiError> {
    value.ok_or_else(|| missing_field(field))
}

/// Like [`required_text`] for a loosely typed field, which must hold a JSON
/// string.
pub fn required_string(field: &str, value: Option<Value>) -> Result<String, ApiError> {
    match value {
        None | Some(Value::Null) => Err(missing_field(field)),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(ApiError::Validation(format!(
            "el campo '{field}' debe ser texto"
        ))),
    }
}

fn missing_field(field: &str) -> ApiError {
    ApiError::Validation(format!("el campo '{field}' es obligatorio"))
}

/// Parses a `YYYY-MM-DD` calendar date. Missing values and impossible dates
/// such as `2024-13-45` are rejected alike.
pub fn parse_invoice_date(value: Option<&str>) -> Result<NaiveDate, ApiError> {
    let value = value.ok_or(ApiError::InvalidDate)?;
    NaiveDate::parse_from_str(value, INVOICE_DATE_FORMAT).map_err(|_| ApiError::InvalidDate)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::{Value, json};
    use test_case::test_case;

    use super::{parse_invoice_date, required_string, required_text};
    use crate::web::error::ApiError;

    #[test_case("2024-03-15", 2024, 3, 15 ; "iso date")]
    #[test_case("2024-02-29", 2024, 2, 29 ; "leap day")]
    fn accepts_calendar_dates(input: &str, year: i32, month: u32, day: u32) {
        assert_eq!(
            parse_invoice_date(Some(input)).expect("valid date"),
            NaiveDate::from_ymd_opt(year, month, day).expect("test date")
        );
    }

    #[test_case(Some("2024-13-45") ; "month and day out of range")]
    #[test_case(Some("2023-02-29") ; "not a leap year")]
    #[test_case(Some("15/03/2024") ; "day first")]
    #[test_case(Some("2024-03-15T10:00:00") ; "trailing time")]
    #[test_case(Some(" 2024-12-01 ") ; "surrounding whitespace")]
    #[test_case(Some("") ; "empty")]
    #[test_case(None ; "missing")]
    fn rejects_invalid_dates(input: Option<&str>) {
        assert!(matches!(parse_invoice_date(input), Err(ApiError::InvalidDate)));
    }

    #[test_case("" ; "empty")]
    #[test_case("  20-2 " ; "surrounding whitespace")]
    fn required_text_keeps_value_as_sent(input: &str) {
        let value = required_text("cuit", Some(input.to_string())).expect("present value");
        assert_eq!(value, input);
    }

    #[test]
    fn required_text_rejects_missing() {
        let result = required_text("cuit", None);
        assert!(matches!(result, Err(ApiError::Validation(ref msg)) if msg.contains("cuit")));
    }

    #[test]
    fn required_string_accepts_any_string() {
        let value = required_string("description", Some(json!(" "))).expect("string value");
        assert_eq!(value, " ");
    }

    #[test_case(None, "es obligatorio" ; "missing")]
    #[test_case(Some(Value::Null), "es obligatorio" ; "null")]
    #[test_case(Some(json!(5)), "debe ser texto" ; "number")]
    #[test_case(Some(json!(["a"])), "debe ser texto" ; "array")]
    fn required_string_rejects_non_strings(input: Option<Value>, expected: &str) {
        let result = required_string("classification", input);
        assert!(matches!(
            result,
            Err(ApiError::Validation(ref msg)) if msg.contains("classification") && msg.contains(expected)
        ));
    }
}
