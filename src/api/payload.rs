//! Request payload validation with per-field error messages.

use chrono::NaiveDate;
use serde_json::Value;
use std::collections::HashMap;

use crate::error::ApiError;

/// Message reported for every absent required field, keyed by field name
pub const MISSING_FIELD: &str = "Missing data for required field.";

/// Thin view over a JSON request body with schema-style field access
pub struct Payload<'a>(&'a Value);

impl<'a> Payload<'a> {
    pub fn new(body: &'a Value) -> Self {
        Self(body)
    }

    /// All required fields are checked before any is extracted, so a single
    /// response lists every missing field.
    pub fn require(&self, fields: &[&str]) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();
        for field in fields {
            let present = match self.0.get(field) {
                None | Some(Value::Null) => false,
                Some(Value::String(s)) => !s.is_empty(),
                Some(_) => true,
            };
            if !present {
                field_errors.insert(field.to_string(), MISSING_FIELD.to_string());
            }
        }
        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error(
                "Invalid request payload",
                Some(field_errors),
            ))
        }
    }

    pub fn string(&self, field: &str) -> Result<&'a str, ApiError> {
        self.0
            .get(field)
            .and_then(Value::as_str)
            .ok_or_else(|| field_error(field, "Not a valid string."))
    }

    pub fn number(&self, field: &str) -> Result<f64, ApiError> {
        self.0
            .get(field)
            .and_then(Value::as_f64)
            .ok_or_else(|| field_error(field, "Not a valid number."))
    }

    pub fn date(&self, field: &str) -> Result<NaiveDate, ApiError> {
        let raw = self.string(field)?;
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| field_error(field, "Not a valid date."))
    }
}

fn field_error(field: &str, message: &str) -> ApiError {
    let mut field_errors = HashMap::new();
    field_errors.insert(field.to_string(), message.to_string());
    ApiError::validation_error("Invalid request payload", Some(field_errors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reports_every_missing_field_at_once() {
        let body = json!({"mail": "test@wp.pl"});
        let err = Payload::new(&body)
            .require(&["name", "last_name", "mail", "password"])
            .unwrap_err();
        let body = err.to_json();
        assert_eq!(body["message"]["name"], MISSING_FIELD);
        assert_eq!(body["message"]["last_name"], MISSING_FIELD);
        assert_eq!(body["message"]["password"], MISSING_FIELD);
        assert!(body["message"].get("mail").is_none());
    }

    #[test]
    fn empty_string_counts_as_missing() {
        let body = json!({"mail": ""});
        assert!(Payload::new(&body).require(&["mail"]).is_err());
    }

    #[test]
    fn extracts_typed_fields() {
        let body = json!({
            "activity_name": "Bieganie",
            "date": "2026-05-01",
            "distance": 12.5,
        });
        let payload = Payload::new(&body);
        assert_eq!(payload.string("activity_name").unwrap(), "Bieganie");
        assert_eq!(payload.number("distance").unwrap(), 12.5);
        assert_eq!(
            payload.date("date").unwrap(),
            NaiveDate::from_ymd_opt(2026, 5, 1).unwrap()
        );
    }

    #[test]
    fn wrong_types_are_field_errors() {
        let body = json!({"distance": "far", "date": "01-05-2026"});
        let payload = Payload::new(&body);
        assert!(payload.number("distance").is_err());
        assert!(payload.date("date").is_err());
    }
}
