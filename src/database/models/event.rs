use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::shape::{ColumnType, Shapeable};

/// Event status value permitting join/leave actions. Status text is managed
/// by an external admin process; this is the only value this API interprets.
pub const OPEN_REGISTRATION: &str = "Zapisy otwarte";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i32,
    pub name: String,
    pub status: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Event {
    pub fn is_registration_open(&self) -> bool {
        self.status == OPEN_REGISTRATION
    }
}

impl Shapeable for Event {
    const TABLE: &'static str = "events";
    const COLUMNS: &'static [(&'static str, ColumnType)] = &[
        ("id", ColumnType::Int),
        ("name", ColumnType::Text),
        ("status", ColumnType::Text),
        ("start_date", ColumnType::Date),
        ("end_date", ColumnType::Date),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_gate_matches_exact_status() {
        let mut event = Event {
            id: 1,
            name: "Rowerem przez Polskę".to_string(),
            status: OPEN_REGISTRATION.to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 5, 31).unwrap(),
        };
        assert!(event.is_registration_open());

        event.status = "Zapisy zamknięte".to_string();
        assert!(!event.is_registration_open());
    }
}
