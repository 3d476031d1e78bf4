use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::shape::{ColumnType, Shapeable};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Activity {
    pub id: i32,
    pub user_id: i32,
    pub activity_type_id: i32,
    pub date: NaiveDate,
    /// Distance in kilometers
    pub distance: f64,
    /// Elapsed time in seconds, non-negative
    pub time: i32,
}

impl Shapeable for Activity {
    const TABLE: &'static str = "activities";
    const COLUMNS: &'static [(&'static str, ColumnType)] = &[
        ("id", ColumnType::Int),
        ("user_id", ColumnType::Int),
        ("activity_type_id", ColumnType::Int),
        ("date", ColumnType::Date),
        ("distance", ColumnType::Float),
        ("time", ColumnType::Int),
    ];
}
