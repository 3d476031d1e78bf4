use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::shape::{ColumnType, Shapeable};

/// Static reference data; read-only from the API's perspective.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Sport {
    pub id: i32,
    pub name: String,
}

impl Shapeable for Sport {
    const TABLE: &'static str = "sports";
    const COLUMNS: &'static [(&'static str, ColumnType)] =
        &[("id", ColumnType::Int), ("name", ColumnType::Text)];
}
