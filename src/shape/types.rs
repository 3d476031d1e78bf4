use chrono::NaiveDate;

use super::error::ShapeError;

/// Declared type of a shapeable column; filter values are parsed against it
/// at request-parse time so bad input never reaches the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Int,
    Float,
    Date,
    Text,
}

/// Entities that can be listed through the shaping pipeline declare their
/// table and the columns exposed to sorting and filtering. Anything not
/// listed here is invisible to request parameters.
pub trait Shapeable {
    const TABLE: &'static str;
    const COLUMNS: &'static [(&'static str, ColumnType)];
    /// Stable default ordering when no sort parameter is given.
    const DEFAULT_SORT: &'static str = "id";

    fn column_type(column: &str) -> Option<ColumnType> {
        Self::COLUMNS
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, ty)| *ty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SortSpec {
    pub column: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl FilterOp {
    pub fn to_sql(self) -> &'static str {
        match self {
            FilterOp::Eq => "=",
            FilterOp::Gt => ">",
            FilterOp::Gte => ">=",
            FilterOp::Lt => "<",
            FilterOp::Lte => "<=",
        }
    }

    /// Operator suffix in a `column[op]=value` parameter name
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "gt" => Some(FilterOp::Gt),
            "gte" => Some(FilterOp::Gte),
            "lt" => Some(FilterOp::Lt),
            "lte" => Some(FilterOp::Lte),
            _ => None,
        }
    }
}

/// A filter value parsed to the column's declared type, ready to bind
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Int(i64),
    Float(f64),
    Date(NaiveDate),
    Text(String),
}

impl FilterValue {
    pub fn parse(column: &str, column_type: ColumnType, raw: &str) -> Result<Self, ShapeError> {
        let invalid = || ShapeError::InvalidFilterValue {
            column: column.to_string(),
            value: raw.to_string(),
        };
        match column_type {
            ColumnType::Int => raw.parse::<i64>().map(FilterValue::Int).map_err(|_| invalid()),
            ColumnType::Float => raw.parse::<f64>().map(FilterValue::Float).map_err(|_| invalid()),
            ColumnType::Date => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(FilterValue::Date)
                .map_err(|_| invalid()),
            ColumnType::Text => Ok(FilterValue::Text(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FilterSpec {
    pub column: String,
    pub op: FilterOp,
    pub value: FilterValue,
}
