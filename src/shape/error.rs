use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShapeError {
    #[error("page must be a positive integer, got: {0}")]
    InvalidPage(String),

    #[error("per_page must be a positive integer, got: {0}")]
    InvalidPerPage(String),

    #[error("cannot sort by unknown field: {0}")]
    UnknownSortColumn(String),

    #[error("invalid value for filter {column}: {value}")]
    InvalidFilterValue { column: String, value: String },
}
