//! Query shaping: sort/filter/paginate collection queries from request
//! parameters, against a per-entity allow-list of columns.

pub mod error;
pub mod pagination;
pub mod params;
pub mod shape;
pub mod types;

pub use error::ShapeError;
pub use pagination::Pagination;
pub use params::ShapeParams;
pub use shape::Shape;
pub use types::{ColumnType, FilterOp, FilterValue, Shapeable, SortDirection};
