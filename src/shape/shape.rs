use sqlx::postgres::{PgArguments, PgRow};
use sqlx::{FromRow, PgPool};

use crate::database::manager::DatabaseError;

use super::pagination::Pagination;
use super::params::ShapeParams;
use super::types::{FilterValue, Shapeable};

/// Builds and runs the shaped SELECT and COUNT queries for one entity.
///
/// Handlers may pin extra conditions (`scope`) and joins before fetching;
/// request-supplied filters only ever touch allow-listed columns, and all
/// values are bound, never interpolated.
pub struct Shape<T: Shapeable> {
    params: ShapeParams,
    joins: Vec<String>,
    scopes: Vec<(String, i64)>,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Shape<T>
where
    T: Shapeable + for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    pub fn new(params: ShapeParams) -> Self {
        Self {
            params,
            joins: vec![],
            scopes: vec![],
            _phantom: std::marker::PhantomData,
        }
    }

    /// Pin an equality condition the client cannot influence, e.g. the
    /// caller's own user id. The column may be table-qualified.
    pub fn scope(mut self, column: impl Into<String>, value: i64) -> Self {
        self.scopes.push((column.into(), value));
        self
    }

    pub fn join(mut self, clause: impl Into<String>) -> Self {
        self.joins.push(clause.into());
        self
    }

    /// Run COUNT then SELECT and assemble pagination metadata. A page past
    /// the end yields an empty item list, not an error.
    pub async fn fetch(
        self,
        pool: &PgPool,
        endpoint: &str,
    ) -> Result<(Vec<T>, Pagination), DatabaseError> {
        let (count_sql, binds) = self.to_count_sql();
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        for value in &binds {
            count_query = bind_scalar(count_query, value);
        }
        let total_records = count_query.fetch_one(pool).await?;

        let (select_sql, binds) = self.to_select_sql();
        let mut select_query = sqlx::query_as::<_, T>(&select_sql);
        for value in &binds {
            select_query = bind_query_as(select_query, value);
        }
        let items = select_query.fetch_all(pool).await?;

        let pagination = Pagination::build(endpoint, &self.params, total_records);
        Ok((items, pagination))
    }

    pub fn to_select_sql(&self) -> (String, Vec<FilterValue>) {
        let (where_clause, binds) = self.where_clause();
        let offset = (self.params.page - 1) * self.params.per_page;

        let sql = [
            format!("SELECT \"{}\".* FROM \"{}\"", T::TABLE, T::TABLE),
            self.joins.join(" "),
            where_clause,
            self.order_clause(),
            format!("LIMIT {} OFFSET {}", self.params.per_page, offset),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

        (sql, binds)
    }

    pub fn to_count_sql(&self) -> (String, Vec<FilterValue>) {
        let (where_clause, binds) = self.where_clause();

        let sql = [
            format!("SELECT COUNT(*) FROM \"{}\"", T::TABLE),
            self.joins.join(" "),
            where_clause,
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

        (sql, binds)
    }

    fn where_clause(&self) -> (String, Vec<FilterValue>) {
        let mut conditions = Vec::new();
        let mut binds = Vec::new();

        for (column, value) in &self.scopes {
            conditions.push(format!("{} = ${}", quote_qualified(column), binds.len() + 1));
            binds.push(FilterValue::Int(*value));
        }
        for filter in &self.params.filters {
            conditions.push(format!(
                "\"{}\".\"{}\" {} ${}",
                T::TABLE,
                filter.column,
                filter.op.to_sql(),
                binds.len() + 1
            ));
            binds.push(filter.value.clone());
        }

        if conditions.is_empty() {
            (String::new(), binds)
        } else {
            (format!("WHERE {}", conditions.join(" AND ")), binds)
        }
    }

    fn order_clause(&self) -> String {
        if self.params.sort.is_empty() {
            return format!("ORDER BY \"{}\".\"{}\" ASC", T::TABLE, T::DEFAULT_SORT);
        }
        let parts: Vec<String> = self
            .params
            .sort
            .iter()
            .map(|spec| {
                format!(
                    "\"{}\".\"{}\" {}",
                    T::TABLE,
                    spec.column,
                    spec.direction.to_sql()
                )
            })
            .collect();
        format!("ORDER BY {}", parts.join(", "))
    }
}

/// Quote a possibly table-qualified identifier
fn quote_qualified(column: &str) -> String {
    column
        .split('.')
        .map(|part| format!("\"{}\"", part))
        .collect::<Vec<_>>()
        .join(".")
}

fn bind_scalar<'q>(
    q: sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, PgArguments>,
    v: &FilterValue,
) -> sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, PgArguments> {
    match v {
        FilterValue::Int(i) => q.bind(*i),
        FilterValue::Float(f) => q.bind(*f),
        FilterValue::Date(d) => q.bind(*d),
        FilterValue::Text(s) => q.bind(s.clone()),
    }
}

fn bind_query_as<'q, O>(
    q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>,
    v: &FilterValue,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, PgRow>,
{
    match v {
        FilterValue::Int(i) => q.bind(*i),
        FilterValue::Float(f) => q.bind(*f),
        FilterValue::Date(d) => q.bind(*d),
        FilterValue::Text(s) => q.bind(s.clone()),
    }
}
