use crate::config;

use super::error::ShapeError;
use super::types::{FilterOp, FilterSpec, FilterValue, Shapeable, SortDirection, SortSpec};

/// Shaping parameters extracted from a request query string.
///
/// Conventions: `sort=col,-other` (leading `-` for descending), `page` and
/// `per_page` for slicing, `col=value` for equality and `col[gte]=value`
/// style for ranges. Parameters that do not name an allow-listed column are
/// ignored; a `sort` naming one is rejected.
#[derive(Debug, Clone, Default)]
pub struct ShapeParams {
    pub sort: Vec<SortSpec>,
    pub filters: Vec<FilterSpec>,
    pub page: i64,
    pub per_page: i64,
    /// Recognized non-page parameters in their original form, echoed into
    /// pagination links
    pub link_params: Vec<(String, String)>,
}

impl ShapeParams {
    pub fn parse<T: Shapeable>(query: &[(String, String)]) -> Result<Self, ShapeError> {
        let pagination = &config::config().pagination;

        let mut params = ShapeParams {
            page: 1,
            per_page: pagination.default_per_page,
            ..Default::default()
        };

        for (key, value) in query {
            match key.as_str() {
                "page" => {
                    params.page = parse_positive(value)
                        .ok_or_else(|| ShapeError::InvalidPage(value.clone()))?;
                }
                "per_page" => {
                    params.per_page = parse_positive(value)
                        .ok_or_else(|| ShapeError::InvalidPerPage(value.clone()))?;
                    params.link_params.push((key.clone(), value.clone()));
                }
                "sort" => {
                    params.sort = parse_sort::<T>(value)?;
                    params.link_params.push((key.clone(), value.clone()));
                }
                _ => {
                    if let Some((column, op)) = parse_filter_key(key) {
                        // Parameters naming unknown columns are ignored, not errors
                        if let Some(ty) = T::column_type(column) {
                            let parsed = FilterValue::parse(column, ty, value)?;
                            params.filters.push(FilterSpec {
                                column: column.to_string(),
                                op,
                                value: parsed,
                            });
                            params.link_params.push((key.clone(), value.clone()));
                        }
                    }
                }
            }
        }

        params.per_page = params.per_page.min(pagination.max_per_page);
        Ok(params)
    }
}

fn parse_positive(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|n| *n >= 1)
}

/// `distance[gte]` -> (distance, Gte); bare `distance` -> (distance, Eq).
/// Bracketed keys with an unsupported operator are dropped entirely.
fn parse_filter_key(key: &str) -> Option<(&str, FilterOp)> {
    match key.split_once('[') {
        Some((column, rest)) => {
            let suffix = rest.strip_suffix(']')?;
            Some((column, FilterOp::from_suffix(suffix)?))
        }
        None => Some((key, FilterOp::Eq)),
    }
}

fn parse_sort<T: Shapeable>(raw: &str) -> Result<Vec<SortSpec>, ShapeError> {
    let mut out = Vec::new();
    for token in raw.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let (column, direction) = match token.strip_prefix('-') {
            Some(col) => (col, SortDirection::Desc),
            None => (token, SortDirection::Asc),
        };
        if T::column_type(column).is_none() {
            return Err(ShapeError::UnknownSortColumn(column.to_string()));
        }
        out.push(SortSpec {
            column: column.to_string(),
            direction,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::Activity;
    use chrono::NaiveDate;

    fn query(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_without_parameters() {
        let params = ShapeParams::parse::<Activity>(&[]).unwrap();
        assert_eq!(params.page, 1);
        assert_eq!(params.per_page, 5);
        assert!(params.sort.is_empty());
        assert!(params.filters.is_empty());
    }

    #[test]
    fn parses_sort_with_descending_prefix() {
        let params = ShapeParams::parse::<Activity>(&query(&[("sort", "-date,distance")])).unwrap();
        assert_eq!(params.sort.len(), 2);
        assert_eq!(params.sort[0].column, "date");
        assert_eq!(params.sort[0].direction, SortDirection::Desc);
        assert_eq!(params.sort[1].column, "distance");
        assert_eq!(params.sort[1].direction, SortDirection::Asc);
    }

    #[test]
    fn rejects_sort_on_unknown_column() {
        let err = ShapeParams::parse::<Activity>(&query(&[("sort", "password")])).unwrap_err();
        assert!(matches!(err, ShapeError::UnknownSortColumn(col) if col == "password"));
    }

    #[test]
    fn equality_and_range_filters() {
        let params = ShapeParams::parse::<Activity>(&query(&[
            ("distance", "10.5"),
            ("date[gte]", "2026-01-01"),
        ]))
        .unwrap();
        assert_eq!(params.filters.len(), 2);
        assert_eq!(params.filters[0].op, FilterOp::Eq);
        assert_eq!(params.filters[0].value, FilterValue::Float(10.5));
        assert_eq!(params.filters[1].op, FilterOp::Gte);
        assert_eq!(
            params.filters[1].value,
            FilterValue::Date(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap())
        );
    }

    #[test]
    fn unknown_filter_parameters_are_ignored() {
        let params =
            ShapeParams::parse::<Activity>(&query(&[("nonsense", "1"), ("name[like]", "x")]))
                .unwrap();
        assert!(params.filters.is_empty());
        assert!(params.link_params.is_empty());
    }

    #[test]
    fn invalid_filter_value_is_rejected() {
        let err = ShapeParams::parse::<Activity>(&query(&[("time", "abc")])).unwrap_err();
        assert!(matches!(err, ShapeError::InvalidFilterValue { .. }));
    }

    #[test]
    fn invalid_page_and_per_page_are_rejected() {
        assert!(matches!(
            ShapeParams::parse::<Activity>(&query(&[("page", "0")])).unwrap_err(),
            ShapeError::InvalidPage(_)
        ));
        assert!(matches!(
            ShapeParams::parse::<Activity>(&query(&[("per_page", "x")])).unwrap_err(),
            ShapeError::InvalidPerPage(_)
        ));
    }

    #[test]
    fn per_page_is_capped_at_configured_maximum() {
        let params = ShapeParams::parse::<Activity>(&query(&[("per_page", "100000")])).unwrap();
        assert!(params.per_page <= crate::config::config().pagination.max_per_page);
    }
}
