use serde::Serialize;

use super::params::ShapeParams;

/// Pagination metadata returned alongside every shaped collection.
/// Navigation links rebuild the current endpoint with the recognized
/// parameters and the neighbor page number.
#[derive(Debug, Clone, Serialize)]
pub struct Pagination {
    pub total_pages: i64,
    pub total_records: i64,
    pub current_page: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_page: Option<String>,
}

impl Pagination {
    pub fn build(endpoint: &str, params: &ShapeParams, total_records: i64) -> Self {
        let per_page = params.per_page.max(1);
        let total_pages = (total_records + per_page - 1) / per_page;
        let page = params.page;

        let link = |p: i64| page_link(endpoint, p, &params.link_params);

        Self {
            total_pages,
            total_records,
            current_page: link(page),
            next_page: (page < total_pages).then(|| link(page + 1)),
            // A page far past the end still gets a usable previous link
            previous_page: (page > 1).then(|| link((page - 1).min(total_pages.max(1)))),
        }
    }
}

fn page_link(endpoint: &str, page: i64, extras: &[(String, String)]) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    query.append_pair("page", &page.to_string());
    for (key, value) in extras {
        query.append_pair(key, value);
    }
    format!("{}?{}", endpoint, query.finish())
}
