use axum::{
    extract::Request,
    http::{header, Method},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;

/// Rejects body-bearing requests whose Content-Type is not application/json.
/// A JSON-shaped body with the wrong media type is still a 415. Bodyless
/// methods pass through untouched.
pub async fn require_json(request: Request, next: Next) -> Result<Response, ApiError> {
    let has_body = matches!(
        *request.method(),
        Method::POST | Method::PUT | Method::PATCH
    );

    if has_body {
        let content_type = request
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !is_json_media_type(content_type) {
            return Err(ApiError::unsupported_media_type(
                "Content-Type must be application/json",
            ));
        }
    }

    Ok(next.run(request).await)
}

fn is_json_media_type(content_type: &str) -> bool {
    // Accept parameters such as "; charset=utf-8"
    content_type
        .split(';')
        .next()
        .map(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}
