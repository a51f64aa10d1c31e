use crate::blog::PostID;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

/// `302 Found` to `location`.
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// Back to the read-only view of a post, used whenever a request may not
/// change it.
pub fn to_post(post_id: PostID) -> Response {
    found(&crate::urls::post_detail(post_id))
}
