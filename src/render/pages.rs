use super::{escape, layout};
use crate::blog::User;
use crate::urls;
use axum::http::StatusCode;
use axum::response::Html;

pub fn about(viewer: Option<&User>) -> Html<String> {
    layout(
        "About",
        viewer,
        "<h1>About</h1>\n<p>Blogicum is a place to share what you saw, read and thought \
         about. Write posts, file them under a category and discuss them in the comments.</p>\n",
    )
}

pub fn rules(viewer: Option<&User>) -> Html<String> {
    layout(
        "Rules",
        viewer,
        "<h1>Rules</h1>\n<ol>\n<li>Be kind to other authors.</li>\n\
         <li>Only publish what you have the right to publish.</li>\n\
         <li>No spam or advertising.</li>\n\
         <li>Posts breaking the rules are unpublished by the moderators.</li>\n</ol>\n",
    )
}

pub fn error(status: StatusCode) -> Html<String> {
    let message = match status {
        StatusCode::NOT_FOUND => "The page you are looking for does not exist.",
        StatusCode::BAD_REQUEST => "The request could not be understood.",
        _ => "Something went wrong on our side. Please try again later.",
    };
    let title = status.canonical_reason().unwrap_or("Error");

    layout(
        title,
        None,
        &format!(
            "<h1>{} {}</h1>\n<p>{message}</p>\n<p><a href=\"{}\">Back to the front page</a></p>\n",
            status.as_u16(),
            escape(title),
            urls::INDEX,
        ),
    )
}
