//! Server-side HTML for every page. Values coming from users always pass
//! through [`escape`]; post bodies go through comrak with raw HTML disabled.

use crate::blog::User;
use crate::urls;
use axum::response::Html;
use std::fmt::Write;

pub mod comment;
pub mod form;
pub mod listing;
pub mod pages;
pub mod post;
pub mod user;

const SITE_NAME: &str = "Blogicum";

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Renders a post or comment body written in Markdown.
pub fn markdown(text: &str) -> String {
    let mut options = comrak::Options::default();
    options.render.hardbreaks = true;

    comrak::markdown_to_html(text, &options)
}

pub fn datetime(value: &chrono::DateTime<chrono::Utc>) -> String {
    value.format("%d.%m.%Y %H:%M").to_string()
}

/// Wraps a page body in the shared header and footer.
pub fn layout(title: &str, viewer: Option<&User>, body: &str) -> Html<String> {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{} | {SITE_NAME}</title>\n</head>\n<body>\n<header>\n<nav>\n\
         <a href=\"{}\">{SITE_NAME}</a>\n<a href=\"{}\">About</a>\n<a href=\"{}\">Rules</a>\n",
        escape(title),
        urls::INDEX,
        urls::ABOUT,
        urls::RULES,
    );

    match viewer {
        Some(user) => {
            let _ = write!(
                html,
                "<a href=\"{}\">New post</a>\n<a href=\"{}\">{}</a>\n\
                 <form method=\"post\" action=\"{}\"><button type=\"submit\">Log out</button></form>\n",
                urls::POST_CREATE,
                escape(&urls::profile(&user.username)),
                escape(&user.username),
                urls::LOGOUT,
            );
        }
        None => {
            let _ = write!(
                html,
                "<a href=\"{}\">Log in</a>\n<a href=\"{}\">Sign up</a>\n",
                urls::LOGIN,
                urls::REGISTRATION,
            );
        }
    }

    let _ = write!(
        html,
        "</nav>\n</header>\n<main>\n{body}\n</main>\n<footer>{SITE_NAME}</footer>\n</body>\n</html>\n"
    );

    Html(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::user;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<script>alert("x & 'y'")</script>"#),
            "&lt;script&gt;alert(&quot;x &amp; &#x27;y&#x27;&quot;)&lt;/script&gt;"
        );
    }

    #[test]
    fn markdown_drops_raw_html() {
        let html = markdown("Hello *world*\n\n<script>alert(1)</script>");

        assert!(html.contains("<em>world</em>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn layout_links_depend_on_viewer() {
        let anonymous = layout("Home", None, "<p>body</p>").0;
        assert!(anonymous.contains(urls::LOGIN));
        assert!(anonymous.contains("<p>body</p>"));

        let alice = user(1, "alice");
        let logged_in = layout("Home", Some(&alice), "").0;
        assert!(logged_in.contains("/profile/alice"));
        assert!(logged_in.contains(urls::LOGOUT));
        assert!(!logged_in.contains(urls::LOGIN));
    }
}
