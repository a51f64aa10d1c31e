use super::{datetime, escape, layout};
use crate::blog::{Category, PostCard, User};
use crate::paginate::Page;
use crate::urls::{self, ImageSize};
use axum::response::Html;
use std::fmt::Write;

const PREVIEW_WORDS: usize = 30;

fn preview(text: &str) -> String {
    let mut words = text.split_whitespace();
    let mut preview = words
        .by_ref()
        .take(PREVIEW_WORDS)
        .collect::<Vec<_>>()
        .join(" ");
    if words.next().is_some() {
        preview.push_str(" …");
    }
    preview
}

/// One-line facts shown under a post title: date, author, location,
/// category and, for posts strangers can't see, why.
pub fn post_meta(card: &PostCard) -> String {
    let post = &card.post;
    let mut html = format!(
        "<p class=\"meta\">{} | <a href=\"{}\">@{}</a>",
        datetime(&post.content.pub_date),
        escape(&urls::profile(&card.author_username)),
        escape(&card.author_username),
    );

    if let Some(location) = card.location.as_ref().filter(|it| it.is_published) {
        let _ = write!(html, " | {}", escape(&location.name));
    }
    match card.category.as_ref() {
        Some(category) if category.is_published => {
            let _ = write!(
                html,
                " | <a href=\"{}\">{}</a>",
                escape(&urls::category(&category.slug)),
                escape(&category.title)
            );
        }
        Some(category) => {
            let _ = write!(html, " | {} (hidden category)", escape(&category.title));
        }
        None => html.push_str(" | no category"),
    }
    html.push_str("</p>\n");

    if !post.content.is_published {
        html.push_str("<p class=\"note\">This post is not published.</p>\n");
    } else if post.content.pub_date > chrono::Utc::now() {
        html.push_str("<p class=\"note\">This post is scheduled for later.</p>\n");
    }

    html
}

pub fn post_card(card: &PostCard) -> String {
    let post = &card.post;
    let mut html = format!(
        "<article class=\"post\">\n<h3><a href=\"{}\">{}</a></h3>\n",
        urls::post_detail(post.id),
        escape(&post.content.title),
    );

    if let Some(image) = post.content.image.as_deref() {
        let _ = writeln!(
            html,
            "<img src=\"{}\" alt=\"{}\">",
            escape(&urls::media(post.id, image, ImageSize::Small)),
            escape(&post.content.title),
        );
    }
    let _ = writeln!(html, "<p>{}</p>", escape(&preview(&post.content.text)));
    html.push_str(&post_meta(card));
    let _ = write!(
        html,
        "<p><a href=\"{}\">Comments: {}</a></p>\n</article>\n",
        urls::post_detail(post.id),
        card.comment_count,
    );

    html
}

fn pagination(page: &Page<PostCard>) -> String {
    if page.num_pages <= 1 {
        return String::new();
    }

    let mut html = String::from("<nav class=\"pagination\">\n");
    if page.has_previous() {
        let _ = writeln!(
            html,
            "<a href=\"?page=1\">First</a> <a href=\"?page={}\">Previous</a>",
            page.number - 1
        );
    }
    let _ = writeln!(
        html,
        "<span>Page {} of {}</span> <span>({} posts)</span>",
        page.number, page.num_pages, page.count
    );
    if page.has_next() {
        let _ = writeln!(
            html,
            "<a href=\"?page={}\">Next</a> <a href=\"?page={}\">Last</a>",
            page.number + 1,
            page.num_pages
        );
    }
    html.push_str("</nav>\n");
    html
}

fn posts(page: &Page<PostCard>) -> String {
    if page.items.is_empty() {
        return "<p>No posts yet.</p>\n".to_string();
    }

    let mut html = String::new();
    for card in &page.items {
        html.push_str(&post_card(card));
    }
    html.push_str(&pagination(page));
    html
}

pub fn index(page: &Page<PostCard>, viewer: Option<&User>) -> Html<String> {
    let body = format!("<h1>Latest posts</h1>\n{}", posts(page));
    layout("Latest posts", viewer, &body)
}

pub fn category(
    category: &Category,
    page: &Page<PostCard>,
    viewer: Option<&User>,
) -> Html<String> {
    let body = format!(
        "<h1>{}</h1>\n<p>{}</p>\n{}",
        escape(&category.title),
        escape(&category.description),
        posts(page),
    );
    layout(&category.title, viewer, &body)
}

pub fn profile(profile: &User, page: &Page<PostCard>, viewer: Option<&User>) -> Html<String> {
    let mut body = format!(
        "<h1>{}</h1>\n<p>Username: @{}</p>\n<p>Joined: {}</p>\n",
        escape(&profile.full_name()),
        escape(&profile.username),
        datetime(&profile.date_joined),
    );
    if viewer.is_some_and(|viewer| viewer.id == profile.id) {
        let _ = writeln!(
            body,
            "<p><a href=\"{}\">Edit profile</a></p>",
            urls::EDIT_PROFILE
        );
    }
    body.push_str(&posts(page));

    layout(&profile.username, viewer, &body)
}
