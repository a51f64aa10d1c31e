//! Paths of every page, so handlers and templates agree on them.

use crate::blog::{CommentID, PostID};

pub const INDEX: &str = "/";
pub const POST_CREATE: &str = "/posts/create";
pub const EDIT_PROFILE: &str = "/edit_profile";
pub const LOGIN: &str = "/auth/login";
pub const LOGOUT: &str = "/auth/logout";
pub const REGISTRATION: &str = "/auth/registration";
pub const ABOUT: &str = "/pages/about";
pub const RULES: &str = "/pages/rules";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    Small,
    Large,
    Raw,
}

pub fn post_detail(post_id: PostID) -> String {
    format!("/posts/{post_id}")
}

pub fn post_edit(post_id: PostID) -> String {
    format!("/posts/{post_id}/edit")
}

pub fn post_delete(post_id: PostID) -> String {
    format!("/posts/{post_id}/delete")
}

pub fn add_comment(post_id: PostID) -> String {
    format!("/posts/{post_id}/comment")
}

pub fn edit_comment(post_id: PostID, comment_id: CommentID) -> String {
    format!("/posts/{post_id}/edit_comment/{comment_id}")
}

pub fn delete_comment(post_id: PostID, comment_id: CommentID) -> String {
    format!("/posts/{post_id}/delete_comment/{comment_id}")
}

pub fn category(slug: &str) -> String {
    format!("/category/{}", urlencoding::encode(slug))
}

pub fn profile(username: &str) -> String {
    format!("/profile/{}", urlencoding::encode(username))
}

pub fn login_with_next(next: &str) -> String {
    format!("{LOGIN}?next={}", urlencoding::encode(next))
}

pub fn media(post_id: PostID, image_name: &str, size: ImageSize) -> String {
    let query = match size {
        ImageSize::Small => "",
        ImageSize::Large => "?large=true",
        ImageSize::Raw => "?raw=true",
    };
    format!("/media/{post_id}/{}{query}", urlencoding::encode(image_name))
}

/// Whether `next` is safe to redirect to after login: a path on this site,
/// never another host.
pub fn is_local(next: &str) -> bool {
    next.starts_with('/') && !next.starts_with("//") && !next.contains('\\')
}
