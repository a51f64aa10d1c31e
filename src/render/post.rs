use super::{escape, form, layout, markdown};
use crate::blog::{Category, CommentCard, Location, PostCard, PostID, User};
use crate::forms::{CommentForm, FormErrors, PostForm};
use crate::urls::{self, ImageSize};
use axum::response::Html;
use std::fmt::Write;

pub fn detail(card: &PostCard, comments: &[CommentCard], viewer: Option<&User>) -> Html<String> {
    let post = &card.post;
    let mut body = format!(
        "<article class=\"post\">\n<h1>{}</h1>\n",
        escape(&post.content.title)
    );

    if let Some(image) = post.content.image.as_deref() {
        let _ = writeln!(
            body,
            "<a href=\"{}\"><img src=\"{}\" alt=\"{}\"></a>",
            escape(&urls::media(post.id, image, ImageSize::Raw)),
            escape(&urls::media(post.id, image, ImageSize::Large)),
            escape(&post.content.title),
        );
    }
    body.push_str(&super::listing::post_meta(card));
    body.push_str(&markdown(&post.content.text));

    if post.is_authored_by(viewer) {
        let _ = writeln!(
            body,
            "<p><a href=\"{}\">Edit post</a> <a href=\"{}\">Delete post</a></p>",
            urls::post_edit(post.id),
            urls::post_delete(post.id),
        );
    }
    body.push_str("</article>\n");

    body.push_str(&super::comment::list(post.id, comments, viewer));
    if viewer.is_some() {
        body.push_str(&super::comment::comment_form(
            &urls::add_comment(post.id),
            &CommentForm::default(),
            &FormErrors::default(),
        ));
    }

    layout(&post.content.title, viewer, &body)
}

/// Everything the create/edit form needs besides the viewer.
#[derive(Debug)]
pub struct PostFormPage<'a> {
    pub heading: &'a str,
    pub action: &'a str,
    pub form: &'a PostForm,
    pub errors: &'a FormErrors,
    pub categories: &'a [Category],
    pub locations: &'a [Location],
    /// The image the post already has, when editing
    pub current_image: Option<(PostID, &'a str)>,
}

pub fn post_form(page: &PostFormPage<'_>, viewer: Option<&User>) -> Html<String> {
    let PostFormPage {
        heading,
        action,
        form: values,
        errors,
        categories,
        locations,
        current_image,
    } = page;

    let category_options = categories
        .iter()
        .map(|category| (category.id.to_string(), category.title.clone()))
        .collect::<Vec<_>>();
    let location_options = locations
        .iter()
        .map(|location| (location.id.to_string(), location.name.clone()))
        .collect::<Vec<_>>();

    let mut body = format!(
        "<h1>{}</h1>\n<form method=\"post\" action=\"{}\" enctype=\"multipart/form-data\">\n{}",
        escape(heading),
        escape(action),
        form::non_field_errors(errors),
    );
    body.push_str(&form::input("text", "title", "Title", &values.title, errors));
    body.push_str(&form::textarea("text", "Text", &values.text, errors));
    body.push_str(&form::input(
        "datetime-local",
        "pub_date",
        "Publication date",
        &values.pub_date,
        errors,
    ));
    body.push_str("<p class=\"help\">Set a date in the future to schedule the post.</p>\n");
    body.push_str(&form::select(
        "location",
        "Location",
        &location_options,
        &values.location,
        errors,
    ));
    body.push_str(&form::select(
        "category",
        "Category",
        &category_options,
        &values.category,
        errors,
    ));

    if let Some((post_id, image)) = current_image {
        let _ = writeln!(
            body,
            "<p>Current image: <a href=\"{}\">{}</a></p>",
            escape(&urls::media(*post_id, image, ImageSize::Raw)),
            escape(image),
        );
        body.push_str(&form::checkbox("image-clear", "Remove image", false, errors));
    }
    body.push_str(&form::errors(errors.field("image")));
    body.push_str(
        "<p><label for=\"id_image\">Image</label>\n\
         <input type=\"file\" name=\"image\" id=\"id_image\" accept=\"image/*\"></p>\n",
    );
    body.push_str(&form::checkbox(
        "is_published",
        "Published",
        values.is_published,
        errors,
    ));
    body.push_str(&form::submit("Save"));
    body.push_str("</form>\n");

    layout(heading, viewer, &body)
}

pub fn delete_post(card: &PostCard, viewer: Option<&User>) -> Html<String> {
    let post = &card.post;
    let mut body = format!(
        "<h1>Delete post</h1>\n<article class=\"post\">\n<h3>{}</h3>\n",
        escape(&post.content.title)
    );
    body.push_str(&super::listing::post_meta(card));
    body.push_str(&markdown(&post.content.text));
    let _ = write!(
        body,
        "</article>\n<form method=\"post\" action=\"{}\">\n<p>Delete this post and all of its \
         comments?</p>\n{}</form>\n<p><a href=\"{}\">Cancel</a></p>\n",
        urls::post_delete(post.id),
        form::submit("Delete"),
        urls::post_detail(post.id),
    );

    layout("Delete post", viewer, &body)
}
