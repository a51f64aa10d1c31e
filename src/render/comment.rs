use super::{datetime, escape, form, layout, markdown};
use crate::blog::{Comment, CommentCard, PostID, User};
use crate::forms::{CommentForm, FormErrors};
use crate::urls;
use axum::response::Html;
use std::fmt::Write;

/// The comments under a post, oldest first, with edit/delete links on the
/// viewer's own comments.
pub fn list(post_id: PostID, comments: &[CommentCard], viewer: Option<&User>) -> String {
    let mut html = format!(
        "<section class=\"comments\">\n<h2>Comments ({})</h2>\n",
        comments.len()
    );

    for card in comments {
        let comment = &card.comment;
        let _ = write!(
            html,
            "<div class=\"comment\" id=\"comment_{}\">\n<p class=\"meta\">{} | \
             <a href=\"{}\">@{}</a></p>\n{}",
            comment.id,
            datetime(&comment.created_at),
            escape(&urls::profile(&card.author_username)),
            escape(&card.author_username),
            markdown(&comment.text),
        );
        if comment.is_authored_by(viewer) {
            let _ = writeln!(
                html,
                "<p><a href=\"{}\">Edit</a> <a href=\"{}\">Delete</a></p>",
                urls::edit_comment(post_id, comment.id),
                urls::delete_comment(post_id, comment.id),
            );
        }
        html.push_str("</div>\n");
    }

    html.push_str("</section>\n");
    html
}

pub fn comment_form(action: &str, values: &CommentForm, errors: &FormErrors) -> String {
    format!(
        "<form method=\"post\" action=\"{}\">\n{}{}{}</form>\n",
        escape(action),
        form::non_field_errors(errors),
        form::textarea("text", "Comment", &values.text, errors),
        form::submit("Send"),
    )
}

pub fn edit_comment(
    comment: &Comment,
    values: &CommentForm,
    errors: &FormErrors,
    viewer: Option<&User>,
) -> Html<String> {
    let body = format!(
        "<h1>Edit comment</h1>\n{}<p><a href=\"{}\">Back to the post</a></p>\n",
        comment_form(
            &urls::edit_comment(comment.post, comment.id),
            values,
            errors
        ),
        urls::post_detail(comment.post),
    );

    layout("Edit comment", viewer, &body)
}

pub fn delete_comment(comment: &Comment, viewer: Option<&User>) -> Html<String> {
    let body = format!(
        "<h1>Delete comment</h1>\n<blockquote>{}</blockquote>\n\
         <form method=\"post\" action=\"{}\">\n<p>Delete this comment?</p>\n{}</form>\n\
         <p><a href=\"{}\">Cancel</a></p>\n",
        markdown(&comment.text),
        urls::delete_comment(comment.post, comment.id),
        form::submit("Delete"),
        urls::post_detail(comment.post),
    );

    layout("Delete comment", viewer, &body)
}
