use crate::blog::{CommentID, PostID};
use crate::error::Result;
use crate::forms::{CommentForm, FormErrors};
use crate::routes::redirect;
use crate::state::extract::Authenticated;
use crate::state::SharedState;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Form;

pub(super) async fn get(
    State(state): SharedState,
    Authenticated(user): Authenticated,
    Path((post_id, comment_id)): Path<(PostID, CommentID)>,
) -> Result<Response> {
    let comment = super::find_comment(&state, post_id, comment_id).await?;
    if comment.author != user.id {
        return Ok(redirect::to_post(post_id));
    }

    let values = CommentForm::from_comment(&comment);
    Ok(
        crate::render::comment::edit_comment(&comment, &values, &FormErrors::default(), Some(&user))
            .into_response(),
    )
}

pub(super) async fn post(
    State(state): SharedState,
    Authenticated(user): Authenticated,
    Path((post_id, comment_id)): Path<(PostID, CommentID)>,
    form: Option<Form<CommentForm>>,
) -> Result<Response> {
    let comment = super::find_comment(&state, post_id, comment_id).await?;
    if comment.author != user.id {
        tracing::warn!(comment_id, user = %user.username, "Refused edit of someone else's comment");
        return Ok(redirect::to_post(post_id));
    }

    let values = form.map(|Form(form)| form).unwrap_or_default();
    match values.clean() {
        Ok(text) => {
            state.store.update_comment(comment.id, text).await?;
            tracing::info!(post_id, comment_id, "Edited comment");
            Ok(redirect::to_post(post_id))
        }
        Err(errors) => Ok(
            crate::render::comment::edit_comment(&comment, &values, &errors, Some(&user))
                .into_response(),
        ),
    }
}
