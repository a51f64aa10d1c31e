use crate::blog::{CommentID, PostID};
use crate::error::Result;
use crate::routes::redirect;
use crate::state::extract::Authenticated;
use crate::state::SharedState;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};

pub(super) async fn get(
    State(state): SharedState,
    Authenticated(user): Authenticated,
    Path((post_id, comment_id)): Path<(PostID, CommentID)>,
) -> Result<Response> {
    let comment = super::find_comment(&state, post_id, comment_id).await?;
    if comment.author != user.id {
        return Ok(redirect::to_post(post_id));
    }

    Ok(crate::render::comment::delete_comment(&comment, Some(&user)).into_response())
}

pub(super) async fn post(
    State(state): SharedState,
    Authenticated(user): Authenticated,
    Path((post_id, comment_id)): Path<(PostID, CommentID)>,
) -> Result<Response> {
    let comment = super::find_comment(&state, post_id, comment_id).await?;
    if comment.author != user.id {
        tracing::warn!(comment_id, user = %user.username, "Refused delete of someone else's comment");
        return Ok(redirect::to_post(post_id));
    }

    state.store.delete_comment(comment.id).await?;

    tracing::info!(post_id, comment_id, "Deleted comment");
    Ok(redirect::to_post(post_id))
}
