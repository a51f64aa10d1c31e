use crate::blog::PostID;
use crate::error::{OrNotFound, Result};
use crate::routes::redirect;
use crate::state::extract::Authenticated;
use crate::state::SharedState;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};

pub(super) async fn get(
    State(state): SharedState,
    Authenticated(user): Authenticated,
    Path(post_id): Path<PostID>,
) -> Result<Response> {
    let post = state.store.post(post_id).await?.or_not_found()?;
    if post.author != user.id {
        return Ok(redirect::to_post(post.id));
    }

    let card = state.store.post_card(post).await?;
    Ok(crate::render::post::delete_post(&card, Some(&user)).into_response())
}

pub(super) async fn post(
    State(state): SharedState,
    Authenticated(user): Authenticated,
    Path(post_id): Path<PostID>,
) -> Result<Response> {
    let post = state.store.post(post_id).await?.or_not_found()?;
    if post.author != user.id {
        tracing::warn!(post_id, user = %user.username, "Refused delete of someone else's post");
        return Ok(redirect::to_post(post.id));
    }

    state.store.delete_post(post.id).await?;
    state.remove_post_media(post.id).await;

    tracing::info!(post_id, "Deleted post");
    Ok(redirect::found(crate::urls::INDEX))
}
