use crate::blog::PostID;
use crate::error::{OrNotFound, Result};
use crate::state::extract::Viewer;
use crate::state::SharedState;
use axum::extract::{Path, State};
use axum::response::Html;

pub(super) async fn get(
    State(state): SharedState,
    Path(post_id): Path<PostID>,
    viewer: Viewer,
) -> Result<Html<String>> {
    let post = state.store.post(post_id).await?.or_not_found()?;

    // authors see their own hidden posts, everyone else only visible ones
    let post = if post.is_authored_by(viewer.user()) {
        post
    } else {
        state
            .store
            .visible_post(post_id, chrono::Utc::now())
            .await?
            .or_not_found()?
    };

    let comments = state.store.comments(post.id).await?;
    let card = state.store.post_card(post).await?;

    Ok(crate::render::post::detail(&card, &comments, viewer.user()))
}
