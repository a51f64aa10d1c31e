use crate::error::{OrNotFound, Result};
use crate::paginate::PageQuery;
use crate::state::extract::Viewer;
use crate::state::SharedState;
use crate::store::PostQuery;
use axum::extract::{Path, Query, State};
use axum::response::Html;

pub(super) async fn get(
    State(state): SharedState,
    Path(username): Path<String>,
    viewer: Viewer,
    Query(page): Query<PageQuery>,
) -> Result<Html<String>> {
    let profile = state
        .store
        .user_by_username(&username)
        .await?
        .or_not_found()?;

    // strangers only get the publicly visible posts, the owner gets everything
    let query = PostQuery::by_author(profile.id, viewer.id(), chrono::Utc::now());
    let page = super::paginate_posts(&state, &query, &page).await?;

    Ok(crate::render::listing::profile(
        &profile,
        &page,
        viewer.user(),
    ))
}
