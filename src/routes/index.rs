use crate::error::Result;
use crate::paginate::PageQuery;
use crate::state::extract::Viewer;
use crate::state::SharedState;
use crate::store::PostQuery;
use axum::extract::{Query, State};
use axum::response::Html;

pub(super) async fn get(
    State(state): SharedState,
    viewer: Viewer,
    Query(page): Query<PageQuery>,
) -> Result<Html<String>> {
    let query = PostQuery::visible(chrono::Utc::now());
    let page = super::paginate_posts(&state, &query, &page).await?;

    Ok(crate::render::listing::index(&page, viewer.user()))
}
