use crate::error::{OrNotFound, Result};
use crate::paginate::PageQuery;
use crate::state::extract::Viewer;
use crate::state::SharedState;
use crate::store::PostQuery;
use axum::extract::{Path, Query, State};
use axum::response::Html;

pub(super) async fn get(
    State(state): SharedState,
    Path(slug): Path<String>,
    viewer: Viewer,
    Query(page): Query<PageQuery>,
) -> Result<Html<String>> {
    let category = state
        .store
        .category_by_slug(&slug)
        .await?
        .filter(|category| category.is_published)
        .or_not_found()?;

    let query = PostQuery::visible(chrono::Utc::now()).in_category(category.id);
    let page = super::paginate_posts(&state, &query, &page).await?;

    Ok(crate::render::listing::category(
        &category,
        &page,
        viewer.user(),
    ))
}
