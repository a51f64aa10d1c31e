use crate::blog::PostCard;
use crate::error::{AppError, Result};
use crate::paginate::{Page, PageQuery, Paginator};
use crate::state::{NestedRouter, State};
use crate::store::PostQuery;
use axum::routing::get;
use std::sync::Arc;

mod auth;
mod category;
mod edit_profile;
mod index;
mod media;
mod pages;
mod posts;
mod profile;
pub mod redirect;


pub fn route() -> NestedRouter {
    let image_compression_layer = tower_http::compression::CompressionLayer::new()
        .br(true)
        .quality(tower_http::CompressionLevel::Best);

    axum::Router::new()
        .route("/", get(index::get))
        .route("/category/:slug", get(category::get))
        .route("/profile/:username", get(profile::get))
        .route(
            "/edit_profile",
            get(edit_profile::get).post(edit_profile::post),
        )
        .route(
            "/media/:post_id/:image",
            get(media::get).layer(image_compression_layer),
        )
        .nest("/posts", posts::route())
        .nest("/auth", auth::route())
        .nest("/pages", pages::route())
        .fallback(not_found)
}

/// The whole site with request tracing, ready to serve.
pub fn app(state: Arc<State>) -> axum::Router {
    route()
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound
}

/// One page of the posts matching `query`.
async fn paginate_posts(
    state: &State,
    query: &PostQuery,
    requested: &PageQuery,
) -> Result<Page<PostCard>> {
    let paginator = Paginator::new(
        state.store.count_posts(query).await?,
        state.config.blog.posts_per_page,
    );
    let number = paginator.page_number(requested.page.as_deref());
    let items = state
        .store
        .posts(query, paginator.offset(number), paginator.per_page)
        .await?;

    Ok(paginator.page(number, items))
}
