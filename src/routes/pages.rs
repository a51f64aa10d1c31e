use crate::state::extract::Viewer;
use crate::state::NestedRouter;
use axum::response::Html;
use axum::routing::get;

pub fn route() -> NestedRouter {
    axum::Router::new()
        .route("/about", get(about))
        .route("/rules", get(rules))
}

async fn about(viewer: Viewer) -> Html<String> {
    crate::render::pages::about(viewer.user())
}

async fn rules(viewer: Viewer) -> Html<String> {
    crate::render::pages::rules(viewer.user())
}
