use crate::state::NestedRouter;
use axum::routing::{get, post};

mod login;
mod logout;
mod registration;

pub fn route() -> NestedRouter {
    axum::Router::new()
        .route("/login", get(login::get).post(login::post))
        .route("/logout", post(logout::post))
        .route(
            "/registration",
            get(registration::get).post(registration::post),
        )
}
