use crate::blog::SESSION_COOKIE;
use crate::state::SharedState;
use axum::extract::State;
use axum::response::Html;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::CookieJar;

pub(super) async fn post(State(state): SharedState, jar: CookieJar) -> (CookieJar, Html<String>) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if let Some(session) = state.remove_session(cookie.value()).await {
            tracing::info!(user_id = session.for_user, "Logged out");
        }
    }

    (
        jar.remove(Cookie::build(SESSION_COOKIE).path("/")),
        crate::render::user::logged_out(),
    )
}
