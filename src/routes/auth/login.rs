use crate::auth::Auth;
use crate::blog::SESSION_COOKIE;
use crate::error::Result;
use crate::forms::{FormErrors, LoginForm};
use crate::routes::redirect;
use crate::state::SharedState;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(super) struct NextQuery {
    next: Option<String>,
}

pub(super) async fn get(Query(query): Query<NextQuery>) -> Html<String> {
    let form = LoginForm {
        next: query.next,
        ..LoginForm::default()
    };

    crate::render::user::login(&form, &FormErrors::default())
}

pub(super) async fn post(
    State(state): SharedState,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    if let Err(errors) = form.clean() {
        return Ok(crate::render::user::login(&form, &errors).into_response());
    }

    let Some((user, auth)) =
        Auth::validate(state.store.as_ref(), &form.username, form.password.clone()).await?
    else {
        tracing::info!(username = %form.username, "Failed login");
        let errors = LoginForm::invalid_credentials();
        return Ok(crate::render::user::login(&form, &errors).into_response());
    };

    let session_id = state.create_session(user.id, auth).await;
    let cookie = Cookie::build((SESSION_COOKIE, session_id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    let next = form
        .next
        .filter(|next| crate::urls::is_local(next))
        .unwrap_or_else(|| crate::urls::INDEX.to_string());

    tracing::info!(user = %user.username, "Logged in");
    Ok((jar.add(cookie), redirect::found(&next)).into_response())
}
