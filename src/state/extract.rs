use super::State;
use crate::blog::{User, SESSION_COOKIE};
use crate::error::AppError;
use axum::extract::{FromRequestParts, OriginalUri};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;
use std::sync::Arc;

/// Whoever is making the request, if they are logged in.
#[derive(Debug, Clone)]
pub struct Viewer(pub Option<User>);

/// A logged-in user. Anonymous requests are redirected to the login page.
#[derive(Debug, Clone)]
pub struct Authenticated(pub User);

#[axum::async_trait]
impl FromRequestParts<Arc<State>> for Viewer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<State>,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let Some(session_id) = jar.get(SESSION_COOKIE).map(|cookie| cookie.value()) else {
            return Ok(Viewer(None));
        };
        let Some(session) = state.get_session(session_id).await else {
            return Ok(Viewer(None));
        };

        Ok(Viewer(state.store.user(session.for_user).await?))
    }
}

#[axum::async_trait]
impl FromRequestParts<Arc<State>> for Authenticated {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<State>,
    ) -> Result<Self, Self::Rejection> {
        match Viewer::from_request_parts(parts, state).await {
            Ok(Viewer(Some(user))) => Ok(Authenticated(user)),
            Ok(Viewer(None)) => {
                // nested routers only see the tail of the path
                let uri = parts
                    .extensions
                    .get::<OriginalUri>()
                    .map_or(&parts.uri, |original| &original.0);
                let next = uri
                    .path_and_query()
                    .map_or_else(|| uri.path(), |it| it.as_str());
                Err(crate::routes::redirect::found(&crate::urls::login_with_next(next)))
            }
            Err(err) => Err(err.into_response()),
        }
    }
}

impl Viewer {
    pub fn user(&self) -> Option<&User> {
        self.0.as_ref()
    }

    pub fn id(&self) -> Option<crate::blog::UserID> {
        self.0.as_ref().map(|user| user.id)
    }
}
