use crate::auth::Auth;
use crate::error::Result;
use crate::forms::{FormErrors, SignupForm};
use crate::routes::redirect;
use crate::state::SharedState;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum::Form;

pub(super) async fn get() -> Html<String> {
    crate::render::user::registration(&SignupForm::default(), &FormErrors::default())
}

pub(super) async fn post(
    State(state): SharedState,
    Form(form): Form<SignupForm>,
) -> Result<Response> {
    let (username, password) = match form.clean() {
        Ok(it) => it,
        Err(errors) => {
            return Ok(crate::render::user::registration(&form, &errors).into_response())
        }
    };

    let Some((user, _auth)) = Auth::register(state.store.as_ref(), username, password).await?
    else {
        let mut errors = FormErrors::default();
        errors.add("username", crate::forms::USERNAME_TAKEN);
        return Ok(crate::render::user::registration(&form, &errors).into_response());
    };

    tracing::info!(user_id = user.id, username = %user.username, "Registered user");
    Ok(redirect::found(crate::urls::INDEX))
}
