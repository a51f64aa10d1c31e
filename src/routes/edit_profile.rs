use crate::error::Result;
use crate::forms::{FormErrors, ProfileForm};
use crate::routes::redirect;
use crate::state::extract::Authenticated;
use crate::state::SharedState;
use crate::store::StoreError;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum::Form;

pub(super) async fn get(Authenticated(user): Authenticated) -> Html<String> {
    crate::render::user::edit_profile(
        &ProfileForm::from_user(&user),
        &FormErrors::default(),
        &user,
    )
}

pub(super) async fn post(
    State(state): SharedState,
    Authenticated(user): Authenticated,
    form: Option<Form<ProfileForm>>,
) -> Result<Response> {
    let values = form.map(|Form(form)| form).unwrap_or_default();
    let updated = match values.clean(user.clone()) {
        Ok(it) => it,
        Err(errors) => {
            return Ok(crate::render::user::edit_profile(&values, &errors, &user).into_response())
        }
    };

    match state.store.update_user(updated).await {
        Ok(updated) => {
            tracing::info!(user_id = updated.id, "Updated profile");
            Ok(redirect::found(&crate::urls::profile(&updated.username)))
        }
        Err(StoreError::Duplicate { .. }) => {
            let mut errors = FormErrors::default();
            errors.add("username", crate::forms::USERNAME_TAKEN);
            Ok(crate::render::user::edit_profile(&values, &errors, &user).into_response())
        }
        Err(err) => Err(err.into()),
    }
}
