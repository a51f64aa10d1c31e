use crate::blog::{Post, User};
use crate::error::Result;
use crate::forms::{FormErrors, PostForm};
use crate::render::post::PostFormPage;
use crate::state::{NestedRouter, State};
use axum::response::Html;
use axum::routing::get;

mod comment;
mod create;
mod delete;
mod detail;
mod edit;

pub fn route() -> NestedRouter {
    axum::Router::new()
        .route("/create", get(create::get).post(create::post))
        .route("/:post_id", get(detail::get))
        .route("/:post_id/edit", get(edit::get).post(edit::post))
        .route("/:post_id/delete", get(delete::get).post(delete::post))
        .merge(comment::route())
}

/// The create/edit form, with the category and location choices filled in
/// from the store.
async fn form_page(
    state: &State,
    action: &str,
    form: &PostForm,
    errors: &FormErrors,
    editing: Option<&Post>,
    user: &User,
) -> Result<Html<String>> {
    let categories = state.store.categories().await?;
    let locations = state.store.locations().await?;

    Ok(crate::render::post::post_form(
        &PostFormPage {
            heading: if editing.is_some() { "Edit post" } else { "New post" },
            action,
            form,
            errors,
            categories: &categories,
            locations: &locations,
            current_image: editing.and_then(|post| {
                post.content
                    .image
                    .as_deref()
                    .map(|image| (post.id, image))
            }),
        },
        Some(user),
    ))
}
