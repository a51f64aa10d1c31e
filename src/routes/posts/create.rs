use crate::error::Result;
use crate::forms::{FormErrors, ImageChange, PostForm};
use crate::routes::redirect;
use crate::state::extract::Authenticated;
use crate::state::SharedState;
use axum::extract::{Multipart, State};
use axum::response::{Html, IntoResponse, Response};

pub(super) async fn get(
    State(state): SharedState,
    Authenticated(user): Authenticated,
) -> Result<Html<String>> {
    let form = PostForm::new(chrono::Utc::now());

    super::form_page(
        &state,
        crate::urls::POST_CREATE,
        &form,
        &FormErrors::default(),
        None,
        &user,
    )
    .await
}

pub(super) async fn post(
    State(state): SharedState,
    Authenticated(user): Authenticated,
    multipart: Multipart,
) -> Result<Response> {
    let form = PostForm::from_multipart(multipart).await?;
    let categories = state.store.categories().await?;
    let locations = state.store.locations().await?;

    let (mut content, image) = match form.clean(&categories, &locations).await {
        Ok(it) => it,
        Err(errors) => {
            let page =
                super::form_page(&state, crate::urls::POST_CREATE, &form, &errors, None, &user)
                    .await?;
            return Ok(page.into_response());
        }
    };

    let upload = match image {
        ImageChange::Replace(upload) => Some(upload),
        ImageChange::Keep | ImageChange::Clear => None,
    };
    content.image = upload.as_ref().map(|upload| upload.file_name.clone());

    let post = state.store.insert_post(user.id, content).await?;
    if let Some(upload) = upload {
        if let Err(err) = state.save_post_image(post.id, &upload).await {
            // no post may name an image that was never stored
            if let Err(rollback_err) = state.store.delete_post(post.id).await {
                tracing::error!("Error rolling back post {}: {rollback_err}", post.id);
            }
            return Err(anyhow::Error::from(err)
                .context(format!("saving image for post {}", post.id))
                .into());
        }
    }

    tracing::info!(post_id = post.id, author = %user.username, "Created post");
    Ok(redirect::found(&crate::urls::profile(&user.username)))
}
