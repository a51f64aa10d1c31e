use crate::blog::PostID;
use crate::error::{OrNotFound, Result};
use crate::forms::{FormErrors, ImageChange, PostForm};
use crate::routes::redirect;
use crate::state::extract::Authenticated;
use crate::state::SharedState;
use axum::extract::{Multipart, Path, State};
use axum::response::{IntoResponse, Response};

pub(super) async fn get(
    State(state): SharedState,
    Authenticated(user): Authenticated,
    Path(post_id): Path<PostID>,
) -> Result<Response> {
    let post = state.store.post(post_id).await?.or_not_found()?;
    if post.author != user.id {
        return Ok(redirect::to_post(post.id));
    }

    let form = PostForm::from_post(&post);
    let page = super::form_page(
        &state,
        &crate::urls::post_edit(post.id),
        &form,
        &FormErrors::default(),
        Some(&post),
        &user,
    )
    .await?;

    Ok(page.into_response())
}

pub(super) async fn post(
    State(state): SharedState,
    Authenticated(user): Authenticated,
    Path(post_id): Path<PostID>,
    multipart: Multipart,
) -> Result<Response> {
    let post = state.store.post(post_id).await?.or_not_found()?;
    if post.author != user.id {
        tracing::warn!(post_id, user = %user.username, "Refused edit of someone else's post");
        return Ok(redirect::to_post(post.id));
    }

    let form = PostForm::from_multipart(multipart).await?;
    let categories = state.store.categories().await?;
    let locations = state.store.locations().await?;

    let (mut content, image) = match form.clean(&categories, &locations).await {
        Ok(it) => it,
        Err(errors) => {
            let page = super::form_page(
                &state,
                &crate::urls::post_edit(post.id),
                &form,
                &errors,
                Some(&post),
                &user,
            )
            .await?;
            return Ok(page.into_response());
        }
    };

    content.image = match &image {
        ImageChange::Keep => post.content.image.clone(),
        ImageChange::Clear => None,
        ImageChange::Replace(upload) => Some(upload.file_name.clone()),
    };
    state.store.update_post(post.id, content).await?;

    match image {
        ImageChange::Keep => (),
        ImageChange::Clear => state.remove_post_media(post.id).await,
        ImageChange::Replace(upload) => {
            if let Err(err) = state.save_post_image(post.id, &upload).await {
                // the previous image is still on disk, point the post back at it
                if let Err(rollback_err) = state.store.update_post(post.id, post.content).await {
                    tracing::error!("Error rolling back post {post_id}: {rollback_err}");
                }
                return Err(anyhow::Error::from(err)
                    .context(format!("saving image for post {post_id}"))
                    .into());
            }
        }
    }

    tracing::info!(post_id, "Edited post");
    Ok(redirect::to_post(post.id))
}
