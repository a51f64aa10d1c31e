use crate::blog::PostID;
use crate::error::{AppError, OrNotFound, Result};
use crate::state::extract::Viewer;
use crate::state::SharedState;
use anyhow::Context;
use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use std::io::ErrorKind;
use tokio_util::io::ReaderStream;

#[derive(Debug, Deserialize)]
pub(super) struct ImageQueryOptions {
    #[serde(default)]
    pub raw: bool,
    #[serde(default)]
    pub large: bool,
}

pub(super) async fn get(
    State(state): SharedState,
    Path((post_id, image)): Path<(PostID, String)>,
    Query(options): Query<ImageQueryOptions>,
    viewer: Viewer,
) -> Result<Response> {
    // images follow the visibility of their post, and only the name the post
    // references is ever served
    let post = state.store.post(post_id).await?.or_not_found()?;
    if !post.is_authored_by(viewer.user()) {
        state
            .store
            .visible_post(post_id, chrono::Utc::now())
            .await?
            .or_not_found()?;
    }
    if post.content.image.as_deref() != Some(image.as_str()) {
        return Err(AppError::NotFound);
    }

    let image_dir = state.post_image_dir(post_id);
    let raw_path = image_dir.join("raw").join(&image);
    let image_file_path = if options.raw {
        raw_path.clone()
    } else if options.large {
        image_dir.join("large").join(&image)
    } else {
        image_dir.join("small").join(&image)
    };

    let context = || format!("reading image {image} for post {post_id}");
    let mut file = open_if_exists(&image_file_path).await.with_context(context)?;
    if file.is_none() && !options.raw {
        // thumbnails are made in the background, the upload stands in until then
        file = open_if_exists(&raw_path).await.with_context(context)?;
    }
    let file = file.or_not_found()?;
    let body = Body::from_stream(ReaderStream::new(file));

    if let Some(mime_guess) = new_mime_guess::from_path(&image_file_path).first() {
        Ok(([(header::CONTENT_TYPE, mime_guess.to_string())], body).into_response())
    } else {
        Ok(body.into_response())
    }
}

async fn open_if_exists(path: &std::path::Path) -> std::io::Result<Option<tokio::fs::File>> {
    match tokio::fs::File::open(path).await {
        Ok(file) => Ok(Some(file)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}
