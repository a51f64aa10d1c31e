use crate::blog::PostID;
use crate::error::{OrNotFound, Result};
use crate::forms::CommentForm;
use crate::routes::redirect;
use crate::state::extract::Authenticated;
use crate::state::SharedState;
use axum::extract::{Path, State};
use axum::response::Response;
use axum::Form;

pub(super) async fn post(
    State(state): SharedState,
    Authenticated(user): Authenticated,
    Path(post_id): Path<PostID>,
    form: Option<Form<CommentForm>>,
) -> Result<Response> {
    let post = state.store.post(post_id).await?.or_not_found()?;

    // an invalid comment is dropped without a word, like a missing one
    match form.map(|Form(form)| form.clean()) {
        Some(Ok(text)) => {
            let comment = state.store.insert_comment(post.id, user.id, text).await?;
            tracing::info!(post_id, comment_id = comment.id, "Added comment");
        }
        Some(Err(_)) | None => tracing::debug!(post_id, "Ignored empty comment"),
    }

    Ok(redirect::to_post(post.id))
}
