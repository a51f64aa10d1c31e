use crate::blog::{Comment, CommentID, PostID};
use crate::error::{AppError, OrNotFound, Result};
use crate::state::{NestedRouter, State};
use axum::routing::{get, post};

mod add;
mod delete;
mod edit;

pub fn route() -> NestedRouter {
    axum::Router::new()
        .route("/:post_id/comment", post(add::post))
        .route(
            "/:post_id/edit_comment/:comment_id",
            get(edit::get).post(edit::post),
        )
        .route(
            "/:post_id/delete_comment/:comment_id",
            get(delete::get).post(delete::post),
        )
}

/// The comment, as long as it really belongs to `post_id`.
async fn find_comment(state: &State, post_id: PostID, comment_id: CommentID) -> Result<Comment> {
    let comment = state.store.comment(comment_id).await?.or_not_found()?;
    if comment.post != post_id {
        return Err(AppError::NotFound);
    }

    Ok(comment)
}
