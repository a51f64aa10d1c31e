use crate::blog::{
    Category, Comment, CommentCard, CommentID, Location, NewUser, Post, PostCard, PostContent,
    PostID, User, UserID,
};

#[cfg(test)]
pub mod fixtures;
pub mod json;
pub mod query;

pub use json::JsonStore;
pub use query::PostQuery;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error on store snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("store snapshot is malformed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{kind} {id} does not exist")]
    Missing { kind: &'static str, id: u64 },

    #[error("{field} {value:?} is already taken")]
    Duplicate { field: &'static str, value: String },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Everything the request handlers need from persistence. Each call is a
/// single atomic unit; there are no multi-call transactions.
#[async_trait::async_trait]
pub trait Repository: Send + Sync + std::fmt::Debug {
    async fn user(&self, id: UserID) -> StoreResult<Option<User>>;
    async fn user_by_username(&self, username: &str) -> StoreResult<Option<User>>;
    async fn insert_user(&self, user: NewUser) -> StoreResult<User>;
    async fn update_user(&self, user: User) -> StoreResult<User>;

    async fn category_by_slug(&self, slug: &str) -> StoreResult<Option<Category>>;
    async fn categories(&self) -> StoreResult<Vec<Category>>;
    async fn locations(&self) -> StoreResult<Vec<Location>>;

    async fn post(&self, id: PostID) -> StoreResult<Option<Post>>;
    /// Like [`Repository::post`] but only returns the post when it passes the
    /// visibility filter at `now`.
    async fn visible_post(
        &self,
        id: PostID,
        now: chrono::DateTime<chrono::Utc>,
    ) -> StoreResult<Option<Post>>;
    async fn count_posts(&self, query: &PostQuery) -> StoreResult<usize>;
    async fn posts(
        &self,
        query: &PostQuery,
        offset: usize,
        limit: usize,
    ) -> StoreResult<Vec<PostCard>>;
    async fn post_card(&self, post: Post) -> StoreResult<PostCard>;
    async fn insert_post(&self, author: UserID, content: PostContent) -> StoreResult<Post>;
    async fn update_post(&self, id: PostID, content: PostContent) -> StoreResult<Post>;
    /// Removes the post together with its comments.
    async fn delete_post(&self, id: PostID) -> StoreResult<Option<Post>>;

    async fn comment(&self, id: CommentID) -> StoreResult<Option<Comment>>;
    /// Comments of a post, oldest first.
    async fn comments(&self, post: PostID) -> StoreResult<Vec<CommentCard>>;
    async fn insert_comment(
        &self,
        post: PostID,
        author: UserID,
        text: String,
    ) -> StoreResult<Comment>;
    async fn update_comment(&self, id: CommentID, text: String) -> StoreResult<Comment>;
    async fn delete_comment(&self, id: CommentID) -> StoreResult<Option<Comment>>;
}
