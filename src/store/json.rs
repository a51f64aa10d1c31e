use super::query::{is_visible, listing_order, PostQuery};
use super::{Repository, StoreError, StoreResult};
use crate::blog::{
    Category, CategoryID, Comment, CommentCard, CommentID, Location, LocationID, NewUser, Post,
    PostCard, PostContent, PostID, User, UserID,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use tokio::sync::RwLock;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tables {
    pub users: BTreeMap<UserID, User>,
    pub categories: BTreeMap<CategoryID, Category>,
    pub locations: BTreeMap<LocationID, Location>,
    pub posts: BTreeMap<PostID, Post>,
    pub comments: BTreeMap<CommentID, Comment>,
    sequences: Sequences,
}

// next id to hand out per table, so deleted ids are never reused
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
struct Sequences {
    user: u64,
    post: u64,
    comment: u64,
}

fn next_id<T>(sequence: &mut u64, table: &BTreeMap<u64, T>) -> u64 {
    let id = table
        .keys()
        .next_back()
        .map_or(1, |last| last + 1)
        .max(*sequence);
    *sequence = id + 1;
    id
}

/// All tables held in memory and, when backed by a path, written out as one
/// JSON snapshot after every change.
#[derive(Debug)]
pub struct JsonStore {
    path: Option<PathBuf>,
    tables: RwLock<Tables>,
}

impl JsonStore {
    pub fn in_memory(tables: Tables) -> Self {
        JsonStore {
            path: None,
            tables: RwLock::new(tables),
        }
    }

    pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let tables = match tokio::fs::read(&path).await {
            Ok(it) => serde_json::from_slice::<Tables>(&it)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No store snapshot at {path:?}, starting empty");
                Tables::default()
            }
            Err(err) => return Err(err.into()),
        };

        tracing::info!(
            users = tables.users.len(),
            categories = tables.categories.len(),
            posts = tables.posts.len(),
            comments = tables.comments.len(),
            "Loaded store snapshot {path:?}"
        );

        Ok(JsonStore {
            path: Some(path),
            tables: RwLock::new(tables),
        })
    }

    async fn flush(&self, tables: &Tables) -> StoreResult<()> {
        let Some(path) = self.path.as_ref() else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let staging_path = path.with_extension("json.tmp");
        tokio::fs::write(&staging_path, serde_json::to_vec_pretty(tables)?).await?;
        tokio::fs::rename(&staging_path, path).await?;

        Ok(())
    }

    /// Applies `change` to a copy of the tables and only swaps it in once the
    /// snapshot has been written.
    async fn write<T>(
        &self,
        change: impl FnOnce(&mut Tables) -> StoreResult<T> + Send,
    ) -> StoreResult<T> {
        let mut tables = self.tables.write().await;
        let mut next = tables.clone();
        let output = change(&mut next)?;

        self.flush(&next).await?;
        *tables = next;

        Ok(output)
    }
}

impl Tables {
    fn category_of(&self, post: &Post) -> Option<&Category> {
        post.content
            .category
            .and_then(|category| self.categories.get(&category))
    }

    fn username(&self, id: UserID) -> String {
        self.users
            .get(&id)
            .map(|user| user.username.clone())
            .unwrap_or_default()
    }

    fn card(&self, post: Post, comment_count: usize) -> PostCard {
        PostCard {
            author_username: self.username(post.author),
            category: self.category_of(&post).cloned(),
            location: post
                .content
                .location
                .and_then(|location| self.locations.get(&location))
                .cloned(),
            comment_count,
            post,
        }
    }

    fn matching_posts<'a>(&'a self, query: &'a PostQuery) -> impl Iterator<Item = &'a Post> + 'a {
        self.posts
            .values()
            .filter(move |post| query.matches(post, self.category_of(post)))
    }

    fn check_username_free(&self, username: &str, except: Option<UserID>) -> StoreResult<()> {
        let taken = self
            .users
            .values()
            .any(|user| user.username == username && Some(user.id) != except);

        if taken {
            return Err(StoreError::Duplicate {
                field: "username",
                value: username.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl Repository for JsonStore {
    async fn user(&self, id: UserID) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn insert_user(&self, user: NewUser) -> StoreResult<User> {
        self.write(|tables| {
            tables.check_username_free(&user.username, None)?;

            let id = next_id(&mut tables.sequences.user, &tables.users);
            let user = User {
                id,
                username: user.username,
                first_name: String::new(),
                last_name: String::new(),
                email: None,
                password_hash: user.password_hash,
                date_joined: chrono::Utc::now(),
            };
            tables.users.insert(id, user.clone());

            Ok(user)
        })
        .await
    }

    async fn update_user(&self, user: User) -> StoreResult<User> {
        self.write(|tables| {
            if !tables.users.contains_key(&user.id) {
                return Err(StoreError::Missing {
                    kind: "user",
                    id: user.id,
                });
            }
            tables.check_username_free(&user.username, Some(user.id))?;
            tables.users.insert(user.id, user.clone());

            Ok(user)
        })
        .await
    }

    async fn category_by_slug(&self, slug: &str) -> StoreResult<Option<Category>> {
        Ok(self
            .tables
            .read()
            .await
            .categories
            .values()
            .find(|category| category.slug == slug)
            .cloned())
    }

    async fn categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self
            .tables
            .read()
            .await
            .categories
            .values()
            .cloned()
            .collect())
    }

    async fn locations(&self) -> StoreResult<Vec<Location>> {
        Ok(self
            .tables
            .read()
            .await
            .locations
            .values()
            .cloned()
            .collect())
    }

    async fn post(&self, id: PostID) -> StoreResult<Option<Post>> {
        Ok(self.tables.read().await.posts.get(&id).cloned())
    }

    async fn visible_post(
        &self,
        id: PostID,
        now: chrono::DateTime<chrono::Utc>,
    ) -> StoreResult<Option<Post>> {
        let tables = self.tables.read().await;
        Ok(tables
            .posts
            .get(&id)
            .filter(|post| is_visible(post, tables.category_of(post), now))
            .cloned())
    }

    async fn count_posts(&self, query: &PostQuery) -> StoreResult<usize> {
        Ok(self.tables.read().await.matching_posts(query).count())
    }

    async fn posts(
        &self,
        query: &PostQuery,
        offset: usize,
        limit: usize,
    ) -> StoreResult<Vec<PostCard>> {
        let tables = self.tables.read().await;

        let mut posts = tables.matching_posts(query).collect::<Vec<_>>();
        posts.sort_by(|a, b| listing_order(a, b));

        let mut comment_counts = HashMap::<PostID, usize>::new();
        for comment in tables.comments.values() {
            *comment_counts.entry(comment.post).or_default() += 1;
        }

        Ok(posts
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|post| {
                let count = comment_counts.get(&post.id).copied().unwrap_or(0);
                tables.card(post.clone(), count)
            })
            .collect())
    }

    async fn post_card(&self, post: Post) -> StoreResult<PostCard> {
        let tables = self.tables.read().await;
        let comment_count = tables
            .comments
            .values()
            .filter(|comment| comment.post == post.id)
            .count();

        Ok(tables.card(post, comment_count))
    }

    async fn insert_post(&self, author: UserID, content: PostContent) -> StoreResult<Post> {
        self.write(|tables| {
            let id = next_id(&mut tables.sequences.post, &tables.posts);
            let post = Post {
                id,
                author,
                created_at: chrono::Utc::now(),
                content,
            };
            tables.posts.insert(id, post.clone());

            Ok(post)
        })
        .await
    }

    async fn update_post(&self, id: PostID, content: PostContent) -> StoreResult<Post> {
        self.write(|tables| {
            let post = tables
                .posts
                .get_mut(&id)
                .ok_or(StoreError::Missing { kind: "post", id })?;
            post.content = content;

            Ok(post.clone())
        })
        .await
    }

    async fn delete_post(&self, id: PostID) -> StoreResult<Option<Post>> {
        self.write(|tables| {
            let removed = tables.posts.remove(&id);
            if removed.is_some() {
                tables.comments.retain(|_, comment| comment.post != id);
            }

            Ok(removed)
        })
        .await
    }

    async fn comment(&self, id: CommentID) -> StoreResult<Option<Comment>> {
        Ok(self.tables.read().await.comments.get(&id).cloned())
    }

    async fn comments(&self, post: PostID) -> StoreResult<Vec<CommentCard>> {
        let tables = self.tables.read().await;

        let mut comments = tables
            .comments
            .values()
            .filter(|comment| comment.post == post)
            .collect::<Vec<_>>();
        comments.sort_by_key(|comment| (comment.created_at, comment.id));

        Ok(comments
            .into_iter()
            .map(|comment| CommentCard {
                author_username: tables.username(comment.author),
                comment: comment.clone(),
            })
            .collect())
    }

    async fn insert_comment(
        &self,
        post: PostID,
        author: UserID,
        text: String,
    ) -> StoreResult<Comment> {
        self.write(|tables| {
            if !tables.posts.contains_key(&post) {
                return Err(StoreError::Missing {
                    kind: "post",
                    id: post,
                });
            }

            let id = next_id(&mut tables.sequences.comment, &tables.comments);
            let comment = Comment {
                id,
                post,
                author,
                text,
                created_at: chrono::Utc::now(),
            };
            tables.comments.insert(id, comment.clone());

            Ok(comment)
        })
        .await
    }

    async fn update_comment(&self, id: CommentID, text: String) -> StoreResult<Comment> {
        self.write(|tables| {
            let comment = tables
                .comments
                .get_mut(&id)
                .ok_or(StoreError::Missing { kind: "comment", id })?;
            comment.text = text;

            Ok(comment.clone())
        })
        .await
    }

    async fn delete_comment(&self, id: CommentID) -> StoreResult<Option<Comment>> {
        self.write(|tables| Ok(tables.comments.remove(&id))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::{category, comment, hours_from_now, post, user};

    fn sample_tables() -> Tables {
        let mut tables = Tables::default();
        tables.users.insert(1, user(1, "alice"));
        tables.users.insert(2, user(2, "bob"));
        tables.categories.insert(1, category(1, "travel", true));
        tables.categories.insert(2, category(2, "drafts", false));

        tables.posts.insert(1, post(1, 1, Some(1), hours_from_now(-3)));
        tables.posts.insert(2, post(2, 1, Some(1), hours_from_now(-1)));
        // scheduled for later
        tables.posts.insert(3, post(3, 1, Some(1), hours_from_now(5)));
        // unpublished category
        tables.posts.insert(4, post(4, 2, Some(2), hours_from_now(-2)));
        // no category at all
        tables.posts.insert(5, post(5, 2, None, hours_from_now(-4)));
        let mut hidden = post(6, 2, Some(1), hours_from_now(-6));
        hidden.content.is_published = false;
        tables.posts.insert(6, hidden);

        tables.comments.insert(1, comment(1, 2, 2, hours_from_now(-1)));
        tables.comments.insert(2, comment(2, 2, 1, hours_from_now(-2)));
        tables
    }

    fn ids(cards: &[PostCard]) -> Vec<PostID> {
        cards.iter().map(|card| card.post.id).collect()
    }

    #[tokio::test]
    async fn visible_listing_filters_and_orders_newest_first() {
        let store = JsonStore::in_memory(sample_tables());
        let query = PostQuery::visible(chrono::Utc::now());

        assert_eq!(store.count_posts(&query).await.unwrap(), 2);
        let cards = store.posts(&query, 0, 10).await.unwrap();
        assert_eq!(ids(&cards), vec![2, 1]);
        assert_eq!(cards[0].comment_count, 2);
        assert_eq!(cards[0].author_username, "alice");
        assert_eq!(cards[1].comment_count, 0);
    }

    #[tokio::test]
    async fn author_sees_all_own_posts_but_strangers_do_not() {
        let store = JsonStore::in_memory(sample_tables());
        let now = chrono::Utc::now();

        let own = PostQuery::by_author(2, Some(2), now);
        assert_eq!(ids(&store.posts(&own, 0, 10).await.unwrap()), vec![4, 5, 6]);

        let stranger = PostQuery::by_author(2, Some(1), now);
        assert!(store.posts(&stranger, 0, 10).await.unwrap().is_empty());

        let anonymous = PostQuery::by_author(1, None, now);
        assert_eq!(ids(&store.posts(&anonymous, 0, 10).await.unwrap()), vec![2, 1]);
    }

    #[tokio::test]
    async fn visible_post_hides_scheduled_and_unpublished() {
        let store = JsonStore::in_memory(sample_tables());
        let now = chrono::Utc::now();

        assert!(store.visible_post(1, now).await.unwrap().is_some());
        for hidden in [3, 4, 5, 6] {
            assert!(store.post(hidden).await.unwrap().is_some());
            assert!(store.visible_post(hidden, now).await.unwrap().is_none());
        }
    }

    #[tokio::test]
    async fn offset_and_limit_slice_the_ordered_listing() {
        let mut tables = Tables::default();
        tables.users.insert(1, user(1, "alice"));
        tables.categories.insert(1, category(1, "travel", true));
        for id in 1..=25 {
            tables
                .posts
                .insert(id, post(id, 1, Some(1), hours_from_now(-(id as i64))));
        }
        let store = JsonStore::in_memory(tables);
        let query = PostQuery::visible(chrono::Utc::now());

        let second_page = store.posts(&query, 10, 10).await.unwrap();
        assert_eq!(ids(&second_page), (11..=20).collect::<Vec<_>>());
        assert_eq!(ids(&store.posts(&query, 10, 10).await.unwrap()), ids(&second_page));
    }

    #[tokio::test]
    async fn deleting_a_post_removes_its_comments() {
        let store = JsonStore::in_memory(sample_tables());

        let removed = store.delete_post(2).await.unwrap();
        assert_eq!(removed.map(|post| post.id), Some(2));
        assert!(store.comment(1).await.unwrap().is_none());
        assert!(store.comments(2).await.unwrap().is_empty());
        assert!(store.delete_post(2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn comments_come_back_oldest_first() {
        let store = JsonStore::in_memory(sample_tables());

        let comments = store.comments(2).await.unwrap();
        let order = comments
            .iter()
            .map(|card| card.comment.id)
            .collect::<Vec<_>>();
        assert_eq!(order, vec![2, 1]);
        assert_eq!(comments[0].author_username, "alice");
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = JsonStore::in_memory(sample_tables());
        let content = post(0, 1, Some(1), hours_from_now(-1)).content;

        let first = store.insert_post(1, content.clone()).await.unwrap();
        assert_eq!(first.id, 7);
        store.delete_post(first.id).await.unwrap();
        let second = store.insert_post(1, content).await.unwrap();
        assert_eq!(second.id, 8);
    }

    #[tokio::test]
    async fn usernames_stay_unique() {
        let store = JsonStore::in_memory(sample_tables());

        let err = store
            .insert_user(NewUser {
                username: "alice".to_string(),
                password_hash: String::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { field: "username", .. }));

        let mut bob = store.user(2).await.unwrap().unwrap();
        bob.username = "alice".to_string();
        assert!(store.update_user(bob).await.is_err());
        assert_eq!(store.user(2).await.unwrap().unwrap().username, "bob");
    }

    #[tokio::test]
    async fn snapshot_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let store = JsonStore::open(&path).await.unwrap();
        let user = store
            .insert_user(NewUser {
                username: "carol".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap();
        let content = post(0, user.id, None, hours_from_now(-1)).content;
        let post = store.insert_post(user.id, content).await.unwrap();
        store
            .insert_comment(post.id, user.id, "first!".to_string())
            .await
            .unwrap();
        drop(store);

        let reopened = JsonStore::open(&path).await.unwrap();
        assert_eq!(
            reopened.user_by_username("carol").await.unwrap(),
            Some(user)
        );
        assert_eq!(reopened.post(post.id).await.unwrap(), Some(post.clone()));
        assert_eq!(reopened.comments(post.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn commenting_on_a_missing_post_fails() {
        let store = JsonStore::in_memory(sample_tables());

        let err = store
            .insert_comment(99, 1, "hello".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Missing { kind: "post", id: 99 }));
    }
}
