use crate::blog::{Category, CategoryID, Post, UserID};

/// Which posts a listing page shows.
#[derive(Debug, Clone)]
pub struct PostQuery {
    pub author: Option<UserID>,
    pub category: Option<CategoryID>,
    /// Apply the public visibility filter evaluated at `now`.
    pub visible_only: bool,
    pub now: chrono::DateTime<chrono::Utc>,
}

impl PostQuery {
    /// Every post a stranger may see.
    pub fn visible(now: chrono::DateTime<chrono::Utc>) -> Self {
        PostQuery {
            author: None,
            category: None,
            visible_only: true,
            now,
        }
    }

    pub fn in_category(self, category: CategoryID) -> Self {
        PostQuery {
            category: Some(category),
            ..self
        }
    }

    /// Posts by `author`; the visibility filter only applies when someone
    /// other than the author is looking.
    pub fn by_author(
        author: UserID,
        viewer: Option<UserID>,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Self {
        PostQuery {
            author: Some(author),
            category: None,
            visible_only: viewer != Some(author),
            now,
        }
    }

    pub fn matches(&self, post: &Post, category: Option<&Category>) -> bool {
        if self.author.is_some_and(|author| author != post.author) {
            return false;
        }
        if self
            .category
            .is_some_and(|category| Some(category) != post.content.category)
        {
            return false;
        }

        !self.visible_only || is_visible(post, category, self.now)
    }
}

/// Published, not scheduled for later, and filed under a published category.
pub fn is_visible(
    post: &Post,
    category: Option<&Category>,
    now: chrono::DateTime<chrono::Utc>,
) -> bool {
    post.content.is_published
        && post.content.pub_date <= now
        && category.is_some_and(|category| category.is_published)
}

/// Newest publication date first; ties fall back to the newest id so the
/// order never changes between identical requests.
pub fn listing_order(a: &Post, b: &Post) -> std::cmp::Ordering {
    b.content
        .pub_date
        .cmp(&a.content.pub_date)
        .then_with(|| b.id.cmp(&a.id))
}
