use crate::blog::{
    Category, CategoryID, Comment, CommentID, Post, PostContent, PostID, User, UserID,
};

pub fn hours_from_now(hours: i64) -> chrono::DateTime<chrono::Utc> {
    chrono::Utc::now() + chrono::Duration::hours(hours)
}

pub fn user(id: UserID, username: &str) -> User {
    User {
        id,
        username: username.to_string(),
        first_name: String::new(),
        last_name: String::new(),
        email: None,
        // not a valid argon2 hash, so nobody can log in with a password
        password_hash: "!".to_string(),
        date_joined: hours_from_now(-24 * 30),
    }
}

pub fn category(id: CategoryID, slug: &str, is_published: bool) -> Category {
    Category {
        id,
        title: format!("Category {slug}"),
        description: format!("Posts about {slug}"),
        slug: slug.to_string(),
        is_published,
        created_at: hours_from_now(-24 * 30),
    }
}

pub fn post(
    id: PostID,
    author: UserID,
    category: Option<CategoryID>,
    pub_date: chrono::DateTime<chrono::Utc>,
) -> Post {
    Post {
        id,
        author,
        created_at: pub_date,
        content: PostContent {
            title: format!("Post number {id}"),
            text: format!("Body of post number {id}"),
            pub_date,
            category,
            location: None,
            is_published: true,
            image: None,
        },
    }
}

pub fn comment(
    id: CommentID,
    post: PostID,
    author: UserID,
    created_at: chrono::DateTime<chrono::Utc>,
) -> Comment {
    Comment {
        id,
        post,
        author,
        text: format!("Comment number {id}"),
        created_at,
    }
}
