use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

pub type UserID = u64;
pub type CategoryID = u64;
pub type LocationID = u64;
pub type PostID = u64;
pub type CommentID = u64;
pub type SessionID = String;

pub const SESSION_ID_BYTES: usize = 32;
pub const SESSION_COOKIE: &str = "sessionid";

pub const IMAGE_NAME_MAX_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserID,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub password_hash: String,
    pub date_joined: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryID,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub slug: String,
    pub is_published: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationID,
    pub name: String,
    pub is_published: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// The author-editable part of a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostContent {
    pub title: String,
    pub text: String,
    /// Posts dated in the future stay hidden from other users until then.
    pub pub_date: chrono::DateTime<chrono::Utc>,
    pub category: Option<CategoryID>,
    #[serde(default)]
    pub location: Option<LocationID>,
    pub is_published: bool,
    /// File name under the post's media folder
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostID,
    pub author: UserID,
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(flatten)]
    pub content: PostContent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentID,
    pub post: PostID,
    pub author: UserID,
    pub text: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A post joined with everything a listing or detail page shows next to it.
#[derive(Debug, Clone)]
pub struct PostCard {
    pub post: Post,
    pub author_username: String,
    pub category: Option<Category>,
    pub location: Option<Location>,
    pub comment_count: usize,
}

#[derive(Debug, Clone)]
pub struct CommentCard {
    pub comment: Comment,
    pub author_username: String,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

impl Post {
    pub fn is_authored_by(&self, user: Option<&User>) -> bool {
        user.is_some_and(|user| user.id == self.author)
    }
}

impl Comment {
    pub fn is_authored_by(&self, user: Option<&User>) -> bool {
        user.is_some_and(|user| user.id == self.author)
    }
}

pub fn get_random_hex_string<const LEN: usize>() -> String {
    let mut bytes = [0u8; LEN];
    rand_chacha::ChaCha20Rng::from_entropy().fill_bytes(&mut bytes);

    bytes.iter().fold(String::new(), |mut output, b| {
        let _ = write!(output, "{b:02x}");
        output
    })
}
