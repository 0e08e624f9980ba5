//! Core data records shared across the Murmur workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ids::{PostId, UserId};

/// An immutable record of a stance taken by a user against a specific post.
///
/// The stance string is stored verbatim as declared; comments carry no
/// derived truthfulness flag. Once created, a comment never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique identifier for this comment record.
    pub id: Uuid,
    /// The user who wrote the comment.
    pub author: UserId,
    /// The post the comment was made against.
    pub post: PostId,
    /// The declared stance, recorded as-is.
    pub stance: String,
    /// The comment body.
    pub message: String,
    /// When the comment was recorded.
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a comment record with a fresh UUID v7 and the current time.
    pub fn new(
        author: UserId,
        post: PostId,
        stance: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            author,
            post,
            stance: stance.into(),
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}

/// A hashtag interest declared by a Fanatic user at registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fanaticism {
    /// The hashtag of interest.
    pub hashtag: String,
    /// Declared intensity of the interest.
    pub intensity: u32,
}

impl Fanaticism {
    /// Create a fanaticism declaration.
    pub fn new(hashtag: impl Into<String>, intensity: u32) -> Self {
        Self {
            hashtag: hashtag.into(),
            intensity,
        }
    }
}
