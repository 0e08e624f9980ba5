//! Post state: message, hashtags, derived truthfulness, the frozen
//! author-friend snapshot, and the append-ordered comment list.
//!
//! Posts are owned by the registry and reachable only through it. The friend
//! snapshot is copied from the author at creation time and never touched
//! again -- visibility of a post is decided against the world as it was when
//! the post was made, not as it is now.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use murmur_types::{Comment, PostId, UserId};

/// A message posted by a user, with its derived truthfulness and the
/// creation-time snapshot of the author's friend set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Registry-unique id, strictly increasing in creation order.
    id: PostId,
    /// The author's id.
    author: UserId,
    /// Hashtags attached to the message.
    hashtags: BTreeSet<String>,
    /// The message body.
    message: String,
    /// Truthfulness derived from the declared stance and the author's kind.
    truthfulness: bool,
    /// The author's friend set frozen at post time.
    author_friends: BTreeSet<UserId>,
    /// Comments in append order.
    comments: Vec<Comment>,
    /// When the post was created.
    created_at: DateTime<Utc>,
}

impl Post {
    /// Create a post, freezing the author's friend set as it is right now.
    pub fn new(
        id: PostId,
        author: UserId,
        hashtags: BTreeSet<String>,
        truthfulness: bool,
        message: impl Into<String>,
        author_friends: BTreeSet<UserId>,
    ) -> Self {
        Self {
            id,
            author,
            hashtags,
            message: message.into(),
            truthfulness,
            author_friends,
            comments: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// The post's id.
    pub const fn id(&self) -> PostId {
        self.id
    }

    /// The author's id.
    pub const fn author(&self) -> &UserId {
        &self.author
    }

    /// The hashtags attached to the message.
    pub const fn hashtags(&self) -> &BTreeSet<String> {
        &self.hashtags
    }

    /// Whether the post carries the given hashtag.
    pub fn has_hashtag(&self, hashtag: &str) -> bool {
        self.hashtags.contains(hashtag)
    }

    /// The message body.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The truthfulness derived at creation. Immutable.
    pub const fn truthfulness(&self) -> bool {
        self.truthfulness
    }

    /// The author's friend set as it was when the post was created.
    ///
    /// Friendships formed after creation never show up here.
    pub const fn author_friends(&self) -> &BTreeSet<UserId> {
        &self.author_friends
    }

    /// Whether the given user could see this post: its author, or anyone in
    /// the frozen friend snapshot.
    pub fn is_visible_to(&self, user: &UserId) -> bool {
        &self.author == user || self.author_friends.contains(user)
    }

    /// When the post was created.
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Append a comment. The count this feeds is what the top-post
    /// comparator ranks on.
    pub fn add_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    /// Number of comments on the post.
    pub fn num_comments(&self) -> usize {
        self.comments.len()
    }

    /// Iterate over the comments in append order.
    pub fn comments(&self) -> impl Iterator<Item = &Comment> {
        self.comments.iter()
    }
}
