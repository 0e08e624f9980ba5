//! Type-safe identifier wrappers for users and posts.
//!
//! User ids are caller-chosen strings whose natural ordering is the sort key
//! for every ordered collection and iterator in the engine. Post ids are
//! plain integers allocated by the registry, unique across the whole network
//! and strictly increasing in creation order. Wrapping both prevents
//! accidental mixing of identifiers at compile time.

use serde::{Deserialize, Serialize};

/// Unique identifier for a user in the network.
///
/// Ordering is the natural string ordering of the inner value; iteration
/// over users, friends, and fanatics follows it everywhere.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    /// Create a user id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Return the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner [`String`].
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl core::fmt::Display for UserId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Unique identifier for a post.
///
/// Allocated by the registry from a monotone counter: ids are unique across
/// the whole network (not per author) and strictly increasing in creation
/// order, so a larger id always means a more recent post.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PostId(pub u64);

impl PostId {
    /// Return the inner integer value.
    pub const fn into_inner(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for PostId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PostId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<PostId> for u64 {
    fn from(id: PostId) -> Self {
        id.0
    }
}
