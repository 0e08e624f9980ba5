//! Leaderboard trackers and their comparators.
//!
//! The registry keeps one cached pointer per leaderboard (top post, top
//! poster, top responsive, top liar) and re-applies a pure comparator after
//! every relevant mutation. Each comparator is a strict multi-level order:
//! a level only breaks ties left by the previous one.
//!
//! # Invariants
//!
//! - Trackers are monotone: once set, a pointer only moves to a candidate
//!   the comparator ranks at least as high. They never regress, even when a
//!   later mutation lowers the incumbent's recomputed score.
//! - Trackers start unset; the matching query fails until the first
//!   qualifying mutation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use murmur_types::{PostId, UserId};

// ---------------------------------------------------------------------------
// Rank snapshots
// ---------------------------------------------------------------------------

/// The quantities the top-post comparator ranks a post by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostRank<'a> {
    /// Comment count on the post.
    pub comments: usize,
    /// The post author's id.
    pub author: &'a UserId,
    /// The post's id.
    pub id: PostId,
}

/// The quantities the top-poster comparator ranks a user by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PosterRank<'a> {
    /// Number of authored posts.
    pub posts: usize,
    /// Total comments moved: made plus received.
    pub comments: usize,
    /// The user's id.
    pub id: &'a UserId,
}

/// The quantities the top-responsive comparator ranks a user by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponsiveRank<'a> {
    /// Responsiveness ratio in [0, 1].
    pub ratio: Decimal,
    /// The user's id.
    pub id: &'a UserId,
}

// ---------------------------------------------------------------------------
// Comparators
// ---------------------------------------------------------------------------

/// Whether `candidate` displaces `incumbent` as top post.
///
/// Levels, applied strictly in order: more comments; then lexicographically
/// smaller author id; then larger post id (the more recent post wins among
/// same-author, same-count posts).
pub fn post_outranks(candidate: &PostRank<'_>, incumbent: &PostRank<'_>) -> bool {
    if candidate.comments != incumbent.comments {
        return candidate.comments > incumbent.comments;
    }
    if candidate.author != incumbent.author {
        return candidate.author < incumbent.author;
    }
    candidate.id > incumbent.id
}

/// Whether `candidate` displaces `incumbent` as top poster.
///
/// Levels: more posts; then more total comments (made + received); then
/// lexicographically smaller id.
pub fn poster_outranks(candidate: &PosterRank<'_>, incumbent: &PosterRank<'_>) -> bool {
    if candidate.posts != incumbent.posts {
        return candidate.posts > incumbent.posts;
    }
    if candidate.comments != incumbent.comments {
        return candidate.comments > incumbent.comments;
    }
    candidate.id < incumbent.id
}

/// Whether `candidate` displaces `incumbent` as top responsive user.
///
/// Levels: higher responsiveness ratio (exact decimal comparison); then
/// lexicographically smaller id.
pub fn responsive_outranks(
    candidate: &ResponsiveRank<'_>,
    incumbent: &ResponsiveRank<'_>,
) -> bool {
    if candidate.ratio != incumbent.ratio {
        return candidate.ratio > incumbent.ratio;
    }
    candidate.id < incumbent.id
}

/// Whether a candidate lie count displaces the incumbent top liar.
///
/// Strictly more lies wins; ties keep the incumbent.
pub const fn liar_outranks(candidate_lies: u64, incumbent_lies: u64) -> bool {
    candidate_lies > incumbent_lies
}

// ---------------------------------------------------------------------------
// Tracker state
// ---------------------------------------------------------------------------

/// The registry's cached leaderboard pointers.
///
/// All pointers start unset and are only ever moved by the registry's
/// refresh hooks, never by callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboards {
    top_post: Option<PostId>,
    top_poster: Option<UserId>,
    top_responsive: Option<UserId>,
    top_liar: Option<UserId>,
}

impl Leaderboards {
    /// Create an empty tracker set.
    pub const fn new() -> Self {
        Self {
            top_post: None,
            top_poster: None,
            top_responsive: None,
            top_liar: None,
        }
    }

    /// The current top post, if any comment has landed yet.
    pub const fn top_post(&self) -> Option<PostId> {
        self.top_post
    }

    /// The current top poster, if anyone has posted yet.
    pub const fn top_poster(&self) -> Option<&UserId> {
        self.top_poster.as_ref()
    }

    /// The current top responsive user, if anyone has commented yet.
    pub const fn top_responsive(&self) -> Option<&UserId> {
        self.top_responsive.as_ref()
    }

    /// The current top liar, if any Liar has posted yet.
    pub const fn top_liar(&self) -> Option<&UserId> {
        self.top_liar.as_ref()
    }

    /// Point the top-post tracker at a new post.
    pub(crate) fn set_top_post(&mut self, id: PostId) {
        self.top_post = Some(id);
    }

    /// Point the top-poster tracker at a new user.
    pub(crate) fn set_top_poster(&mut self, id: UserId) {
        self.top_poster = Some(id);
    }

    /// Point the top-responsive tracker at a new user.
    pub(crate) fn set_top_responsive(&mut self, id: UserId) {
        self.top_responsive = Some(id);
    }

    /// Point the top-liar tracker at a new user.
    pub(crate) fn set_top_liar(&mut self, id: UserId) {
        self.top_liar = Some(id);
    }
}
