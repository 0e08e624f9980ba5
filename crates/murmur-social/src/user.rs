//! User state and kind-dispatched behavior.
//!
//! A [`User`] holds identity, the friend edge set, authored post ids, and
//! the comment bookkeeping the trackers feed on. Relations are stored by
//! identifier and resolved through the registry -- no object back
//! references, no cycles.
//!
//! Behavior differences between kinds (truthfulness derivation, comment
//! eligibility) dispatch on [`UserKind`]; the registry enforces cross-user
//! invariants such as friendship symmetry.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use murmur_types::{Comment, Fanaticism, PostId, UserId, UserKind};

use crate::error::SocialError;
use crate::post::Post;

/// A registered user: identity, friends, authored posts, and comment
/// bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique id; the sort key for every ordered listing.
    id: UserId,
    /// Behavioral kind, fixed at registration.
    kind: UserKind,
    /// Friend ids. Symmetric with each friend's own set; the registry
    /// maintains both sides.
    friends: BTreeSet<UserId>,
    /// Authored post ids in creation order.
    posts: Vec<PostId>,
    /// Outgoing comments in append order.
    comments_made: Vec<Comment>,
    /// Distinct posts this user has commented on (responsiveness numerator).
    commented_posts: BTreeSet<PostId>,
    /// Number of comments received across this user's posts.
    comments_received: usize,
    /// Posts whose recorded truthfulness differed from the declared stance.
    lies_told: u64,
    /// Declared hashtag interests; non-empty only for Fanatic users.
    fanaticisms: BTreeMap<String, u32>,
    /// When the user was registered.
    created_at: DateTime<Utc>,
}

impl User {
    /// Create a user of the given kind with no friends, posts, or comments.
    ///
    /// A Fanatic created through this path has no declared interests; use
    /// [`User::new_fanatic`] to preload them.
    pub fn new(kind: UserKind, id: UserId) -> Self {
        Self {
            id,
            kind,
            friends: BTreeSet::new(),
            posts: Vec::new(),
            comments_made: Vec::new(),
            commented_posts: BTreeSet::new(),
            comments_received: 0,
            lies_told: 0,
            fanaticisms: BTreeMap::new(),
            created_at: Utc::now(),
        }
    }

    /// Create a Fanatic user preloaded with hashtag interests.
    ///
    /// Duplicate hashtags keep the last declared intensity.
    pub fn new_fanatic(id: UserId, fanaticisms: impl IntoIterator<Item = Fanaticism>) -> Self {
        let mut user = Self::new(UserKind::Fanatic, id);
        user.fanaticisms = fanaticisms
            .into_iter()
            .map(|f| (f.hashtag, f.intensity))
            .collect();
        user
    }

    /// The user's id.
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// The user's kind.
    pub const fn kind(&self) -> UserKind {
        self.kind
    }

    /// When the user was registered.
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // -------------------------------------------------------------------
    // Friends
    // -------------------------------------------------------------------

    /// The friend id set, ascending.
    pub const fn friends(&self) -> &BTreeSet<UserId> {
        &self.friends
    }

    /// Whether the given user is a friend.
    pub fn is_friend(&self, other: &UserId) -> bool {
        self.friends.contains(other)
    }

    /// Number of friends.
    pub fn num_friends(&self) -> usize {
        self.friends.len()
    }

    /// Record a friend edge on this side only.
    ///
    /// The registry calls this on both endpoints after validating the pair
    /// (existence, irreflexivity, no duplicate edge).
    pub fn record_friend(&mut self, other: UserId) {
        self.friends.insert(other);
    }

    // -------------------------------------------------------------------
    // Posts
    // -------------------------------------------------------------------

    /// Authored post ids in creation order.
    pub fn posts(&self) -> &[PostId] {
        &self.posts
    }

    /// Number of authored posts.
    pub fn num_posts(&self) -> usize {
        self.posts.len()
    }

    /// Record a newly authored post id.
    pub fn record_post(&mut self, id: PostId) {
        self.posts.push(id);
    }

    // -------------------------------------------------------------------
    // Comments
    // -------------------------------------------------------------------

    /// Whether this user may comment on the given post.
    ///
    /// Everyone may comment on their own posts. Selfcentered users stop
    /// there; every other kind may also comment when they appear in the
    /// post's frozen friend snapshot. Friendships formed after the post
    /// never widen eligibility.
    pub fn can_comment_on(&self, post: &Post) -> bool {
        if post.author() == &self.id {
            return true;
        }
        self.kind.comments_beyond_own() && post.author_friends().contains(&self.id)
    }

    /// Outgoing comments in append order.
    pub fn comments_made(&self) -> &[Comment] {
        &self.comments_made
    }

    /// Number of outgoing comments.
    pub fn num_comments_made(&self) -> usize {
        self.comments_made.len()
    }

    /// Distinct posts this user has commented on.
    pub const fn commented_posts(&self) -> &BTreeSet<PostId> {
        &self.commented_posts
    }

    /// Number of comments received across this user's posts.
    pub const fn num_comments_received(&self) -> usize {
        self.comments_received
    }

    /// Total comments moved by this user: made plus received.
    ///
    /// This is the top-poster tie-break quantity. Saturating: a comparator
    /// input must stay total even at the integer edge.
    pub fn num_comments_total(&self) -> usize {
        self.comments_made.len().saturating_add(self.comments_received)
    }

    /// Record an outgoing comment.
    pub fn record_comment_made(&mut self, comment: Comment) {
        self.commented_posts.insert(comment.post);
        self.comments_made.push(comment);
    }

    /// Record a comment landing on one of this user's posts.
    pub fn record_comment_received(&mut self) -> Result<(), SocialError> {
        self.comments_received =
            self.comments_received
                .checked_add(1)
                .ok_or_else(|| SocialError::ArithmeticOverflow {
                    context: String::from("received-comment count increment"),
                })?;
        Ok(())
    }

    // -------------------------------------------------------------------
    // Lies
    // -------------------------------------------------------------------

    /// Number of posts whose recorded truthfulness differed from the
    /// declared stance.
    pub const fn lies_told(&self) -> u64 {
        self.lies_told
    }

    /// Record one lie.
    pub fn record_lie(&mut self) -> Result<(), SocialError> {
        self.lies_told =
            self.lies_told
                .checked_add(1)
                .ok_or_else(|| SocialError::ArithmeticOverflow {
                    context: String::from("lie count increment"),
                })?;
        Ok(())
    }

    // -------------------------------------------------------------------
    // Fanaticisms
    // -------------------------------------------------------------------

    /// Declared hashtag interests, keyed by hashtag.
    pub const fn fanaticisms(&self) -> &BTreeMap<String, u32> {
        &self.fanaticisms
    }

    /// Whether this user declared interest in the given hashtag.
    pub fn is_fanatic_about(&self, hashtag: &str) -> bool {
        self.fanaticisms.contains_key(hashtag)
    }

    /// The declared intensity for a hashtag, if any.
    pub fn fanaticism_intensity(&self, hashtag: &str) -> Option<u32> {
        self.fanaticisms.get(hashtag).copied()
    }
}
