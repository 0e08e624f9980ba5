//! The user registry: single owner of all users and posts.
//!
//! Every operation enters through [`UserRegistry`]. It routes mutations to
//! the right [`User`] and [`Post`], enforces the cross-user invariants
//! (friendship symmetry, global post ids, atomic check-then-act comments),
//! and re-applies the leaderboard comparators after each mutation.
//!
//! # Architecture
//!
//! Users and posts live in `BTreeMap`s keyed by their ids, so every listing
//! falls out in ascending key order for free. Relations are identifiers
//! resolved against these maps -- there are no object back references.
//! Trackers are registry-owned cached pointers moved only by the private
//! refresh hooks; callers can read them, never set them.
//!
//! # Errors
//!
//! All operations validate before mutating: a rejected call leaves the
//! registry exactly as it was.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use murmur_types::{Comment, Fanaticism, PostId, UserId, UserKind};

use crate::error::SocialError;
use crate::leaderboard::{
    Leaderboards, PostRank, PosterRank, ResponsiveRank, liar_outranks, post_outranks,
    poster_outranks, responsive_outranks,
};
use crate::post::Post;
use crate::stance;
use crate::user::User;

/// The single owner of all users, posts, and leaderboard trackers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRegistry {
    /// All users indexed by id; iteration order is ascending id.
    users: BTreeMap<UserId, User>,
    /// All posts indexed by their globally unique id.
    posts: BTreeMap<PostId, Post>,
    /// The next post id to allocate; strictly increasing, never reused.
    next_post_id: u64,
    /// Cached leaderboard pointers.
    boards: Leaderboards,
    /// Fanatic declarers per hashtag, each set ascending by user id.
    topic_fanatics: BTreeMap<String, BTreeSet<UserId>>,
}

impl UserRegistry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            users: BTreeMap::new(),
            posts: BTreeMap::new(),
            next_post_id: 0,
            boards: Leaderboards::new(),
            topic_fanatics: BTreeMap::new(),
        }
    }

    // -------------------------------------------------------------------
    // Registration
    // -------------------------------------------------------------------

    /// Register a new user of the given kind.
    ///
    /// # Errors
    ///
    /// Returns [`SocialError::DuplicateUser`] if the id is already taken.
    pub fn register_user(&mut self, kind: UserKind, id: UserId) -> Result<(), SocialError> {
        if self.users.contains_key(&id) {
            return Err(SocialError::DuplicateUser(id));
        }
        tracing::debug!(user = %id, kind = %kind, "user registered");
        self.users.insert(id.clone(), User::new(kind, id));
        Ok(())
    }

    /// Register a new Fanatic user preloaded with hashtag interests.
    ///
    /// Each declared hashtag's fanatic set gains the user; this is the point
    /// where the per-hashtag ranking is populated.
    ///
    /// # Errors
    ///
    /// Returns [`SocialError::DuplicateUser`] if the id is already taken.
    pub fn register_fanatic(
        &mut self,
        id: UserId,
        fanaticisms: Vec<Fanaticism>,
    ) -> Result<(), SocialError> {
        if self.users.contains_key(&id) {
            return Err(SocialError::DuplicateUser(id));
        }
        let user = User::new_fanatic(id.clone(), fanaticisms);
        for hashtag in user.fanaticisms().keys() {
            self.topic_fanatics
                .entry(hashtag.clone())
                .or_default()
                .insert(id.clone());
        }
        tracing::debug!(user = %id, interests = user.fanaticisms().len(), "fanatic registered");
        self.users.insert(id.clone(), user);
        Ok(())
    }

    // -------------------------------------------------------------------
    // Friendships
    // -------------------------------------------------------------------

    /// Create a bidirectional friendship between two users.
    ///
    /// # Errors
    ///
    /// Returns [`SocialError::SelfFriendship`] if both ids are the same,
    /// [`SocialError::UnknownUser`] if either id is unregistered, and
    /// [`SocialError::AlreadyFriends`] if the edge already exists.
    pub fn add_friend(&mut self, a: &UserId, b: &UserId) -> Result<(), SocialError> {
        if a == b {
            return Err(SocialError::SelfFriendship(a.clone()));
        }
        if !self.users.contains_key(a) {
            return Err(SocialError::UnknownUser(a.clone()));
        }
        if !self.users.contains_key(b) {
            return Err(SocialError::UnknownUser(b.clone()));
        }
        // Symmetry invariant: checking one side covers both.
        if self.users.get(a).is_some_and(|user| user.is_friend(b)) {
            return Err(SocialError::AlreadyFriends {
                a: a.clone(),
                b: b.clone(),
            });
        }

        if let Some(user) = self.users.get_mut(a) {
            user.record_friend(b.clone());
        }
        if let Some(user) = self.users.get_mut(b) {
            user.record_friend(a.clone());
        }
        tracing::debug!(a = %a, b = %b, "friendship created");
        Ok(())
    }

    // -------------------------------------------------------------------
    // Posting and commenting
    // -------------------------------------------------------------------

    /// Create a post for the given author and return its id.
    ///
    /// The author's kind derives the recorded truthfulness from the declared
    /// stance, the friend set is frozen into the post, and the top-poster
    /// tracker (plus top-liar, when the post was a lie) is refreshed.
    ///
    /// # Errors
    ///
    /// Returns [`SocialError::UnknownUser`] if the author is unregistered.
    pub fn post(
        &mut self,
        author: &UserId,
        hashtags: BTreeSet<String>,
        stance: &str,
        message: &str,
    ) -> Result<PostId, SocialError> {
        let next_counter = self.next_post_id.checked_add(1).ok_or_else(|| {
            SocialError::ArithmeticOverflow {
                context: String::from("post id counter increment"),
            }
        })?;
        let kind = self.fetch_user(author)?.kind();
        let truthfulness = stance::derive_truthfulness(kind, stance);
        let lied = truthfulness != stance::parses_truthful(stance);

        let id = PostId(self.next_post_id);
        let Some(user) = self.users.get_mut(author) else {
            return Err(SocialError::UnknownUser(author.clone()));
        };
        // The lie counter is the only fallible mutation; it runs first so a
        // failure leaves the registry untouched.
        if lied {
            user.record_lie()?;
        }
        let snapshot = user.friends().clone();
        user.record_post(id);
        let post = Post::new(id, author.clone(), hashtags, truthfulness, message, snapshot);
        self.posts.insert(id, post);
        self.next_post_id = next_counter;

        tracing::debug!(author = %author, post = %id, truthful = truthfulness, "post created");

        self.refresh_top_poster(author);
        if lied {
            self.refresh_top_liar(author);
        }
        Ok(id)
    }

    /// Comment on a post of the given author.
    ///
    /// The commenter's capability check runs against the post's frozen
    /// friend snapshot before anything mutates; a rejection leaves all state
    /// unchanged. On success the comment lands on both the commenter
    /// (outgoing) and the post (incoming), and the top-post, top-poster, and
    /// top-responsive trackers are refreshed.
    ///
    /// # Errors
    ///
    /// Returns [`SocialError::UnknownUser`] if either id is unregistered,
    /// [`SocialError::UnknownPost`] if the post id does not belong to the
    /// given author, and [`SocialError::UnauthorizedComment`] if the
    /// capability check rejects the commenter.
    pub fn comment_post(
        &mut self,
        commenter: &UserId,
        post_author: &UserId,
        post_id: PostId,
        stance: &str,
        message: &str,
    ) -> Result<(), SocialError> {
        // Validation phase: nothing mutates until every check has passed.
        let commenter_user = self.fetch_user(commenter)?;
        if !self.users.contains_key(post_author) {
            return Err(SocialError::UnknownUser(post_author.clone()));
        }
        let post = self
            .posts
            .get(&post_id)
            .filter(|post| post.author() == post_author)
            .ok_or_else(|| SocialError::UnknownPost {
                user: post_author.clone(),
                post: post_id,
            })?;
        if !commenter_user.can_comment_on(post) {
            return Err(SocialError::UnauthorizedComment {
                commenter: commenter.clone(),
                post: post_id,
            });
        }

        // Mutation phase; the received-count increment is the only fallible
        // step and runs first.
        if let Some(author) = self.users.get_mut(post_author) {
            author.record_comment_received()?;
        }
        let comment = Comment::new(commenter.clone(), post_id, stance, message);
        if let Some(user) = self.users.get_mut(commenter) {
            user.record_comment_made(comment.clone());
        }
        if let Some(post) = self.posts.get_mut(&post_id) {
            post.add_comment(comment);
        }

        tracing::debug!(commenter = %commenter, post = %post_id, "comment recorded");

        self.refresh_top_post(post_id);
        self.refresh_top_poster(post_author);
        self.refresh_top_poster(commenter);
        self.refresh_top_responsive(commenter)?;
        Ok(())
    }

    // -------------------------------------------------------------------
    // User queries
    // -------------------------------------------------------------------

    /// Look up a user by id.
    pub fn user(&self, id: &UserId) -> Result<&User, SocialError> {
        self.fetch_user(id)
    }

    /// A user's kind.
    pub fn user_kind(&self, id: &UserId) -> Result<UserKind, SocialError> {
        Ok(self.fetch_user(id)?.kind())
    }

    /// A user's number of friends.
    pub fn user_num_friends(&self, id: &UserId) -> Result<usize, SocialError> {
        Ok(self.fetch_user(id)?.num_friends())
    }

    /// A user's number of posts.
    pub fn user_num_posts(&self, id: &UserId) -> Result<usize, SocialError> {
        Ok(self.fetch_user(id)?.num_posts())
    }

    /// Look up one post of the given author.
    ///
    /// # Errors
    ///
    /// Returns [`SocialError::UnknownUser`] if the author is unregistered
    /// and [`SocialError::UnknownPost`] if the post id is not one of the
    /// author's posts.
    pub fn user_post(&self, id: &UserId, post: PostId) -> Result<&Post, SocialError> {
        self.fetch_user(id)?;
        self.posts
            .get(&post)
            .filter(|found| found.author() == id)
            .ok_or_else(|| SocialError::UnknownPost {
                user: id.clone(),
                post,
            })
    }

    /// A user's responsiveness: distinct visible posts commented over total
    /// visible posts (their own plus all current friends'). Zero visible
    /// posts yields zero rather than an error, so the top-responsive
    /// comparator stays total.
    pub fn responsiveness(&self, id: &UserId) -> Result<Decimal, SocialError> {
        let user = self.fetch_user(id)?;
        let mut visible = user.num_posts();
        for friend in user.friends() {
            let friend_posts = self.users.get(friend).map_or(0, User::num_posts);
            visible = visible.checked_add(friend_posts).ok_or_else(|| {
                SocialError::ArithmeticOverflow {
                    context: String::from("visible post count"),
                }
            })?;
        }
        if visible == 0 {
            return Ok(Decimal::ZERO);
        }
        let commented = user.commented_posts().len();
        Decimal::from(commented)
            .checked_div(Decimal::from(visible))
            .ok_or_else(|| SocialError::ArithmeticOverflow {
                context: String::from("responsiveness ratio"),
            })
    }

    /// Number of registered users.
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Number of posts ever created.
    pub fn post_count(&self) -> usize {
        self.posts.len()
    }

    // -------------------------------------------------------------------
    // Leaderboard queries
    // -------------------------------------------------------------------

    /// The most commented post.
    ///
    /// # Errors
    ///
    /// Returns [`SocialError::NoTopPost`] until a comment has landed
    /// somewhere.
    pub fn top_post(&self) -> Result<&Post, SocialError> {
        self.boards
            .top_post()
            .and_then(|id| self.posts.get(&id))
            .ok_or(SocialError::NoTopPost)
    }

    /// The user ranked highest by the top-poster comparator.
    ///
    /// # Errors
    ///
    /// Returns [`SocialError::NoTopPoster`] until somebody has posted.
    pub fn top_poster(&self) -> Result<&User, SocialError> {
        self.boards
            .top_poster()
            .and_then(|id| self.users.get(id))
            .ok_or(SocialError::NoTopPoster)
    }

    /// The user ranked highest by responsiveness.
    ///
    /// # Errors
    ///
    /// Returns [`SocialError::NoTopResponsive`] until somebody has
    /// commented.
    pub fn top_responsive(&self) -> Result<&User, SocialError> {
        self.boards
            .top_responsive()
            .and_then(|id| self.users.get(id))
            .ok_or(SocialError::NoTopResponsive)
    }

    /// The Liar with the most lies told.
    ///
    /// # Errors
    ///
    /// Returns [`SocialError::NoTopLiar`] until a Liar has told a lie.
    pub fn top_liar(&self) -> Result<&User, SocialError> {
        self.boards
            .top_liar()
            .and_then(|id| self.users.get(id))
            .ok_or(SocialError::NoTopLiar)
    }

    // -------------------------------------------------------------------
    // Iteration queries
    // -------------------------------------------------------------------

    /// Iterate over all users, ascending by id.
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// Iterate over a user's friends, ascending by id.
    ///
    /// # Errors
    ///
    /// Returns [`SocialError::UnknownUser`] for an unregistered id and
    /// [`SocialError::NoFriends`] when the user has no friends -- an empty
    /// listing is an error here, not an empty sequence.
    pub fn user_friends(
        &self,
        id: &UserId,
    ) -> Result<impl Iterator<Item = &User>, SocialError> {
        let user = self.fetch_user(id)?;
        if user.friends().is_empty() {
            return Err(SocialError::NoFriends(id.clone()));
        }
        Ok(user
            .friends()
            .iter()
            .filter_map(|friend| self.users.get(friend)))
    }

    /// Iterate over a user's posts in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`SocialError::UnknownUser`] for an unregistered id and
    /// [`SocialError::NoPosts`] when the user has not posted.
    pub fn user_posts(&self, id: &UserId) -> Result<impl Iterator<Item = &Post>, SocialError> {
        let user = self.fetch_user(id)?;
        if user.posts().is_empty() {
            return Err(SocialError::NoPosts(id.clone()));
        }
        Ok(user
            .posts()
            .iter()
            .filter_map(|post| self.posts.get(post)))
    }

    /// A user's outgoing comments whose target post carries the given
    /// hashtag, in append order.
    ///
    /// # Errors
    ///
    /// Returns [`SocialError::UnknownUser`] for an unregistered id and
    /// [`SocialError::NoComments`] when nothing matches.
    pub fn user_comments_about(
        &self,
        id: &UserId,
        hashtag: &str,
    ) -> Result<Vec<&Comment>, SocialError> {
        let user = self.fetch_user(id)?;
        let matching: Vec<&Comment> = user
            .comments_made()
            .iter()
            .filter(|comment| {
                self.posts
                    .get(&comment.post)
                    .is_some_and(|post| post.has_hashtag(hashtag))
            })
            .collect();
        if matching.is_empty() {
            return Err(SocialError::NoComments {
                user: id.clone(),
                hashtag: hashtag.to_owned(),
            });
        }
        Ok(matching)
    }

    /// Iterate over the fanatics that declared the given hashtag, ascending
    /// by id.
    ///
    /// # Errors
    ///
    /// Returns [`SocialError::NoFanatics`] when no fanatic declared the
    /// hashtag.
    pub fn topic_fanatics(
        &self,
        hashtag: &str,
    ) -> Result<impl Iterator<Item = &User>, SocialError> {
        let declarers = self
            .topic_fanatics
            .get(hashtag)
            .filter(|set| !set.is_empty())
            .ok_or_else(|| SocialError::NoFanatics {
                hashtag: hashtag.to_owned(),
            })?;
        Ok(declarers.iter().filter_map(|id| self.users.get(id)))
    }

    // -------------------------------------------------------------------
    // Internal helpers
    // -------------------------------------------------------------------

    fn fetch_user(&self, id: &UserId) -> Result<&User, SocialError> {
        self.users
            .get(id)
            .ok_or_else(|| SocialError::UnknownUser(id.clone()))
    }

    /// Offer a freshly commented post to the top-post tracker.
    fn refresh_top_post(&mut self, candidate: PostId) {
        let Some(challenger) = self.posts.get(&candidate) else {
            return;
        };
        let replace = match self.boards.top_post() {
            None => true,
            Some(current) => self.posts.get(&current).is_some_and(|incumbent| {
                post_outranks(
                    &PostRank {
                        comments: challenger.num_comments(),
                        author: challenger.author(),
                        id: challenger.id(),
                    },
                    &PostRank {
                        comments: incumbent.num_comments(),
                        author: incumbent.author(),
                        id: incumbent.id(),
                    },
                )
            }),
        };
        if replace {
            self.boards.set_top_post(candidate);
        }
    }

    /// Offer a user whose post or comment totals just moved to the
    /// top-poster tracker. Users who never posted do not qualify.
    fn refresh_top_poster(&mut self, candidate: &UserId) {
        let Some(challenger) = self.users.get(candidate) else {
            return;
        };
        if challenger.num_posts() == 0 {
            return;
        }
        let challenger_rank = PosterRank {
            posts: challenger.num_posts(),
            comments: challenger.num_comments_total(),
            id: challenger.id(),
        };
        let replace = match self.boards.top_poster() {
            None => true,
            Some(current) => self.users.get(current).is_some_and(|incumbent| {
                poster_outranks(
                    &challenger_rank,
                    &PosterRank {
                        posts: incumbent.num_posts(),
                        comments: incumbent.num_comments_total(),
                        id: incumbent.id(),
                    },
                )
            }),
        };
        if replace {
            self.boards.set_top_poster(candidate.clone());
        }
    }

    /// Offer a user who just commented to the top-responsive tracker.
    fn refresh_top_responsive(&mut self, candidate: &UserId) -> Result<(), SocialError> {
        let challenger_ratio = self.responsiveness(candidate)?;
        let incumbent_id = self.boards.top_responsive().cloned();
        let replace = match incumbent_id {
            None => true,
            Some(ref current) => {
                let incumbent_ratio = self.responsiveness(current)?;
                responsive_outranks(
                    &ResponsiveRank {
                        ratio: challenger_ratio,
                        id: candidate,
                    },
                    &ResponsiveRank {
                        ratio: incumbent_ratio,
                        id: current,
                    },
                )
            }
        };
        if replace {
            self.boards.set_top_responsive(candidate.clone());
        }
        Ok(())
    }

    /// Offer a Liar whose lie count just moved to the top-liar tracker.
    fn refresh_top_liar(&mut self, candidate: &UserId) {
        let Some(challenger_lies) = self.users.get(candidate).map(User::lies_told) else {
            return;
        };
        let replace = match self.boards.top_liar() {
            None => challenger_lies > 0,
            Some(current) => {
                let incumbent_lies = self.users.get(current).map_or(0, User::lies_told);
                liar_outranks(challenger_lies, incumbent_lies)
            }
        };
        if replace {
            self.boards.set_top_liar(candidate.clone());
        }
    }
}

impl Default for UserRegistry {
    fn default() -> Self {
        Self::new()
    }
}
