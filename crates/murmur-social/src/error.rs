//! Error types for the `murmur-social` crate.
//!
//! All fallible operations in this crate return [`SocialError`] through the
//! standard [`Result`] type. Errors are synchronous and reported to the
//! immediate caller; the engine never retries, and rendering an error as
//! user-facing text is the caller's concern.

use murmur_types::{PostId, UserId};

/// Errors that can occur during social-graph operations.
#[derive(Debug, thiserror::Error)]
pub enum SocialError {
    /// A referenced user id is not registered.
    #[error("user not found: {0}")]
    UnknownUser(UserId),

    /// An id was registered while already in use.
    #[error("duplicate user id: {0}")]
    DuplicateUser(UserId),

    /// A user was asked to befriend itself.
    #[error("user {0} cannot befriend itself")]
    SelfFriendship(UserId),

    /// A friendship request repeated an existing edge.
    #[error("users {a} and {b} are already friends")]
    AlreadyFriends {
        /// One endpoint of the existing friendship.
        a: UserId,
        /// The other endpoint.
        b: UserId,
    },

    /// The commenter's capability check rejected the comment.
    #[error("user {commenter} may not comment on post {post}")]
    UnauthorizedComment {
        /// The user whose comment was rejected.
        commenter: UserId,
        /// The post the comment targeted.
        post: PostId,
    },

    /// The referenced post id does not exist for the given user.
    #[error("user {user} has no post {post}")]
    UnknownPost {
        /// The supposed author.
        user: UserId,
        /// The missing post id.
        post: PostId,
    },

    /// No post has received a comment yet, so no top post exists.
    #[error("no post has been commented yet")]
    NoTopPost,

    /// Nobody has posted yet, so no top poster exists.
    #[error("nobody has posted yet")]
    NoTopPoster,

    /// Nobody has commented yet, so no top responsive user exists.
    #[error("nobody has commented yet")]
    NoTopResponsive,

    /// No liar has posted yet, so no top liar exists.
    #[error("no liar has told a lie yet")]
    NoTopLiar,

    /// Iteration was requested over a user with zero friends.
    #[error("user {0} has no friends")]
    NoFriends(UserId),

    /// Iteration was requested over a user with zero posts.
    #[error("user {0} has no posts")]
    NoPosts(UserId),

    /// Iteration was requested over a user with zero comments about a
    /// hashtag.
    #[error("user {user} has no comments about #{hashtag}")]
    NoComments {
        /// The commenter.
        user: UserId,
        /// The hashtag that matched nothing.
        hashtag: String,
    },

    /// Iteration was requested over a hashtag no fanatic has declared.
    #[error("no fanatics declared for #{hashtag}")]
    NoFanatics {
        /// The undeclared hashtag.
        hashtag: String,
    },

    /// Arithmetic overflow during a checked bookkeeping operation.
    #[error("arithmetic overflow in social bookkeeping: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: String,
    },
}
