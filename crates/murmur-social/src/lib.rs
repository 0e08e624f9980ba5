//! Social-graph engine for the Murmur simulation of a small network.
//!
//! This crate contains the logic layer -- everything that operates on users,
//! posts, and leaderboard trackers without touching I/O. It sits on top of
//! `murmur-types` (which defines the identifiers and data records); a thin
//! command shell is expected to validate input, call into [`UserRegistry`],
//! and render results -- the engine itself never prints.
//!
//! # Modules
//!
//! - [`error`] -- Error types for all engine operations ([`SocialError`])
//! - [`stance`] -- Stance parsing and per-kind truthfulness derivation
//! - [`post`] -- Post state with the frozen author-friend snapshot ([`Post`])
//! - [`user`] -- User state and kind-dispatched behavior ([`User`])
//! - [`leaderboard`] -- Tracker state and the ranking comparators
//! - [`registry`] -- The owning registry and its operation surface
//!   ([`UserRegistry`])

pub mod error;
pub mod leaderboard;
pub mod post;
pub mod registry;
pub mod stance;
pub mod user;

// Re-export primary types at crate root for convenience.
pub use error::SocialError;
pub use leaderboard::{
    Leaderboards, PostRank, PosterRank, ResponsiveRank, liar_outranks, post_outranks,
    poster_outranks, responsive_outranks,
};
pub use post::Post;
pub use registry::UserRegistry;
pub use stance::{derive_truthfulness, parses_truthful};
pub use user::User;
