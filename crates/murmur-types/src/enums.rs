//! Enumeration types for the Murmur social-graph engine.

use serde::{Deserialize, Serialize};

/// The behavioral kind of a user, fixed at registration.
///
/// The kind drives truthfulness derivation on posts and the capability check
/// on comments. Dispatch is a plain `match` on this closed set; there is no
/// trait-object hierarchy behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UserKind {
    /// Records the declared stance literally; comments on own or friends'
    /// posts.
    Naive,
    /// Records the inverse of the declared stance and accumulates a lie
    /// count; comment eligibility as Naive.
    Liar,
    /// Records the declared stance literally; comments only on its own
    /// posts, never on anyone else's.
    Selfcentered,
    /// Behaves as Naive, and additionally declares hashtag interests that
    /// feed the per-hashtag fanatic ranking.
    Fanatic,
}

impl UserKind {
    /// Whether posts by this kind record the inverse of the declared stance.
    pub const fn inverts_stance(self) -> bool {
        matches!(self, Self::Liar)
    }

    /// Whether this kind may comment on posts it did not author.
    ///
    /// Selfcentered users fail the capability check on every foreign post,
    /// friendship or not; everyone else reaches the snapshot check.
    pub const fn comments_beyond_own(self) -> bool {
        !matches!(self, Self::Selfcentered)
    }
}

impl core::fmt::Display for UserKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Naive => "naive",
            Self::Liar => "liar",
            Self::Selfcentered => "selfcentered",
            Self::Fanatic => "fanatic",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_liars_invert() {
        assert!(UserKind::Liar.inverts_stance());
        assert!(!UserKind::Naive.inverts_stance());
        assert!(!UserKind::Selfcentered.inverts_stance());
        assert!(!UserKind::Fanatic.inverts_stance());
    }

    #[test]
    fn only_selfcentered_is_confined_to_own_posts() {
        assert!(!UserKind::Selfcentered.comments_beyond_own());
        assert!(UserKind::Naive.comments_beyond_own());
        assert!(UserKind::Liar.comments_beyond_own());
        assert!(UserKind::Fanatic.comments_beyond_own());
    }

    #[test]
    fn display_uses_lowercase_names() {
        assert_eq!(UserKind::Naive.to_string(), "naive");
        assert_eq!(UserKind::Selfcentered.to_string(), "selfcentered");
    }
}
