//! Stance parsing and per-kind truthfulness derivation.
//!
//! A post is declared with a free-text stance; the engine derives a boolean
//! truthfulness flag from it at creation time. The parse rule is fixed: a
//! stance is truthful iff it equals `"true"` ignoring ASCII case, anything
//! else parses false. Liars record the inverse of the parse; every other
//! kind records it literally.

use murmur_types::UserKind;

/// Parse a declared stance string into its literal truth value.
pub fn parses_truthful(stance: &str) -> bool {
    stance.eq_ignore_ascii_case("true")
}

/// Derive the truthfulness recorded on a post from the declared stance and
/// the author's kind.
///
/// Naive, Selfcentered, and Fanatic authors record the parsed stance as-is;
/// a Liar records its negation. The result is immutable once stamped on the
/// post.
pub fn derive_truthfulness(kind: UserKind, stance: &str) -> bool {
    let declared = parses_truthful(stance);
    if kind.inverts_stance() {
        !declared
    } else {
        declared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn true_parses_case_insensitively() {
        assert!(parses_truthful("true"));
        assert!(parses_truthful("TRUE"));
        assert!(parses_truthful("True"));
        assert!(parses_truthful("tRuE"));
    }

    #[test]
    fn anything_else_parses_false() {
        assert!(!parses_truthful("false"));
        assert!(!parses_truthful(""));
        assert!(!parses_truthful("truthful"));
        assert!(!parses_truthful(" true"));
        assert!(!parses_truthful("yes"));
    }

    #[test]
    fn literal_kinds_record_the_parse() {
        assert!(derive_truthfulness(UserKind::Naive, "true"));
        assert!(!derive_truthfulness(UserKind::Naive, "false"));
        assert!(derive_truthfulness(UserKind::Selfcentered, "TRUE"));
        assert!(derive_truthfulness(UserKind::Fanatic, "true"));
        assert!(!derive_truthfulness(UserKind::Fanatic, "nonsense"));
    }

    #[test]
    fn liars_record_the_inverse() {
        assert!(!derive_truthfulness(UserKind::Liar, "true"));
        assert!(derive_truthfulness(UserKind::Liar, "false"));
        assert!(derive_truthfulness(UserKind::Liar, "anything"));
    }
}
