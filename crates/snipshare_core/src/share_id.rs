//! Utilities for generating public share identifiers.

use crate::constants::SHARE_ID_LEN;
use rand::{distributions::Alphanumeric, Rng};

/// Source of candidate share identifiers.
///
/// Candidates need not be unique; the registry redraws on collision.
pub trait ShareIdGenerator: Send + Sync {
    /// Draw one candidate identifier.
    fn generate(&self) -> String;
}

/// Uniform draws from `[A-Za-z0-9]` using the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomShareIds;

impl ShareIdGenerator for RandomShareIds {
    fn generate(&self) -> String {
        generate_share_id()
    }
}

/// Generate a random [`SHARE_ID_LEN`]-character alphanumeric identifier.
///
/// # Returns
/// A candidate id drawn uniformly from the 62-symbol alphabet.
pub fn generate_share_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SHARE_ID_LEN)
        .map(char::from)
        .collect()
}

/// Check that `candidate` has the shape of an issued share identifier.
pub fn is_valid_share_id(candidate: &str) -> bool {
    candidate.len() == SHARE_ID_LEN && candidate.bytes().all(|b| b.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_have_fixed_length_and_alphabet() {
        for _ in 0..256 {
            let id = generate_share_id();
            assert!(is_valid_share_id(&id), "bad id: {}", id);
        }
    }

    #[test]
    fn generated_ids_cover_letters_of_both_cases_and_digits() {
        let joined: String = (0..512).map(|_| generate_share_id()).collect();
        assert!(joined.bytes().any(|b| b.is_ascii_uppercase()));
        assert!(joined.bytes().any(|b| b.is_ascii_lowercase()));
        assert!(joined.bytes().any(|b| b.is_ascii_digit()));
    }

    #[test]
    fn generated_ids_rarely_repeat() {
        let ids: HashSet<String> = (0..2_000).map(|_| RandomShareIds.generate()).collect();
        assert_eq!(ids.len(), 2_000);
    }

    #[test]
    fn is_valid_share_id_rejects_wrong_shapes() {
        for candidate in ["", "abc", "abcdefghi", "abcd-efg", "abcdéfg"] {
            assert!(!is_valid_share_id(candidate), "accepted {:?}", candidate);
        }
        assert!(is_valid_share_id("aZ09bY18"));
    }
}
