//! # Matching Service
//!
//! Naive matchmaking: opposite gender plus at least one shared interest token.

use std::collections::HashSet;

use tracing::trace;

use crate::models::User;
use crate::utils::constant::INTEREST_SEPARATOR;

pub struct MatchingService;

impl MatchingService {
    /// Maps a gender onto the one it is matched with.
    ///
    /// Only the binary male/female mapping exists: `"female"` pairs with
    /// `"male"`, anything else pairs with `"female"`.
    pub fn opposite_gender(gender: &str) -> &'static str {
        if gender == "female" { "male" } else { "female" }
    }

    /// Check if two users share at least one interest token.
    ///
    /// Tokens are compared exactly, so case and surrounding whitespace matter.
    pub fn has_similar_interests(user_a: &User, user_b: &User) -> bool {
        let set_a = Self::interest_set(&user_a.interests);
        let set_b = Self::interest_set(&user_b.interests);
        !set_a.is_disjoint(&set_b)
    }

    /// Filters `candidates` down to users of the opposite gender who share an
    /// interest with `target`. Candidate order is preserved.
    pub fn find_matches(target: &User, candidates: impl IntoIterator<Item = User>) -> Vec<User> {
        let wanted_gender = Self::opposite_gender(&target.gender);

        candidates
            .into_iter()
            .filter(|candidate| {
                let is_match = candidate.gender == wanted_gender
                    && Self::has_similar_interests(target, candidate);
                trace!(
                    target_id = target.id,
                    candidate_id = candidate.id,
                    is_match,
                    "Evaluated candidate"
                );
                is_match
            })
            .collect()
    }

    fn interest_set(interests: &str) -> HashSet<&str> {
        interests.split(INTEREST_SEPARATOR).collect()
    }
}
