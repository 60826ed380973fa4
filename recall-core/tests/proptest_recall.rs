//! Property-based tests — invariants under random inputs.
//!
//! Verifies the experiment's observable guarantees regardless of list size,
//! seed, or noise level: trial lists are well-formed, recall never invents
//! words, and the recall loop always terminates.

use proptest::prelude::*;
use std::collections::HashSet;

use recall_core::config::RecallConfig;
use recall_core::session::RecallSession;
use recall_core::stimulus::{self, WordCategory};

use rand::SeedableRng;
use rand::rngs::StdRng;

// ---------------------------------------------------------------------------
// Property: mixed lists have the requested size and an even split
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn mixed_list_well_formed(n_items in 0..=24usize, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let list = stimulus::generate_word_list(n_items, true, &mut rng)
            .expect("≤ 12 per bank is always valid");

        let n_each = n_items / 2;
        prop_assert_eq!(list.len(), 2 * n_each);

        let emotional = list.iter().filter(|s| s.category == WordCategory::Emotional).count();
        prop_assert_eq!(emotional, n_each);
    }
}

// ---------------------------------------------------------------------------
// Property: lists never contain duplicates, and words match their banks
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn lists_have_unique_bank_words(
        n_items in 0..=24usize,
        mixed in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let effective = if mixed { n_items } else { n_items.min(12) };
        let mut rng = StdRng::seed_from_u64(seed);
        let list = stimulus::generate_word_list(effective, mixed, &mut rng)
            .expect("within bank size");

        let unique: HashSet<&str> = list.iter().map(|s| s.word.as_str()).collect();
        prop_assert_eq!(unique.len(), list.len());

        for stim in &list {
            prop_assert_eq!(stimulus::category_of(&stim.word), Some(stim.category));
        }
    }
}

// ---------------------------------------------------------------------------
// Property: oversized requests always error
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn oversized_requests_error(extra in 1..100usize, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let result = stimulus::generate_word_list(12 + extra, false, &mut rng);
        prop_assert!(result.is_err());
    }
}

// ---------------------------------------------------------------------------
// Property: the recall loop terminates and never invents words
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]
    #[test]
    fn recall_invariants_hold(
        seed in any::<u64>(),
        n_items in 2..=24usize,
        noise in 0.0..1.0f64,
    ) {
        let mut config = RecallConfig::default();
        config.list.seed = Some(seed);
        config.list.n_items = n_items;
        config.choice.noise = noise;

        let outcome = RecallSession::new(config)
            .expect("valid config")
            .run()
            .expect("session terminates");

        let presented: HashSet<&str> =
            outcome.trial_list.iter().map(|s| s.word.as_str()).collect();
        let guard = 2 * n_items + 8;

        prop_assert!(outcome.retrievals <= guard);
        prop_assert!(outcome.total_recalled() <= outcome.trial_list.len());
        for recalled in &outcome.recalled {
            prop_assert!(presented.contains(recalled.word.as_str()));
        }

        let unique: HashSet<&str> =
            outcome.recalled.iter().map(|r| r.word.as_str()).collect();
        prop_assert_eq!(unique.len(), outcome.recalled.len());
    }
}

// ---------------------------------------------------------------------------
// Property: category counts always sum to the total
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]
    #[test]
    fn category_counts_sum(seed in any::<u64>()) {
        let mut config = RecallConfig::default();
        config.list.seed = Some(seed);

        let outcome = RecallSession::new(config)
            .expect("valid config")
            .run()
            .expect("session terminates");

        prop_assert_eq!(
            outcome.emotional_recalled() + outcome.neutral_recalled(),
            outcome.total_recalled()
        );
    }
}
