// Property tests for Stable Pairs

use proptest::prelude::*;
use stable_pairs::core::{blocking_pairs, is_mutual_inverse, Matcher, ScoredPairs};

/// Duplicate-free grids of requesters and acceptors with distinct scores
fn distinct_grid() -> impl Strategy<Value = ScoredPairs<String>> {
    (1usize..7, 1usize..7)
        .prop_flat_map(|(requesters, acceptors)| {
            let cells = requesters * acceptors;
            (
                Just((requesters, acceptors)),
                prop::collection::vec(any::<bool>(), cells),
                Just((0..cells).collect::<Vec<usize>>()).prop_shuffle(),
            )
        })
        .prop_map(|((requesters, acceptors), mask, weights)| {
            let mut pairs = ScoredPairs::new();
            for r in 0..requesters {
                for a in 0..acceptors {
                    let cell = r * acceptors + a;
                    if mask[cell] {
                        pairs.push(format!("r{r}"), format!("a{a}"), weights[cell] as f64 / 10.0);
                    }
                }
            }
            pairs
        })
}

/// Small grids with coarse scores, so ties and repeated pairs are common
fn noisy_pairs() -> impl Strategy<Value = ScoredPairs<String>> {
    prop::collection::vec((0u8..4, 0u8..4, 0u8..3), 0..16).prop_map(|rows| {
        let mut pairs = ScoredPairs::new();
        for (r, a, s) in rows {
            pairs.push(format!("r{r}"), format!("a{a}"), s as f64);
        }
        pairs
    })
}

proptest! {
    #[test]
    fn prop_no_blocking_pair(input in distinct_grid()) {
        let result = Matcher::default().pair(&input).unwrap();
        prop_assert!(blocking_pairs(&input, &result).is_empty());
    }

    #[test]
    fn prop_mappings_are_mutual_inverses(input in noisy_pairs()) {
        let result = Matcher::default().pair(&input).unwrap();
        prop_assert!(is_mutual_inverse(&result));
    }

    #[test]
    fn prop_every_identifier_is_a_key(input in noisy_pairs()) {
        let result = Matcher::default().pair(&input).unwrap();
        for pair in input.pairs() {
            prop_assert!(result.requester_to_acceptor.contains_key(&pair.requester));
            prop_assert!(result.acceptor_to_requester.contains_key(&pair.acceptor));
        }
    }

    #[test]
    fn prop_deterministic(input in noisy_pairs()) {
        let first = Matcher::default().pair(&input).unwrap();
        let second = Matcher::default().pair(&input).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_proposals_bounded_by_pairs(input in noisy_pairs()) {
        let result = Matcher::default().pair(&input).unwrap();
        prop_assert!(result.proposals <= input.len());
        prop_assert!(result.rounds <= input.len() + 1);
    }

    #[test]
    fn prop_distinct_scores_mirror_under_role_swap(input in distinct_grid()) {
        let dual = Matcher::default().pair_both_ways(&input).unwrap();
        prop_assert!(dual.is_mirrored());
    }
}
