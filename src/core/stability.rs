use crate::core::matcher::PairingResult;
use crate::core::preferences::ScoredPairs;
use std::hash::Hash;

/// Scored pairs that would both rather be matched to each other
///
/// A requester and an acceptor block the pairing when neither is matched to
/// the other and the pair's score strictly beats what each side holds (an
/// unmatched side holds nothing). Both sides compare the same shared score.
///
/// Scores come from `ScoredPairs::score_lookup`, the same lookup the matcher
/// uses, so a repeated pair is judged by its lowest-ranked score. A record
/// with repeated pairs may still report blocking pairs under
/// `DuplicatePairs::Keep`.
pub fn blocking_pairs<K>(input: &ScoredPairs<K>, result: &PairingResult<K>) -> Vec<(K, K)>
where
    K: Eq + Hash + Ord + Clone,
{
    let scores = input.score_lookup();
    let held = |requester: &K, acceptor: &K| {
        scores
            .get(&(requester.clone(), acceptor.clone()))
            .copied()
            .unwrap_or(f64::NEG_INFINITY)
    };

    let mut blocking = Vec::new();
    for ((requester, acceptor), &score) in &scores {
        let requester_match = result.acceptor_of(requester);
        if requester_match == Some(acceptor) {
            continue;
        }
        let requester_wants =
            requester_match.map_or(true, |current| score > held(requester, current));
        let acceptor_wants = result
            .requester_of(acceptor)
            .map_or(true, |current| score > held(current, acceptor));
        if requester_wants && acceptor_wants {
            blocking.push((requester.clone(), acceptor.clone()));
        }
    }

    blocking.sort();
    blocking
}

/// Whether the result is stable with respect to the record
pub fn is_stable<K>(input: &ScoredPairs<K>, result: &PairingResult<K>) -> bool
where
    K: Eq + Hash + Ord + Clone,
{
    blocking_pairs(input, result).is_empty()
}

/// Whether both mappings agree on every matched pair
pub fn is_mutual_inverse<K: Ord>(result: &PairingResult<K>) -> bool {
    let forward = result
        .requester_to_acceptor
        .iter()
        .filter_map(|(r, a)| a.as_ref().map(|a| (r, a)))
        .all(|(r, a)| result.requester_of(a) == Some(r));
    let backward = result
        .acceptor_to_requester
        .iter()
        .filter_map(|(a, r)| r.as_ref().map(|r| (a, r)))
        .all(|(a, r)| result.acceptor_of(r) == Some(a));

    forward && backward
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::matcher::Matcher;
    use std::collections::BTreeMap;

    fn handmade(pairs: &[(&'static str, &'static str)]) -> PairingResult<&'static str> {
        let mut requester_to_acceptor = BTreeMap::new();
        let mut acceptor_to_requester = BTreeMap::new();
        for &(r, a) in pairs {
            requester_to_acceptor.insert(r, Some(a));
            acceptor_to_requester.insert(a, Some(r));
        }
        PairingResult {
            requester_to_acceptor,
            acceptor_to_requester,
            rounds: 0,
            proposals: 0,
        }
    }

    #[test]
    fn test_matcher_output_has_no_blocking_pair() {
        let mut input = ScoredPairs::new();
        input
            .push("r1", "a1", 0.9)
            .push("r2", "a1", 0.95)
            .push("r1", "a2", 0.5)
            .push("r2", "a2", 0.1);
        let result = Matcher::default().pair(&input).unwrap();

        assert!(is_stable(&input, &result));
        assert!(is_mutual_inverse(&result));
    }

    #[test]
    fn test_swapped_partners_block() {
        let mut input = ScoredPairs::new();
        input
            .push("r1", "a1", 0.9)
            .push("r2", "a1", 0.95)
            .push("r1", "a2", 0.5)
            .push("r2", "a2", 0.1);
        let unstable = handmade(&[("r1", "a1"), ("r2", "a2")]);

        assert_eq!(blocking_pairs(&input, &unstable), vec![("r2", "a1")]);
    }

    #[test]
    fn test_unmatched_sides_block() {
        let mut input = ScoredPairs::new();
        input.push("r1", "a1", 0.2);
        let empty = handmade(&[]);

        assert_eq!(blocking_pairs(&input, &empty), vec![("r1", "a1")]);
    }

    #[test]
    fn test_broken_inverse_detected() {
        let mut result = handmade(&[("r1", "a1")]);
        result.acceptor_to_requester.insert("a1", Some("r2"));

        assert!(!is_mutual_inverse(&result));
    }
}
