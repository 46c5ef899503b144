use crate::core::preferences::{DuplicatePairs, PreferenceTable, ScoredPairs};
use crate::error::PairingError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::hash::Hash;

/// Outcome of one deferred-acceptance run
///
/// Every requester and acceptor seen in the input is a key of its mapping;
/// `None` marks an entity that ended unmatched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairingResult<K> {
    pub requester_to_acceptor: BTreeMap<K, Option<K>>,
    pub acceptor_to_requester: BTreeMap<K, Option<K>>,
    /// Passes over the requesters, including the final pass with no proposal
    pub rounds: usize,
    pub proposals: usize,
}

impl<K: Ord> PairingResult<K> {
    pub fn acceptor_of(&self, requester: &K) -> Option<&K> {
        self.requester_to_acceptor.get(requester)?.as_ref()
    }

    pub fn requester_of(&self, acceptor: &K) -> Option<&K> {
        self.acceptor_to_requester.get(acceptor)?.as_ref()
    }

    /// Matched (requester, acceptor) pairs ordered by requester
    pub fn matched_pairs(&self) -> impl Iterator<Item = (&K, &K)> + '_ {
        self.requester_to_acceptor
            .iter()
            .filter_map(|(requester, acceptor)| acceptor.as_ref().map(|a| (requester, a)))
    }

    pub fn matched_count(&self) -> usize {
        self.matched_pairs().count()
    }

    pub fn unmatched_requesters(&self) -> impl Iterator<Item = &K> + '_ {
        self.requester_to_acceptor
            .iter()
            .filter(|(_, acceptor)| acceptor.is_none())
            .map(|(requester, _)| requester)
    }

    pub fn unmatched_acceptors(&self) -> impl Iterator<Item = &K> + '_ {
        self.acceptor_to_requester
            .iter()
            .filter(|(_, requester)| requester.is_none())
            .map(|(acceptor, _)| acceptor)
    }
}

/// Results of running the same record with both role assignments
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DualPairing<K> {
    pub forward: PairingResult<K>,
    pub swapped: PairingResult<K>,
}

impl<K: Ord> DualPairing<K> {
    /// True when the swapped run is the exact inverse of the forward run
    ///
    /// Requester-optimal and acceptor-optimal outcomes may differ, so this
    /// is an observation, not an invariant.
    pub fn is_mirrored(&self) -> bool {
        self.forward.requester_to_acceptor == self.swapped.acceptor_to_requester
            && self.forward.acceptor_to_requester == self.swapped.requester_to_acceptor
    }
}

/// Requester-proposing deferred-acceptance matcher
///
/// # Algorithm
/// 1. Rank every requester's acceptors by descending score (stable)
/// 2. Each pass, every unmatched requester proposes to its next acceptor
/// 3. A free acceptor accepts; a held acceptor switches only for a strictly
///    higher score
/// 4. Stop after a pass in which no preference list shrank
///
/// Both sides rank by the same shared score.
#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher {
    duplicates: DuplicatePairs,
}

impl Matcher {
    pub fn new(duplicates: DuplicatePairs) -> Self {
        Self { duplicates }
    }

    pub fn duplicate_policy(&self) -> DuplicatePairs {
        self.duplicates
    }

    /// Compute a stable pairing for the given record
    ///
    /// # Errors
    /// * `InvalidScore` if any score is NaN
    /// * `DuplicatePair` if a pair repeats under `DuplicatePairs::Reject`
    pub fn pair<K>(&self, input: &ScoredPairs<K>) -> Result<PairingResult<K>, PairingError>
    where
        K: Eq + Hash + Ord + Clone,
    {
        let mut table = PreferenceTable::build(input, self.duplicates)?;

        let mut requester_match: Vec<Option<usize>> = vec![None; table.requesters.len()];
        let mut acceptor_match: Vec<Option<usize>> = vec![None; table.acceptors.len()];
        let mut rounds = 0;
        let mut proposals = 0;

        // A pass leaves every preference list untouched exactly when it makes
        // no proposal, so counting pops replaces snapshotting the lists.
        loop {
            rounds += 1;
            let mut proposed = 0;

            for r in 0..table.requesters.len() {
                if requester_match[r].is_some() {
                    continue;
                }
                let Some(a) = table.lists[r].pop_front() else {
                    continue;
                };
                proposed += 1;

                match acceptor_match[a] {
                    None => {
                        acceptor_match[a] = Some(r);
                        requester_match[r] = Some(a);
                    }
                    Some(current) if table.score(r, a) > table.score(current, a) => {
                        tracing::trace!(
                            requester = r,
                            acceptor = a,
                            displaced = current,
                            "Acceptor switched to higher score"
                        );
                        requester_match[current] = None;
                        acceptor_match[a] = Some(r);
                        requester_match[r] = Some(a);
                    }
                    Some(_) => {}
                }
            }

            proposals += proposed;
            if proposed == 0 {
                break;
            }
        }

        let requester_to_acceptor = table
            .requesters
            .iter()
            .zip(&requester_match)
            .map(|(requester, m)| (requester.clone(), m.map(|a| table.acceptors[a].clone())))
            .collect();
        let acceptor_to_requester = table
            .acceptors
            .iter()
            .zip(&acceptor_match)
            .map(|(acceptor, m)| (acceptor.clone(), m.map(|r| table.requesters[r].clone())))
            .collect();

        tracing::debug!(
            pairs = input.len(),
            requesters = table.requesters.len(),
            acceptors = table.acceptors.len(),
            rounds,
            proposals,
            "Deferred acceptance converged"
        );

        Ok(PairingResult {
            requester_to_acceptor,
            acceptor_to_requester,
            rounds,
            proposals,
        })
    }

    /// Run the record as given and with roles exchanged
    pub fn pair_both_ways<K>(&self, input: &ScoredPairs<K>) -> Result<DualPairing<K>, PairingError>
    where
        K: Eq + Hash + Ord + Clone,
    {
        let forward = self.pair(input)?;
        let swapped = self.pair(&input.swapped())?;
        Ok(DualPairing { forward, swapped })
    }
}

/// Pair three parallel sequences with the default duplicate policy
pub fn stable_pairs<K>(
    requesters: &[K],
    acceptors: &[K],
    scores: &[f64],
) -> Result<PairingResult<K>, PairingError>
where
    K: Eq + Hash + Ord + Clone,
{
    let input = ScoredPairs::from_columns(requesters, acceptors, scores)?;
    Matcher::default().pair(&input)
}
