use crate::error::PairingError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::Hash;

/// One scored (requester, acceptor) candidate pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPair<K> {
    pub requester: K,
    pub acceptor: K,
    pub score: f64,
}

/// How repeated (requester, acceptor) entries are treated
///
/// The score lookup is always last-write-wins in ranked order, so a repeated
/// pair keeps its lowest-ranked score. The policy only decides what happens to
/// the requester's preference list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePairs {
    /// Every occurrence stays in the preference list
    #[default]
    Keep,
    /// Only the highest-ranked occurrence stays in the preference list
    Collapse,
    /// A repeated pair is an input error
    Reject,
}

/// Input record for a pairing run
///
/// Holds the scored pairs in input order plus entities registered without any
/// scored pair. Registered entities are reported as unmatched.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPairs<K> {
    pairs: Vec<ScoredPair<K>>,
    extra_requesters: Vec<K>,
    extra_acceptors: Vec<K>,
}

impl<K> Default for ScoredPairs<K> {
    fn default() -> Self {
        Self {
            pairs: Vec::new(),
            extra_requesters: Vec::new(),
            extra_acceptors: Vec::new(),
        }
    }
}

impl<K: Clone> ScoredPairs<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from three parallel sequences
    ///
    /// Element `i` of each sequence forms one scored pair. The sequences must
    /// have equal length.
    pub fn from_columns(
        requesters: &[K],
        acceptors: &[K],
        scores: &[f64],
    ) -> Result<Self, PairingError> {
        if requesters.len() != acceptors.len() || requesters.len() != scores.len() {
            return Err(PairingError::InvalidInput {
                requesters: requesters.len(),
                acceptors: acceptors.len(),
                scores: scores.len(),
            });
        }

        let pairs = requesters
            .iter()
            .zip(acceptors)
            .zip(scores)
            .map(|((requester, acceptor), &score)| ScoredPair {
                requester: requester.clone(),
                acceptor: acceptor.clone(),
                score,
            })
            .collect();

        Ok(Self {
            pairs,
            ..Self::default()
        })
    }

    pub fn push(&mut self, requester: K, acceptor: K, score: f64) -> &mut Self {
        self.pairs.push(ScoredPair {
            requester,
            acceptor,
            score,
        });
        self
    }

    /// Register a requester that may have no scored pair
    pub fn register_requester(&mut self, requester: K) -> &mut Self {
        self.extra_requesters.push(requester);
        self
    }

    /// Register an acceptor that may have no scored pair
    pub fn register_acceptor(&mut self, acceptor: K) -> &mut Self {
        self.extra_acceptors.push(acceptor);
        self
    }

    /// The same record with requester and acceptor roles exchanged
    pub fn swapped(&self) -> Self {
        Self {
            pairs: self
                .pairs
                .iter()
                .map(|pair| ScoredPair {
                    requester: pair.acceptor.clone(),
                    acceptor: pair.requester.clone(),
                    score: pair.score,
                })
                .collect(),
            extra_requesters: self.extra_acceptors.clone(),
            extra_acceptors: self.extra_requesters.clone(),
        }
    }

    pub fn pairs(&self) -> &[ScoredPair<K>] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub(crate) fn extra_requesters(&self) -> &[K] {
        &self.extra_requesters
    }

    pub(crate) fn extra_acceptors(&self) -> &[K] {
        &self.extra_acceptors
    }
}

impl<K: Eq + Hash + Clone> ScoredPairs<K> {
    /// Score lookup as the matcher sees it
    ///
    /// Pairs are written in ranked order, so a repeated pair keeps the score
    /// of its lowest-ranked occurrence.
    pub fn score_lookup(&self) -> HashMap<(K, K), f64> {
        ranked_order(&self.pairs)
            .into_iter()
            .map(|i| {
                let pair = &self.pairs[i];
                ((pair.requester.clone(), pair.acceptor.clone()), pair.score)
            })
            .collect()
    }
}

/// Pair indices by descending score; equal scores keep input order
fn ranked_order<K>(pairs: &[ScoredPair<K>]) -> Vec<usize> {
    let mut ranked: Vec<usize> = (0..pairs.len()).collect();
    ranked.sort_by(|&x, &y| {
        pairs[y]
            .score
            .partial_cmp(&pairs[x].score)
            .unwrap_or(Ordering::Equal)
    });
    ranked
}

/// Interned preference lists and score lookup for one run
///
/// Requesters and acceptors are numbered in the order they are first met
/// while walking the pairs by descending score. That numbering is also the
/// order in which requesters propose within a pass.
#[derive(Debug)]
pub(crate) struct PreferenceTable<K> {
    pub(crate) requesters: Vec<K>,
    pub(crate) acceptors: Vec<K>,
    pub(crate) lists: Vec<VecDeque<usize>>,
    scores: HashMap<(usize, usize), f64>,
}

impl<K: Eq + Hash + Clone> PreferenceTable<K> {
    pub(crate) fn build(
        input: &ScoredPairs<K>,
        duplicates: DuplicatePairs,
    ) -> Result<Self, PairingError> {
        let pairs = input.pairs();

        if let Some((index, pair)) = pairs.iter().enumerate().find(|(_, p)| p.score.is_nan()) {
            return Err(PairingError::InvalidScore {
                index,
                score: pair.score,
            });
        }

        if duplicates == DuplicatePairs::Reject {
            let mut seen: HashSet<(&K, &K)> = HashSet::with_capacity(pairs.len());
            if let Some(index) = pairs
                .iter()
                .position(|pair| !seen.insert((&pair.requester, &pair.acceptor)))
            {
                return Err(PairingError::DuplicatePair { index });
            }
        }

        let ranked = ranked_order(pairs);

        let mut table = Self {
            requesters: Vec::new(),
            acceptors: Vec::new(),
            lists: Vec::new(),
            scores: HashMap::with_capacity(pairs.len()),
        };
        let mut requester_index: HashMap<K, usize> = HashMap::new();
        let mut acceptor_index: HashMap<K, usize> = HashMap::new();
        let mut listed: HashSet<(usize, usize)> = HashSet::new();

        for &i in &ranked {
            let pair = &pairs[i];
            let r = table.intern_requester(&mut requester_index, &pair.requester);
            let a = Self::intern(&mut table.acceptors, &mut acceptor_index, &pair.acceptor);
            table.scores.insert((r, a), pair.score);

            if duplicates == DuplicatePairs::Collapse && !listed.insert((r, a)) {
                continue;
            }
            table.lists[r].push_back(a);
        }

        for requester in input.extra_requesters() {
            table.intern_requester(&mut requester_index, requester);
        }
        for acceptor in input.extra_acceptors() {
            Self::intern(&mut table.acceptors, &mut acceptor_index, acceptor);
        }

        Ok(table)
    }

    fn intern_requester(&mut self, index: &mut HashMap<K, usize>, requester: &K) -> usize {
        let id = Self::intern(&mut self.requesters, index, requester);
        if id == self.lists.len() {
            self.lists.push(VecDeque::new());
        }
        id
    }

    fn intern(keys: &mut Vec<K>, index: &mut HashMap<K, usize>, key: &K) -> usize {
        if let Some(&id) = index.get(key) {
            return id;
        }
        let id = keys.len();
        keys.push(key.clone());
        index.insert(key.clone(), id);
        id
    }

    /// Affinity of an interned pair
    ///
    /// Every listed acceptor and every held match comes from a scored pair, so
    /// the lookup always hits.
    #[inline]
    pub(crate) fn score(&self, requester: usize, acceptor: usize) -> f64 {
        debug_assert!(
            self.scores.contains_key(&(requester, acceptor)),
            "no score for requester {} and acceptor {}",
            requester,
            acceptor
        );
        self.scores
            .get(&(requester, acceptor))
            .copied()
            .unwrap_or(f64::NEG_INFINITY)
    }
}
