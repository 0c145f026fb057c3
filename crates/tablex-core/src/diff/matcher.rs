//! Identity matching between an old and a new sequence.
//!
//! [`partition`] is shared by both levels: it splits two sequences into
//! removed, added and matched entries. [`match_groups`] layers the
//! group-level rules on top (a revised group is reloaded, not diffed).

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::model::{Group, HasIdentity, HasRevision};

/// An entity present in both sequences under the same identity
#[derive(Debug)]
pub struct MatchedPair<'a, T> {
    /// Index in the old sequence
    pub from: usize,
    /// Index in the new sequence
    pub to: usize,
    pub old: &'a T,
    pub new: &'a T,
    /// Revision markers differ
    pub revised: bool,
}

impl<T> Clone for MatchedPair<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for MatchedPair<'_, T> {}

/// Result of matching two sequences by identity
#[derive(Debug)]
pub struct Partition<'a, T> {
    /// Old indices with no counterpart in the new sequence
    pub removed: Vec<usize>,
    /// New indices with no counterpart in the old sequence
    pub added: Vec<usize>,
    /// Matched entries, in old order
    pub matched: Vec<MatchedPair<'a, T>>,
}

/// Match two sequences by identity
///
/// Runs in O(old + new) with one hash map per side. With duplicate
/// identities (validation disabled) every old duplicate matches the last
/// new entry carrying that identity; the result is then unspecified but
/// never panics.
pub fn partition<'a, T>(old: &'a [T], new: &'a [T]) -> Partition<'a, T>
where
    T: HasIdentity + HasRevision,
{
    let new_index: HashMap<T::Id, usize> = new
        .iter()
        .enumerate()
        .map(|(index, entry)| (entry.identity(), index))
        .collect();

    let mut removed = Vec::new();
    let mut matched = Vec::new();
    let mut old_ids = HashSet::with_capacity(old.len());

    for (from, entry) in old.iter().enumerate() {
        let id = entry.identity();
        match new_index.get(&id) {
            Some(&to) => {
                let counterpart = &new[to];
                matched.push(MatchedPair {
                    from,
                    to,
                    old: entry,
                    new: counterpart,
                    revised: entry.revision() != counterpart.revision(),
                });
            }
            None => removed.push(from),
        }
        old_ids.insert(id);
    }

    let added = new
        .iter()
        .enumerate()
        .filter(|(_, entry)| !old_ids.contains(&entry.identity()))
        .map(|(index, _)| index)
        .collect();

    Partition {
        removed,
        added,
        matched,
    }
}

/// Group-level classification of two snapshots
#[derive(Debug)]
pub struct GroupMatch<'a, G> {
    /// New indices
    pub inserts: BTreeSet<usize>,
    /// Old indices
    pub deletes: BTreeSet<usize>,
    /// Old indices of matched groups whose revision changed
    pub reloads: BTreeSet<usize>,
    /// Matched, unrevised groups in old order; candidates for moves and item diffing
    pub matched: Vec<MatchedPair<'a, G>>,
}

/// Classify groups into inserted, deleted, reloaded and matched
pub fn match_groups<'a, G: Group>(old: &'a [G], new: &'a [G]) -> GroupMatch<'a, G> {
    let Partition {
        removed,
        added,
        matched,
    } = partition(old, new);

    let (revised, unchanged): (Vec<_>, Vec<_>) = matched.into_iter().partition(|p| p.revised);

    tracing::debug!(
        deleted = removed.len(),
        inserted = added.len(),
        reloaded = revised.len(),
        matched = unchanged.len(),
        "matched groups"
    );

    GroupMatch {
        inserts: added.into_iter().collect(),
        deletes: removed.into_iter().collect(),
        reloads: revised.iter().map(|p| p.from).collect(),
        matched: unchanged,
    }
}
