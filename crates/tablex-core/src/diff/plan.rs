//! Edit plan data model.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::model::Position;

/// One move instruction: `from` addresses the old snapshot, `to` the new one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Move<P> {
    pub from: P,
    pub to: P,
}

impl<P> Move<P> {
    pub fn new(from: P, to: P) -> Self {
        Self { from, to }
    }
}

impl<P> From<(P, P)> for Move<P> {
    fn from((from, to): (P, P)) -> Self {
        Self { from, to }
    }
}

/// Lightweight refresh of one item, described by caller descriptors
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractiveUpdate<U> {
    /// Position in the new snapshot
    pub position: Position,
    pub updates: Vec<U>,
}

/// Item-level edits
///
/// Produced per matched group and merged into an [`EditPlan`], or returned
/// directly by [`reconcile_items`](crate::reconcile_items).
///
/// Addressing: `deletes` and `moves[].from` are old positions; every other
/// field uses new positions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemPlan<U = ()> {
    pub inserts: BTreeSet<Position>,
    pub deletes: BTreeSet<Position>,
    pub reloads: BTreeSet<Position>,
    pub deferred_reloads: BTreeSet<Position>,
    pub moves: Vec<Move<Position>>,
    pub interactive_updates: Vec<InteractiveUpdate<U>>,
}

impl<U> Default for ItemPlan<U> {
    fn default() -> Self {
        Self {
            inserts: BTreeSet::new(),
            deletes: BTreeSet::new(),
            reloads: BTreeSet::new(),
            deferred_reloads: BTreeSet::new(),
            moves: Vec::new(),
            interactive_updates: Vec::new(),
        }
    }
}

impl<U> ItemPlan<U> {
    pub fn is_empty(&self) -> bool {
        self.inserts.is_empty()
            && self.deletes.is_empty()
            && self.reloads.is_empty()
            && self.deferred_reloads.is_empty()
            && self.moves.is_empty()
            && self.interactive_updates.is_empty()
    }

    /// Total number of edit records
    pub fn len(&self) -> usize {
        self.inserts.len()
            + self.deletes.len()
            + self.reloads.len()
            + self.deferred_reloads.len()
            + self.moves.len()
            + self.interactive_updates.len()
    }

    /// Append another plan's records (disjoint coordinates expected)
    pub fn absorb(&mut self, other: ItemPlan<U>) {
        self.inserts.extend(other.inserts);
        self.deletes.extend(other.deletes);
        self.reloads.extend(other.reloads);
        self.deferred_reloads.extend(other.deferred_reloads);
        self.moves.extend(other.moves);
        self.interactive_updates.extend(other.interactive_updates);
    }
}

/// The complete two-level edit plan
///
/// Group addressing: `group_deletes`, `group_reloads` and
/// `group_moves[].from` are old indices; `group_inserts` and
/// `group_moves[].to` are new indices. Item addressing follows [`ItemPlan`].
///
/// Item-level records only exist for groups that are matched and not
/// reloaded; a group reload rebuilds that group's contents wholesale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditPlan<U = ()> {
    pub group_inserts: BTreeSet<usize>,
    pub group_deletes: BTreeSet<usize>,
    pub group_reloads: BTreeSet<usize>,
    pub group_moves: Vec<Move<usize>>,
    pub item_inserts: BTreeSet<Position>,
    pub item_deletes: BTreeSet<Position>,
    pub item_reloads: BTreeSet<Position>,
    pub item_deferred_reloads: BTreeSet<Position>,
    pub item_moves: Vec<Move<Position>>,
    pub item_interactive_updates: Vec<InteractiveUpdate<U>>,
}

impl<U> Default for EditPlan<U> {
    fn default() -> Self {
        Self {
            group_inserts: BTreeSet::new(),
            group_deletes: BTreeSet::new(),
            group_reloads: BTreeSet::new(),
            group_moves: Vec::new(),
            item_inserts: BTreeSet::new(),
            item_deletes: BTreeSet::new(),
            item_reloads: BTreeSet::new(),
            item_deferred_reloads: BTreeSet::new(),
            item_moves: Vec::new(),
            item_interactive_updates: Vec::new(),
        }
    }
}

impl<U> EditPlan<U> {
    /// True when applying the plan would change nothing
    pub fn is_empty(&self) -> bool {
        self.group_changes_len() == 0 && self.item_changes_len() == 0
    }

    pub fn group_changes_len(&self) -> usize {
        self.group_inserts.len()
            + self.group_deletes.len()
            + self.group_reloads.len()
            + self.group_moves.len()
    }

    pub fn item_changes_len(&self) -> usize {
        self.item_inserts.len()
            + self.item_deletes.len()
            + self.item_reloads.len()
            + self.item_deferred_reloads.len()
            + self.item_moves.len()
            + self.item_interactive_updates.len()
    }

    /// Whether a second, deferred wave is needed after the structural one
    pub fn needs_deferred_wave(&self) -> bool {
        !self.item_deferred_reloads.is_empty()
    }

    /// The item-level records as a standalone [`ItemPlan`]
    pub fn item_plan(&self) -> ItemPlan<U>
    where
        U: Clone,
    {
        ItemPlan {
            inserts: self.item_inserts.clone(),
            deletes: self.item_deletes.clone(),
            reloads: self.item_reloads.clone(),
            deferred_reloads: self.item_deferred_reloads.clone(),
            moves: self.item_moves.clone(),
            interactive_updates: self.item_interactive_updates.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_plan_is_empty() {
        let plan: EditPlan = EditPlan::default();
        assert!(plan.is_empty());
        assert!(!plan.needs_deferred_wave());
        assert_eq!(plan.group_changes_len(), 0);
        assert_eq!(plan.item_changes_len(), 0);
    }

    #[test]
    fn test_counts_every_record_kind() {
        let mut plan: EditPlan<&str> = EditPlan::default();
        plan.group_inserts.insert(0);
        plan.group_moves.push(Move::new(1, 2));
        plan.item_deferred_reloads.insert(Position::new(0, 0));
        plan.item_interactive_updates.push(InteractiveUpdate {
            position: Position::new(0, 1),
            updates: vec!["badge"],
        });
        assert_eq!(plan.group_changes_len(), 2);
        assert_eq!(plan.item_changes_len(), 2);
        assert!(plan.needs_deferred_wave());
        assert!(!plan.is_empty());
    }

    #[test]
    fn test_absorb_unions_item_plans() {
        let mut left: ItemPlan = ItemPlan::default();
        left.inserts.insert(Position::new(0, 0));
        let mut right: ItemPlan = ItemPlan::default();
        right.inserts.insert(Position::new(1, 0));
        right.moves.push(Move::new(Position::new(1, 1), Position::new(1, 2)));

        left.absorb(right);
        assert_eq!(left.inserts.len(), 2);
        assert_eq!(left.moves.len(), 1);
        assert_eq!(left.len(), 3);
    }

    #[test]
    fn test_plan_serializes_with_named_fields() {
        let mut plan: EditPlan = EditPlan::default();
        plan.group_moves.push(Move::new(0, 1));
        plan.item_inserts.insert(Position::new(2, 3));
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["group_moves"][0]["from"], 0);
        assert_eq!(json["group_moves"][0]["to"], 1);
        assert_eq!(json["item_inserts"][0]["group"], 2);
        assert_eq!(json["item_inserts"][0]["item"], 3);
    }
}
