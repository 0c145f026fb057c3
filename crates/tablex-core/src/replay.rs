//! Layout replay
//!
//! Applies an [`EditPlan`] to the old snapshot the way a batch-update
//! widget would, and returns the resulting layout: group identities, item
//! identities and the revision each visible entry carries afterwards.
//!
//! A plan is sound for `(old, new)` when `replay(old, new, plan)` equals
//! `layout_of(new)`. Content for inserted and reloaded entries is pulled
//! from `new`, the same way a data source is queried after a batch.
//!
//! Replay per level:
//!
//! 1. Inserted (and reloaded) entries claim their slot in the new layout
//! 2. Moved entries claim their destination slot
//! 3. Remaining old entries fill the free slots in old order

use std::collections::{BTreeSet, HashMap, HashSet};

use thiserror::Error;

use crate::diff::plan::EditPlan;
use crate::model::{Group, HasIdentity, HasRevision, Position};

/// One visible entry: identity plus the revision it is rendered with
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<Id, Rev> {
    pub id: Id,
    pub revision: Rev,
}

type GroupEntry<G> = Entry<<G as HasIdentity>::Id, <G as HasRevision>::Revision>;
type ItemEntry<G> = Entry<
    <<G as Group>::Item as HasIdentity>::Id,
    <<G as Group>::Item as HasRevision>::Revision,
>;

/// Rendered state of one group
pub struct GroupLayout<G: Group> {
    pub group: GroupEntry<G>,
    pub items: Vec<ItemEntry<G>>,
}

impl<G: Group> PartialEq for GroupLayout<G> {
    fn eq(&self, other: &Self) -> bool {
        self.group == other.group && self.items == other.items
    }
}

impl<G> std::fmt::Debug for GroupLayout<G>
where
    G: Group,
    G::Revision: std::fmt::Debug,
    <G::Item as HasIdentity>::Id: std::fmt::Debug,
    <G::Item as HasRevision>::Revision: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupLayout")
            .field("group", &self.group)
            .field("items", &self.items)
            .finish()
    }
}

/// A plan that cannot be applied to the given snapshots
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    #[error("Group slot {index} is out of range for the new snapshot")]
    GroupOutOfRange { index: usize },

    #[error("Group slot {index} is claimed twice")]
    GroupSlotConflict { index: usize },

    #[error("Reloaded group at old index {old_index} does not exist in the new snapshot")]
    ReloadedGroupMissing { old_index: usize },

    #[error("Group layout needs {expected} entries, replay produced {actual}")]
    GroupCountMismatch { expected: usize, actual: usize },

    #[error("Item slot {position} is out of range for the new snapshot")]
    ItemOutOfRange { position: Position },

    #[error("Item slot {position} is claimed twice")]
    ItemSlotConflict { position: Position },

    #[error("Group {group} needs {expected} items, replay produced {actual}")]
    ItemCountMismatch {
        group: usize,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Clone, Copy)]
enum Source {
    Old(usize),
    New(usize),
}

/// Layout of a snapshot rendered from scratch
pub fn layout_of<G: Group>(snapshot: &[G]) -> Vec<GroupLayout<G>> {
    snapshot.iter().map(fresh_group).collect()
}

fn fresh_group<G: Group>(group: &G) -> GroupLayout<G> {
    GroupLayout {
        group: Entry {
            id: group.identity(),
            revision: group.revision(),
        },
        items: group
            .items()
            .iter()
            .map(|item| Entry {
                id: item.identity(),
                revision: item.revision(),
            })
            .collect(),
    }
}

/// Apply `plan` to `old`, pulling inserted and refreshed content from `new`
///
/// # Errors
/// Any [`ReplayError`] means the plan is not applicable to these snapshots.
pub fn replay<G: Group, U>(
    old: &[G],
    new: &[G],
    plan: &EditPlan<U>,
) -> Result<Vec<GroupLayout<G>>, ReplayError> {
    let new_index: HashMap<G::Id, usize> = new
        .iter()
        .enumerate()
        .map(|(index, group)| (group.identity(), index))
        .collect();

    let mut slots: Vec<Option<Source>> = vec![None; new.len()];
    let claim = |slots: &mut Vec<Option<Source>>, index: usize, source: Source| {
        match slots.get_mut(index) {
            None => Err(ReplayError::GroupOutOfRange { index }),
            Some(Some(_)) => Err(ReplayError::GroupSlotConflict { index }),
            Some(slot) => {
                *slot = Some(source);
                Ok(())
            }
        }
    };

    for &index in &plan.group_inserts {
        claim(&mut slots, index, Source::New(index))?;
    }
    for &old_index in &plan.group_reloads {
        let index = old
            .get(old_index)
            .and_then(|g| new_index.get(&g.identity()).copied())
            .ok_or(ReplayError::ReloadedGroupMissing { old_index })?;
        claim(&mut slots, index, Source::New(index))?;
    }
    for mv in &plan.group_moves {
        claim(&mut slots, mv.to, Source::Old(mv.from))?;
    }

    let moved_from: HashSet<usize> = plan.group_moves.iter().map(|m| m.from).collect();
    let survivors = (0..old.len()).filter(|i| {
        !plan.group_deletes.contains(i) && !plan.group_reloads.contains(i) && !moved_from.contains(i)
    });
    fill_in_order(&mut slots, survivors).map_err(|actual| ReplayError::GroupCountMismatch {
        expected: new.len(),
        actual,
    })?;

    let refreshed: BTreeSet<Position> = plan
        .item_reloads
        .iter()
        .chain(&plan.item_deferred_reloads)
        .chain(plan.item_interactive_updates.iter().map(|u| &u.position))
        .copied()
        .collect();

    let mut layout = Vec::with_capacity(new.len());
    for (index, slot) in slots.into_iter().enumerate() {
        let group_layout = match slot {
            Some(Source::New(j)) => fresh_group(&new[j]),
            Some(Source::Old(i)) => {
                let source = old
                    .get(i)
                    .ok_or(ReplayError::GroupOutOfRange { index: i })?;
                GroupLayout {
                    group: Entry {
                        id: source.identity(),
                        revision: source.revision(),
                    },
                    items: replay_items(source.items(), new[index].items(), i, index, plan, &refreshed)?,
                }
            }
            None => {
                return Err(ReplayError::GroupCountMismatch {
                    expected: new.len(),
                    actual: index,
                })
            }
        };
        layout.push(group_layout);
    }
    Ok(layout)
}

/// Replay the item records of one surviving group
fn replay_items<I: HasIdentity + HasRevision, U>(
    old_items: &[I],
    new_items: &[I],
    old_group: usize,
    new_group: usize,
    plan: &EditPlan<U>,
    refreshed: &BTreeSet<Position>,
) -> Result<Vec<Entry<I::Id, I::Revision>>, ReplayError> {
    let mut slots: Vec<Option<Source>> = vec![None; new_items.len()];
    let mut claim = |position: Position, source: Source| match slots.get_mut(position.item) {
        None => Err(ReplayError::ItemOutOfRange { position }),
        Some(Some(_)) => Err(ReplayError::ItemSlotConflict { position }),
        Some(slot) => {
            *slot = Some(source);
            Ok(())
        }
    };

    for &position in plan.item_inserts.iter().filter(|p| p.group == new_group) {
        claim(position, Source::New(position.item))?;
    }
    let mut moved_from = HashSet::new();
    for mv in plan.item_moves.iter().filter(|m| m.from.group == old_group) {
        if mv.to.group != new_group {
            return Err(ReplayError::ItemOutOfRange { position: mv.to });
        }
        claim(mv.to, Source::Old(mv.from.item))?;
        moved_from.insert(mv.from.item);
    }

    let survivors = (0..old_items.len()).filter(|&k| {
        !plan.item_deletes.contains(&Position::new(old_group, k)) && !moved_from.contains(&k)
    });
    fill_in_order(&mut slots, survivors).map_err(|actual| ReplayError::ItemCountMismatch {
        group: new_group,
        expected: new_items.len(),
        actual,
    })?;

    let mut items = Vec::with_capacity(new_items.len());
    for (index, slot) in slots.into_iter().enumerate() {
        let position = Position::new(new_group, index);
        let entry = match slot {
            Some(Source::New(k)) => Entry {
                id: new_items[k].identity(),
                revision: new_items[k].revision(),
            },
            Some(Source::Old(k)) => {
                let item = old_items
                    .get(k)
                    .ok_or(ReplayError::ItemOutOfRange { position })?;
                let revision = if refreshed.contains(&position) {
                    new_items[index].revision()
                } else {
                    item.revision()
                };
                Entry {
                    id: item.identity(),
                    revision,
                }
            }
            None => {
                return Err(ReplayError::ItemCountMismatch {
                    group: new_group,
                    expected: new_items.len(),
                    actual: index,
                })
            }
        };
        items.push(entry);
    }
    Ok(items)
}

/// Place `survivors` into the free slots, in order
///
/// On a count mismatch returns the number of entries the replay would have
/// produced.
fn fill_in_order(
    slots: &mut [Option<Source>],
    survivors: impl Iterator<Item = usize>,
) -> Result<(), usize> {
    let claimed = slots.iter().filter(|s| s.is_some()).count();
    let mut free = slots.iter_mut().filter(|s| s.is_none());
    let mut placed = 0;
    for index in survivors {
        match free.next() {
            Some(slot) => *slot = Some(Source::Old(index)),
            None => return Err(claimed + placed + 1),
        }
        placed += 1;
    }
    if free.next().is_some() {
        return Err(claimed + placed);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::plan::Move;

    #[derive(Debug, Clone)]
    struct Cell(char, u8);

    impl HasIdentity for Cell {
        type Id = char;
        fn identity(&self) -> char {
            self.0
        }
    }

    impl HasRevision for Cell {
        type Revision = u8;
        fn revision(&self) -> u8 {
            self.1
        }
    }

    #[derive(Debug, Clone)]
    struct Table(char, u8, Vec<Cell>);

    impl HasIdentity for Table {
        type Id = char;
        fn identity(&self) -> char {
            self.0
        }
    }

    impl HasRevision for Table {
        type Revision = u8;
        fn revision(&self) -> u8 {
            self.1
        }
    }

    impl Group for Table {
        type Item = Cell;
        fn items(&self) -> &[Cell] {
            &self.2
        }
    }

    fn table(id: char, cells: &str) -> Table {
        Table(id, 0, cells.chars().map(|c| Cell(c, 0)).collect())
    }

    #[test]
    fn test_empty_plan_replays_old_layout() {
        let snap = vec![table('t', "abc")];
        let plan: EditPlan = EditPlan::default();
        assert_eq!(replay(&snap, &snap, &plan).unwrap(), layout_of(&snap));
    }

    #[test]
    fn test_hand_written_plan_reaches_new_layout() {
        let old = vec![table('t', "abc")];
        let new = vec![table('t', "cad")];
        let mut plan: EditPlan = EditPlan::default();
        plan.item_deletes.insert(Position::new(0, 1));
        plan.item_inserts.insert(Position::new(0, 2));
        plan.item_moves.push(Move::new(Position::new(0, 2), Position::new(0, 0)));

        assert_eq!(replay(&old, &new, &plan).unwrap(), layout_of(&new));
    }

    #[test]
    fn test_stale_revision_is_visible_without_reload() {
        let old = vec![table('t', "ab")];
        let mut new = old.clone();
        new[0].2[1].1 = 7;
        let plan: EditPlan = EditPlan::default();
        assert_ne!(replay(&old, &new, &plan).unwrap(), layout_of(&new));

        let mut plan: EditPlan = EditPlan::default();
        plan.item_reloads.insert(Position::new(0, 1));
        assert_eq!(replay(&old, &new, &plan).unwrap(), layout_of(&new));
    }

    #[test]
    fn test_missing_insert_is_a_count_mismatch() {
        let old = vec![table('t', "a")];
        let new = vec![table('t', "ab")];
        let plan: EditPlan = EditPlan::default();
        assert_eq!(
            replay(&old, &new, &plan).unwrap_err(),
            ReplayError::ItemCountMismatch {
                group: 0,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_double_claimed_group_slot() {
        let old = vec![table('x', ""), table('y', "")];
        let new = vec![table('y', ""), table('x', "")];
        let mut plan: EditPlan = EditPlan::default();
        plan.group_moves.push(Move::new(1, 0));
        plan.group_moves.push(Move::new(0, 0));
        assert_eq!(
            replay(&old, &new, &plan).unwrap_err(),
            ReplayError::GroupSlotConflict { index: 0 }
        );
    }
}
