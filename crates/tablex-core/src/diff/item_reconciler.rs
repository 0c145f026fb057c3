//! Item-level diff for one matched group pair.

use crate::config::{MoveStrategy, UpdateRecognizer};
use crate::diff::matcher::partition;
use crate::diff::move_resolver::resolve_moves;
use crate::diff::plan::{InteractiveUpdate, ItemPlan, Move};
use crate::model::{HasIdentity, HasRevision, Position};

/// Borrowed item-level settings shared by every group of one call
pub struct ItemRules<'c, I, U> {
    pub move_strategy: &'c MoveStrategy<I>,
    pub update_recognizer: Option<&'c dyn UpdateRecognizer<I, U>>,
}

/// Diff the items of a matched, non-reloaded group pair
///
/// Deletes and move sources are addressed with `old_group`; inserts, move
/// destinations and every update kind with `new_group`. Update kinds are
/// decided here and are mutually exclusive: a revised item is an
/// interactive update when the recognizer returns descriptors, otherwise a
/// reload. Reloads that collide with a move are demoted later, by the
/// assembler, once all groups are merged.
pub fn reconcile_group_items<I, U>(
    old_items: &[I],
    new_items: &[I],
    old_group: usize,
    new_group: usize,
    rules: &ItemRules<'_, I, U>,
) -> ItemPlan<U>
where
    I: HasIdentity + HasRevision,
{
    let split = partition(old_items, new_items);
    let mut plan = ItemPlan::default();

    plan.deletes = split
        .removed
        .iter()
        .map(|&i| Position::new(old_group, i))
        .collect();
    plan.inserts = split
        .added
        .iter()
        .map(|&j| Position::new(new_group, j))
        .collect();

    plan.moves = resolve_moves(&split.matched, rules.move_strategy)
        .into_iter()
        .map(|m| {
            Move::new(
                Position::new(old_group, m.from),
                Position::new(new_group, m.to),
            )
        })
        .collect();

    for pair in split.matched.iter().filter(|p| p.revised) {
        let position = Position::new(new_group, pair.to);
        let updates = rules
            .update_recognizer
            .map(|r| r.recognize_update(pair.old, pair.new))
            .unwrap_or_default();

        if updates.is_empty() {
            plan.reloads.insert(position);
        } else {
            plan.interactive_updates
                .push(InteractiveUpdate { position, updates });
        }
    }
    plan.interactive_updates.sort_by_key(|u| u.position);

    tracing::trace!(
        old_group,
        new_group,
        inserts = plan.inserts.len(),
        deletes = plan.deletes.len(),
        moves = plan.moves.len(),
        reloads = plan.reloads.len(),
        interactive = plan.interactive_updates.len(),
        "reconciled group items"
    );
    plan
}
