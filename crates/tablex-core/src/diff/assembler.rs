//! Plan assembly and move/update conflict resolution.

use std::collections::{BTreeSet, HashSet};

use crate::diff::plan::{EditPlan, ItemPlan, Move};
use crate::model::Position;

/// Group-level records produced by the matcher and the move resolver
#[derive(Debug, Default)]
pub struct GroupEdits {
    pub inserts: BTreeSet<usize>,
    pub deletes: BTreeSet<usize>,
    pub reloads: BTreeSet<usize>,
    pub moves: Vec<Move<usize>>,
}

/// Merge per-group item plans with the group-level edits
///
/// When `defer_conflicting_reloads` is set, reloads whose coordinate takes
/// part in a move are demoted to the deferred wave (see
/// [`resolve_update_conflicts`]).
pub fn assemble<U>(
    groups: GroupEdits,
    item_plans: impl IntoIterator<Item = ItemPlan<U>>,
    defer_conflicting_reloads: bool,
) -> EditPlan<U> {
    let mut items = ItemPlan::default();
    for plan in item_plans {
        items.absorb(plan);
    }
    items.moves.sort_by_key(|m| (m.to, m.from));
    items.interactive_updates.sort_by_key(|u| u.position);

    resolve_update_conflicts(&mut items, defer_conflicting_reloads);

    EditPlan {
        group_inserts: groups.inserts,
        group_deletes: groups.deletes,
        group_reloads: groups.reloads,
        group_moves: groups.moves,
        item_inserts: items.inserts,
        item_deletes: items.deletes,
        item_reloads: items.reloads,
        item_deferred_reloads: items.deferred_reloads,
        item_moves: items.moves,
        item_interactive_updates: items.interactive_updates,
    }
}

/// Enforce the update-kind exclusivity rules on a merged item plan
///
/// 1. A reload at a move destination is the moved item itself; a reload at
///    a move source shares its coordinate with a moving item. Either way
///    the reload cannot ride in the same pass as the move, so it is
///    demoted to `deferred_reloads` (still addressed by new position).
/// 2. An interactive update never shares a coordinate with a reload or a
///    deferred reload; the reload wins.
///
/// Step 1 is skipped when `defer` is false.
pub fn resolve_update_conflicts<U>(plan: &mut ItemPlan<U>, defer: bool) {
    if defer && !plan.moves.is_empty() && !plan.reloads.is_empty() {
        let touched: HashSet<Position> = plan
            .moves
            .iter()
            .flat_map(|m| [m.from, m.to])
            .collect();

        let (conflicting, plain): (BTreeSet<Position>, BTreeSet<Position>) =
            std::mem::take(&mut plan.reloads)
                .into_iter()
                .partition(|p| touched.contains(p));

        if !conflicting.is_empty() {
            tracing::debug!(deferred = conflicting.len(), "deferred reloads that collide with moves");
        }
        plan.reloads = plain;
        plan.deferred_reloads.extend(conflicting);
    }

    if !plan.interactive_updates.is_empty() {
        let before = plan.interactive_updates.len();
        let reloads = &plan.reloads;
        let deferred = &plan.deferred_reloads;
        plan.interactive_updates
            .retain(|u| !reloads.contains(&u.position) && !deferred.contains(&u.position));
        if plan.interactive_updates.len() != before {
            tracing::debug!(
                dropped = before - plan.interactive_updates.len(),
                "interactive updates shadowed by reloads"
            );
        }
    }
}
