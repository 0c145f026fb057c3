//! Two-level reconciliation engine.
//!
//! The core entry point is [`reconcile`], which compares two snapshots of a
//! grouped list and produces an [`EditPlan`].

use tablex_core_types::schema::OP_RECONCILE;

use crate::config::ReconcileConfig;
use crate::diff::assembler::{assemble, GroupEdits};
use crate::diff::item_reconciler::{reconcile_group_items, ItemRules};
use crate::diff::matcher::match_groups;
use crate::diff::move_resolver::resolve_moves;
use crate::diff::plan::EditPlan;
use crate::errors::{Result, Side};
use crate::model::Group;
use crate::rules::validate_snapshot;
use crate::{log_op_end, log_op_error, log_op_start};

/// Compute the edit plan that turns `old` into `new`
///
/// Steps, in order:
///
/// 1. Validate identity uniqueness of both snapshots (when enabled)
/// 2. Match groups by identity: inserts, deletes, and reloads for revised groups
/// 3. Resolve group moves among matched, unrevised groups
/// 4. Diff items of every matched, unrevised group
/// 5. Merge item plans and demote reloads that collide with moves
///
/// Pure with respect to its inputs: the same snapshots and configuration
/// always produce the same plan, and `reconcile(s, s, _)` is empty.
///
/// # Errors
/// - `DuplicateGroupIdentity` / `DuplicateItemIdentity` when validation is
///   enabled and either snapshot repeats an identity. The old snapshot is
///   checked first.
pub fn reconcile<G: Group, U>(
    old: &[G],
    new: &[G],
    config: &ReconcileConfig<G, U>,
) -> Result<EditPlan<U>> {
    log_op_start!(OP_RECONCILE, old_groups = old.len(), new_groups = new.len());
    let start = std::time::Instant::now();

    let plan = reconcile_impl(old, new, config).map_err(|e| {
        log_op_error!(
            OP_RECONCILE,
            e,
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        OP_RECONCILE,
        duration_ms = start.elapsed().as_millis() as u64,
        group_changes = plan.group_changes_len(),
        item_changes = plan.item_changes_len(),
        deferred = plan.item_deferred_reloads.len()
    );
    Ok(plan)
}

fn reconcile_impl<G: Group, U>(
    old: &[G],
    new: &[G],
    config: &ReconcileConfig<G, U>,
) -> Result<EditPlan<U>> {
    if config.validate_consistency {
        validate_snapshot(old, Side::Old)?;
        validate_snapshot(new, Side::New)?;
    }

    let groups = match_groups(old, new);
    let group_moves = resolve_moves(&groups.matched, &config.group_move_strategy);

    let rules = ItemRules {
        move_strategy: &config.item_move_strategy,
        update_recognizer: config.update_recognizer.as_deref(),
    };
    let item_plans: Vec<_> = groups
        .matched
        .iter()
        .map(|pair| reconcile_group_items(pair.old.items(), pair.new.items(), pair.from, pair.to, &rules))
        .collect();

    let edits = GroupEdits {
        inserts: groups.inserts,
        deletes: groups.deletes,
        reloads: groups.reloads,
        moves: group_moves,
    };
    Ok(assemble(edits, item_plans, config.defer_conflicting_reloads))
}
