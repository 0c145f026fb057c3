//! Reconciliation of one flat item list.
//!
//! For callers with a single section: both lists are treated as one
//! implicit group at index 0 and only item-level records are produced.

use tablex_core_types::schema::OP_RECONCILE_ITEMS;

use crate::config::ItemConfig;
use crate::diff::assembler::resolve_update_conflicts;
use crate::diff::item_reconciler::{reconcile_group_items, ItemRules};
use crate::diff::plan::ItemPlan;
use crate::errors::{Result, Side};
use crate::model::{HasIdentity, HasRevision};
use crate::rules::validate_items;
use crate::{log_op_end, log_op_error, log_op_start};

/// Compute the item-level edits that turn `old` into `new`
///
/// Every position in the result has `group == 0`.
///
/// # Errors
/// - `DuplicateItemIdentity` with `group_index == 0` when validation is
///   enabled and either list repeats an identity
pub fn reconcile_items<I, U>(old: &[I], new: &[I], config: &ItemConfig<I, U>) -> Result<ItemPlan<U>>
where
    I: HasIdentity + HasRevision,
{
    log_op_start!(OP_RECONCILE_ITEMS, old_items = old.len(), new_items = new.len());
    let start = std::time::Instant::now();

    let plan = reconcile_items_impl(old, new, config).map_err(|e| {
        log_op_error!(
            OP_RECONCILE_ITEMS,
            e,
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        OP_RECONCILE_ITEMS,
        duration_ms = start.elapsed().as_millis() as u64,
        item_changes = plan.len(),
        deferred = plan.deferred_reloads.len()
    );
    Ok(plan)
}

fn reconcile_items_impl<I, U>(old: &[I], new: &[I], config: &ItemConfig<I, U>) -> Result<ItemPlan<U>>
where
    I: HasIdentity + HasRevision,
{
    if config.validate_consistency {
        validate_items(old, 0, Side::Old)?;
        validate_items(new, 0, Side::New)?;
    }

    let rules = ItemRules {
        move_strategy: &config.move_strategy,
        update_recognizer: config.update_recognizer.as_deref(),
    };
    let mut plan = reconcile_group_items(old, new, 0, 0, &rules);
    resolve_update_conflicts(&mut plan, config.defer_conflicting_reloads);
    Ok(plan)
}
