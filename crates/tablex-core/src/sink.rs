//! Renderer adapter interface
//!
//! A [`PlanSink`] receives an [`EditPlan`] as a stream of widget-style
//! calls. [`drive`] issues them in the order batch-update APIs expect:
//!
//! 1. Structural wave: group deletes, inserts and reloads, then group
//!    moves, then item deletes, inserts and reloads, then item moves
//! 2. Deferred wave: deferred item reloads (only when there are any)
//! 3. Interactive updates, outside of any batch
//!
//! Addresses are passed through unchanged, so a sink sees old indices for
//! deletes and move sources and new indices for everything else.

use crate::diff::plan::{EditPlan, Move};
use crate::model::Position;

/// Batch boundary marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    /// Inserts, deletes, reloads and moves applied together
    Structural,
    /// Reloads that collided with a move and must follow it
    Deferred,
}

/// Target of a plan, typically a list or table widget adapter
pub trait PlanSink<U> {
    fn begin_batch(&mut self, _wave: Wave) {}
    fn end_batch(&mut self, _wave: Wave) {}

    fn delete_group(&mut self, old_index: usize);
    fn insert_group(&mut self, new_index: usize);
    fn reload_group(&mut self, old_index: usize);
    fn move_group(&mut self, mv: Move<usize>);

    fn delete_item(&mut self, old: Position);
    fn insert_item(&mut self, new: Position);
    fn reload_item(&mut self, new: Position);
    fn move_item(&mut self, mv: Move<Position>);

    /// Apply caller-defined lightweight updates to the item at `position`
    fn update_item(&mut self, position: Position, updates: &[U]);
}

/// Feed `plan` into `sink`
///
/// An empty plan produces no calls at all, not even batch boundaries.
pub fn drive<U, S>(plan: &EditPlan<U>, sink: &mut S)
where
    S: PlanSink<U> + ?Sized,
{
    let structural = plan.group_changes_len() > 0
        || !plan.item_deletes.is_empty()
        || !plan.item_inserts.is_empty()
        || !plan.item_reloads.is_empty()
        || !plan.item_moves.is_empty();

    if structural {
        sink.begin_batch(Wave::Structural);
        plan.group_deletes.iter().for_each(|&g| sink.delete_group(g));
        plan.group_inserts.iter().for_each(|&g| sink.insert_group(g));
        plan.group_reloads.iter().for_each(|&g| sink.reload_group(g));
        plan.group_moves.iter().for_each(|&m| sink.move_group(m));
        plan.item_deletes.iter().for_each(|&p| sink.delete_item(p));
        plan.item_inserts.iter().for_each(|&p| sink.insert_item(p));
        plan.item_reloads.iter().for_each(|&p| sink.reload_item(p));
        plan.item_moves.iter().for_each(|&m| sink.move_item(m));
        sink.end_batch(Wave::Structural);
    }

    if plan.needs_deferred_wave() {
        sink.begin_batch(Wave::Deferred);
        plan.item_deferred_reloads
            .iter()
            .for_each(|&p| sink.reload_item(p));
        sink.end_batch(Wave::Deferred);
    }

    for update in &plan.item_interactive_updates {
        sink.update_item(update.position, &update.updates);
    }
}
