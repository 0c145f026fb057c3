//! Human-readable summary renderer for edit plans.

use std::fmt::{Debug, Display};

use crate::diff::plan::{EditPlan, Move};

/// Render a Markdown summary of an [`EditPlan`]
///
/// Intended for review tools and the CLI. Sections with no records are
/// omitted; an empty plan renders a single "no changes" line.
pub fn render_summary<U: Debug>(plan: &EditPlan<U>) -> String {
    let mut out = String::new();

    out.push_str("## Edit Plan\n\n");
    out.push_str(&format!(
        "**Group changes**: {}  \n**Item changes**: {}\n\n",
        plan.group_changes_len(),
        plan.item_changes_len()
    ));

    if plan.is_empty() {
        out.push_str("_No changes._\n");
        return out;
    }

    if plan.group_changes_len() > 0 {
        out.push_str("### Groups\n\n");
        list(&mut out, "Deleted", plan.group_deletes.iter());
        list(&mut out, "Inserted", plan.group_inserts.iter());
        list(&mut out, "Reloaded", plan.group_reloads.iter());
        moves(&mut out, &plan.group_moves);
        out.push('\n');
    }

    if plan.item_changes_len() > 0 {
        out.push_str("### Items\n\n");
        list(&mut out, "Deleted", plan.item_deletes.iter());
        list(&mut out, "Inserted", plan.item_inserts.iter());
        list(&mut out, "Reloaded", plan.item_reloads.iter());
        moves(&mut out, &plan.item_moves);
        list(&mut out, "Deferred reloads", plan.item_deferred_reloads.iter());
        if !plan.item_interactive_updates.is_empty() {
            out.push_str(&format!(
                "- **Interactive updates** ({}):\n",
                plan.item_interactive_updates.len()
            ));
            for update in &plan.item_interactive_updates {
                out.push_str(&format!("  - `{}`: {:?}\n", update.position, update.updates));
            }
        }
        out.push('\n');
    }

    if plan.needs_deferred_wave() {
        out.push_str("_Deferred reloads must be applied after the structural batch._\n");
    }

    out
}

fn list<'a, T: Display + 'a>(out: &mut String, label: &str, entries: impl ExactSizeIterator<Item = &'a T>) {
    if entries.len() == 0 {
        return;
    }
    let count = entries.len();
    let rendered: Vec<String> = entries.map(|e| format!("`{}`", e)).collect();
    out.push_str(&format!("- **{label}** ({count}): {}\n", rendered.join(", ")));
}

fn moves<P: Display>(out: &mut String, moves: &[Move<P>]) {
    if moves.is_empty() {
        return;
    }
    let rendered: Vec<String> = moves
        .iter()
        .map(|m| format!("`{}` → `{}`", m.from, m.to))
        .collect();
    out.push_str(&format!("- **Moved** ({}): {}\n", moves.len(), rendered.join(", ")));
}
