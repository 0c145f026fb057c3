use std::collections::HashSet;

use crate::errors::{ReconcileError, Result, Side};
use crate::model::{Group, HasIdentity};

/// Validate identity uniqueness across one snapshot
///
/// Checks, in order:
///
/// 1. Group identities are pairwise distinct across the top-level sequence
/// 2. Within each group, item identities are pairwise distinct
///
/// Item identities are only required to be unique per group; the same item
/// identity may appear in two different groups.
///
/// # Errors
/// - `DuplicateGroupIdentity` for the first group whose identity was already seen
/// - `DuplicateItemIdentity` for the first repeated item, scanning groups in order
pub fn validate_snapshot<G: Group>(groups: &[G], side: Side) -> Result<()> {
    let mut seen = HashSet::with_capacity(groups.len());
    for (group_index, group) in groups.iter().enumerate() {
        let id = group.identity();
        if !seen.insert(id.clone()) {
            return Err(ReconcileError::DuplicateGroupIdentity {
                side,
                group_index,
                group: format!("{:?}", id),
            });
        }
    }

    for (group_index, group) in groups.iter().enumerate() {
        validate_items(group.items(), group_index, side)?;
    }

    tracing::trace!(%side, groups = groups.len(), "snapshot identities are unique");
    Ok(())
}

/// Validate identity uniqueness of one group's items
///
/// # Errors
/// - `DuplicateItemIdentity` carrying `group_index` and the repeated identity
pub fn validate_items<I: HasIdentity>(items: &[I], group_index: usize, side: Side) -> Result<()> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        let id = item.identity();
        if !seen.insert(id.clone()) {
            return Err(ReconcileError::DuplicateItemIdentity {
                side,
                group_index,
                item: format!("{:?}", id),
            });
        }
    }
    Ok(())
}
