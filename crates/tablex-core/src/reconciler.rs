//! Configured reconciler and full-rebuild fallback
//!
//! A [`Reconciler`] owns one immutable [`ReconcileConfig`] and can be shared
//! across threads; every call is independent.

use crate::config::ReconcileConfig;
use crate::diff::engine::reconcile;
use crate::diff::plan::EditPlan;
use crate::errors::{ReconcileError, Result};
use crate::model::Group;

/// Predicate that forces a full rebuild instead of an incremental plan
///
/// Rules are stateless and see both snapshots before any diffing happens.
///
/// # Example
/// ```
/// use tablex_core::reconciler::RebuildRule;
///
/// let emptied = |old: &[u8], new: &[u8]| !old.is_empty() && new.is_empty();
/// let full: Vec<u8> = vec![1, 2];
/// let none: Vec<u8> = Vec::new();
/// assert!(emptied.requires_rebuild(&full, &none));
/// assert!(!emptied.requires_rebuild(&full, &full));
/// ```
pub trait RebuildRule<G>: Send + Sync {
    /// Return `true` when the transition must be rendered from scratch
    fn requires_rebuild(&self, old: &[G], new: &[G]) -> bool;
}

impl<G, F> RebuildRule<G> for F
where
    F: Fn(&[G], &[G]) -> bool + Send + Sync,
{
    fn requires_rebuild(&self, old: &[G], new: &[G]) -> bool {
        self(old, new)
    }
}

/// Why [`Reconciler::plan_or_rebuild`] gave up on an incremental plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RebuildReason {
    /// A registered rule fired; `index` is its registration order
    Rule { index: usize },
    /// Reconciliation failed; the caller should rebuild from `new`
    Error(ReconcileError),
}

/// Result of [`Reconciler::plan_or_rebuild`]
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<U = ()> {
    Plan(EditPlan<U>),
    Rebuild(RebuildReason),
}

impl<U> Outcome<U> {
    pub fn is_rebuild(&self) -> bool {
        matches!(self, Outcome::Rebuild(_))
    }

    /// The plan, if one was produced
    pub fn plan(&self) -> Option<&EditPlan<U>> {
        match self {
            Outcome::Plan(plan) => Some(plan),
            Outcome::Rebuild(_) => None,
        }
    }
}

/// A reconciler bound to one configuration
pub struct Reconciler<G: Group, U = ()> {
    config: ReconcileConfig<G, U>,
    rebuild_rules: Vec<Box<dyn RebuildRule<G>>>,
}

impl<G: Group, U> Reconciler<G, U> {
    pub fn new(config: ReconcileConfig<G, U>) -> Self {
        Self {
            config,
            rebuild_rules: Vec::new(),
        }
    }

    pub fn config(&self) -> &ReconcileConfig<G, U> {
        &self.config
    }

    /// Register a rule consulted by [`plan_or_rebuild`](Self::plan_or_rebuild)
    pub fn with_rebuild_rule(mut self, rule: impl RebuildRule<G> + 'static) -> Self {
        self.rebuild_rules.push(Box::new(rule));
        self
    }

    /// Compute the edit plan from `old` to `new`
    ///
    /// Rebuild rules are not consulted here.
    ///
    /// # Errors
    /// See [`reconcile`](crate::diff::engine::reconcile).
    pub fn reconcile(&self, old: &[G], new: &[G]) -> Result<EditPlan<U>> {
        reconcile(old, new, &self.config)
    }

    /// Compute a plan, or report that the caller should rebuild from `new`
    ///
    /// Rules are checked in registration order and the first one that fires
    /// wins. A reconciliation error also maps to a rebuild, so this never
    /// fails.
    pub fn plan_or_rebuild(&self, old: &[G], new: &[G]) -> Outcome<U> {
        if let Some(index) = self
            .rebuild_rules
            .iter()
            .position(|rule| rule.requires_rebuild(old, new))
        {
            tracing::debug!(rule = index, "rebuild rule fired");
            return Outcome::Rebuild(RebuildReason::Rule { index });
        }

        match self.reconcile(old, new) {
            Ok(plan) => Outcome::Plan(plan),
            Err(err) => {
                tracing::warn!(err.code = err.code(), "falling back to full rebuild");
                Outcome::Rebuild(RebuildReason::Error(err))
            }
        }
    }
}

impl<G: Group, U> Default for Reconciler<G, U> {
    fn default() -> Self {
        Self::new(ReconcileConfig::default())
    }
}

impl<G: Group, U> std::fmt::Debug for Reconciler<G, U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("config", &self.config)
            .field("rebuild_rules", &self.rebuild_rules.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Side;
    use crate::model::{HasIdentity, HasRevision};

    #[derive(Debug)]
    struct Bare(u8);

    impl HasIdentity for Bare {
        type Id = u8;
        fn identity(&self) -> u8 {
            self.0
        }
    }

    impl HasRevision for Bare {
        type Revision = ();
        fn revision(&self) {}
    }

    impl Group for Bare {
        type Item = Bare;
        fn items(&self) -> &[Bare] {
            &[]
        }
    }

    #[test]
    fn test_plan_when_no_rule_fires() {
        let reconciler =
            Reconciler::<Bare>::default().with_rebuild_rule(|_: &[Bare], _: &[Bare]| false);
        let outcome = reconciler.plan_or_rebuild(&[Bare(1)], &[Bare(1), Bare(2)]);
        assert!(!outcome.is_rebuild());
        assert_eq!(outcome.plan().map(|p| p.group_inserts.len()), Some(1));
    }

    #[test]
    fn test_first_firing_rule_wins() {
        let reconciler = Reconciler::<Bare>::default()
            .with_rebuild_rule(|_: &[Bare], _: &[Bare]| false)
            .with_rebuild_rule(|old: &[Bare], new: &[Bare]| old.len() != new.len())
            .with_rebuild_rule(|_: &[Bare], _: &[Bare]| true);
        let outcome = reconciler.plan_or_rebuild(&[Bare(1)], &[]);
        assert_eq!(outcome, Outcome::Rebuild(RebuildReason::Rule { index: 1 }));
    }

    #[test]
    fn test_error_maps_to_rebuild() {
        let reconciler = Reconciler::<Bare>::default();
        let outcome = reconciler.plan_or_rebuild(&[Bare(1), Bare(1)], &[]);
        match outcome {
            Outcome::Rebuild(RebuildReason::Error(err)) => assert_eq!(err.side(), Side::Old),
            other => panic!("expected rebuild, got {:?}", other),
        }
    }

    #[test]
    fn test_reconcile_ignores_rules() {
        let reconciler =
            Reconciler::<Bare>::default().with_rebuild_rule(|_: &[Bare], _: &[Bare]| true);
        let plan = reconciler.reconcile(&[Bare(1)], &[]).unwrap();
        assert_eq!(plan.group_deletes.len(), 1);
    }
}
