//! Reconciliation configuration
//!
//! A configuration is built once and stays immutable for the lifetime of
//! the [`Reconciler`](crate::Reconciler) that owns it. Recognizers are
//! injected as trait objects, with blanket impls so plain closures work.

use crate::model::Group;

/// Caller-supplied signal that an element changed its position
///
/// Typically backed by a sort key the caller knows changed (for example a
/// "last message" timestamp in a conversation list).
pub trait MoveRecognizer<T>: Send + Sync {
    /// Return `true` if the element moved between the two snapshots
    fn recognize_move(&self, from: &T, to: &T) -> bool;
}

impl<T, F> MoveRecognizer<T> for F
where
    F: Fn(&T, &T) -> bool + Send + Sync,
{
    fn recognize_move(&self, from: &T, to: &T) -> bool {
        self(from, to)
    }
}

/// Caller-supplied recognizer of lightweight, non-structural updates
///
/// Consulted only for matched items whose revision markers differ. An empty
/// result means the change needs a full reload.
pub trait UpdateRecognizer<I, U>: Send + Sync {
    fn recognize_update(&self, from: &I, to: &I) -> Vec<U>;
}

impl<I, U, F> UpdateRecognizer<I, U> for F
where
    F: Fn(&I, &I) -> Vec<U> + Send + Sync,
{
    fn recognize_update(&self, from: &I, to: &I) -> Vec<U> {
        self(from, to)
    }
}

/// How a reordering of matched elements is explained as a set of moves
///
/// One permutation can be explained several ways; `[A, B] -> [B, A]` is
/// either "A moved down" or "B moved up". The strategy picks one.
pub enum MoveStrategy<T> {
    /// Explain reorderings by marking later elements as moved
    TopPreference,
    /// Explain reorderings by marking earlier elements as moved
    BottomPreference,
    /// Ask the caller, per matched pair, whether the element moved
    Recognizer(Box<dyn MoveRecognizer<T>>),
}

impl<T> MoveStrategy<T> {
    /// Wrap a recognizer (or closure) in the `Recognizer` variant
    pub fn recognizer(recognizer: impl MoveRecognizer<T> + 'static) -> Self {
        MoveStrategy::Recognizer(Box::new(recognizer))
    }

    pub fn label(&self) -> &'static str {
        match self {
            MoveStrategy::TopPreference => "top",
            MoveStrategy::BottomPreference => "bottom",
            MoveStrategy::Recognizer(_) => "recognizer",
        }
    }
}

impl<T> Default for MoveStrategy<T> {
    fn default() -> Self {
        MoveStrategy::TopPreference
    }
}

impl<T> std::fmt::Debug for MoveStrategy<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Full two-level configuration
///
/// `U` is the caller's interactive-update descriptor type; leave it as `()`
/// when no update recognizer is used.
pub struct ReconcileConfig<G: Group, U = ()> {
    pub group_move_strategy: MoveStrategy<G>,
    pub item_move_strategy: MoveStrategy<G::Item>,
    pub update_recognizer: Option<Box<dyn UpdateRecognizer<G::Item, U>>>,
    /// Check identity uniqueness before diffing. When disabled and the
    /// snapshots do contain duplicates, the resulting plan is unspecified.
    pub validate_consistency: bool,
    /// Demote reloads that collide with a move to the deferred second wave.
    /// Turn off for targets that apply moves and reloads in one pass.
    pub defer_conflicting_reloads: bool,
}

impl<G: Group, U> Default for ReconcileConfig<G, U> {
    fn default() -> Self {
        Self {
            group_move_strategy: MoveStrategy::default(),
            item_move_strategy: MoveStrategy::default(),
            update_recognizer: None,
            validate_consistency: true,
            defer_conflicting_reloads: true,
        }
    }
}

impl<G: Group, U> ReconcileConfig<G, U> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group_move_strategy(mut self, strategy: MoveStrategy<G>) -> Self {
        self.group_move_strategy = strategy;
        self
    }

    pub fn with_item_move_strategy(mut self, strategy: MoveStrategy<G::Item>) -> Self {
        self.item_move_strategy = strategy;
        self
    }

    pub fn with_update_recognizer(
        mut self,
        recognizer: impl UpdateRecognizer<G::Item, U> + 'static,
    ) -> Self {
        self.update_recognizer = Some(Box::new(recognizer));
        self
    }

    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate_consistency = enabled;
        self
    }

    pub fn with_deferred_reloads(mut self, enabled: bool) -> Self {
        self.defer_conflicting_reloads = enabled;
        self
    }
}

impl<G: Group, U> std::fmt::Debug for ReconcileConfig<G, U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReconcileConfig")
            .field("group_move_strategy", &self.group_move_strategy)
            .field("item_move_strategy", &self.item_move_strategy)
            .field("update_recognizer", &self.update_recognizer.is_some())
            .field("validate_consistency", &self.validate_consistency)
            .field("defer_conflicting_reloads", &self.defer_conflicting_reloads)
            .finish()
    }
}

/// Configuration for diffing a single flat item list
pub struct ItemConfig<I, U = ()> {
    pub move_strategy: MoveStrategy<I>,
    pub update_recognizer: Option<Box<dyn UpdateRecognizer<I, U>>>,
    pub validate_consistency: bool,
    pub defer_conflicting_reloads: bool,
}

impl<I, U> Default for ItemConfig<I, U> {
    fn default() -> Self {
        Self {
            move_strategy: MoveStrategy::default(),
            update_recognizer: None,
            validate_consistency: true,
            defer_conflicting_reloads: true,
        }
    }
}

impl<I, U> ItemConfig<I, U> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_move_strategy(mut self, strategy: MoveStrategy<I>) -> Self {
        self.move_strategy = strategy;
        self
    }

    pub fn with_update_recognizer(mut self, recognizer: impl UpdateRecognizer<I, U> + 'static) -> Self {
        self.update_recognizer = Some(Box::new(recognizer));
        self
    }

    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate_consistency = enabled;
        self
    }

    pub fn with_deferred_reloads(mut self, enabled: bool) -> Self {
        self.defer_conflicting_reloads = enabled;
        self
    }
}
