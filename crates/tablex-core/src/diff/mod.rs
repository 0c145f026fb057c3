//! Two-level list reconciliation.
//!
//! Compares two snapshots of a grouped list and produces a deterministic
//! [`EditPlan`] that a renderer can apply incrementally.
//!
//! ## Entry point
//!
//! ```
//! use tablex_core::diff::{reconcile, render_summary};
//! use tablex_core::{Group, HasIdentity, HasRevision, ReconcileConfig};
//!
//! struct Row(u32);
//! impl HasIdentity for Row {
//!     type Id = u32;
//!     fn identity(&self) -> u32 { self.0 }
//! }
//! impl HasRevision for Row {
//!     type Revision = ();
//!     fn revision(&self) {}
//! }
//!
//! struct Section(&'static str, Vec<Row>);
//! impl HasIdentity for Section {
//!     type Id = &'static str;
//!     fn identity(&self) -> &'static str { self.0 }
//! }
//! impl HasRevision for Section {
//!     type Revision = ();
//!     fn revision(&self) {}
//! }
//! impl Group for Section {
//!     type Item = Row;
//!     fn items(&self) -> &[Row] { &self.1 }
//! }
//!
//! let old = vec![Section("inbox", vec![Row(1), Row(2)])];
//! let new = vec![Section("inbox", vec![Row(2), Row(3)])];
//! let plan = reconcile(&old, &new, &ReconcileConfig::<Section>::new())?;
//! assert_eq!(plan.item_deletes.len(), 1);
//! assert_eq!(plan.item_inserts.len(), 1);
//! println!("{}", render_summary(&plan));
//! # Ok::<(), tablex_core::ReconcileError>(())
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce identical plans, in a fixed
//!   record order (sets ascending, moves by destination).
//! - **Idempotence**: reconciling a snapshot with itself yields an empty plan.
//! - **Disjointness**: within one level no coordinate carries two update kinds.
//! - **Soundness**: applying the plan to the old snapshot yields the new one
//!   (see [`replay`](crate::replay)).

pub mod assembler;
pub mod engine;
pub mod human_summary;
pub mod item_reconciler;
pub mod matcher;
pub mod move_resolver;
pub mod plan;

pub use engine::reconcile;
pub use human_summary::render_summary;
pub use plan::{EditPlan, InteractiveUpdate, ItemPlan, Move};
