//! tablex core - two-level list reconciliation
//!
//! Given two snapshots of an ordered collection of groups, each holding an
//! ordered list of items, this crate computes a minimal, conflict-free edit
//! plan that a table or list view can apply incrementally:
//! - Identity matching of groups and items (inserts, deletes)
//! - Move resolution with top/bottom preference or a caller recognizer
//! - Revision-based reloads and caller-recognized interactive updates
//! - Deferral of reloads that collide with moves into a second wave
//! - Replay of a plan for soundness checks, and a renderer sink driver
//!
//! The engine is pure and synchronous; snapshots are borrowed slices.

pub mod config;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod reconciler;
pub mod replay;
pub mod rules;
pub mod single;
pub mod sink;

#[doc(hidden)]
pub use tracing;

pub use tablex_core_types;

// Re-export commonly used types
pub use config::{ItemConfig, MoveRecognizer, MoveStrategy, ReconcileConfig, UpdateRecognizer};
pub use diff::{reconcile, render_summary, EditPlan, InteractiveUpdate, ItemPlan, Move};
pub use errors::{ErrorKind, ReconcileError, Result, Side};
pub use model::{Group, HasIdentity, HasRevision, Position};
pub use reconciler::{Outcome, RebuildReason, RebuildRule, Reconciler};
pub use single::reconcile_items;
pub use sink::{drive, PlanSink, Wave};
