#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::sync::Arc;

use common::{group, group_rev, item, item_rev, pos, TestGroup};
use tablex_core::{
    drive, render_summary, Move, MoveStrategy, Outcome, PlanSink, Position, RebuildReason,
    ReconcileConfig, Reconciler, Wave,
};

/// Sink that records calls in a compact textual form
#[derive(Default)]
struct Recorder {
    calls: Vec<String>,
}

impl PlanSink<()> for Recorder {
    fn begin_batch(&mut self, wave: Wave) {
        self.calls.push(format!("begin:{:?}", wave));
    }
    fn end_batch(&mut self, wave: Wave) {
        self.calls.push(format!("end:{:?}", wave));
    }
    fn delete_group(&mut self, old_index: usize) {
        self.calls.push(format!("-g{}", old_index));
    }
    fn insert_group(&mut self, new_index: usize) {
        self.calls.push(format!("+g{}", new_index));
    }
    fn reload_group(&mut self, old_index: usize) {
        self.calls.push(format!("~g{}", old_index));
    }
    fn move_group(&mut self, mv: Move<usize>) {
        self.calls.push(format!("g{}>g{}", mv.from, mv.to));
    }
    fn delete_item(&mut self, old: Position) {
        self.calls.push(format!("-{}", old));
    }
    fn insert_item(&mut self, new: Position) {
        self.calls.push(format!("+{}", new));
    }
    fn reload_item(&mut self, new: Position) {
        self.calls.push(format!("~{}", new));
    }
    fn move_item(&mut self, mv: Move<Position>) {
        self.calls.push(format!("{}>{}", mv.from, mv.to));
    }
    fn update_item(&mut self, position: Position, updates: &[()]) {
        self.calls.push(format!("*{}x{}", position, updates.len()));
    }
}

#[test]
fn test_drive_real_plan_in_wave_order() {
    let old = vec![
        TestGroup {
            items: vec![item("a"), item("b"), item("c")],
            ..group("chats", &[])
        },
        group("gone", &["z"]),
    ];
    let new = vec![
        group("fresh", &[]),
        TestGroup {
            items: vec![item_rev("c", 2), item("a"), item("d")],
            ..group("chats", &[])
        },
    ];
    let reconciler = Reconciler::new(ReconcileConfig::<TestGroup>::default());
    let plan = reconciler.reconcile(&old, &new).unwrap();

    let mut recorder = Recorder::default();
    drive(&plan, &mut recorder);
    assert_eq!(
        recorder.calls,
        vec![
            "begin:Structural",
            "-g1",
            "+g0",
            "-0:1",
            "+1:2",
            "0:2>1:0",
            "end:Structural",
            "begin:Deferred",
            "~1:0",
            "end:Deferred",
        ]
    );
    assert_eq!(plan.item_moves, vec![Move::new(pos(0, 2), pos(1, 0))]);
}

#[test]
fn test_identical_snapshots_drive_nothing() {
    let snap = vec![group("g", &["a", "b"])];
    let plan = Reconciler::<TestGroup>::default().reconcile(&snap, &snap).unwrap();
    let mut recorder = Recorder::default();
    drive(&plan, &mut recorder);
    assert!(recorder.calls.is_empty());
}

#[test]
fn test_rebuild_rule_short_circuits_diffing() {
    let reconciler = Reconciler::new(ReconcileConfig::<TestGroup>::default()).with_rebuild_rule(
        |old: &[TestGroup], new: &[TestGroup]| old.len().abs_diff(new.len()) > 2,
    );

    let small = vec![group("a", &[])];
    let large = vec![
        group("a", &[]),
        group("b", &[]),
        group("c", &[]),
        group("d", &[]),
    ];
    assert_eq!(
        reconciler.plan_or_rebuild(&small, &large),
        Outcome::Rebuild(RebuildReason::Rule { index: 0 })
    );

    let outcome = reconciler.plan_or_rebuild(&small, &large[..2]);
    assert_eq!(outcome.plan().map(|p| p.group_inserts.len()), Some(1));
}

#[test]
fn test_invalid_snapshot_falls_back_to_rebuild() {
    let reconciler = Reconciler::<TestGroup>::default();
    let old = vec![group("a", &["x", "x"])];
    match reconciler.plan_or_rebuild(&old, &old) {
        Outcome::Rebuild(RebuildReason::Error(err)) => {
            assert_eq!(err.code(), "ERR_DUPLICATE_ITEM_IDENTITY");
        }
        other => panic!("expected rebuild, got {:?}", other),
    }
}

#[test]
fn test_reconciler_is_shared_across_threads() {
    let reconciler = Arc::new(Reconciler::new(
        ReconcileConfig::<TestGroup>::default()
            .with_item_move_strategy(MoveStrategy::recognizer(
                |from: &common::TestItem, to: &common::TestItem| from.rev != to.rev,
            )),
    ));

    let handles: Vec<_> = (0..4)
        .map(|n| {
            let reconciler = Arc::clone(&reconciler);
            std::thread::spawn(move || {
                let old = vec![group("g", &["a", "b", "c"])];
                let new = vec![TestGroup {
                    items: vec![item_rev("c", n + 1), item("a"), item("b")],
                    ..group("g", &[])
                }];
                reconciler.reconcile(&old, &new).unwrap()
            })
        })
        .collect();

    for handle in handles {
        let plan = handle.join().unwrap();
        assert_eq!(plan.item_moves, vec![Move::new(pos(0, 2), pos(0, 0))]);
        assert_eq!(
            plan.item_deferred_reloads.iter().copied().collect::<Vec<_>>(),
            vec![pos(0, 0)]
        );
    }
}

#[test]
fn test_summary_of_real_plan() {
    let old = vec![group_rev("g", 0, &["a"]), group("h", &["b"])];
    let new = vec![group_rev("g", 1, &["a"]), group("h", &["b", "c"])];
    let plan = Reconciler::<TestGroup>::default().reconcile(&old, &new).unwrap();

    let summary = render_summary(&plan);
    assert!(summary.contains("**Group changes**: 1"));
    assert!(summary.contains("- **Reloaded** (1): `0`"));
    assert!(summary.contains("- **Inserted** (1): `1:1`"));
}
