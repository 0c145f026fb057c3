//! Shared fixtures for integration tests

use std::collections::HashSet;

use tablex_core::replay::{layout_of, replay};
use tablex_core::{EditPlan, Group, HasIdentity, HasRevision, Position};

#[derive(Debug, Clone, PartialEq)]
pub struct TestItem {
    pub id: String,
    pub rev: u32,
}

impl HasIdentity for TestItem {
    type Id = String;
    fn identity(&self) -> String {
        self.id.clone()
    }
}

impl HasRevision for TestItem {
    type Revision = u32;
    fn revision(&self) -> u32 {
        self.rev
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TestGroup {
    pub id: String,
    pub rev: u32,
    pub items: Vec<TestItem>,
}

impl HasIdentity for TestGroup {
    type Id = String;
    fn identity(&self) -> String {
        self.id.clone()
    }
}

impl HasRevision for TestGroup {
    type Revision = u32;
    fn revision(&self) -> u32 {
        self.rev
    }
}

impl Group for TestGroup {
    type Item = TestItem;
    fn items(&self) -> &[TestItem] {
        &self.items
    }
}

/// Item with revision 0
#[allow(dead_code)]
pub fn item(id: &str) -> TestItem {
    TestItem {
        id: id.to_string(),
        rev: 0,
    }
}

#[allow(dead_code)]
pub fn item_rev(id: &str, rev: u32) -> TestItem {
    TestItem {
        id: id.to_string(),
        rev,
    }
}

/// Group with revision 0 whose items are named by `items`, each at revision 0
#[allow(dead_code)]
pub fn group(id: &str, items: &[&str]) -> TestGroup {
    group_rev(id, 0, items)
}

#[allow(dead_code)]
pub fn group_rev(id: &str, rev: u32, items: &[&str]) -> TestGroup {
    TestGroup {
        id: id.to_string(),
        rev,
        items: items.iter().map(|i| item(i)).collect(),
    }
}

#[allow(dead_code)]
pub fn pos(group: usize, item: usize) -> Position {
    Position::new(group, item)
}

/// Applying the plan to `old` must render exactly `new`
#[allow(dead_code)]
pub fn assert_sound<U>(old: &[TestGroup], new: &[TestGroup], plan: &EditPlan<U>) {
    let replayed = replay(old, new, plan).unwrap();
    assert_eq!(replayed, layout_of(new));
}

/// Update kinds never share a coordinate, and a moved item is never
/// reloaded in the structural wave
#[allow(dead_code)]
pub fn assert_disjoint<U>(plan: &EditPlan<U>) {
    assert!(plan.item_reloads.is_disjoint(&plan.item_deferred_reloads));

    let sources: HashSet<Position> = plan.item_moves.iter().map(|m| m.from).collect();
    let destinations: HashSet<Position> = plan.item_moves.iter().map(|m| m.to).collect();
    for reload in &plan.item_reloads {
        assert!(!sources.contains(reload), "reload {} on a move source", reload);
        assert!(!destinations.contains(reload), "reload {} on a moved item", reload);
    }

    for update in &plan.item_interactive_updates {
        assert!(!plan.item_reloads.contains(&update.position));
        assert!(!plan.item_deferred_reloads.contains(&update.position));
    }

    let group_sources: HashSet<usize> = plan.group_moves.iter().map(|m| m.from).collect();
    for index in &plan.group_deletes {
        assert!(!plan.group_reloads.contains(index));
        assert!(!group_sources.contains(index));
    }
    for index in &plan.group_reloads {
        assert!(!group_sources.contains(index));
    }
}
