//! Capability contracts for groups and items.
//!
//! Every group and item exposes an identity, used to match entities across
//! the old and new snapshot, and a revision marker, whose inequality between
//! two same-identity entities means "content changed".

use std::fmt::Debug;
use std::hash::Hash;

/// Stable identity of an entity within one snapshot
pub trait HasIdentity {
    type Id: Eq + Hash + Clone + Debug;

    fn identity(&self) -> Self::Id;
}

/// Revision marker used for update detection
///
/// Use a constant revision (for example `()`) when updates are never
/// needed; matched entities are then never reloaded.
pub trait HasRevision {
    type Revision: PartialEq;

    fn revision(&self) -> Self::Revision;
}

/// A top-level entry of a snapshot holding an ordered run of items
///
/// A snapshot is an ordered slice of groups, `&[G]`.
pub trait Group: HasIdentity + HasRevision {
    type Item: HasIdentity + HasRevision;

    fn items(&self) -> &[Self::Item];
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        key: &'static str,
        stamp: u32,
    }

    impl HasIdentity for Row {
        type Id = &'static str;

        fn identity(&self) -> Self::Id {
            self.key
        }
    }

    impl HasRevision for Row {
        type Revision = u32;

        fn revision(&self) -> Self::Revision {
            self.stamp
        }
    }

    struct Block {
        key: u8,
        rows: Vec<Row>,
    }

    impl HasIdentity for Block {
        type Id = u8;

        fn identity(&self) -> Self::Id {
            self.key
        }
    }

    impl HasRevision for Block {
        type Revision = ();

        fn revision(&self) -> Self::Revision {}
    }

    impl Group for Block {
        type Item = Row;

        fn items(&self) -> &[Row] {
            &self.rows
        }
    }

    #[test]
    fn test_group_exposes_items_in_order() {
        let block = Block {
            key: 7,
            rows: vec![Row { key: "a", stamp: 1 }, Row { key: "b", stamp: 2 }],
        };
        let ids: Vec<_> = block.items().iter().map(HasIdentity::identity).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(block.identity(), 7);
        assert_eq!(block.items()[1].revision(), 2);
    }
}
