use serde::{Deserialize, Serialize};

/// Coordinate of an item inside a snapshot: (group index, item index)
///
/// A position always refers to one specific snapshot, old or new. Which one
/// is fixed by the edit-plan field it appears in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    pub group: usize,
    pub item: usize,
}

impl Position {
    pub fn new(group: usize, item: usize) -> Self {
        Self { group, item }
    }
}

impl From<(usize, usize)> for Position {
    fn from((group, item): (usize, usize)) -> Self {
        Self { group, item }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.group, self.item)
    }
}
