use thiserror::Error;

/// Result type alias using ReconcileError
pub type Result<T> = std::result::Result<T, ReconcileError>;

/// Which of the two input snapshots a diagnostic refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Old,
    New,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Old => write!(f, "old"),
            Side::New => write!(f, "new"),
        }
    }
}

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers can match on
/// without depending on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Two groups in one snapshot share an identity
    DuplicateGroupIdentity,
    /// Two items inside one group share an identity
    DuplicateItemIdentity,
}

impl ErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::DuplicateGroupIdentity => "ERR_DUPLICATE_GROUP_IDENTITY",
            ErrorKind::DuplicateItemIdentity => "ERR_DUPLICATE_ITEM_IDENTITY",
        }
    }
}

/// Errors raised by a reconciliation call
///
/// Both variants are caller-data invariant violations detected by the
/// consistency validator before any diffing starts. Identities are carried
/// as their `Debug` rendering so the error type stays independent of the
/// caller's identity types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    /// Two groups in one snapshot share an identity
    #[error("Duplicate group identity {group} at index {group_index} in {side} snapshot")]
    DuplicateGroupIdentity {
        side: Side,
        group_index: usize,
        group: String,
    },

    /// Two items inside one group share an identity
    #[error("Duplicate item identity {item} in group {group_index} of {side} snapshot")]
    DuplicateItemIdentity {
        side: Side,
        group_index: usize,
        item: String,
    },
}

impl ReconcileError {
    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReconcileError::DuplicateGroupIdentity { .. } => ErrorKind::DuplicateGroupIdentity,
            ReconcileError::DuplicateItemIdentity { .. } => ErrorKind::DuplicateItemIdentity,
        }
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// Get the snapshot side the violation was found in
    pub fn side(&self) -> Side {
        match self {
            ReconcileError::DuplicateGroupIdentity { side, .. }
            | ReconcileError::DuplicateItemIdentity { side, .. } => *side,
        }
    }

    /// Get the index of the offending group
    pub fn group_index(&self) -> usize {
        match self {
            ReconcileError::DuplicateGroupIdentity { group_index, .. }
            | ReconcileError::DuplicateItemIdentity { group_index, .. } => *group_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(
            ErrorKind::DuplicateGroupIdentity.code(),
            "ERR_DUPLICATE_GROUP_IDENTITY"
        );
        assert_eq!(
            ErrorKind::DuplicateItemIdentity.code(),
            "ERR_DUPLICATE_ITEM_IDENTITY"
        );
    }

    #[test]
    fn test_kind_and_accessors() {
        let err = ReconcileError::DuplicateItemIdentity {
            side: Side::New,
            group_index: 3,
            item: "\"x\"".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::DuplicateItemIdentity);
        assert_eq!(err.code(), "ERR_DUPLICATE_ITEM_IDENTITY");
        assert_eq!(err.side(), Side::New);
        assert_eq!(err.group_index(), 3);
    }

    #[test]
    fn test_display_mentions_identity_and_side() {
        let err = ReconcileError::DuplicateGroupIdentity {
            side: Side::Old,
            group_index: 1,
            group: "\"g1\"".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("\"g1\""));
        assert!(msg.contains("old snapshot"));
        assert!(msg.contains("index 1"));
    }
}
