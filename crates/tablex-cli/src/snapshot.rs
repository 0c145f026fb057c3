//! Snapshot file model
//!
//! A snapshot file is a JSON array of groups:
//!
//! ```json
//! [{ "id": "inbox", "rev": 3, "items": [{ "id": "m1", "rev": "a1f" }] }]
//! ```
//!
//! `rev` may be any JSON value and defaults to `null`; `items` defaults to
//! an empty list.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tablex_core::{Group, HasIdentity, HasRevision};

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotItem {
    pub id: String,
    #[serde(default)]
    pub rev: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotGroup {
    pub id: String,
    #[serde(default)]
    pub rev: Value,
    #[serde(default)]
    pub items: Vec<SnapshotItem>,
}

impl HasIdentity for SnapshotItem {
    type Id = String;

    fn identity(&self) -> String {
        self.id.clone()
    }
}

impl HasRevision for SnapshotItem {
    type Revision = Value;

    fn revision(&self) -> Value {
        self.rev.clone()
    }
}

impl HasIdentity for SnapshotGroup {
    type Id = String;

    fn identity(&self) -> String {
        self.id.clone()
    }
}

impl HasRevision for SnapshotGroup {
    type Revision = Value;

    fn revision(&self) -> Value {
        self.rev.clone()
    }
}

impl Group for SnapshotGroup {
    type Item = SnapshotItem;

    fn items(&self) -> &[SnapshotItem] {
        &self.items
    }
}

/// Read and parse one snapshot file
pub fn load(path: &Path) -> Result<Vec<SnapshotGroup>, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read snapshot {}: {}", path.display(), e))?;
    parse(&text).map_err(|e| format!("invalid snapshot {}: {}", path.display(), e).into())
}

pub fn parse(text: &str) -> Result<Vec<SnapshotGroup>, serde_json::Error> {
    serde_json::from_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let groups = parse(r#"[{"id": "g"}, {"id": "h", "rev": 2, "items": [{"id": "x"}]}]"#).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].rev, Value::Null);
        assert!(groups[0].items.is_empty());
        assert_eq!(groups[1].items()[0].identity(), "x");
        assert_eq!(groups[1].revision(), Value::from(2));
    }

    #[test]
    fn test_structured_revisions_compare_by_value() {
        let a = parse(r#"[{"id": "g", "rev": {"etag": "1", "n": [1, 2]}}]"#).unwrap();
        let b = parse(r#"[{"id": "g", "rev": {"n": [1, 2], "etag": "1"}}]"#).unwrap();
        assert_eq!(a[0].revision(), b[0].revision());
    }

    #[test]
    fn test_parse_rejects_missing_id() {
        assert!(parse(r#"[{"rev": 1}]"#).is_err());
    }
}
