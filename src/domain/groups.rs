//! Collision-group labels and the canonical group-pair key.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Label every body falls back to when it names no group.
pub const DEFAULT_GROUP: &str = "default";

/// Interned collision-group label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub(crate) u32);

/// Unordered pair of groups. `GroupPair::new(a, b) == GroupPair::new(b, a)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GroupPair(GroupId, GroupId);

impl GroupPair {
    pub fn new(a: GroupId, b: GroupId) -> Self {
        if a <= b {
            GroupPair(a, b)
        } else {
            GroupPair(b, a)
        }
    }
}

/// Marker attached to a collision rule and echoed back in contact events.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseTag(pub String);

impl From<&str> for ResponseTag {
    fn from(s: &str) -> Self {
        ResponseTag(s.to_string())
    }
}

impl From<String> for ResponseTag {
    fn from(s: String) -> Self {
        ResponseTag(s)
    }
}

impl fmt::Display for ResponseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// String label <-> `GroupId` table. Ids are never recycled.
#[derive(Clone, Debug, Default)]
pub struct GroupRegistry {
    ids: HashMap<String, GroupId>,
    names: Vec<String>,
}

impl GroupRegistry {
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.intern(DEFAULT_GROUP);
        registry
    }

    pub fn intern(&mut self, label: &str) -> GroupId {
        if let Some(&id) = self.ids.get(label) {
            return id;
        }
        let id = GroupId(self.names.len() as u32);
        self.names.push(label.to_string());
        self.ids.insert(label.to_string(), id);
        id
    }

    pub fn lookup(&self, label: &str) -> Option<GroupId> {
        self.ids.get(label).copied()
    }

    pub fn name(&self, id: GroupId) -> &str {
        self.names.get(id.0 as usize).map(String::as_str).unwrap_or(DEFAULT_GROUP)
    }

    /// Intern a label list into a sorted, deduplicated, non-empty id set.
    pub fn intern_all<S: AsRef<str>>(&mut self, labels: &[S]) -> Vec<GroupId> {
        let mut ids: Vec<GroupId> = labels.iter().map(|l| self.intern(l.as_ref())).collect();
        if ids.is_empty() {
            ids.push(self.intern(DEFAULT_GROUP));
        }
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_key_is_order_independent() {
        let mut reg = GroupRegistry::new();
        let a = reg.intern("player");
        let b = reg.intern("wall");
        assert_eq!(GroupPair::new(a, b), GroupPair::new(b, a));
    }

    #[test]
    fn empty_label_list_falls_back_to_default() {
        let mut reg = GroupRegistry::new();
        let ids = reg.intern_all::<&str>(&[]);
        assert_eq!(ids, vec![reg.lookup(DEFAULT_GROUP).unwrap()]);
    }

    #[test]
    fn interning_dedups() {
        let mut reg = GroupRegistry::new();
        let ids = reg.intern_all(&["b", "a", "b"]);
        assert_eq!(ids.len(), 2);
        assert_eq!(reg.name(ids[0]), "b");
    }
}
