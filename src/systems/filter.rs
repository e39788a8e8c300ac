//! Group-based collision eligibility.
//!
//! A pair may collide only if some group of A and some group of B have a registered
//! rule. Unregistered pairs never reach the narrowphase.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::domain::{Body, BodyId, GroupId, GroupPair, GroupRegistry, ResponseTag};

#[derive(Clone, Debug)]
pub struct CollisionFilter {
    registry: GroupRegistry,
    rules: HashMap<GroupPair, ResponseTag>,
    members: HashMap<GroupId, HashSet<BodyId>>,
}

impl CollisionFilter {
    pub fn new() -> Self {
        Self {
            registry: GroupRegistry::new(),
            rules: HashMap::new(),
            members: HashMap::new(),
        }
    }

    /// Enable collisions between two groups. Re-registering replaces the tag and
    /// returns the previous one.
    pub fn register_rule(&mut self, group1: &str, group2: &str, tag: ResponseTag) -> Option<ResponseTag> {
        let key = GroupPair::new(self.registry.intern(group1), self.registry.intern(group2));
        let previous = self.rules.insert(key, tag);
        if let Some(prev) = &previous {
            debug!("collision rule {group1}/{group2} replaced (was {prev})");
        }
        previous
    }

    pub fn remove_rule(&mut self, group1: &str, group2: &str) -> bool {
        match (self.registry.lookup(group1), self.registry.lookup(group2)) {
            (Some(a), Some(b)) => self.rules.remove(&GroupPair::new(a, b)).is_some(),
            _ => false,
        }
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Response tag of the first matching rule, in group-id order.
    pub fn rule_for(&self, a: &Body, b: &Body) -> Option<&ResponseTag> {
        if self.rules.is_empty() {
            return None;
        }
        a.groups()
            .iter()
            .flat_map(|&ga| b.groups().iter().map(move |&gb| GroupPair::new(ga, gb)))
            .find_map(|key| self.rules.get(&key))
    }

    pub fn can_collide(&self, a: &Body, b: &Body) -> bool {
        self.rule_for(a, b).is_some()
    }

    pub fn intern_groups<S: AsRef<str>>(&mut self, labels: &[S]) -> Vec<GroupId> {
        self.registry.intern_all(labels)
    }

    pub fn index_body(&mut self, id: BodyId, groups: &[GroupId]) {
        for &g in groups {
            self.members.entry(g).or_default().insert(id);
        }
    }

    pub fn unindex_body(&mut self, id: BodyId, groups: &[GroupId]) {
        for g in groups {
            if let Some(set) = self.members.get_mut(g) {
                set.remove(&id);
                if set.is_empty() {
                    self.members.remove(g);
                }
            }
        }
    }

    /// Bodies currently registered under `label`, sorted by id.
    pub fn members(&self, label: &str) -> Vec<BodyId> {
        let mut ids: Vec<BodyId> = self
            .registry
            .lookup(label)
            .and_then(|g| self.members.get(&g))
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();
        ids.sort_unstable();
        ids
    }

    pub fn group_names(&self, groups: &[GroupId]) -> Vec<String> {
        groups.iter().map(|&g| self.registry.name(g).to_string()).collect()
    }
}

impl Default for CollisionFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BodyDesc;

    fn body(filter: &mut CollisionFilter, id: u32, groups: &[&str]) -> Body {
        let g = filter.intern_groups(groups);
        Body::from_desc(BodyId(id), &BodyDesc::circle(1.0), g)
    }

    #[test]
    fn no_rule_means_no_collision() {
        let mut f = CollisionFilter::new();
        let a = body(&mut f, 1, &["player"]);
        let b = body(&mut f, 2, &["wall"]);
        assert!(!f.can_collide(&a, &b));
    }

    #[test]
    fn rule_lookup_is_symmetric() {
        let mut f = CollisionFilter::new();
        f.register_rule("wall", "player", ResponseTag::from("bonk"));
        let a = body(&mut f, 1, &["player"]);
        let b = body(&mut f, 2, &["wall"]);
        assert_eq!(f.rule_for(&a, &b), Some(&ResponseTag::from("bonk")));
        assert_eq!(f.rule_for(&b, &a), Some(&ResponseTag::from("bonk")));
    }

    #[test]
    fn any_group_combination_enables() {
        let mut f = CollisionFilter::new();
        f.register_rule("pickups", "hero", ResponseTag::from("collect"));
        let a = body(&mut f, 1, &["enemy", "hero"]);
        let b = body(&mut f, 2, &["scenery", "pickups"]);
        assert!(f.can_collide(&a, &b));
    }

    #[test]
    fn default_group_pairs_with_itself() {
        let mut f = CollisionFilter::new();
        f.register_rule("default", "default", ResponseTag::from("hit"));
        let a = body(&mut f, 1, &[]);
        let b = body(&mut f, 2, &[]);
        assert!(f.can_collide(&a, &b));
    }

    #[test]
    fn reregistering_replaces_and_remove_disables() {
        let mut f = CollisionFilter::new();
        assert_eq!(f.register_rule("a", "b", ResponseTag::from("x")), None);
        assert_eq!(f.register_rule("b", "a", ResponseTag::from("y")), Some(ResponseTag::from("x")));
        assert_eq!(f.rule_count(), 1);
        assert!(f.remove_rule("a", "b"));
        assert!(!f.remove_rule("a", "b"));
        assert!(!f.remove_rule("never", "seen"));
    }

    #[test]
    fn membership_index_tracks_bodies() {
        let mut f = CollisionFilter::new();
        let g = f.intern_groups(&["ball"]);
        f.index_body(BodyId(4), &g);
        f.index_body(BodyId(2), &g);
        assert_eq!(f.members("ball"), vec![BodyId(2), BodyId(4)]);
        f.unindex_body(BodyId(4), &g);
        assert_eq!(f.members("ball"), vec![BodyId(2)]);
        assert!(f.members("unknown").is_empty());
    }
}
