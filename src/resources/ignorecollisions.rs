//! Tag-based collision filter.
//!
//! Maps a tag to the set of tags it never collides with. The relation is
//! checked in both directions, so declaring `ground -> Pipe` is enough for a
//! `Pipe` entity to ignore a `ground` entity too.

use rustc_hash::{FxHashMap, FxHashSet};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreCollisions {
    rules: FxHashMap<String, FxHashSet<String>>,
}

impl IgnoreCollisions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `ignored` tags to the ignore-set of `tag`.
    pub fn ignore<I, S>(&mut self, tag: impl Into<String>, ignored: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules
            .entry(tag.into())
            .or_default()
            .extend(ignored.into_iter().map(Into::into));
        self
    }

    /// Builder form of [`IgnoreCollisions::ignore`].
    pub fn with<I, S>(mut self, tag: impl Into<String>, ignored: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore(tag, ignored);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rules.values().all(|set| set.is_empty())
    }

    pub fn ignored_by(&self, tag: &str) -> Option<&FxHashSet<String>> {
        self.rules.get(tag)
    }

    /// Rules sorted by tag, each with its ignored tags sorted.
    pub fn sorted_rules(&self) -> Vec<(String, Vec<String>)> {
        let mut rules: Vec<(String, Vec<String>)> = self
            .rules
            .iter()
            .map(|(tag, set)| {
                let mut ignored: Vec<String> = set.iter().cloned().collect();
                ignored.sort();
                (tag.clone(), ignored)
            })
            .collect();
        rules.sort();
        rules
    }

    /// True when either side holds a tag whose ignore-set contains a tag of
    /// the other side.
    pub fn ignores(&self, tags_a: &FxHashSet<String>, tags_b: &FxHashSet<String>) -> bool {
        if self.rules.is_empty() {
            return false;
        }
        self.one_way(tags_a, tags_b) || self.one_way(tags_b, tags_a)
    }

    fn one_way(&self, from: &FxHashSet<String>, to: &FxHashSet<String>) -> bool {
        from.iter().any(|tag| {
            self.rules
                .get(tag)
                .is_some_and(|ignored| ignored.iter().any(|t| to.contains(t)))
        })
    }
}
