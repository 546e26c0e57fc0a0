//! Rule tables and transformer pipelines
//!
//! Every configuration surface of the converters is one of two shapes:
//!
//! - [`RuleTable`]: rules keyed by a discriminator (a tag name, a mark name,
//!   a block type). Registering under an existing name replaces the rule, so
//!   caller tables merge over the built-in defaults with caller entries winning.
//! - [`Pipeline`]: named whole-sequence passes that run in registration order.
//!   Re-registering a name replaces the pass without moving it.

use std::collections::HashMap;
use std::fmt;

/// Rules keyed by name
pub struct RuleTable<T> {
    rules: HashMap<String, T>,
}

impl<T> RuleTable<T> {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Register a rule, replacing any rule with the same name
    pub fn insert(&mut self, name: impl Into<String>, rule: T) -> Option<T> {
        self.rules.insert(name.into(), rule)
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.rules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<T> {
        self.rules.remove(name)
    }

    /// All registered names (sorted)
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.rules.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Merge `other` over this table; entries from `other` win
    pub fn merge(&mut self, other: RuleTable<T>) {
        self.rules.extend(other.rules);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.rules.iter().map(|(name, rule)| (name.as_str(), rule))
    }
}

impl<T> Default for RuleTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for RuleTable<T> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
        }
    }
}

impl<T> fmt::Debug for RuleTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

impl<T, S: Into<String>> FromIterator<(S, T)> for RuleTable<T> {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, rule) in iter {
            table.insert(name, rule);
        }
        table
    }
}

/// Named stages applied in registration order
pub struct Pipeline<T> {
    stages: Vec<(String, T)>,
}

impl<T> Pipeline<T> {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Append a stage, or replace an existing stage of the same name in place
    pub fn register(&mut self, name: impl Into<String>, stage: T) {
        let name = name.into();
        match self.stages.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = stage,
            None => self.stages.push((name, stage)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<T> {
        let index = self.stages.iter().position(|(existing, _)| existing == name)?;
        Some(self.stages.remove(index).1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.stages.iter().any(|(existing, _)| existing == name)
    }

    /// Stage names in execution order
    pub fn names(&self) -> Vec<String> {
        self.stages.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.stages.iter().map(|(name, stage)| (name.as_str(), stage))
    }
}

impl<T> Default for Pipeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Pipeline<T> {
    fn clone(&self) -> Self {
        Self {
            stages: self.stages.clone(),
        }
    }
}

impl<T> fmt::Debug for Pipeline<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
