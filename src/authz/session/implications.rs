//! Permission implication table

use crate::config::AuthzConfig;
use std::collections::{BTreeMap, HashSet};

/// "Holding X also grants Y", resolved transitively when a session opens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImplicationTable {
    edges: BTreeMap<String, Vec<String>>,
}

impl ImplicationTable {
    pub fn new(edges: BTreeMap<String, Vec<String>>) -> Self {
        Self { edges }
    }

    pub fn from_config(config: &AuthzConfig) -> Self {
        Self::new(config.implications.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Add every code reachable from `granted`; cycles are harmless
    pub fn expand(&self, granted: HashSet<String>) -> HashSet<String> {
        if self.edges.is_empty() {
            return granted;
        }

        let mut expanded = granted.clone();
        let mut pending: Vec<String> = granted.into_iter().collect();

        while let Some(code) = pending.pop() {
            if let Some(implied) = self.edges.get(&code) {
                for next in implied {
                    if expanded.insert(next.clone()) {
                        pending.push(next.clone());
                    }
                }
            }
        }

        expanded
    }
}
