//! Requested declaration names

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Ordered list of interface names to wrap
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Targets(Vec<String>);

impl Targets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one name or a comma separated list of names
    ///
    /// Elements are trimmed and empty elements are dropped.
    pub fn set(&mut self, value: &str) {
        self.0.extend(
            value
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(String::from),
        );
    }

    pub fn push(&mut self, name: impl Into<String>) {
        self.0.push(name.into());
    }

    pub fn exists(&self, name: &str) -> bool {
        self.0.iter().any(|target| target == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Union of both lists without duplicates
    ///
    /// Every primary name keeps its position; secondary names are appended
    /// in order when they are not already present.
    pub fn merge_unique(primary: &Targets, secondary: &Targets) -> Targets {
        let mut seen = HashSet::new();
        let merged = primary
            .iter()
            .chain(secondary.iter())
            .filter(|name| seen.insert(*name))
            .map(String::from)
            .collect();
        Targets(merged)
    }
}

impl fmt::Display for Targets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(","))
    }
}

impl<S: Into<String>> FromIterator<S> for Targets {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
