//! Ordered registry of benchmark cases.

use std::collections::HashSet;

use crate::case::BenchmarkCase;
use crate::error::BenchError;

/// One registry slot: a case, or a rule separating two groups of cases.
#[derive(Debug)]
pub enum Entry {
    Case(BenchmarkCase),
    Separator,
}

/// Holds benchmark cases in registration order.
///
/// # Example
/// ```
/// use setbench_core::BenchmarkRegistry;
///
/// let mut registry = BenchmarkRegistry::new();
/// registry.add("a", |_| {}).unwrap();
/// registry.draw_line();
/// registry.add_param("b", "8thr", 8, |_, _| {}).unwrap();
/// let names: Vec<_> = registry.cases().map(|c| c.display_name()).collect();
/// assert_eq!(names, ["a", "b(8thr)"]);
/// ```
#[derive(Debug, Default)]
pub struct BenchmarkRegistry {
    entries: Vec<Entry>,
    names: HashSet<String>,
}

impl BenchmarkRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a prepared case. Display names must be unique.
    pub fn register(&mut self, case: BenchmarkCase) -> Result<&mut Self, BenchError> {
        let display_name = case.display_name();
        if !self.names.insert(display_name.clone()) {
            return Err(BenchError::DuplicateCase(display_name));
        }
        tracing::debug!(case = %display_name, "registered benchmark case");
        self.entries.push(Entry::Case(case));
        Ok(self)
    }

    /// Register a plain case.
    pub fn add<F>(&mut self, name: &str, work: F) -> Result<&mut Self, BenchError>
    where
        F: Fn(u64) + Send + Sync + 'static,
    {
        self.register(BenchmarkCase::new(name, work))
    }

    /// Register a case reported relative to the last non-relative one.
    pub fn add_relative<F>(&mut self, name: &str, work: F) -> Result<&mut Self, BenchError>
    where
        F: Fn(u64) + Send + Sync + 'static,
    {
        self.register(BenchmarkCase::new(name, work).relative())
    }

    /// Register a parameterized case shown as `name(label)`.
    pub fn add_param<F>(
        &mut self,
        name: &str,
        label: &str,
        value: u64,
        work: F,
    ) -> Result<&mut Self, BenchError>
    where
        F: Fn(u64, u64) + Send + Sync + 'static,
    {
        self.register(BenchmarkCase::with_param(name, label, value, work))
    }

    /// Start a new group of cases.
    pub fn draw_line(&mut self) -> &mut Self {
        self.entries.push(Entry::Separator);
        self
    }

    /// All entries, separators included, in registration order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Registered cases in order.
    pub fn cases(&self) -> impl Iterator<Item = &BenchmarkCase> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Case(case) => Some(case),
            Entry::Separator => None,
        })
    }

    /// Number of registered cases.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_order() {
        let mut registry = BenchmarkRegistry::new();
        registry
            .add("b", |_| {})
            .unwrap()
            .add("a", |_| {})
            .unwrap()
            .add("c", |_| {})
            .unwrap();
        let names: Vec<_> = registry.cases().map(BenchmarkCase::name).collect();
        assert_eq!(names, ["b", "a", "c"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn rejects_duplicates() {
        let mut registry = BenchmarkRegistry::new();
        registry.add("a", |_| {}).unwrap();
        let err = registry.add("a", |_| {}).unwrap_err();
        assert!(matches!(err, BenchError::DuplicateCase(name) if name == "a"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn same_name_different_labels() {
        let mut registry = BenchmarkRegistry::new();
        for (label, value) in [("1thr", 1), ("8thr", 8)] {
            registry.add_param("p", label, value, |_, _| {}).unwrap();
        }
        assert_eq!(registry.len(), 2);
        assert!(registry.add_param("p", "8thr", 8, |_, _| {}).is_err());
    }

    #[test]
    fn separators_kept_in_entries() {
        let mut registry = BenchmarkRegistry::new();
        registry.add("a", |_| {}).unwrap();
        registry.draw_line();
        registry.add_relative("b", |_| {}).unwrap();
        assert_eq!(registry.entries().len(), 3);
        assert!(matches!(registry.entries()[1], Entry::Separator));
        assert_eq!(registry.cases().count(), 2);
        assert!(registry.cases().nth(1).unwrap().is_relative());
    }

    #[test]
    fn empty_registry() {
        let registry = BenchmarkRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.cases().count(), 0);
    }
}
