//! Token categories and the registry interface used to look them up
//!
//! The crate does not define a category taxonomy. Callers supply one through
//! [`CategoryRegistry`]; [`CategoryTable`] is a plain name-keyed implementation
//! for callers that build the taxonomy at runtime.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Opaque handle to a registered token category.
///
/// Equality is identity: two handles are equal only if they came from the same
/// registration, even if the names match.
#[derive(Clone)]
pub struct Category(Arc<str>);

impl Category {
    fn new(name: &str) -> Self {
        Category(Arc::from(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Category {}

impl Hash for Category {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.0) as *const u8).hash(state);
    }
}

impl fmt::Debug for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Category({:?})", self.name())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read-only lookup of categories by name.
pub trait CategoryRegistry {
    /// Returns `None` for names that were never registered.
    fn lookup_by_name(&self, name: &str) -> Option<Category>;
}

/// Name-keyed category registry.
#[derive(Debug, Clone, Default)]
pub struct CategoryTable {
    by_name: HashMap<String, Category>,
}

impl CategoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table holding one category per distinct name.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for name in names {
            table.register(name.as_ref());
        }
        table
    }

    /// Register a category, returning the existing handle if the name is taken.
    pub fn register(&mut self, name: &str) -> Category {
        self.by_name
            .entry(name.to_string())
            .or_insert_with(|| Category::new(name))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// All registered names (sorted)
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.by_name.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl CategoryRegistry for CategoryTable {
    fn lookup_by_name(&self, name: &str) -> Option<Category> {
        self.by_name.get(name).cloned()
    }
}
