//! Table/alias registry consulted in aliasing mode.
//!
//! The resolution algorithm is an external concern; this module only
//! carries the lookup surface the builder consults when `use_alias` is
//! enabled. Every registry owns its own map, injected at construction.
//! There is no process-wide default shared between instances.

use std::collections::HashMap;

/// A resolved table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableHandle {
    /// Canonical table name emitted in FROM clauses.
    pub name: String,
}

impl TableHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Name/alias to handle lookup.
#[derive(Debug, Clone, Default)]
pub struct TableRegistry {
    tables: HashMap<String, TableHandle>,
}

impl TableRegistry {
    /// Create a registry from an owned map.
    pub fn new(tables: HashMap<String, TableHandle>) -> Self {
        Self { tables }
    }

    /// Register a table under one lookup name. The same handle may be
    /// registered under several aliases.
    pub fn register(&mut self, alias_or_name: impl Into<String>, table: impl Into<String>) {
        self.tables
            .insert(alias_or_name.into(), TableHandle::new(table));
    }

    /// Look up a table by alias or canonical name.
    pub fn resolve(&self, alias_or_name: &str) -> Option<&TableHandle> {
        self.tables.get(alias_or_name)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }
}
