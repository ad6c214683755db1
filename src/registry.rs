//! Append-only binding registry.

use std::collections::BTreeMap;

use crate::error::{DiError, DiResult};
use crate::provider::ProviderSpec;

/// Name-to-provider map, the source of truth for all lookups.
///
/// Built once during the bind phase and read-only afterwards; there is no
/// removal operation. A `BTreeMap` keeps iteration deterministic in ascending
/// name order, which collection resolution relies on.
pub(crate) struct Registry {
    entries: BTreeMap<String, ProviderSpec>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Inserts a validated spec; duplicate names preserve the original.
    pub(crate) fn insert(&mut self, spec: ProviderSpec) -> DiResult<()> {
        if self.entries.contains_key(spec.name()) {
            return Err(DiError::NameConflict(spec.name().to_string()));
        }
        self.entries.insert(spec.name().to_string(), spec);
        Ok(())
    }

    pub(crate) fn get(&self, name: &str) -> Option<&ProviderSpec> {
        self.entries.get(name)
    }

    /// All specs in ascending name order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &ProviderSpec> {
        self.entries.values()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
