//! Core types for the module dependency graph.
//!
//! A `ModuleRecord` is the unit everything else is computed from: one per
//! scanned CIL artifact, immutable after extraction.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from type name to the single owning module name.
///
/// Each type has exactly one owner; when two modules declare the same type
/// the later-processed record wins (an ambiguity inherited from the policy
/// store, surfaced as a diagnostic, not corrected).
pub type TypeIndex = BTreeMap<String, String>;

/// Mapping from module name to the modules it directly depends on.
///
/// Every scanned module appears as a key, with an empty list if it has no
/// resolvable dependencies. Per-key edge lists are deduplicated and keep
/// first-resolution insertion order. Self-edges may occur (a module
/// requiring a type it also declares) and are retained here; the closure
/// engine never surfaces them.
pub type DependencyGraph = BTreeMap<String, Vec<String>>;

/// [`DependencyGraph`] with every edge inverted: module name to the modules
/// that directly depend on it. Derived on demand, never stored.
pub type ReverseDependencyGraph = BTreeMap<String, Vec<String>>;

/// One scanned policy module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRecord {
    /// Module identifier, derived from the artifact's parent directory.
    pub name: String,
    /// Grouping identifier, derived from the grandparent directory
    /// (the priority segment of the policy store). Informational only.
    pub family: String,
    /// Type names this module declares. May be empty.
    #[serde(rename = "types")]
    pub declared_types: Vec<String>,
    /// Type names this module references but does not declare. May be
    /// empty; duplicates are permitted at extraction time.
    #[serde(rename = "requires")]
    pub required_types: Vec<String>,
}

impl ModuleRecord {
    pub fn new(
        name: impl Into<String>,
        family: impl Into<String>,
        declared_types: Vec<String>,
        required_types: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            family: family.into(),
            declared_types,
            required_types,
        }
    }
}

/// Summary counts over a built [`ModuleGraph`](crate::ModuleGraph).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphStats {
    /// Number of scanned module records.
    pub module_count: usize,
    /// Number of distinct declared type names.
    pub type_count: usize,
    /// Number of module-level dependency edges.
    pub edge_count: usize,
}
