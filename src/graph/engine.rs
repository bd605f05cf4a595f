//! The module dependency engine.
//!
//! Builds a type-to-owner index from scanned records, resolves each
//! module's required types into deduplicated module-level edges, and
//! answers the two closure queries on top of [`transitive_closure`].
//!
//! Everything here is a pure function of the record set: a [`ModuleGraph`]
//! is built fresh per query and never mutated afterwards.

use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use super::closure::{invert, transitive_closure};
use super::types::{DependencyGraph, GraphStats, ModuleRecord, ReverseDependencyGraph, TypeIndex};

/// Build the type-to-owning-module index from all records, in input order.
///
/// Later declarations of an already-indexed type overwrite the earlier
/// owner. Given the same input order the output is identical.
pub fn build_type_index(records: &[ModuleRecord]) -> TypeIndex {
    let mut index = TypeIndex::new();
    for record in records {
        for type_name in &record.declared_types {
            if let Some(previous) = index.insert(type_name.clone(), record.name.clone()) {
                debug!(
                    %type_name,
                    previous_owner = %previous,
                    new_owner = %record.name,
                    "duplicate type declaration, last write wins"
                );
            }
        }
    }
    index
}

/// Resolve each record's required types into module-level dependency edges.
///
/// Required types with no owner in `index` produce no edge, only a
/// diagnostic. Multiple required types owned by the same module collapse
/// into a single edge. Every module name from `records` appears as a key,
/// even with no resolvable dependencies; records sharing a name (same
/// module at two priorities) merge into one deduplicated edge list.
pub fn resolve_dependencies(records: &[ModuleRecord], index: &TypeIndex) -> DependencyGraph {
    let mut graph = DependencyGraph::new();
    for record in records {
        let edges = graph.entry(record.name.clone()).or_default();
        for required in &record.required_types {
            let Some(owner) = index.get(required) else {
                debug!(
                    module = %record.name,
                    type_name = %required,
                    "required type has no owning module, dropping edge"
                );
                continue;
            };
            if !edges.contains(owner) {
                edges.push(owner.clone());
            }
        }
    }
    graph
}

/// The assembled dependency graph over one scan of the policy store.
///
/// Holds the records, the type index, and the module-level adjacency;
/// provides the query surface consumed by the CLI.
pub struct ModuleGraph {
    records: Vec<ModuleRecord>,
    type_index: TypeIndex,
    dependencies: DependencyGraph,
}

impl ModuleGraph {
    /// Build the graph from a fully collected record set.
    ///
    /// The index needs global knowledge of every declared type before any
    /// dependency can be resolved, so callers must finish scanning first.
    pub fn from_records(records: Vec<ModuleRecord>) -> Self {
        let type_index = build_type_index(&records);
        let dependencies = resolve_dependencies(&records, &type_index);
        debug!(
            modules = records.len(),
            types = type_index.len(),
            "module graph built"
        );
        Self {
            records,
            type_index,
            dependencies,
        }
    }

    /// All scanned module records, in scan order.
    pub fn records(&self) -> &[ModuleRecord] {
        &self.records
    }

    /// The type-to-owning-module index.
    pub fn type_index(&self) -> &TypeIndex {
        &self.type_index
    }

    /// The direct dependency adjacency (module to modules it depends on).
    pub fn dependencies(&self) -> &DependencyGraph {
        &self.dependencies
    }

    /// Derive the reverse adjacency (module to modules depending on it).
    pub fn reverse_dependencies(&self) -> ReverseDependencyGraph {
        invert(&self.dependencies)
    }

    /// For each requested module, the transitive set of modules that must
    /// be enabled for it to load. Unknown names are skipped with a
    /// diagnostic and omitted from the result.
    pub fn enable_set(&self, modules: &[String]) -> BTreeMap<String, BTreeSet<String>> {
        let mut result = BTreeMap::new();
        for module in modules {
            if !self.dependencies.contains_key(module) {
                debug!(module = %module, "requested module not in dependency graph");
                continue;
            }
            result.insert(module.clone(), transitive_closure(&self.dependencies, module));
        }
        result
    }

    /// For each requested module, the transitive set of modules that would
    /// be impacted by disabling it. Unknown names are skipped with a
    /// diagnostic and omitted from the result.
    pub fn disable_impact_set(&self, modules: &[String]) -> BTreeMap<String, BTreeSet<String>> {
        let reverse = self.reverse_dependencies();
        let mut result = BTreeMap::new();
        for module in modules {
            if !reverse.contains_key(module) {
                debug!(module = %module, "requested module not in reverse graph");
                continue;
            }
            result.insert(module.clone(), transitive_closure(&reverse, module));
        }
        result
    }

    /// Summary counts.
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            module_count: self.records.len(),
            type_count: self.type_index.len(),
            edge_count: self.dependencies.values().map(Vec::len).sum(),
        }
    }
}
