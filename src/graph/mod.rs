//! Module dependency graph: data model, index building, dependency
//! resolution, and transitive closure queries.

pub mod closure;
pub mod engine;
pub mod types;

pub use closure::{invert, transitive_closure};
pub use engine::{build_type_index, resolve_dependencies, ModuleGraph};
pub use types::{DependencyGraph, GraphStats, ModuleRecord, ReverseDependencyGraph, TypeIndex};
