//! # cildep
//!
//! SELinux CIL module dependency inspector.
//!
//! cildep scans a policy module store for compiled CIL artifacts, extracts
//! the types each module declares and requires, and builds a module-level
//! dependency graph. From that graph it answers two questions:
//!
//! - **enable**: which modules must be enabled, transitively, for a module
//!   to load (forward closure over dependency edges)
//! - **disable**: which modules would be impacted, transitively, by
//!   disabling a module (closure over the inverted graph)
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use cildep::{scan_modules, ModuleGraph, ScanConfig};
//!
//! let records = scan_modules(&ScanConfig::default())?;
//! let graph = ModuleGraph::from_records(records);
//! let closures = graph.enable_set(&["gogs".to_string()]);
//! # Ok::<(), cildep::CildepError>(())
//! ```
//!
//! The crate never touches the live policy: it reads the store, computes,
//! and reports. All diagnostics (duplicate type owners, dangling
//! requirements, unknown query names) go through `tracing` and never abort
//! a query.

pub mod error;
pub mod extract;
pub mod graph;
pub mod scan;

// Re-exports for convenience
pub use error::{CildepError, Result};
pub use extract::extract_record;
pub use graph::{
    build_type_index, invert, resolve_dependencies, transitive_closure, DependencyGraph,
    GraphStats, ModuleGraph, ModuleRecord, ReverseDependencyGraph, TypeIndex,
};
pub use scan::{scan_modules, ScanConfig, DEFAULT_BASE_DIR};
