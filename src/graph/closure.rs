//! Transitive closure over string-keyed adjacency maps.
//!
//! One worklist primitive drives both query directions: forward over the
//! dependency graph ("what must be enabled") and backward over the inverted
//! graph ("what would be impacted"). Module counts and chain depths are
//! operator-controlled, so traversal uses an explicit queue rather than
//! recursion.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use super::types::{DependencyGraph, ReverseDependencyGraph};

/// Compute the set of all nodes reachable from `start`, excluding `start`
/// itself.
///
/// A `start` absent from `adjacency` is a valid "not found" outcome and
/// yields the empty set. Cycles and self-edges are safe: each node enters
/// the result at most once and `start` is never re-entered, so the walk
/// terminates in O(V+E).
pub fn transitive_closure(adjacency: &BTreeMap<String, Vec<String>>, start: &str) -> BTreeSet<String> {
    let mut visited = BTreeSet::new();
    let mut worklist: VecDeque<&str> = adjacency
        .get(start)
        .map(|edges| edges.iter().map(String::as_str).collect())
        .unwrap_or_default();

    while let Some(node) = worklist.pop_front() {
        if node == start || visited.contains(node) {
            continue;
        }
        visited.insert(node.to_string());
        if let Some(edges) = adjacency.get(node) {
            worklist.extend(edges.iter().map(String::as_str));
        }
    }

    visited
}

/// Invert every edge of a dependency graph.
///
/// For each edge `X -> D` the result gains `D -> X`. Every node appearing
/// anywhere in `graph` (as key or as edge target) appears as a key in the
/// result, defaulting to an empty list if nothing depends on it.
pub fn invert(graph: &DependencyGraph) -> ReverseDependencyGraph {
    let mut reverse: ReverseDependencyGraph = BTreeMap::new();
    for (module, deps) in graph {
        reverse.entry(module.clone()).or_default();
        for dep in deps {
            reverse.entry(dep.clone()).or_default().push(module.clone());
        }
    }
    reverse
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adjacency(edges: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
        edges
            .iter()
            .map(|(k, vs)| (k.to_string(), vs.iter().map(|v| v.to_string()).collect()))
            .collect()
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn closure_follows_chains() {
        let adj = adjacency(&[("a", &[]), ("b", &["a"]), ("c", &["b"])]);
        assert_eq!(transitive_closure(&adj, "c"), set(&["a", "b"]));
        assert_eq!(transitive_closure(&adj, "b"), set(&["a"]));
        assert_eq!(transitive_closure(&adj, "a"), set(&[]));
    }

    #[test]
    fn closure_excludes_start_on_cycle() {
        let adj = adjacency(&[("a", &["b"]), ("b", &["a"])]);
        assert_eq!(transitive_closure(&adj, "a"), set(&["b"]));
        assert_eq!(transitive_closure(&adj, "b"), set(&["a"]));
    }

    #[test]
    fn closure_terminates_on_larger_cycle() {
        let adj = adjacency(&[("a", &["b"]), ("b", &["c"]), ("c", &["a"])]);
        assert_eq!(transitive_closure(&adj, "a"), set(&["b", "c"]));
    }

    #[test]
    fn closure_ignores_self_edge() {
        let adj = adjacency(&[("a", &["a", "b"]), ("b", &[])]);
        assert_eq!(transitive_closure(&adj, "a"), set(&["b"]));
    }

    #[test]
    fn closure_of_unknown_start_is_empty() {
        let adj = adjacency(&[("a", &["b"])]);
        assert!(transitive_closure(&adj, "zzz").is_empty());
    }

    #[test]
    fn closure_is_idempotent() {
        let adj = adjacency(&[("a", &["b", "c"]), ("b", &["c"]), ("c", &["a"])]);
        let first = transitive_closure(&adj, "a");
        let second = transitive_closure(&adj, "a");
        assert_eq!(first, second);
    }

    #[test]
    fn invert_keeps_every_node_as_key() {
        let graph = adjacency(&[("a", &[]), ("b", &["a"]), ("c", &["b", "x"])]);
        let reverse = invert(&graph);
        // "x" only ever appears as an edge target but still gets a key.
        assert_eq!(reverse["x"], vec!["c".to_string()]);
        assert_eq!(reverse["a"], vec!["b".to_string()]);
        assert_eq!(reverse["b"], vec!["c".to_string()]);
        assert!(reverse["c"].is_empty());
    }

    #[test]
    fn invert_preserves_every_edge_exactly_once() {
        let graph = adjacency(&[("a", &["b", "c"]), ("b", &["c"]), ("c", &[])]);
        let reverse = invert(&graph);
        let forward_edges: usize = graph.values().map(Vec::len).sum();
        let reverse_edges: usize = reverse.values().map(Vec::len).sum();
        assert_eq!(forward_edges, reverse_edges);
        for (module, deps) in &graph {
            for dep in deps {
                assert!(reverse[dep].contains(module));
            }
        }
    }
}
