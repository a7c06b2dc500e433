//! Tests for load-order scheduling.
//!
//! Covers the documented scenarios (chains, cycles, missing dependencies) and
//! property tests over randomly generated acyclic graphs:
//! - every declared dependency precedes its dependent
//! - repeated runs produce identical orders
//! - graphs without declarations keep discovery order

use ordo_graph::{
    DependencyGraph, GraphError, PackageNode, ScheduleMode, Scheduler, UnresolvedReason,
};

fn graph(nodes: impl IntoIterator<Item = PackageNode>) -> DependencyGraph {
    let mut graph = DependencyGraph::new();
    for node in nodes {
        graph.add(node).expect("unique names");
    }
    graph
}

/// Returns true if `path` is a rotation of `expected` (both closed cycles).
fn is_rotation(path: &[String], expected: &[&str]) -> bool {
    if path.len() != expected.len() || path.first() != path.last() {
        return false;
    }
    let open: Vec<&str> = path[..path.len() - 1].iter().map(String::as_str).collect();
    let target = &expected[..expected.len() - 1];
    (0..open.len()).any(|shift| {
        open.iter()
            .cycle()
            .skip(shift)
            .take(open.len())
            .copied()
            .eq(target.iter().copied())
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Scenarios
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn chain_resolves_leaves_first() {
    let graph = graph([
        PackageNode::new("A").with_depends(["B"]),
        PackageNode::new("B").with_depends(["C"]),
        PackageNode::new("C"),
    ]);

    let schedule = Scheduler::new().schedule(&graph).unwrap();
    assert_eq!(schedule.order(), ["C", "B", "A"]);
    assert_eq!(schedule.mode(), ScheduleMode::Resolved);
}

#[test]
fn three_node_cycle_reports_full_path() {
    let graph = graph([
        PackageNode::new("A").with_depends(["B"]),
        PackageNode::new("B").with_depends(["C"]),
        PackageNode::new("C").with_depends(["A"]),
    ]);

    let path = match Scheduler::new().schedule(&graph) {
        Err(GraphError::CyclicDependency { path }) => path,
        other => panic!("expected a cycle, got {other:?}"),
    };
    assert!(is_rotation(&path, &["A", "B", "C", "A"]), "path: {path:?}");
}

#[test]
fn cycle_among_unrelated_nodes_names_only_the_cycle() {
    let graph = graph([
        PackageNode::new("ok"),
        PackageNode::new("x").with_depends(["ok", "y"]),
        PackageNode::new("y").with_depends(["x"]),
        PackageNode::new("z").with_depends(["x"]),
    ]);

    let err = Scheduler::new().schedule(&graph).unwrap_err();
    assert_eq!(
        err,
        GraphError::CyclicDependency {
            path: vec!["x".into(), "y".into(), "x".into()],
        }
    );
}

#[test]
fn dependency_on_absent_package_fails() {
    let graph = graph([PackageNode::new("A").with_depends(["Z"])]);

    let err = Scheduler::new().schedule(&graph).unwrap_err();
    assert_eq!(
        err,
        GraphError::UnresolvedDependency {
            requester: "A".into(),
            target: "Z".into(),
            reason: UnresolvedReason::Missing,
        }
    );
}

#[test]
fn validation_runs_before_cycle_detection() {
    let graph = graph([
        PackageNode::new("A").with_depends(["B"]),
        PackageNode::new("B").with_depends(["A", "missing"]),
    ]);

    assert!(matches!(
        Scheduler::new().schedule(&graph),
        Err(GraphError::UnresolvedDependency { .. })
    ));
}

#[test]
fn empty_graph_schedules_nothing() {
    let schedule = Scheduler::new().schedule(&DependencyGraph::new()).unwrap();
    assert!(schedule.is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Properties
// ─────────────────────────────────────────────────────────────────────────────

mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    /// Generates an acyclic graph: node `i` may only depend on nodes `< i`.
    ///
    /// Names are shuffled relative to indices so lexicographic order and
    /// dependency order disagree.
    fn arb_dag() -> impl Strategy<Value = Vec<PackageNode>> {
        (1..12usize)
            .prop_flat_map(|n| {
                let edges = prop::collection::vec(prop::collection::vec(any::<bool>(), n), n);
                let names = Just((0..n).map(|i| format!("pkg{:02}", (i * 7) % 13)).collect::<Vec<_>>());
                (edges, names)
            })
            .prop_map(|(edges, names)| {
                names
                    .iter()
                    .enumerate()
                    .map(|(i, name)| {
                        let depends = (0..i).filter(|&j| edges[i][j]).map(|j| names[j].clone());
                        PackageNode::new(name.clone()).with_depends(depends)
                    })
                    .collect()
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        /// Every declared dependency appears strictly before its dependent.
        #[test]
        fn prop_dependencies_precede_dependents(nodes in arb_dag()) {
            let graph = graph(nodes.clone());
            let schedule = Scheduler::strict().schedule(&graph).expect("acyclic");
            prop_assert_eq!(schedule.len(), nodes.len());

            let position = |name: &str| schedule.order().iter().position(|n| n == name);
            for node in &nodes {
                let own = position(node.name()).expect("scheduled");
                for dep in node.depends() {
                    let dep_pos = position(dep.as_str()).expect("dependency scheduled");
                    prop_assert!(dep_pos < own, "{} must precede {}", dep, node.name());
                }
            }
        }

        /// Scheduling the same graph twice yields the same order.
        #[test]
        fn prop_schedule_is_deterministic(nodes in arb_dag()) {
            let first = Scheduler::strict().schedule(&graph(nodes.clone())).expect("acyclic");
            let second = Scheduler::strict().schedule(&graph(nodes)).expect("acyclic");
            prop_assert_eq!(first.order(), second.order());
        }

        /// Without declarations, the order is exactly the discovery order.
        #[test]
        fn prop_fallback_preserves_discovery_order(
            names in prop::collection::hash_set("[a-z]{1,6}", 0..16)
        ) {
            let names: Vec<String> = names.into_iter().collect();
            let graph = graph(names.iter().map(PackageNode::new));
            let schedule = Scheduler::new().schedule(&graph).expect("no dependencies");
            prop_assert_eq!(schedule.mode(), ScheduleMode::DiscoveryOrder);
            prop_assert_eq!(schedule.order(), names.as_slice());
        }
    }
}
