use super::{tsort::Traversal, Graph};
use crate::prelude::*;

/// Turns the findings of a traversal into errors: one per cycle, then
/// one listing the roots if there is more than one.
pub(crate) fn validate<K: Clone>(
    graph: &Graph<K>,
    traversal: &Traversal,
    root_detection: RootDetection,
) -> MultiError<K> {
    let mut errors: MultiError<K> = traversal
        .cycles
        .iter()
        .map(|cycle| SortError::Cyclic(CyclePath(resolve(graph, cycle))))
        .collect();

    let roots = match root_detection {
        RootDetection::Components => component_roots(graph, traversal),
        RootDetection::SubtreeDelta => subtree_delta_roots(graph, traversal),
    };

    if roots.len() > 1 {
        errors.push(SortError::MultipleRoots(Roots(resolve(graph, &roots))));
    }

    tracing::debug!(
        cycles = traversal.cycles.len(),
        roots = roots.len(),
        errors = errors.len(),
        "validated precedence graph"
    );

    errors
}

fn resolve<K: Clone>(graph: &Graph<K>, vertices: &[usize]) -> Vec<K> {
    vertices.iter().map(|&v| graph.key(v).clone()).collect()
}

/// Labels every vertex with the component it belongs to when edge
/// direction is ignored.
fn components<K>(graph: &Graph<K>) -> Vec<usize> {
    let n_vertices = graph.len();
    let mut befores = vec![Vec::new(); n_vertices];
    for (vertex, node) in graph.vertices.iter().enumerate() {
        for &after in &node.afters {
            befores[after].push(vertex);
        }
    }

    let mut component = vec![usize::MAX; n_vertices];
    let mut stack = Vec::new();
    for start in 0..n_vertices {
        if component[start] != usize::MAX {
            continue;
        }
        component[start] = start;
        stack.push(start);
        while let Some(vertex) = stack.pop() {
            for &next in graph.vertices[vertex].afters.iter().chain(&befores[vertex]) {
                if component[next] == usize::MAX {
                    component[next] = start;
                    stack.push(next);
                }
            }
        }
    }
    component
}

/// One root per connected component, in sorted order: the first vertex
/// of the component that has dependents and no prerequisite and is not
/// on a cycle. Components made only of cycles have none.
fn component_roots<K>(graph: &Graph<K>, traversal: &Traversal) -> Vec<usize> {
    let component = components(graph);
    let has_prerequisite = graph.has_prerequisite();
    let mut rooted = vec![false; graph.len()];
    traversal
        .order
        .iter()
        .copied()
        .filter(|&v| {
            if traversal.is_recursive(v)
                || has_prerequisite[v]
                || graph.vertices[v].afters.is_empty()
            {
                return false;
            }
            !std::mem::replace(&mut rooted[component[v]], true)
        })
        .collect()
}

/// A key starts a new tree when more edges are reachable from it than
/// from the previous key in sorted order. Flagged keys are skipped.
fn subtree_delta_roots<K>(graph: &Graph<K>, traversal: &Traversal) -> Vec<usize> {
    let counts = reachable_edge_counts(graph, traversal);
    let mut roots = Vec::new();
    let mut previous = 0;
    for &vertex in &traversal.order {
        if traversal.is_recursive(vertex) {
            continue;
        }
        let length = counts[vertex];
        if length > previous {
            roots.push(vertex);
        }
        previous = length;
    }
    roots
}

/// For every vertex, the number of edge traversals below it, one per
/// path. Edges into a flagged vertex are counted but not followed.
///
/// Filled in reverse sorted order, so the count of every unflagged
/// dependent is known before its prerequisite needs it. Counts saturate
/// instead of overflowing.
fn reachable_edge_counts<K>(graph: &Graph<K>, traversal: &Traversal) -> Vec<usize> {
    let mut counts = vec![0usize; graph.len()];
    for &vertex in traversal.order.iter().rev() {
        counts[vertex] = graph.vertices[vertex]
            .afters
            .iter()
            .map(|&after| {
                let below = if traversal.is_recursive(after) {
                    0
                } else {
                    counts[after]
                };
                below.saturating_add(1)
            })
            .fold(0, usize::saturating_add);
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{tsort::depth_first, GraphBuilder};

    fn graph_of(relations: &[(&'static str, &'static str)]) -> Graph<&'static str> {
        relations
            .iter()
            .copied()
            .collect::<GraphBuilder<_>>()
            .build()
    }

    fn run(graph: &Graph<&'static str>, root_detection: RootDetection) -> MultiError<&'static str> {
        validate(graph, &depth_first(graph), root_detection)
    }

    #[test]
    fn test_single_tree_is_valid() {
        let graph = graph_of(&[("Barbara", "Nick"), ("Nick", "Sophie"), ("Sophie", "Jonas")]);
        assert!(run(&graph, RootDetection::Components).is_empty());
        assert!(run(&graph, RootDetection::SubtreeDelta).is_empty());
    }

    #[test]
    fn test_two_chains_have_two_roots() {
        let graph = graph_of(&[
            ("Barbara", "Nick"),
            ("Nick", "Sophie"),
            ("Sophie", "Jonas"),
            ("Ruby", "Daniel"),
        ]);

        for detection in [RootDetection::Components, RootDetection::SubtreeDelta] {
            let errors = run(&graph, detection);
            assert_eq!(errors.len(), 1);
            assert_eq!(
                errors.first(),
                Some(&SortError::MultipleRoots(Roots(vec!["Jonas", "Daniel"])))
            );
        }
    }

    #[test]
    fn test_cycles_come_before_roots() {
        let graph = graph_of(&[
            ("Barbara", "Nick"),
            ("Nick", "Barbara"),
            ("Sophie", "Jonas"),
            ("Ruby", "Daniel"),
        ]);

        let errors = run(&graph, RootDetection::Components).into_vec();

        assert_eq!(errors.len(), 2);
        assert!(errors[0].is(ErrorKind::Cyclic));
        assert!(errors[1].is(ErrorKind::MultipleRoots));
    }

    #[test]
    fn test_pure_cycle_has_no_roots() {
        let graph = graph_of(&[("Barbara", "Nick"), ("Nick", "Barbara")]);

        let errors = run(&graph, RootDetection::SubtreeDelta);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.count(ErrorKind::MultipleRoots), 0);
    }

    #[test]
    fn test_subtree_delta_counts_through_tail_into_cycle() {
        // tail -> a <-> b
        let graph = graph_of(&[("b", "a"), ("a", "b"), ("a", "tail")]);
        let traversal = depth_first(&graph);

        let tail = graph.vertex_of(&"tail").unwrap();

        assert_eq!(reachable_edge_counts(&graph, &traversal)[tail], 1);
    }

    #[test]
    fn test_subtree_delta_misreads_smaller_branch_first() {
        // r has dependents a and b, a has dependent c.
        let graph = graph_of(&[("a", "r"), ("b", "r"), ("c", "a")]);
        let v = |k| graph.vertex_of(&k).unwrap();
        let traversal = Traversal {
            order: vec![v("r"), v("b"), v("a"), v("c")],
            recursive: vec![false; 4],
            cycles: Vec::new(),
        };

        assert_eq!(component_roots(&graph, &traversal), [v("r")]);
        assert_eq!(subtree_delta_roots(&graph, &traversal), [v("r"), v("a")]);
    }

    #[test]
    fn test_shared_dependent_joins_two_sources() {
        // a and b are both prerequisites of c.
        let graph = graph_of(&[("c", "a"), ("c", "b")]);
        assert!(run(&graph, RootDetection::Components).is_empty());

        let graph = graph_of(&[
            ("b", "r"),
            ("a", "r"),
            ("c", "a"),
            ("c", "b"),
            ("d", "x"),
            ("d", "c"),
        ]);
        assert!(run(&graph, RootDetection::Components).is_empty());
    }

    #[test]
    fn test_two_diamonds_have_two_roots() {
        let graph = graph_of(&[
            ("b", "a"),
            ("c", "a"),
            ("d", "b"),
            ("d", "c"),
            ("y", "x"),
            ("z", "x"),
            ("w", "y"),
            ("w", "z"),
        ]);

        let errors = run(&graph, RootDetection::Components);

        assert_eq!(
            errors.first(),
            Some(&SortError::MultipleRoots(Roots(vec!["a", "x"])))
        );
    }

    /// `levels` stacked diamonds: 3i fans out to 3i+1 and 3i+2, which
    /// both lead to 3(i+1).
    fn diamond_ladder(levels: u32) -> Graph<u32> {
        let mut builder = GraphBuilder::new();
        for i in 0..levels {
            let (top, left, right, bottom) = (3 * i, 3 * i + 1, 3 * i + 2, 3 * (i + 1));
            builder
                .add_relation(left, top)
                .add_relation(right, top)
                .add_relation(bottom, left)
                .add_relation(bottom, right);
        }
        builder.build()
    }

    #[test]
    fn test_reachable_edges_count_every_path() {
        let graph = diamond_ladder(3);
        let traversal = depth_first(&graph);

        let counts = reachable_edge_counts(&graph, &traversal);

        assert_eq!(counts[graph.vertex_of(&0).unwrap()], 28);
        assert_eq!(counts[graph.vertex_of(&3).unwrap()], 12);
        assert_eq!(counts[graph.vertex_of(&9).unwrap()], 0);
    }

    #[test]
    fn test_subtree_delta_handles_long_diamond_ladder() {
        let graph = diamond_ladder(200);
        let traversal = depth_first(&graph);

        let counts = reachable_edge_counts(&graph, &traversal);
        let errors = validate(&graph, &traversal, RootDetection::SubtreeDelta);

        assert_eq!(counts[graph.vertex_of(&0).unwrap()], usize::MAX);
        assert_eq!(errors.count(ErrorKind::Cyclic), 0);
        assert!(validate(&graph, &traversal, RootDetection::Components).is_empty());
    }

    #[test]
    fn test_multiple_cycles_are_each_reported() {
        let graph = graph_of(&[
            ("Barbara", "Nick"),
            ("Nick", "Sophie"),
            ("Sophie", "Jonas"),
            ("Jonas", "Barbara"),
            ("Daniel", "Ruby"),
            ("Jason", "Daniel"),
            ("Ruby", "Jason"),
        ]);

        let errors = run(&graph, RootDetection::Components);

        assert_eq!(errors.count(ErrorKind::Cyclic), 2);
        assert_eq!(
            errors.into_vec(),
            [
                SortError::Cyclic(CyclePath(vec!["Jason", "Ruby", "Daniel"])),
                SortError::Cyclic(CyclePath(vec!["Jonas", "Sophie", "Nick", "Barbara"])),
            ]
        );
    }

    #[test]
    fn test_isolated_keys_are_not_roots() {
        let mut builder = GraphBuilder::new();
        builder.add_key("x").add_key("y");
        let graph = builder.build();

        assert!(run(&graph, RootDetection::Components).is_empty());
        assert!(run(&graph, RootDetection::SubtreeDelta).is_empty());
    }
}
