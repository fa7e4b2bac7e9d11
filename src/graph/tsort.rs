use super::Graph;
use crate::utils::path::AncestorPath;

/// Result of one depth-first pass over a graph.
pub(crate) struct Traversal {
    /// Vertices in topological order.
    pub(crate) order: Vec<usize>,
    /// Vertices lying on at least one detected cycle.
    pub(crate) recursive: Vec<bool>,
    /// Each detected cycle, starting at the vertex the back-edge returns
    /// to.
    pub(crate) cycles: Vec<Vec<usize>>,
}

impl Traversal {
    #[inline(always)]
    pub(crate) fn is_recursive(&self, vertex: usize) -> bool {
        self.recursive[vertex]
    }
}

struct Frame {
    vertex: usize,
    next: usize,
}

/// Depth-first topological sort with back-edge detection.
///
/// Traversals start from vertices in reverse insertion order and follow
/// `afters` in insertion order. A vertex is emitted once all of its
/// dependents have been, and the emitted sequence is reversed at the
/// end, so prerequisites come before their dependents and unrelated
/// vertices keep their insertion order.
///
/// A dependent that is already on the current path closes a cycle. Its
/// vertices are flagged and the edge is not followed.
pub(crate) fn depth_first<K>(graph: &Graph<K>) -> Traversal {
    let n_vertices = graph.len();
    let mut visited = vec![false; n_vertices];
    let mut recursive = vec![false; n_vertices];
    let mut cycles = Vec::new();
    let mut postorder = Vec::with_capacity(n_vertices);
    let mut path = AncestorPath::new();
    let mut stack: Vec<Frame> = Vec::new();

    for start in (0..n_vertices).rev() {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        path.push(start);
        stack.push(Frame {
            vertex: start,
            next: 0,
        });

        while let Some(frame) = stack.last_mut() {
            let vertex = frame.vertex;
            match graph.vertices[vertex].afters.get(frame.next) {
                Some(&after) => {
                    frame.next += 1;
                    if let Some(cycle) = path.suffix_from(after) {
                        for &member in cycle {
                            recursive[member] = true;
                        }
                        tracing::trace!(length = cycle.len(), "back-edge closes a cycle");
                        cycles.push(cycle.to_vec());
                    } else if !visited[after] {
                        visited[after] = true;
                        path.push(after);
                        stack.push(Frame {
                            vertex: after,
                            next: 0,
                        });
                    }
                }
                None => {
                    stack.pop();
                    path.pop();
                    postorder.push(vertex);
                }
            }
        }
    }

    postorder.reverse();

    tracing::debug!(
        vertices = n_vertices,
        cycles = cycles.len(),
        "depth-first sort finished"
    );

    Traversal {
        order: postorder,
        recursive,
        cycles,
    }
}
