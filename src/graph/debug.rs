use std::fmt::{self, Display};

use super::{Graph, SortedGraph};

const DEFAULT_MAX_PRINT_SIZE: usize = 15;
const MAX_PRINTED: usize = 10;

fn edges<K>(graph: &Graph<K>) -> impl Iterator<Item = (&K, &K)> {
    graph.vertices.iter().flat_map(move |vertex| {
        vertex
            .afters
            .iter()
            .map(move |&after| (&vertex.key, graph.key(after)))
    })
}

fn get_max_str_length<K>(graph: &Graph<K>, label: &impl Fn(&K) -> String) -> usize {
    let mut max_string_length = DEFAULT_MAX_PRINT_SIZE;
    for (parent, child) in edges(graph).take(MAX_PRINTED) {
        max_string_length = max_string_length
            .max(label(parent).len())
            .max(label(child).len());
    }
    max_string_length
}

/// Writes the summary header and the first edges of `graph` as a table,
/// followed by the first keys of `order` when one is given.
pub(crate) fn write_table<K>(
    f: &mut fmt::Formatter<'_>,
    graph: &Graph<K>,
    order: Option<&[usize]>,
    label: impl Fn(&K) -> String,
) -> fmt::Result {
    let n_vertices = graph.len();
    let n_edges = graph.n_edges;
    let n_roots = graph.root_vertices().count();
    let max_string_length = get_max_str_length(graph, &label);
    writeln!(f, "# of vertices: {n_vertices}")?;
    writeln!(f, "# of edges: {n_edges}")?;
    writeln!(f, "# of roots: {n_roots}")?;
    writeln!(f)?;
    writeln!(
        f,
        "| {:^width$} | {:^width$} |",
        "Before",
        "After",
        width = max_string_length
    )?;
    writeln!(
        f,
        "| {:-<width$} | {:-<width$} |",
        "",
        "",
        width = max_string_length
    )?;
    for (parent, child) in edges(graph).take(MAX_PRINTED) {
        writeln!(
            f,
            "| {:width$.width$} | {:width$.width$} |",
            label(parent),
            label(child),
            width = max_string_length
        )?;
    }

    if n_edges > MAX_PRINTED {
        writeln!(f, "Omitted {} edges", n_edges - MAX_PRINTED)?;
    }

    if let Some(order) = order {
        write!(f, "Order:")?;
        for &vertex in order.iter().take(MAX_PRINTED) {
            write!(f, " {}", label(graph.key(vertex)))?;
        }
        if order.len() > MAX_PRINTED {
            write!(f, " ...")?;
        }
        writeln!(f)?;
    }

    Ok(())
}

impl<K: Display> fmt::Debug for Graph<K> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_table(f, self, None, |key: &K| key.to_string())
    }
}

impl<K: Display> fmt::Debug for SortedGraph<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_table(f, &self.graph, Some(self.order.as_slice()), |key: &K| key.to_string())
    }
}
