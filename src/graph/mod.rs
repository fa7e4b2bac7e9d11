use std::hash::Hash;

use fxhash::FxHashMap;

use crate::prelude::*;

mod builder;
pub(crate) mod debug;
pub(crate) mod tsort;
pub(crate) mod validate;

pub use builder::GraphBuilder;

/// A key and the keys that must come after it.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub(crate) struct Vertex<K> {
    pub(crate) key: K,
    pub(crate) afters: Vec<usize>,
}

/// Precedence graph. Edges point from a prerequisite to the keys that
/// depend on it.
///
/// Vertices are stored in the order their keys were first seen.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "RawGraph<K>",
        bound(
            serialize = "K: serde::Serialize",
            deserialize = "K: serde::Deserialize<'de> + Eq + Hash + Clone"
        )
    )
)]
pub struct Graph<K> {
    pub(crate) vertices: Vec<Vertex<K>>,
    #[cfg_attr(feature = "serde", serde(skip_serializing))]
    pub(crate) index: FxHashMap<K, usize>,
    #[cfg_attr(feature = "serde", serde(skip_serializing))]
    pub(crate) n_edges: usize,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGraph<K> {
    vertices: Vec<Vertex<K>>,
}

#[cfg(feature = "serde")]
impl<K> TryFrom<RawGraph<K>> for Graph<K>
where
    K: Eq + Hash + Clone,
{
    type Error = String;

    fn try_from(raw: RawGraph<K>) -> Result<Self, Self::Error> {
        let n_vertices = raw.vertices.len();
        let mut index = FxHashMap::default();
        let mut edges = fxhash::FxHashSet::default();
        for (i, vertex) in raw.vertices.iter().enumerate() {
            if index.insert(vertex.key.clone(), i).is_some() {
                return Err(format!("Vertex {i} repeats an earlier key"));
            }
            if let Some(after) = vertex.afters.iter().find(|&&after| after >= n_vertices) {
                return Err(format!("Vertex {i} points to missing vertex {after}"));
            }
            if let Some(after) = vertex.afters.iter().find(|&&after| !edges.insert((i, after))) {
                return Err(format!("Vertex {i} points to vertex {after} twice"));
            }
        }
        Ok(Graph {
            vertices: raw.vertices,
            index,
            n_edges: edges.len(),
        })
    }
}

impl<K> Graph<K> {
    pub fn new() -> Self {
        Graph {
            vertices: Vec::new(),
            index: FxHashMap::default(),
            n_edges: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn n_edges(&self) -> usize {
        self.n_edges
    }

    /// Keys in the order they were first seen.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.vertices.iter().map(|vertex| &vertex.key)
    }

    #[inline(always)]
    pub(crate) fn key(&self, vertex: usize) -> &K {
        &self.vertices[vertex].key
    }

    /// For every vertex, whether some other vertex must precede it.
    pub(crate) fn has_prerequisite(&self) -> Vec<bool> {
        let mut has_prerequisite = vec![false; self.vertices.len()];
        for vertex in &self.vertices {
            for &after in &vertex.afters {
                has_prerequisite[after] = true;
            }
        }
        has_prerequisite
    }

    /// Vertices with at least one dependent and no prerequisite.
    pub(crate) fn root_vertices(&self) -> impl Iterator<Item = usize> + '_ {
        let has_prerequisite = self.has_prerequisite();
        (0..self.vertices.len())
            .filter(move |&v| !has_prerequisite[v] && !self.vertices[v].afters.is_empty())
    }
}

impl<K> Graph<K>
where
    K: Eq + Hash + Clone,
{
    pub(crate) fn get_or_insert(&mut self, key: K) -> usize {
        if let Some(&vertex) = self.index.get(&key) {
            return vertex;
        }
        let vertex = self.vertices.len();
        self.index.insert(key.clone(), vertex);
        self.vertices.push(Vertex {
            key,
            afters: Vec::new(),
        });
        vertex
    }

    #[inline]
    pub(crate) fn vertex_of(&self, key: &K) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Keys that must come after `key`, in the order the relations were
    /// added.
    pub fn afters(&self, key: &K) -> Option<impl Iterator<Item = &K>> {
        let vertex = self.vertex_of(key)?;
        Some(
            self.vertices[vertex]
                .afters
                .iter()
                .map(|&after| self.key(after)),
        )
    }

    /// Keys that have dependents but no prerequisite, in insertion order.
    pub fn roots(&self) -> Vec<&K> {
        self.root_vertices().map(|v| self.key(v)).collect()
    }

    /// Orders the graph and validates it.
    ///
    /// Every cycle and, when more than one independent tree is found, the
    /// set of roots are reported together.
    pub fn sort(self, options: &SortOptions) -> Result<SortedGraph<K>, MultiError<K>> {
        let traversal = tsort::depth_first(&self);
        let errors = validate::validate(&self, &traversal, options.root_detection);
        errors.into_result(SortedGraph {
            graph: self,
            order: traversal.order,
        })
    }
}

impl<K> Default for Graph<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// A validated graph together with its topological order.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "RawSortedGraph<K>",
        bound(
            serialize = "K: serde::Serialize",
            deserialize = "K: serde::Deserialize<'de> + Eq + Hash + Clone"
        )
    )
)]
pub struct SortedGraph<K> {
    pub(crate) graph: Graph<K>,
    pub(crate) order: Vec<usize>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(bound(deserialize = "K: serde::Deserialize<'de> + Eq + Hash + Clone"))]
struct RawSortedGraph<K> {
    graph: Graph<K>,
    order: Vec<usize>,
}

#[cfg(feature = "serde")]
impl<K> TryFrom<RawSortedGraph<K>> for SortedGraph<K> {
    type Error = String;

    fn try_from(raw: RawSortedGraph<K>) -> Result<Self, Self::Error> {
        let mut seen = vec![false; raw.graph.len()];
        for &vertex in &raw.order {
            match seen.get_mut(vertex) {
                Some(slot) if !*slot => *slot = true,
                _ => return Err(format!("Order repeats or exceeds vertex {vertex}")),
            }
        }
        if raw.order.len() != raw.graph.len() {
            return Err("Order does not cover every vertex".into());
        }
        Ok(SortedGraph {
            graph: raw.graph,
            order: raw.order,
        })
    }
}

impl<K> SortedGraph<K> {
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &K> + '_ {
        self.order.iter().map(|&vertex| self.graph.key(vertex))
    }

    pub fn sorted(&self) -> Vec<&K> {
        self.iter().collect()
    }

    pub fn into_sorted(self) -> Vec<K> {
        let mut keys: Vec<Option<K>> = self
            .graph
            .vertices
            .into_iter()
            .map(|vertex| Some(vertex.key))
            .collect();
        self.order
            .iter()
            .filter_map(|&vertex| keys[vertex].take())
            .collect()
    }

    pub fn graph(&self) -> &Graph<K> {
        &self.graph
    }

    pub fn into_graph(self) -> Graph<K> {
        self.graph
    }
}

impl<K> SortedGraph<K>
where
    K: Eq + Hash + Clone,
{
    /// Index of `key` in the sorted order.
    pub fn position(&self, key: &K) -> Option<usize> {
        let vertex = self.graph.vertex_of(key)?;
        self.order.iter().position(|&v| v == vertex)
    }
}
