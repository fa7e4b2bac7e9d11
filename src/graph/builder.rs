use std::hash::Hash;

use fxhash::FxHashSet;

use super::{Graph, SortedGraph};
use crate::prelude::{MultiError, SortOptions};

/// Collects "child comes after parent" relations into a [`Graph`].
#[derive(Clone)]
pub struct GraphBuilder<K> {
    pub(crate) graph: Graph<K>,
    pub(crate) edges: FxHashSet<(usize, usize)>,
}

impl<K> GraphBuilder<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        GraphBuilder {
            graph: Graph::new(),
            edges: FxHashSet::default(),
        }
    }

    #[inline(always)]
    pub(crate) fn get_or_insert(&mut self, key: K) -> usize {
        self.graph.get_or_insert(key)
    }

    /// Records that `child` must come after `parent`.
    ///
    /// Repeating a relation has no effect.
    pub fn add_relation(&mut self, child: K, parent: K) -> &mut Self {
        let child = self.get_or_insert(child);
        let parent = self.get_or_insert(parent);
        if self.edges.insert((parent, child)) {
            self.graph.vertices[parent].afters.push(child);
            self.graph.n_edges += 1;
        }
        self
    }

    /// Each key comes after the one before it.
    pub fn add_chain(&mut self, chain: impl IntoIterator<Item = K>) -> &mut Self {
        let mut chain = chain.into_iter();
        if let Some(mut before) = chain.next() {
            self.add_key(before.clone());
            for after in chain {
                self.add_relation(after.clone(), before);
                before = after;
            }
        }
        self
    }

    /// Adds a key without any relation.
    pub fn add_key(&mut self, key: K) -> &mut Self {
        self.get_or_insert(key);
        self
    }

    pub fn build(self) -> Graph<K> {
        tracing::debug!(
            vertices = self.graph.len(),
            edges = self.graph.n_edges,
            "built precedence graph"
        );
        self.graph
    }

    pub fn sort(self, options: &SortOptions) -> Result<SortedGraph<K>, MultiError<K>> {
        self.build().sort(options)
    }
}

impl<K> Default for GraphBuilder<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Extend<(K, K)> for GraphBuilder<K>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, K)>>(&mut self, relations: T) {
        for (child, parent) in relations {
            self.add_relation(child, parent);
        }
    }
}

impl<K> FromIterator<(K, K)> for GraphBuilder<K>
where
    K: Eq + Hash + Clone,
{
    fn from_iter<T: IntoIterator<Item = (K, K)>>(relations: T) -> Self {
        let mut builder = GraphBuilder::new();
        builder.extend(relations);
        builder
    }
}
