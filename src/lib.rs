//! Orders keys so that every key comes after the keys it depends on.
//!
//! Input is a set of `(child, parent)` relations meaning "child comes
//! after parent". Sorting also validates the graph: every cycle is
//! reported, as is a graph made of more than one independent tree.
//!
//! ```
//! use toposort::prelude::*;
//!
//! let sorted = sort([("Barbara", "Nick"), ("Nick", "Sophie"), ("Sophie", "Jonas")]).unwrap();
//! assert_eq!(sorted, ["Jonas", "Sophie", "Nick", "Barbara"]);
//!
//! let err = sort([("Barbara", "Nick"), ("Nick", "Barbara")]).unwrap_err();
//! assert!(err.is(ErrorKind::Cyclic));
//! ```
//!
//! [`NamedGraph`](named::NamedGraph) is a case-insensitive variant that
//! only accepts alphabetic names.

use std::hash::Hash;

pub mod error;
pub mod graph;
pub mod named;
pub mod options;
mod readwrite;
mod utils;

/// Prelude of data types and functionality.
pub mod prelude {
    pub use crate::error::*;
    pub use crate::graph::{Graph, GraphBuilder, SortedGraph};
    pub use crate::named::{sort_names, sort_names_with, NamedGraph};
    pub use crate::options::{RootDetection, SortOptions};
    pub use crate::{sort, sort_with, SortResult};
}

pub type SortResult<K> = Result<Vec<K>, error::MultiError<K>>;

/// Sorts `(child, parent)` relations with the default options.
pub fn sort<K, I>(relations: I) -> SortResult<K>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = (K, K)>,
{
    sort_with(relations, &options::SortOptions::default())
}

/// Sorts `(child, parent)` relations, returning the keys with every
/// parent before its children.
pub fn sort_with<K, I>(relations: I, options: &options::SortOptions) -> SortResult<K>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = (K, K)>,
{
    relations
        .into_iter()
        .collect::<graph::GraphBuilder<K>>()
        .sort(options)
        .map(graph::SortedGraph::into_sorted)
}
