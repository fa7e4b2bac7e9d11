//! Case-insensitive ordering of validated names.
//!
//! Names are compared in lower case, but every result and every error
//! reports the spelling a name had when it was first seen.

use std::fmt;

use crate::graph::{debug::write_table, GraphBuilder, SortedGraph};
use crate::prelude::*;
use crate::utils::{interner::KeyTable, sym::Sym};

/// A sorted graph over names.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawNamedGraph"))]
pub struct NamedGraph {
    names: KeyTable,
    graph: SortedGraph<Sym>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawNamedGraph {
    names: KeyTable,
    graph: SortedGraph<Sym>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawNamedGraph> for NamedGraph {
    type Error = String;

    fn try_from(raw: RawNamedGraph) -> Result<Self, Self::Error> {
        let n_names = raw.names.len();
        if raw.graph.len() != n_names {
            return Err(format!(
                "Graph has {} keys but {n_names} names are known",
                raw.graph.len()
            ));
        }
        if let Some(sym) = raw.graph.graph().keys().find(|sym| sym.into_usize() >= n_names) {
            return Err(format!("Graph refers to unknown name {sym:?}"));
        }
        Ok(NamedGraph {
            names: raw.names,
            graph: raw.graph,
        })
    }
}

/// A name is made of letters only and has at least `min_len` of them.
pub fn is_valid_name(name: &str, min_len: usize) -> bool {
    name.chars().all(char::is_alphabetic) && name.chars().count() >= min_len
}

fn intern(
    names: &mut KeyTable,
    name: &str,
    min_len: usize,
    invalid: &mut MultiError<String>,
) -> Sym {
    let (sym, first_seen) = names.get_or_intern(name);
    if first_seen && !is_valid_name(name, min_len) {
        invalid.push(SortError::InvalidName(name.to_string()));
    }
    sym
}

impl NamedGraph {
    /// Sorts `(child, parent)` relations with the default options.
    pub fn new<I, C, P>(relations: I) -> Result<Self, MultiError<String>>
    where
        I: IntoIterator<Item = (C, P)>,
        C: AsRef<str>,
        P: AsRef<str>,
    {
        Self::with_options(relations, &SortOptions::default())
    }

    /// Sorts `(child, parent)` relations.
    ///
    /// Every invalid name is reported and nothing is sorted if there is
    /// at least one. Otherwise cycle and root errors are reported with
    /// the original spelling of each name.
    pub fn with_options<I, C, P>(
        relations: I,
        options: &SortOptions,
    ) -> Result<Self, MultiError<String>>
    where
        I: IntoIterator<Item = (C, P)>,
        C: AsRef<str>,
        P: AsRef<str>,
    {
        let min_len = options.min_name_len;
        let mut names = KeyTable::new();
        let mut invalid = MultiError::new();
        let mut builder = GraphBuilder::new();

        for (child, parent) in relations {
            let child = intern(&mut names, child.as_ref(), min_len, &mut invalid);
            let parent = intern(&mut names, parent.as_ref(), min_len, &mut invalid);
            if invalid.is_empty() {
                builder.add_relation(child, parent);
            }
        }

        tracing::debug!(
            names = names.len(),
            invalid = invalid.len(),
            "normalized relations"
        );

        if !invalid.is_empty() {
            return Err(invalid);
        }

        let graph = builder
            .sort(options)
            .map_err(|errors| errors.map_keys(|sym| names.resolve(sym).to_string()))?;

        Ok(NamedGraph { names, graph })
    }

    pub fn len(&self) -> usize {
        self.graph.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    /// Names in sorted order, as first spelled.
    pub fn sorted_ids(&self) -> Vec<&str> {
        self.graph.iter().map(|&sym| self.names.resolve(sym)).collect()
    }

    pub fn into_sorted_ids(self) -> Vec<String> {
        let names = &self.names;
        self.graph
            .iter()
            .map(|&sym| names.resolve(sym).to_string())
            .collect()
    }

    /// First spelling of `name`, matched case-insensitively.
    pub fn original(&self, name: &str) -> Option<&str> {
        self.names.get(name).map(|sym| self.names.resolve(sym))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.get(name).is_some()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.graph.position(&self.names.get(name)?)
    }

    /// Names that must come after `name`.
    pub fn dependents(&self, name: &str) -> Option<Vec<&str>> {
        let sym = self.names.get(name)?;
        let afters = self.graph.graph().afters(&sym)?;
        Some(afters.map(|&after| self.names.resolve(after)).collect())
    }
}

impl fmt::Debug for NamedGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_table(f, &self.graph.graph, Some(self.graph.order.as_slice()), |&sym| {
            self.names.resolve(sym).to_string()
        })
    }
}

/// Sorts names with the default options and returns them in their
/// original spelling.
///
/// ```
/// let sorted = toposort::prelude::sort_names([
///     ("Barbara", "Nick"),
///     ("Nick", "Sophie"),
///     ("Sophie", "Jonas"),
/// ])
/// .unwrap();
/// assert_eq!(sorted, ["Jonas", "Sophie", "Nick", "Barbara"]);
/// ```
pub fn sort_names<I, C, P>(relations: I) -> Result<Vec<String>, MultiError<String>>
where
    I: IntoIterator<Item = (C, P)>,
    C: AsRef<str>,
    P: AsRef<str>,
{
    sort_names_with(relations, &SortOptions::default())
}

pub fn sort_names_with<I, C, P>(
    relations: I,
    options: &SortOptions,
) -> Result<Vec<String>, MultiError<String>>
where
    I: IntoIterator<Item = (C, P)>,
    C: AsRef<str>,
    P: AsRef<str>,
{
    NamedGraph::with_options(relations, options).map(NamedGraph::into_sorted_ids)
}
