use std::fmt;

/// The three ways a sort can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Cyclic,
    MultipleRoots,
    InvalidName,
}

/// Ordered keys forming a cycle. The closing edge back to the first key
/// is implied.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CyclePath<K>(pub Vec<K>);

impl<K> CyclePath<K> {
    pub fn keys(&self) -> &[K] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: fmt::Display> fmt::Display for CyclePath<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for key in &self.0 {
            write!(f, "{key} -> ")?;
        }
        match self.0.first() {
            Some(first) => write!(f, "{first}"),
            None => Ok(()),
        }
    }
}

/// Independent roots found in a single graph, in sorted order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roots<K>(pub Vec<K>);

impl<K> Roots<K> {
    pub fn keys(&self) -> &[K] {
        &self.0
    }

    pub fn contains(&self, key: &K) -> bool
    where
        K: PartialEq,
    {
        self.0.contains(key)
    }
}

impl<K: fmt::Display> fmt::Display for Roots<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SortError<K> {
    #[error("cyclic: {0}")]
    Cyclic(CyclePath<K>),
    #[error("multiple roots: {0}")]
    MultipleRoots(Roots<K>),
    #[error("invalid name: \"{0}\"")]
    InvalidName(String),
    #[error("{0}")]
    Aggregate(MultiError<K>),
}

impl<K> SortError<K> {
    /// Kind of this error. Aggregates report the kind of their first
    /// entry, if any.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Cyclic(_) => Some(ErrorKind::Cyclic),
            Self::MultipleRoots(_) => Some(ErrorKind::MultipleRoots),
            Self::InvalidName(_) => Some(ErrorKind::InvalidName),
            Self::Aggregate(inner) => inner.iter().find_map(SortError::kind),
        }
    }

    /// Returns `true` if this error, or any error nested inside it, is of
    /// the given kind.
    pub fn is(&self, kind: ErrorKind) -> bool {
        match self {
            Self::Aggregate(inner) => inner.is(kind),
            _ => self.kind() == Some(kind),
        }
    }

    pub fn map_keys<T>(self, mut f: impl FnMut(K) -> T) -> SortError<T> {
        self.map_keys_with(&mut f)
    }

    fn map_keys_with<T>(self, f: &mut impl FnMut(K) -> T) -> SortError<T> {
        match self {
            Self::Cyclic(CyclePath(keys)) => {
                SortError::Cyclic(CyclePath(keys.into_iter().map(&mut *f).collect()))
            }
            Self::MultipleRoots(Roots(keys)) => {
                SortError::MultipleRoots(Roots(keys.into_iter().map(&mut *f).collect()))
            }
            Self::InvalidName(name) => SortError::InvalidName(name),
            Self::Aggregate(inner) => SortError::Aggregate(inner.map_keys_with(&mut *f)),
        }
    }
}

/// Every error detected during a single sort.
///
/// An empty aggregate means "no error"; the sorting entry points never
/// return one as `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiError<K> {
    errors: Vec<SortError<K>>,
}

impl<K> MultiError<K> {
    pub fn new() -> Self {
        MultiError { errors: Vec::new() }
    }

    pub fn push(&mut self, error: SortError<K>) {
        self.errors.push(error);
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SortError<K>> {
        self.errors.iter()
    }

    pub fn first(&self) -> Option<&SortError<K>> {
        self.errors.first()
    }

    /// Returns `true` if any contained error, searching nested
    /// aggregates, is of the given kind.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.errors.iter().any(|e| e.is(kind))
    }

    /// Number of contained errors of the given kind, nested aggregates
    /// included.
    pub fn count(&self, kind: ErrorKind) -> usize {
        self.errors
            .iter()
            .map(|e| match e {
                SortError::Aggregate(inner) => inner.count(kind),
                _ if e.is(kind) => 1,
                _ => 0,
            })
            .sum()
    }

    pub fn into_vec(self) -> Vec<SortError<K>> {
        self.errors
    }

    pub(crate) fn into_result<T>(self, ok: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(ok)
        } else {
            Err(self)
        }
    }

    pub fn map_keys<T>(self, mut f: impl FnMut(K) -> T) -> MultiError<T> {
        self.map_keys_with(&mut f)
    }

    fn map_keys_with<T>(self, f: &mut impl FnMut(K) -> T) -> MultiError<T> {
        MultiError {
            errors: self
                .errors
                .into_iter()
                .map(|e| e.map_keys_with(&mut *f))
                .collect(),
        }
    }
}

impl<K> Default for MultiError<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> From<SortError<K>> for MultiError<K> {
    fn from(error: SortError<K>) -> Self {
        MultiError {
            errors: vec![error],
        }
    }
}

impl<K> FromIterator<SortError<K>> for MultiError<K> {
    fn from_iter<T: IntoIterator<Item = SortError<K>>>(iter: T) -> Self {
        MultiError {
            errors: iter.into_iter().collect(),
        }
    }
}

impl<K> Extend<SortError<K>> for MultiError<K> {
    fn extend<T: IntoIterator<Item = SortError<K>>>(&mut self, iter: T) {
        self.errors.extend(iter)
    }
}

impl<K> IntoIterator for MultiError<K> {
    type Item = SortError<K>;
    type IntoIter = std::vec::IntoIter<SortError<K>>;
    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a, K> IntoIterator for &'a MultiError<K> {
    type Item = &'a SortError<K>;
    type IntoIter = std::slice::Iter<'a, SortError<K>>;
    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl<K: fmt::Display> fmt::Display for MultiError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [] => write!(f, "(0 errors)"),
            [only] => write!(f, "{only}"),
            [first, _] => write!(f, "{first} (and 1 other error)"),
            [first, rest @ ..] => write!(f, "{first} (and {} other errors)", rest.len()),
        }
    }
}

impl<K: fmt::Debug + fmt::Display> std::error::Error for MultiError<K> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn cyclic(keys: &[&str]) -> SortError<String> {
        SortError::Cyclic(CyclePath(keys.iter().map(|k| k.to_string()).collect()))
    }

    #[test]
    fn test_cycle_path_closes_on_first_key() {
        assert_eq!(
            cyclic(&["Barbara", "Jonas", "Sophie"]).to_string(),
            "cyclic: Barbara -> Jonas -> Sophie -> Barbara"
        );
        assert_eq!(cyclic(&["Jonas"]).to_string(), "cyclic: Jonas -> Jonas");
    }

    #[test]
    fn test_summary_counts_other_errors() {
        let mut err = MultiError::<String>::new();
        assert_eq!(err.to_string(), "(0 errors)");

        err.push(SortError::InvalidName("x1".into()));
        assert_eq!(err.to_string(), "invalid name: \"x1\"");

        err.push(SortError::InvalidName("y".into()));
        assert_eq!(err.to_string(), "invalid name: \"x1\" (and 1 other error)");

        err.push(SortError::MultipleRoots(Roots(vec!["a".into(), "b".into()])));
        assert_eq!(err.to_string(), "invalid name: \"x1\" (and 2 other errors)");
    }

    #[test]
    fn test_is_searches_nested_aggregates() {
        let inner: MultiError<String> = cyclic(&["a", "b"]).into();
        let outer: MultiError<String> = [
            SortError::InvalidName("1".into()),
            SortError::Aggregate(inner),
        ]
        .into_iter()
        .collect();

        assert!(outer.is(ErrorKind::Cyclic));
        assert!(outer.is(ErrorKind::InvalidName));
        assert!(!outer.is(ErrorKind::MultipleRoots));
        assert_eq!(outer.count(ErrorKind::Cyclic), 1);
        assert_eq!(outer.to_string(), "invalid name: \"1\" (and 1 other error)");
    }

    #[test]
    fn test_nested_aggregate_renders_its_summary() {
        let inner: MultiError<String> = [cyclic(&["a"]), cyclic(&["b"])].into_iter().collect();
        let err = SortError::Aggregate(inner);
        assert_eq!(err.to_string(), "cyclic: a -> a (and 1 other error)");
        assert_eq!(err.kind(), Some(ErrorKind::Cyclic));
    }

    #[test]
    fn test_map_keys_rewrites_every_key() {
        let err: MultiError<u32> = [
            SortError::Cyclic(CyclePath(vec![1, 2])),
            SortError::MultipleRoots(Roots(vec![3, 4])),
        ]
        .into_iter()
        .collect();

        let mapped = err.map_keys(|k| format!("k{k}"));

        assert_eq!(
            mapped.to_string(),
            "cyclic: k1 -> k2 -> k1 (and 1 other error)"
        );
        assert_eq!(
            mapped.into_vec()[1],
            SortError::MultipleRoots(Roots(vec!["k3".to_string(), "k4".to_string()]))
        );
    }
}
