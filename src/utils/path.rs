use fxhash::FxHashSet;

/// Vertices on the current depth-first path, root first.
///
/// Keeps the ordered path and a set of its members in step so ancestor
/// checks are O(1).
#[derive(Default)]
pub(crate) struct AncestorPath {
    path: Vec<usize>,
    members: FxHashSet<usize>,
}

impl AncestorPath {
    pub(crate) fn new() -> Self {
        AncestorPath::default()
    }

    #[inline]
    pub(crate) fn push(&mut self, vertex: usize) {
        self.path.push(vertex);
        self.members.insert(vertex);
    }

    #[inline]
    pub(crate) fn pop(&mut self) -> Option<usize> {
        let vertex = self.path.pop()?;
        self.members.remove(&vertex);
        Some(vertex)
    }

    #[inline]
    pub(crate) fn contains(&self, vertex: usize) -> bool {
        self.members.contains(&vertex)
    }

    /// The part of the path starting at `vertex`, if it is on the path.
    pub(crate) fn suffix_from(&self, vertex: usize) -> Option<&[usize]> {
        if !self.contains(vertex) {
            return None;
        }
        let start = self.path.iter().rposition(|&v| v == vertex)?;
        Some(&self.path[start..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracks_membership_with_order() {
        let mut path = AncestorPath::new();
        path.push(3);
        path.push(1);
        path.push(4);
        assert!(path.contains(1));
        assert_eq!(path.suffix_from(1), Some(&[1, 4][..]));
        assert_eq!(path.suffix_from(9), None);

        assert_eq!(path.pop(), Some(4));
        assert!(!path.contains(4));
        assert_eq!(path.suffix_from(3), Some(&[3, 1][..]));
    }
}
