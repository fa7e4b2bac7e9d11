/// How the validator decides that a graph has more than one root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RootDetection {
    /// Keys connected by any chain of relations, in either direction,
    /// form one component. Each component with a key outside every cycle
    /// that has dependents and no prerequisite contributes exactly one
    /// root, however many such keys it has.
    #[default]
    Components,
    /// Walks the sorted keys and counts the edges reachable from each
    /// one. A key whose count grows compared to the previous key starts
    /// a new tree.
    ///
    /// This is order sensitive: a tree whose smaller branch is emitted
    /// before a larger sibling branch reports a second root.
    SubtreeDelta,
}

/// Knobs for a single sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOptions {
    pub(crate) root_detection: RootDetection,
    pub(crate) min_name_len: usize,
}

impl SortOptions {
    pub const DEFAULT_MIN_NAME_LEN: usize = 2;

    pub fn new() -> Self {
        SortOptions {
            root_detection: RootDetection::default(),
            min_name_len: Self::DEFAULT_MIN_NAME_LEN,
        }
    }

    #[must_use]
    pub fn root_detection(mut self, root_detection: RootDetection) -> Self {
        self.root_detection = root_detection;
        self
    }

    /// Minimum number of characters in a name accepted by
    /// [`NamedGraph`](crate::named::NamedGraph).
    #[must_use]
    pub fn min_name_len(mut self, min_name_len: usize) -> Self {
        self.min_name_len = min_name_len;
        self
    }

    pub fn get_root_detection(&self) -> RootDetection {
        self.root_detection
    }

    pub fn get_min_name_len(&self) -> usize {
        self.min_name_len
    }
}

impl Default for SortOptions {
    fn default() -> Self {
        Self::new()
    }
}
