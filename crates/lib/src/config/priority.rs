/// Decides whether a node supersedes, or is superseded by, a sibling declared
/// at the same path.
///
/// When a child is registered at a path another child already occupies, the
/// incoming node replaces the existing one if the existing node is
/// [`Lowest`](NodePriority::Lowest) or the incoming priority is strictly
/// higher. Otherwise the incoming node is discarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodePriority {
    /// Always overwritten, even by new `Lowest` nodes.
    Lowest = -2,
    /// Only overwritten by `Normal` to `Highest` nodes.
    Low = -1,
    /// Only overwritten by `High` or `Highest` nodes.
    #[default]
    Normal = 0,
    /// Only overwritten by `Highest` nodes.
    High = 1,
    /// Never overwritten.
    Highest = 2,
}

impl NodePriority {
    /// The numeric priority value.
    pub fn value(self) -> i8 {
        self as i8
    }

    /// Whether a node with this priority replaces `existing` at the same path.
    pub fn supersedes(self, existing: NodePriority) -> bool {
        existing == NodePriority::Lowest || self > existing
    }
}
