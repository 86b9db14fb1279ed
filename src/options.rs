//! Construction knobs for a tree.

use serde::{Deserialize, Serialize};

/// What happens to the last node of a level with an odd number of nodes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OddNodePolicy {
    /// Hash the node together with a copy of itself.
    #[default]
    DuplicateLast,
    /// Promote the node to the next level unchanged.
    CarryUp,
}

/// Options fixed at construction time and kept by the tree.
///
/// Missing fields fall back to their defaults when deserialised, so a config
/// file only needs to name what it changes.
///
/// ```
/// use merkleproof::{OddNodePolicy, TreeOptions};
///
/// let options = TreeOptions::default().with_odd_nodes(OddNodePolicy::CarryUp);
/// assert!(options.sort_pairs);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeOptions {
    /// Hash every pair in byte order instead of left-to-right.
    pub sort_pairs: bool,
    /// Sort the leaves by byte value before building.
    pub sort_leaves: bool,
    /// Handling of unpaired nodes.
    pub odd_nodes: OddNodePolicy,
}

impl Default for TreeOptions {
    fn default() -> Self {
        TreeOptions {
            sort_pairs: true,
            sort_leaves: false,
            odd_nodes: OddNodePolicy::default(),
        }
    }
}

impl TreeOptions {
    /// Set pair sorting
    pub fn with_sort_pairs(mut self, sort_pairs: bool) -> Self {
        self.sort_pairs = sort_pairs;
        self
    }

    /// Set leaf sorting
    pub fn with_sort_leaves(mut self, sort_leaves: bool) -> Self {
        self.sort_leaves = sort_leaves;
        self
    }

    /// Set the odd node policy
    pub fn with_odd_nodes(mut self, odd_nodes: OddNodePolicy) -> Self {
        self.odd_nodes = odd_nodes;
        self
    }
}
