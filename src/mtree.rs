//! A Merkle Tree is a hashed datastructure that allows the contruction of proofs.
//! a proof allows proving membership in the tree to a party that only knows the root hash.
//!
//! The tree is built once from its leaves and never changes afterwards. Every
//! level is kept so that proofs can be read straight out of it.

#![allow(type_alias_bounds)]

use std::fmt;

use tracing::{debug, trace};

use crate::error::{MerkleError, MerkleResult};
use crate::hashing::{hash_pair, DefaultMerkleHasher, MerkleHasher};
use crate::options::{OddNodePolicy, TreeOptions};
use crate::proof::{self, MerkleProof, ProofNode, Side};

/// Build merkle trees and get proofs from leaf hashes
///
/// # Examples
///
/// ```
/// use merkleproof::{DefaultMerkleHasher, MerkleHasher, MerkleTree};
///
/// let leaves: Vec<_> = ["foo", "bar", "baz"]
///     .iter()
///     .map(DefaultMerkleHasher::hash)
///     .collect();
/// let tree = MerkleTree::<DefaultMerkleHasher>::from_leaves(leaves.clone()).unwrap();
/// let proof = tree.proof(&leaves[2]).unwrap();
/// assert!(tree.verify(&proof, &leaves[2], &tree.root()));
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct MerkleTree<H: MerkleHasher = DefaultMerkleHasher> {
    levels: Vec<Level<H>>,
    options: TreeOptions,
}

/// Level in tree
type Level<H: MerkleHasher> = Vec<H::MerkleHash>;

impl<H: MerkleHasher> MerkleTree<H> {
    /// Build a tree over already hashed leaves with the default options.
    pub fn from_leaves(leaves: Vec<H::MerkleHash>) -> MerkleResult<Self> {
        Self::with_options(leaves, TreeOptions::default())
    }

    /// Build a tree over already hashed leaves.
    ///
    /// Fails with [`MerkleError::EmptyInput`] when `leaves` is empty.
    pub fn with_options(
        mut leaves: Vec<H::MerkleHash>,
        options: TreeOptions,
    ) -> MerkleResult<Self> {
        if leaves.is_empty() {
            return Err(MerkleError::EmptyInput);
        }
        if options.sort_leaves {
            leaves.sort_by(|a, b| a.as_ref().cmp(b.as_ref()));
        }
        let levels = build_levels::<H>(leaves, &options);
        let tree = MerkleTree { levels, options };
        debug!(
            leaves = tree.leaf_count(),
            depth = tree.depth(),
            sort_pairs = options.sort_pairs,
            odd_nodes = ?options.odd_nodes,
            root = %tree.root_hex(),
            "built merkle tree"
        );
        Ok(tree)
    }

    /// Hash each record with `H` and build a tree over the results.
    pub fn from_records<T: AsRef<[u8]>>(records: &[T]) -> MerkleResult<Self> {
        Self::from_records_with_options(records, TreeOptions::default())
    }

    /// Hash each record with `H` and build a tree over the results.
    pub fn from_records_with_options<T: AsRef<[u8]>>(
        records: &[T],
        options: TreeOptions,
    ) -> MerkleResult<Self> {
        let leaves: Level<H> = records.iter().map(H::hash).collect();
        Self::with_options(leaves, options)
    }

    /// return the root hash
    pub fn root(&self) -> H::MerkleHash {
        self.levels[self.levels.len() - 1][0]
    }

    /// Root hash as a `0x`-prefixed hex string
    pub fn root_hex(&self) -> String {
        to_hex(&self.root())
    }

    /// Leaves in tree order
    pub fn leaves(&self) -> &[H::MerkleHash] {
        &self.levels[0]
    }

    /// Number of leaves
    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// All levels, leaves first and root last
    pub fn levels(&self) -> &[Vec<H::MerkleHash>] {
        &self.levels
    }

    /// All levels as hex strings, leaves first
    pub fn hex_levels(&self) -> Vec<Vec<String>> {
        self.levels
            .iter()
            .map(|level| level.iter().map(to_hex).collect())
            .collect()
    }

    /// Options the tree was built with
    pub fn options(&self) -> &TreeOptions {
        &self.options
    }

    /// Depth is the distance of the leaves from the root
    /// ```text
    ///          0
    ///        /   \
    ///       1     1
    ///      / \   / \
    ///     2   2 2   2
    /// ```
    ///
    /// A single-leaf tree has depth 0.
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// Position of the first occurrence of `leaf`
    pub fn leaf_index(&self, leaf: &H::MerkleHash) -> Option<usize> {
        self.leaves().iter().position(|elem| elem == leaf)
    }

    /// Return true if leaf is in the tree
    pub fn contains(&self, leaf: &H::MerkleHash) -> bool {
        self.leaf_index(leaf).is_some()
    }

    /// Generate a merkle proof for a leaf hash.
    ///
    /// The first occurrence is proven when the leaf appears more than once.
    /// Fails with [`MerkleError::LeafNotFound`] if the leaf is not in the tree.
    pub fn proof(&self, leaf: &H::MerkleHash) -> MerkleResult<MerkleProof<H::MerkleHash>> {
        let idx = self
            .leaf_index(leaf)
            .ok_or_else(|| MerkleError::leaf_not_found(leaf))?;
        Ok(self.proof_at(idx))
    }

    /// Generate a merkle proof for the leaf at `index`.
    pub fn proof_for_index(&self, index: usize) -> MerkleResult<MerkleProof<H::MerkleHash>> {
        if index >= self.leaf_count() {
            return Err(MerkleError::IndexOutOfRange {
                index,
                len: self.leaf_count(),
            });
        }
        Ok(self.proof_at(index))
    }

    /// Verify a proof with this tree's pairing rule.
    ///
    /// Only the options are consulted, never the levels, so this gives the same
    /// answer as [`proof::verify_with`] for any proof, leaf and root.
    pub fn verify(
        &self,
        proof: &MerkleProof<H::MerkleHash>,
        leaf: &H::MerkleHash,
        root: &H::MerkleHash,
    ) -> bool {
        proof::verify_with::<H>(&self.options, proof, leaf, root)
    }

    fn proof_at(&self, leaf_idx: usize) -> MerkleProof<H::MerkleHash> {
        let proof: MerkleProof<H::MerkleHash> = self.levels[..self.depth()]
            .iter()
            .enumerate()
            .filter_map(|(height, level)| {
                // halving once per level gives the node's index
                let idx = leaf_idx >> height;
                // determine if sibling node is left or right
                let sibling = if idx % 2 == 0 { idx + 1 } else { idx - 1 };
                match level.get(sibling) {
                    Some(&hash) => {
                        let side = if sibling > idx { Side::Right } else { Side::Left };
                        Some(ProofNode { hash, side })
                    }
                    // unpaired last node
                    None => match self.options.odd_nodes {
                        OddNodePolicy::DuplicateLast => Some(ProofNode {
                            hash: level[idx],
                            side: Side::Right,
                        }),
                        OddNodePolicy::CarryUp => None,
                    },
                }
            })
            .collect();
        debug!(index = leaf_idx, steps = proof.len(), "generated merkle proof");
        proof
    }
}

impl<H: MerkleHasher> fmt::Display for MerkleTree<H> {
    /// One line per level, root first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (height, level) in self.levels.iter().enumerate().rev() {
            write!(f, "level {height}:")?;
            for hash in level {
                write!(f, " {}", to_hex(hash))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Generate every level from the leaves up to the root
fn build_levels<H: MerkleHasher>(leaves: Level<H>, options: &TreeOptions) -> Vec<Level<H>> {
    let mut levels = vec![leaves];
    while let Some(level) = levels.last().filter(|level| level.len() > 1) {
        let next = parent_level::<H>(level, options);
        trace!(height = levels.len(), nodes = next.len(), "hashed merkle level");
        levels.push(next);
    }
    levels
}

#[cfg(not(feature = "parallel"))]
fn parent_level<H: MerkleHasher>(level: &[H::MerkleHash], options: &TreeOptions) -> Level<H> {
    level
        .chunks(2)
        .map(|pair| parent_of::<H>(pair, options))
        .collect()
}

#[cfg(feature = "parallel")]
fn parent_level<H: MerkleHasher>(level: &[H::MerkleHash], options: &TreeOptions) -> Level<H> {
    use rayon::prelude::*;
    level
        .par_chunks(2)
        .map(|pair| parent_of::<H>(pair, options))
        .collect()
}

/// Parent of one chunk of at most two children
fn parent_of<H: MerkleHasher>(pair: &[H::MerkleHash], options: &TreeOptions) -> H::MerkleHash {
    let left = &pair[0];
    match pair.get(1) {
        Some(right) => hash_pair::<H>(left, right, options.sort_pairs),
        None => match options.odd_nodes {
            OddNodePolicy::DuplicateLast => hash_pair::<H>(left, left, options.sort_pairs),
            OddNodePolicy::CarryUp => *left,
        },
    }
}

fn to_hex<D: AsRef<[u8]>>(hash: &D) -> String {
    format!("0x{}", hex::encode(hash.as_ref()))
}
