//! Merkle proofs and their verification.
//!
//! A proof is the chain of sibling hashes from a leaf up to, but not
//! including, the root. Verification folds the leaf through that chain and
//! compares the result with a claimed root. It needs neither the tree nor
//! any of its other leaves.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::hashing::{hash_pair, MerkleHasher};
use crate::options::TreeOptions;

/// Left or Right child of a parent
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Left sibling
    Left,
    /// Right sibling
    Right,
}

/// sibling hash and side of node
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub struct ProofNode<D> {
    /// The sibling's hash
    pub hash: D,
    /// Where the sibling sits relative to the node being proven
    pub side: Side,
}

/// Chain of siblings from a leaf up to the root.
///
/// Serialises as a plain array of nodes.
#[derive(Debug, PartialEq, Eq, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MerkleProof<D> {
    nodes: Vec<ProofNode<D>>,
}

impl<D> MerkleProof<D> {
    /// Wrap an ordered list of nodes, leaf level first.
    pub fn new(nodes: Vec<ProofNode<D>>) -> Self {
        MerkleProof { nodes }
    }

    /// Proof steps, leaf level first.
    pub fn nodes(&self) -> &[ProofNode<D>] {
        &self.nodes
    }

    /// Mutable access to the steps.
    pub fn nodes_mut(&mut self) -> &mut [ProofNode<D>] {
        &mut self.nodes
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True for the proof of a single-leaf tree
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over the steps, leaf level first.
    pub fn iter(&self) -> std::slice::Iter<'_, ProofNode<D>> {
        self.nodes.iter()
    }
}

impl<D: AsRef<[u8]>> MerkleProof<D> {
    /// Sibling hashes as `0x`-prefixed hex strings.
    pub fn to_hex(&self) -> Vec<String> {
        self.nodes
            .iter()
            .map(|node| format!("0x{}", hex::encode(node.hash.as_ref())))
            .collect()
    }
}

impl<D> FromIterator<ProofNode<D>> for MerkleProof<D> {
    fn from_iter<I: IntoIterator<Item = ProofNode<D>>>(iter: I) -> Self {
        MerkleProof::new(iter.into_iter().collect())
    }
}

impl<'a, D> IntoIterator for &'a MerkleProof<D> {
    type Item = &'a ProofNode<D>;
    type IntoIter = std::slice::Iter<'a, ProofNode<D>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Verify a proof built with sorted pairs, the default.
///
/// Sides are ignored: each step hashes the running digest and the sibling in
/// byte order. An empty proof verifies iff `leaf == root`.
///
/// ```
/// use merkleproof::{proof, Keccak256Hasher, MerkleHasher, MerkleTree};
///
/// let tree = MerkleTree::<Keccak256Hasher>::from_records(&["a", "b", "c"]).unwrap();
/// let leaf = Keccak256Hasher::hash("b");
/// let proof = tree.proof(&leaf).unwrap();
/// assert!(proof::verify::<Keccak256Hasher>(&proof, &leaf, &tree.root()));
/// ```
pub fn verify<H: MerkleHasher>(
    proof: &MerkleProof<H::MerkleHash>,
    leaf: &H::MerkleHash,
    root: &H::MerkleHash,
) -> bool {
    fold_root::<H>(proof, leaf, true) == *root
}

/// Verify a proof under the pairing rule of `options`.
///
/// Only `sort_pairs` matters here: without it each step concatenates the
/// sibling on the side it records.
pub fn verify_with<H: MerkleHasher>(
    options: &TreeOptions,
    proof: &MerkleProof<H::MerkleHash>,
    leaf: &H::MerkleHash,
    root: &H::MerkleHash,
) -> bool {
    fold_root::<H>(proof, leaf, options.sort_pairs) == *root
}

/// Hash a leaf up through the proof and return the resulting root.
fn fold_root<H: MerkleHasher>(
    proof: &MerkleProof<H::MerkleHash>,
    leaf: &H::MerkleHash,
    sorted: bool,
) -> H::MerkleHash {
    let mut running_hash = *leaf;
    for (step, node) in proof.into_iter().enumerate() {
        running_hash = match node.side {
            Side::Left => hash_pair::<H>(&node.hash, &running_hash, sorted),
            Side::Right => hash_pair::<H>(&running_hash, &node.hash, sorted),
        };
        trace!(step, hash = %hex::encode(running_hash.as_ref()), "folded proof step");
    }
    running_hash
}
