//! Hash boundary of the tree.
//!
//! The tree never picks a hash function itself: every [`MerkleTree`](crate::MerkleTree)
//! is parameterised by a [`MerkleHasher`]. Two Keccak-family hashers ship with
//! the crate; anything deterministic with a fixed-size output can be plugged in.

use std::fmt::Debug;

use tiny_keccak::{Hasher, Keccak, Sha3};

/// Allows the use of a custom hashing algorithm
pub trait MerkleHasher {
    /// Digest produced by the hasher. Ordering of digests is the byte order of
    /// `as_ref()`.
    type MerkleHash: Debug + Eq + Copy + Send + Sync + AsRef<[u8]>;

    /// data -> hash
    fn hash<T: AsRef<[u8]>>(data: T) -> Self::MerkleHash;
}

/// Keccak-256 as used by Ethereum (`keccak256`). Default hasher for the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keccak256Hasher;

impl MerkleHasher for Keccak256Hasher {
    type MerkleHash = [u8; 32];

    fn hash<T: AsRef<[u8]>>(data: T) -> Self::MerkleHash {
        let mut output = [0u8; 32];
        let mut hasher = Keccak::v256();
        hasher.update(data.as_ref());
        hasher.finalize(&mut output);
        output
    }
}

/// FIPS-202 SHA3-256.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sha3_256Hasher;

impl MerkleHasher for Sha3_256Hasher {
    type MerkleHash = [u8; 32];

    fn hash<T: AsRef<[u8]>>(data: T) -> Self::MerkleHash {
        let mut output = [0u8; 32];
        let mut hasher = Sha3::v256();
        hasher.update(data.as_ref());
        hasher.finalize(&mut output);
        output
    }
}

/// Hasher used when none is named.
pub type DefaultMerkleHasher = Keccak256Hasher;

/// Orders two digests by their bytes, lower first.
pub fn canonical_order<D: AsRef<[u8]>>(a: D, b: D) -> (D, D) {
    if a.as_ref() <= b.as_ref() {
        (a, b)
    } else {
        (b, a)
    }
}

/// Parent digest of two children.
///
/// With `sorted` the children are put in canonical order first, so the result
/// does not depend on which side each child sits on. Otherwise `left` is
/// hashed first.
pub fn hash_pair<H: MerkleHasher>(
    left: &H::MerkleHash,
    right: &H::MerkleHash,
    sorted: bool,
) -> H::MerkleHash {
    let (first, second) = if sorted {
        canonical_order(left, right)
    } else {
        (left, right)
    };
    H::hash([first.as_ref(), second.as_ref()].concat())
}
