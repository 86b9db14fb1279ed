//! A Merkle Tree is a hashed datastructure that can store the hashes of data and construct proofs.
//! Merkle proofs allow proving membership in a tree to a party that only knows the root hash.
//!
//! The tree is built once over a fixed list of leaf hashes and never changes.
//! It keeps every level, so proofs are read out of it directly; verification
//! only needs the proof, the leaf and a root.
//!
//! By default a parent node's hash is the concatenation of its children in *ascending order.*
//! ```text
//! parent hash = hash(lower_child, higher_child)
//! ```
//! An unpaired last node is hashed with a copy of itself. Both rules can be
//! changed through [`TreeOptions`].
//!
//! # Examples
//!
//! ```
//! use merkleproof::{proof, Keccak256Hasher, MerkleHasher, MerkleTree};
//!
//! // instantiate a tree from a sequence of elements
//! let elements = vec!["foo", "bar", "baz"];
//! let tree = MerkleTree::<Keccak256Hasher>::from_records(&elements).expect("non-empty");
//!
//! // generate proofs
//! let leaf = Keccak256Hasher::hash("baz");
//! let proof = tree.proof(&leaf).expect("data not in tree");
//!
//! // verify proofs without the tree
//! let root = tree.root();
//! assert!(proof::verify::<Keccak256Hasher>(&proof, &leaf, &root));
//!
//! // use a custom hasher
//! #
//! let tree = MerkleTree::<MyHasher>::from_records(&elements).unwrap();
//! #
//! # struct MyHasher;
//! #
//! # impl MerkleHasher for MyHasher {
//! #     type MerkleHash = [u8; 32];
//! #
//! #     fn hash<T: AsRef<[u8]>>(data: T) -> Self::MerkleHash {
//! #         // do hashing and return result
//! #         [0; 32]
//! #     }
//! # }
//! ```

#![warn(missing_docs, rust_2018_idioms, missing_debug_implementations)]

pub mod error;
pub use error::{MerkleError, MerkleResult};
pub mod hashing;
pub use hashing::{DefaultMerkleHasher, Keccak256Hasher, MerkleHasher, Sha3_256Hasher};
pub mod mtree;
pub use mtree::MerkleTree;
pub mod options;
pub use options::{OddNodePolicy, TreeOptions};
pub mod proof;
pub use proof::{MerkleProof, ProofNode, Side};
