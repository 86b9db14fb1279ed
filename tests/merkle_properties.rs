use merkleproof::{
    proof, Keccak256Hasher, MerkleError, MerkleHasher, MerkleTree, OddNodePolicy, Sha3_256Hasher,
    TreeOptions,
};
use proptest::prelude::*;

/// 64-bit FNV-1a, fast and deterministic; stands in for the real hash where
/// collision resistance is not under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FnvHasher;

impl MerkleHasher for FnvHasher {
    type MerkleHash = [u8; 8];

    fn hash<T: AsRef<[u8]>>(data: T) -> Self::MerkleHash {
        let mut state: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in data.as_ref() {
            state ^= u64::from(*byte);
            state = state.wrapping_mul(0x0000_0100_0000_01b3);
        }
        state.to_be_bytes()
    }
}

fn make_leaves<H: MerkleHasher>(count: usize) -> Vec<H::MerkleHash> {
    (0..count)
        .map(|i| H::hash(format!("leaf-{i}")))
        .collect()
}

fn odd_policy() -> impl Strategy<Value = OddNodePolicy> {
    prop_oneof![
        Just(OddNodePolicy::DuplicateLast),
        Just(OddNodePolicy::CarryUp)
    ]
}

fn tree_options() -> impl Strategy<Value = TreeOptions> {
    (any::<bool>(), any::<bool>(), odd_policy()).prop_map(|(sort_pairs, sort_leaves, odd)| {
        TreeOptions::default()
            .with_sort_pairs(sort_pairs)
            .with_sort_leaves(sort_leaves)
            .with_odd_nodes(odd)
    })
}

#[test]
fn empty_input_is_rejected() {
    let err = MerkleTree::<Keccak256Hasher>::from_leaves(Vec::new()).unwrap_err();
    assert_eq!(err, MerkleError::EmptyInput);
}

#[test]
fn unknown_leaf_is_rejected() {
    let tree = MerkleTree::<Keccak256Hasher>::from_leaves(make_leaves::<Keccak256Hasher>(5))
        .unwrap();
    let err = tree.proof(&Keccak256Hasher::hash("missing")).unwrap_err();
    assert!(matches!(err, MerkleError::LeafNotFound { .. }));
}

#[test]
fn single_leaf_tree() {
    let leaf = Keccak256Hasher::hash("solo");
    let tree = MerkleTree::<Keccak256Hasher>::from_leaves(vec![leaf]).unwrap();
    assert_eq!(tree.root(), leaf);
    let proof = tree.proof(&leaf).unwrap();
    assert!(proof.is_empty());
    assert!(proof::verify::<Keccak256Hasher>(&proof, &leaf, &leaf));
}

#[test]
fn three_leaf_structure() {
    let x = Keccak256Hasher::hash("x");
    let y = Keccak256Hasher::hash("y");
    let z = Keccak256Hasher::hash("z");
    let sorted = |a: [u8; 32], b: [u8; 32]| {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        Keccak256Hasher::hash([lo, hi].concat())
    };
    let tree = MerkleTree::<Keccak256Hasher>::from_leaves(vec![x, y, z]).unwrap();
    assert_eq!(tree.levels()[1], vec![sorted(x, y), sorted(z, z)]);
    assert_eq!(tree.root(), sorted(sorted(x, y), sorted(z, z)));
}

#[test]
fn hashers_are_interchangeable() {
    let records = ["a", "b", "c", "d"];
    let keccak = MerkleTree::<Keccak256Hasher>::from_records(&records).unwrap();
    let sha3 = MerkleTree::<Sha3_256Hasher>::from_records(&records).unwrap();
    assert_ne!(keccak.root(), sha3.root());
    let leaf = Sha3_256Hasher::hash("c");
    let proof = sha3.proof(&leaf).unwrap();
    assert!(proof::verify::<Sha3_256Hasher>(&proof, &leaf, &sha3.root()));
}

#[test]
fn proof_serde_roundtrip_still_verifies() {
    let tree = MerkleTree::<Keccak256Hasher>::from_leaves(make_leaves::<Keccak256Hasher>(6))
        .unwrap();
    let leaf = tree.leaves()[4];
    let proof = tree.proof(&leaf).unwrap();
    let json = serde_json::to_string(&proof).unwrap();
    let decoded: merkleproof::MerkleProof<[u8; 32]> = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, proof);
    assert!(proof::verify::<Keccak256Hasher>(&decoded, &leaf, &tree.root()));
}

proptest! {
    #[test]
    fn build_is_deterministic(count in 1usize..64, options in tree_options()) {
        let a = MerkleTree::<FnvHasher>::with_options(make_leaves::<FnvHasher>(count), options).unwrap();
        let b = MerkleTree::<FnvHasher>::with_options(make_leaves::<FnvHasher>(count), options).unwrap();
        prop_assert_eq!(a.root(), b.root());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn every_leaf_verifies(count in 1usize..64, options in tree_options()) {
        let tree = MerkleTree::<FnvHasher>::with_options(make_leaves::<FnvHasher>(count), options).unwrap();
        let root = tree.root();
        for leaf in tree.leaves() {
            let proof = tree.proof(leaf).unwrap();
            prop_assert!(proof::verify_with::<FnvHasher>(&options, &proof, leaf, &root));
            prop_assert!(tree.verify(&proof, leaf, &root));
        }
    }

    #[test]
    fn proof_length_matches_depth(count in 1usize..128) {
        let tree = MerkleTree::<FnvHasher>::from_leaves(make_leaves::<FnvHasher>(count)).unwrap();
        let expected = count.next_power_of_two().trailing_zeros() as usize;
        prop_assert_eq!(tree.depth(), expected);
        for index in 0..count {
            prop_assert_eq!(tree.proof_for_index(index).unwrap().len(), expected);
        }
    }

    #[test]
    fn wrong_root_is_rejected(count in 3usize..48, index in any::<prop::sample::Index>()) {
        let tree = MerkleTree::<Keccak256Hasher>::from_leaves(make_leaves::<Keccak256Hasher>(count)).unwrap();
        let index = index.index(count);
        let leaf = tree.leaves()[index];
        let proof = tree.proof_for_index(index).unwrap();
        let mut wrong_root = tree.root();
        wrong_root[0] ^= 0x80;
        prop_assert!(!proof::verify::<Keccak256Hasher>(&proof, &leaf, &wrong_root));
        // an interior node is not the root either
        let interior = tree.levels()[1][0];
        prop_assert!(!proof::verify::<Keccak256Hasher>(&proof, &leaf, &interior));
    }

    #[test]
    fn tampered_sibling_is_rejected(
        count in 2usize..48,
        index in any::<prop::sample::Index>(),
        step in any::<prop::sample::Index>(),
        byte in 0usize..32,
        mask in 1u8..=255,
    ) {
        let tree = MerkleTree::<Keccak256Hasher>::from_leaves(make_leaves::<Keccak256Hasher>(count)).unwrap();
        let index = index.index(count);
        let leaf = tree.leaves()[index];
        let mut proof = tree.proof_for_index(index).unwrap();
        let step = step.index(proof.len());
        proof.nodes_mut()[step].hash[byte] ^= mask;
        prop_assert!(!proof::verify::<Keccak256Hasher>(&proof, &leaf, &tree.root()));
    }
}
