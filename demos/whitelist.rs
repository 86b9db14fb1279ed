//! Email whitelist demo.
//!
//! Builds a sorted-pair Keccak tree over a fixed whitelist, prints the root
//! and the tree, then checks whether one email is a member.
//!
//! ```text
//! cargo run --example whitelist -- --email randomEmail_2_@gmail.com
//! RUST_LOG=merkleproof=debug cargo run --example whitelist
//! ```

use anyhow::Result;
use clap::Parser;
use merkleproof::{proof, Keccak256Hasher, MerkleHasher, MerkleTree, OddNodePolicy, TreeOptions};
use tracing::info;
use tracing_subscriber::EnvFilter;

const WHITELIST: [&str; 3] = [
    "randomEmail_1_@gmail.com",
    "randomEmail_2_@gmail.com",
    "randomEmail_3_@gmail.com",
];

#[derive(Parser, Debug)]
#[command(name = "whitelist")]
#[command(about = "Check an email against a Merkle-committed whitelist")]
struct Cli {
    /// Email to check
    #[arg(long, default_value = "randomEmail_1_@gmail.com")]
    email: String,
    /// Promote unpaired nodes instead of hashing them with themselves.
    /// This reproduces the root merkletreejs prints for `{ sortPairs: true }`.
    #[arg(long)]
    carry_up: bool,
    /// Hash pairs left-to-right instead of in byte order
    #[arg(long)]
    unsorted: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let options = TreeOptions::default()
        .with_sort_pairs(!cli.unsorted)
        .with_odd_nodes(if cli.carry_up {
            OddNodePolicy::CarryUp
        } else {
            OddNodePolicy::DuplicateLast
        });
    info!(?options, entries = WHITELIST.len(), "building whitelist tree");

    let tree = MerkleTree::<Keccak256Hasher>::from_records_with_options(&WHITELIST, options)?;
    println!("The Merkle Root is: {}", tree.root_hex());
    println!("Printing the whole Merkle tree:\n{tree}");

    if is_member(&tree, &cli.email) {
        println!("{} is part of the tree.", cli.email);
    } else {
        println!("{} is NOT part of the tree.", cli.email);
    }
    Ok(())
}

fn is_member(tree: &MerkleTree<Keccak256Hasher>, email: &str) -> bool {
    let leaf = Keccak256Hasher::hash(email);
    match tree.proof(&leaf) {
        Ok(merkle_proof) => {
            info!(proof = ?merkle_proof.to_hex(), "proof for {email}");
            proof::verify_with::<Keccak256Hasher>(
                tree.options(),
                &merkle_proof,
                &leaf,
                &tree.root(),
            )
        }
        Err(err) => {
            info!(%err, "no proof for {email}");
            false
        }
    }
}
