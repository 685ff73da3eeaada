#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]

use sha3::{Digest, Keccak256};

mod hash_to_point;
pub use hash_to_point::hash_to_point;

#[cfg(test)]
mod tests;

/// The Keccak-256 hash function, as used throughout Ryo.
///
/// This is the original Keccak padding, not the finalized SHA3-256.
pub fn keccak256(data: impl AsRef<[u8]>) -> [u8; 32] {
  Keccak256::digest(data.as_ref()).into()
}
