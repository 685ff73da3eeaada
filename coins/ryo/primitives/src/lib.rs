#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

use rand_core::{RngCore, CryptoRng};

use curve25519_dalek::scalar::Scalar;

pub use ryo_generators::{keccak256, hash_to_point};

mod keys;
pub use keys::*;

mod offsets;
pub use offsets::*;

#[cfg(test)]
mod tests;

/// An error from a cryptographic operation on untrusted input.
#[derive(Clone, Copy, PartialEq, Eq, Debug, thiserror::Error)]
pub enum CryptoError {
  /// A point wasn't a canonical encoding of a curve point.
  #[error("invalid point")]
  InvalidPoint,
  /// A scalar wasn't reduced.
  #[error("invalid scalar")]
  InvalidScalar,
}

/// Hash the provided data to a scalar via keccak256(data) % l.
///
/// Unlike the proofs built on top of it, this does not reject a zero result.
pub fn hash_to_scalar(data: impl AsRef<[u8]>) -> Scalar {
  Scalar::from_bytes_mod_order(keccak256(data))
}

// 15 * l, as little-endian u64 words
const FIFTEEN_L: [u64; 4] = [0x2913ce8b72676ae3, 0x3910a40b8c82308f, 1, 0xf000000000000000];

/// If this 256-bit integer is non-zero and less than `15 * l`.
///
/// `15 * l` is the largest multiple of `l` less than `2**256`, so reducing a uniformly sampled
/// value which passes this check yields a uniform scalar.
pub fn scalar_ok(bytes: &[u8; 32]) -> bool {
  let mut words = [0; 4];
  for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(8)) {
    let mut buf = [0; 8];
    buf.copy_from_slice(chunk);
    *word = u64::from_le_bytes(buf);
  }

  if words == [0; 4] {
    return false;
  }
  // Compare from the most-significant word down
  words.iter().rev().lt(FIFTEEN_L.iter().rev())
}

/// If these bytes are a canonical (fully reduced) scalar.
pub fn check_scalar(bytes: &[u8; 32]) -> bool {
  bool::from(Scalar::from_canonical_bytes(*bytes).is_some())
}

/// If these bytes are the canonical encoding of a curve point.
pub fn check_key(bytes: &[u8; 32]) -> bool {
  ryo_io::decompress_point(*bytes).is_some()
}

/// Sample a uniform scalar.
///
/// 32 bytes are drawn until they pass `scalar_ok`, and then reduced.
pub fn random_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> Scalar {
  let mut bytes = zeroize::Zeroizing::new([0; 32]);
  loop {
    rng.fill_bytes(&mut *bytes);
    if scalar_ok(&bytes) {
      break;
    }
  }
  Scalar::from_bytes_mod_order(*bytes)
}
