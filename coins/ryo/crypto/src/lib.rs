#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

pub use ryo_primitives::{
  CryptoError, PublicKey, KeyImage, KeyDerivation, SecretKey, KeyPair, check_key, check_scalar,
  hash_to_scalar, random_scalar,
};

mod keys;
pub use keys::*;

mod derivation;
pub use derivation::*;

mod key_image;
pub use key_image::generate_key_image;

mod signature;
pub use signature::Signature;

mod tx_proof;
pub use tx_proof::TxProof;

mod ring_signature;
pub use ring_signature::RingSignature;

#[cfg(test)]
mod tests;
