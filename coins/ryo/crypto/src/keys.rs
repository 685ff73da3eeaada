use core::fmt;

use zeroize::Zeroizing;
use rand_core::{RngCore, CryptoRng};

use curve25519_dalek::scalar::Scalar;

use ryo_primitives::{CryptoError, PublicKey, SecretKey, KeyPair, hash_to_scalar, random_scalar};

/// Generate a fresh key pair.
pub fn generate_keys<R: RngCore + CryptoRng>(rng: &mut R) -> KeyPair {
  KeyPair::from_secret(SecretKey::from_scalar(random_scalar(rng)))
}

/// Regenerate a legacy key pair from its recovery key.
///
/// The recovery key is reduced, so any 32 bytes are accepted.
pub fn generate_keys_from_recovery(recovery_key: &[u8; 32]) -> KeyPair {
  KeyPair::from_secret(SecretKey::from_scalar(Scalar::from_bytes_mod_order(*recovery_key)))
}

/// The public key for an encoded secret key.
///
/// Unreduced secret keys are rejected.
pub fn secret_key_to_public_key(secret: &[u8; 32]) -> Result<PublicKey, CryptoError> {
  SecretKey::from_bytes(secret).map(|secret| secret.public_key()).ok_or(CryptoError::InvalidScalar)
}

/// The 128-bit secret a wallet's keys are derived from.
#[derive(Clone, PartialEq, Eq)]
pub struct WalletSecret(Zeroizing<[u8; 16]>);

impl fmt::Debug for WalletSecret {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("WalletSecret").finish_non_exhaustive()
  }
}

impl WalletSecret {
  /// Create a wallet secret from its bytes.
  pub fn from_bytes(bytes: [u8; 16]) -> WalletSecret {
    WalletSecret(Zeroizing::new(bytes))
  }

  /// The bytes of this wallet secret.
  pub fn as_bytes(&self) -> &[u8; 16] {
    &self.0
  }
}

/// Generate a fresh wallet secret.
pub fn generate_wallet_secret<R: RngCore + CryptoRng>(rng: &mut R) -> WalletSecret {
  let mut secret = Zeroizing::new([0; 16]);
  rng.fill_bytes(secret.as_mut_slice());
  WalletSecret(secret)
}

/// Derive a key pair from a wallet secret.
///
/// The secret key is `Hs(variant || secret)`, with the variant as a little-endian u32. Distinct
/// variants produce unrelated keys, which is how the spend and view keys are both derived from a
/// single secret.
pub fn generate_wallet_keys(secret: &WalletSecret, variant: u32) -> KeyPair {
  let mut preimage = Zeroizing::new([0; 20]);
  preimage[.. 4].copy_from_slice(&variant.to_le_bytes());
  preimage[4 ..].copy_from_slice(secret.as_bytes());
  KeyPair::from_secret(SecretKey::from_scalar(hash_to_scalar(preimage.as_slice())))
}
