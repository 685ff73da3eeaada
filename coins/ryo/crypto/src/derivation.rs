use curve25519_dalek::{constants::ED25519_BASEPOINT_TABLE, scalar::Scalar};

use ryo_io::varint_bytes;
use ryo_primitives::{CryptoError, PublicKey, KeyDerivation, SecretKey, hash_to_scalar};

/// Derive the shared secret `8 * (b * A)` for a public key `A` and a secret key `b`.
pub fn generate_key_derivation(
  public: &PublicKey,
  secret: &SecretKey,
) -> Result<KeyDerivation, CryptoError> {
  let public = public.decompress().ok_or(CryptoError::InvalidPoint)?;
  Ok(KeyDerivation::from_point(&(public * secret.scalar()).mul_by_cofactor()))
}

/// The scalar for the output at this index, `Hs(D || varint(index))`.
pub fn derivation_to_scalar(derivation: &KeyDerivation, index: u64) -> Scalar {
  hash_to_scalar([derivation.as_bytes().as_slice(), varint_bytes(index).as_slice()].concat())
}

/// The one-time public key for the output at this index, `base + Hs(D || index) * G`.
pub fn derive_public_key(
  derivation: &KeyDerivation,
  index: u64,
  base: &PublicKey,
) -> Result<PublicKey, CryptoError> {
  let base = base.decompress().ok_or(CryptoError::InvalidPoint)?;
  let offset = &derivation_to_scalar(derivation, index) * ED25519_BASEPOINT_TABLE;
  Ok(PublicKey::from_point(&(base + offset)))
}

/// The one-time secret key for the output at this index, `base + Hs(D || index)`.
pub fn derive_secret_key(derivation: &KeyDerivation, index: u64, base: &SecretKey) -> SecretKey {
  SecretKey::from_scalar(base.scalar() + derivation_to_scalar(derivation, index))
}

/// Recover the spend key an output was sent to, `out_key - Hs(D || index) * G`.
///
/// This is the inverse of `derive_public_key`, letting a wallet check an output's key against its
/// subaddress spend keys.
pub fn derive_subaddress_public_key(
  out_key: &PublicKey,
  derivation: &KeyDerivation,
  index: u64,
) -> Result<PublicKey, CryptoError> {
  let out_key = out_key.decompress().ok_or(CryptoError::InvalidPoint)?;
  let offset = &derivation_to_scalar(derivation, index) * ED25519_BASEPOINT_TABLE;
  Ok(PublicKey::from_point(&(out_key - offset)))
}
