use zeroize::Zeroizing;
use rand_core::{RngCore, CryptoRng};

use curve25519_dalek::{constants::ED25519_BASEPOINT_TABLE, scalar::Scalar, edwards::EdwardsPoint};

use ryo_primitives::{CryptoError, PublicKey, SecretKey, hash_to_scalar, random_scalar};

use crate::Signature;

/// A proof a transaction was sent to a recipient.
///
/// For a transaction key `R = r * G` and recipient view key `A`, this proves `D = r * A` without
/// revealing `r`. When sending to a subaddress, the transaction key is `R = r * B` for the
/// subaddress spend key `B`, which is then used as the base instead of `G`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TxProof(pub Signature);

// Hs(prefix_hash || D || X || Y)
#[allow(non_snake_case)]
fn challenge(prefix_hash: &[u8; 32], D: &PublicKey, X: &EdwardsPoint, Y: &EdwardsPoint) -> Scalar {
  let mut buf = [0; 128];
  buf[.. 32].copy_from_slice(prefix_hash);
  buf[32 .. 64].copy_from_slice(D.as_bytes());
  buf[64 .. 96].copy_from_slice(X.compress().as_bytes());
  buf[96 ..].copy_from_slice(Y.compress().as_bytes());
  hash_to_scalar(buf)
}

#[allow(non_snake_case)]
impl TxProof {
  /// Prove `D = r * A`.
  ///
  /// Errors if any of the points are invalid. Panics if `R` or `D` weren't produced by `r`.
  pub fn sign<Rng: RngCore + CryptoRng>(
    rng: &mut Rng,
    prefix_hash: &[u8; 32],
    R: &PublicKey,
    A: &PublicKey,
    B: Option<&PublicKey>,
    D: &PublicKey,
    r: &SecretKey,
  ) -> Result<TxProof, CryptoError> {
    let R_point = R.decompress().ok_or(CryptoError::InvalidPoint)?;
    let A_point = A.decompress().ok_or(CryptoError::InvalidPoint)?;
    let B_point = B.map(|B| B.decompress().ok_or(CryptoError::InvalidPoint)).transpose()?;
    let D_point = D.decompress().ok_or(CryptoError::InvalidPoint)?;

    let base = |scalar: &Scalar| match B_point {
      Some(B) => B * scalar,
      None => scalar * ED25519_BASEPOINT_TABLE,
    };

    assert_eq!(base(r.scalar()), R_point, "R wasn't produced by r");
    assert_eq!(A_point * r.scalar(), D_point, "D wasn't produced by r");

    let k = Zeroizing::new(random_scalar(rng));
    let c = challenge(prefix_hash, D, &base(&k), &(A_point * *k));
    Ok(TxProof(Signature { c, r: *k - (c * r.scalar()) }))
  }

  /// Verify this proof.
  pub fn verify(
    &self,
    prefix_hash: &[u8; 32],
    R: &PublicKey,
    A: &PublicKey,
    B: Option<&PublicKey>,
    D: &PublicKey,
  ) -> bool {
    let (Some(R_point), Some(A_point), Some(D_point)) =
      (R.decompress(), A.decompress(), D.decompress())
    else {
      return false;
    };
    let B_point = match B.map(PublicKey::decompress) {
      Some(None) => return false,
      Some(Some(B)) => Some(B),
      None => None,
    };

    let Signature { c, r } = self.0;
    let X = match B_point {
      Some(B_point) => (R_point * c) + (B_point * r),
      None => EdwardsPoint::vartime_double_scalar_mul_basepoint(&c, &R_point, &r),
    };
    let Y = (D_point * c) + (A_point * r);
    challenge(prefix_hash, D, &X, &Y) == c
  }
}
