use std::io::{self, Read, Write};

use zeroize::Zeroizing;
use rand_core::{RngCore, CryptoRng};

use curve25519_dalek::{
  constants::ED25519_BASEPOINT_TABLE,
  scalar::Scalar,
  edwards::{EdwardsPoint, CompressedEdwardsY},
};

use ryo_io::{read_scalar, write_scalar};
use ryo_primitives::{PublicKey, SecretKey, hash_to_scalar, random_scalar};

/// A Schnorr signature, also the `(c, r)` pair for a single ring member.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Signature {
  /// The challenge.
  pub c: Scalar,
  /// The response.
  pub r: Scalar,
}

// Hs(prefix_hash || P || commitment)
fn challenge(prefix_hash: &[u8; 32], public: &PublicKey, commitment: CompressedEdwardsY) -> Scalar {
  let mut buf = [0; 96];
  buf[.. 32].copy_from_slice(prefix_hash);
  buf[32 .. 64].copy_from_slice(public.as_bytes());
  buf[64 ..].copy_from_slice(commitment.as_bytes());
  hash_to_scalar(buf)
}

impl Signature {
  /// Sign a prefix hash with the secret key for `public`.
  ///
  /// Panics if `public` isn't the public key for `secret`.
  pub fn sign<R: RngCore + CryptoRng>(
    rng: &mut R,
    prefix_hash: &[u8; 32],
    public: &PublicKey,
    secret: &SecretKey,
  ) -> Signature {
    assert_eq!(&secret.public_key(), public, "signing with a secret key for another public key");

    let k = Zeroizing::new(random_scalar(rng));
    let c = challenge(prefix_hash, public, (&*k * ED25519_BASEPOINT_TABLE).compress());
    Signature { c, r: *k - (c * secret.scalar()) }
  }

  /// Verify a signature for a prefix hash.
  pub fn verify(&self, prefix_hash: &[u8; 32], public: &PublicKey) -> bool {
    let Some(point) = public.decompress() else { return false };
    let commitment = EdwardsPoint::vartime_double_scalar_mul_basepoint(&self.c, &point, &self.r);
    challenge(prefix_hash, public, commitment.compress()) == self.c
  }

  /// Write the signature.
  pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
    write_scalar(&self.c, w)?;
    write_scalar(&self.r, w)
  }

  /// Read a signature.
  ///
  /// Both scalars are required to be canonically encoded.
  pub fn read<R: Read>(r: &mut R) -> io::Result<Signature> {
    Ok(Signature { c: read_scalar(r)?, r: read_scalar(r)? })
  }
}
