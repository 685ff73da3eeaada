use std::io::{self, Read, Write};

use zeroize::Zeroizing;
use rand_core::{RngCore, CryptoRng};

use curve25519_dalek::{
  constants::ED25519_BASEPOINT_TABLE,
  scalar::Scalar,
  traits::VartimePrecomputedMultiscalarMul,
  edwards::{EdwardsPoint, VartimeEdwardsPrecomputation},
};

use ryo_primitives::{PublicKey, KeyImage, SecretKey, hash_to_point, hash_to_scalar, random_scalar};

use crate::{Signature, generate_key_image};

/// A one-time ring signature, with a `(c, r)` pair per ring member.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RingSignature {
  sigs: Vec<Signature>,
}

// The commitments for a member, given its challenge and response:
// L = c * P + r * G
// R = r * Hp(P) + c * I
#[allow(non_snake_case)]
fn member_commitments(
  image: &VartimeEdwardsPrecomputation,
  public: &PublicKey,
  point: &EdwardsPoint,
  sig: &Signature,
) -> (EdwardsPoint, EdwardsPoint) {
  let L = EdwardsPoint::vartime_double_scalar_mul_basepoint(&sig.c, point, &sig.r);
  let R = image.vartime_mixed_multiscalar_mul(
    [sig.c],
    [sig.r],
    [hash_to_point(public.to_bytes())],
  );
  (L, R)
}

#[allow(non_snake_case)]
fn push_commitments(buf: &mut Vec<u8>, (L, R): (EdwardsPoint, EdwardsPoint)) {
  buf.extend(L.compress().as_bytes());
  buf.extend(R.compress().as_bytes());
}

impl RingSignature {
  /// Sign a prefix hash with the ring member at `secret_index`.
  ///
  /// Panics if `secret_index` is out of bounds, if any ring member or the key image is invalid, or
  /// if `secret` and `image` don't belong to the ring member at `secret_index`. These are bugs in
  /// the caller, which is expected to only sign with keys it owns.
  #[allow(non_snake_case)]
  pub fn sign<R: RngCore + CryptoRng>(
    rng: &mut R,
    prefix_hash: &[u8; 32],
    image: &KeyImage,
    ring: &[PublicKey],
    secret: &SecretKey,
    secret_index: usize,
  ) -> RingSignature {
    assert!(secret_index < ring.len(), "secret index out of bounds");
    assert_eq!(secret.public_key(), ring[secret_index], "secret key isn't for the signing member");
    assert_eq!(
      &generate_key_image(&ring[secret_index], secret),
      image,
      "key image isn't for the signing member"
    );

    let points = ring
      .iter()
      .map(|member| member.decompress().expect("signing with an invalid ring member"))
      .collect::<Vec<_>>();
    let image_precomp = VartimeEdwardsPrecomputation::new([image
      .decompress()
      .expect("signing with an invalid key image")]);

    let mut buf = Vec::with_capacity(32 + (64 * ring.len()));
    buf.extend(prefix_hash);

    let mut sigs = Vec::with_capacity(ring.len());
    let mut sum = Scalar::ZERO;
    let mut k = None;
    for (i, (public, point)) in ring.iter().zip(&points).enumerate() {
      if i == secret_index {
        let nonce = Zeroizing::new(random_scalar(rng));
        let L = &*nonce * ED25519_BASEPOINT_TABLE;
        let R = hash_to_point(public.to_bytes()) * *nonce;
        push_commitments(&mut buf, (L, R));
        k = Some(nonce);
        // Filled in once the challenge is known
        sigs.push(Signature { c: Scalar::ZERO, r: Scalar::ZERO });
        continue;
      }

      let sig = Signature { c: random_scalar(rng), r: random_scalar(rng) };
      push_commitments(&mut buf, member_commitments(&image_precomp, public, point, &sig));
      sum += sig.c;
      sigs.push(sig);
    }

    // Set when iterating the ring, as secret_index is in bounds
    let k = k.unwrap();
    let c = hash_to_scalar(&buf) - sum;
    sigs[secret_index] = Signature { c, r: *k - (c * secret.scalar()) };
    RingSignature { sigs }
  }

  /// Verify a ring signature over a prefix hash.
  ///
  /// This fails closed, returning `false` on an invalid key image, an invalid ring member, or a
  /// ring whose length doesn't match the signature.
  pub fn verify(&self, prefix_hash: &[u8; 32], image: &KeyImage, ring: &[PublicKey]) -> bool {
    if ring.len() != self.sigs.len() {
      return false;
    }
    let Some(image) = image.decompress() else { return false };
    let image_precomp = VartimeEdwardsPrecomputation::new([image]);

    let mut buf = Vec::with_capacity(32 + (64 * ring.len()));
    buf.extend(prefix_hash);

    let mut sum = Scalar::ZERO;
    for (public, sig) in ring.iter().zip(&self.sigs) {
      let Some(point) = public.decompress() else { return false };
      push_commitments(&mut buf, member_commitments(&image_precomp, public, &point, sig));
      sum += sig.c;
    }

    (hash_to_scalar(&buf) - sum) == Scalar::ZERO
  }

  /// The signatures for each ring member.
  pub fn signatures(&self) -> &[Signature] {
    &self.sigs
  }

  /// Write the ring signature.
  ///
  /// This isn't length-prefixed, as the ring size is known from the input it signs for.
  pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
    for sig in &self.sigs {
      sig.write(w)?;
    }
    Ok(())
  }

  /// Read a ring signature for a ring with the specified amount of members.
  pub fn read<R: Read>(members: usize, r: &mut R) -> io::Result<RingSignature> {
    let mut sigs = Vec::with_capacity(members.min(64));
    for _ in 0 .. members {
      sigs.push(Signature::read(r)?);
    }
    Ok(RingSignature { sigs })
  }
}
