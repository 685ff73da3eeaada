use hex_literal::hex;

use rand_core::{RngCore, CryptoRng, SeedableRng, OsRng};
use rand_chacha::ChaCha20Rng;

use curve25519_dalek::{constants::ED25519_BASEPOINT_POINT, scalar::Scalar};

use crate::*;

const L: [u8; 32] = hex!("edd3f55c1a631258d69cf7a2def9de1400000000000000000000000000000010");
const FIFTEEN_L: [u8; 32] =
  hex!("e36a67728bce13298f30828c0ba41039010000000000000000000000000000f0");

#[test]
fn scalar_bounds() {
  assert!(!scalar_ok(&[0; 32]));
  assert!(scalar_ok(&[1; 32]));
  assert!(scalar_ok(&L));

  assert!(!scalar_ok(&FIFTEEN_L));
  let mut below = FIFTEEN_L;
  below[0] -= 1;
  assert!(scalar_ok(&below));
  let mut above = FIFTEEN_L;
  above[16] += 1;
  assert!(!scalar_ok(&above));
  assert!(!scalar_ok(&[0xff; 32]));

  assert!(check_scalar(&[0; 32]));
  assert!(!check_scalar(&L));
  let mut l_minus_one = L;
  l_minus_one[0] -= 1;
  assert!(check_scalar(&l_minus_one));
}

#[test]
fn check_keys() {
  assert!(check_key(&ED25519_BASEPOINT_POINT.compress().to_bytes()));
  // The identity with the sign bit set, -0
  let mut negative_zero = [0; 32];
  negative_zero[0] = 1;
  negative_zero[31] = 0x80;
  assert!(!check_key(&negative_zero));
}

#[test]
fn hash_to_scalar_reduces() {
  assert_eq!(hash_to_scalar(b""), Scalar::from_bytes_mod_order(keccak256(b"")));
  // Reducing the hash of the empty string actually changes it
  assert!(hash_to_scalar(b"").to_bytes() != keccak256(b""));
}

#[test]
fn random_scalars() {
  let a = random_scalar(&mut OsRng);
  let b = random_scalar(&mut OsRng);
  assert!(a != b);
  assert!(check_scalar(&a.to_bytes()));

  // Deterministic under a seeded RNG
  assert_eq!(
    random_scalar(&mut ChaCha20Rng::from_seed([0xab; 32])),
    random_scalar(&mut ChaCha20Rng::from_seed([0xab; 32]))
  );
}

#[test]
fn random_scalar_rejects() {
  // Yields all-ones for its first draw, which is above 15 * l, and then zero, and then 5
  struct Rejected(u8);
  impl RngCore for Rejected {
    fn next_u32(&mut self) -> u32 {
      unimplemented!()
    }
    fn next_u64(&mut self) -> u64 {
      unimplemented!()
    }
    fn fill_bytes(&mut self, dest: &mut [u8]) {
      dest.fill(0);
      match self.0 {
        0 => dest.fill(0xff),
        1 => {}
        _ => dest[0] = 5,
      }
      self.0 += 1;
    }
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
      self.fill_bytes(dest);
      Ok(())
    }
  }
  impl CryptoRng for Rejected {}

  let mut rng = Rejected(0);
  assert_eq!(random_scalar(&mut rng), Scalar::from(5u8));
  assert_eq!(rng.0, 3);
}

#[test]
fn secret_keys() {
  assert!(SecretKey::from_bytes(&L).is_none());
  let secret = SecretKey::from_bytes(&Scalar::from(2u8).to_bytes()).unwrap();
  assert_eq!(*secret.to_bytes(), Scalar::from(2u8).to_bytes());
  assert_eq!(
    secret.public_key().decompress().unwrap(),
    ED25519_BASEPOINT_POINT + ED25519_BASEPOINT_POINT
  );
  // Secrets aren't printed
  assert_eq!(format!("{secret:?}"), "SecretKey { .. }");

  let pair = KeyPair::from_secret(secret.clone());
  assert_eq!(pair.public, secret.public_key());
}

#[test]
fn key_bytes() {
  let key = PublicKey::from_point(&ED25519_BASEPOINT_POINT);
  assert_eq!(key.to_bytes(), ED25519_BASEPOINT_POINT.compress().to_bytes());
  assert_eq!(key.decompress(), Some(ED25519_BASEPOINT_POINT));
  assert_eq!(
    format!("{key:?}"),
    "PublicKey(5866666666666666666666666666666666666666666666666666666666666666)"
  );
  assert_eq!(KeyImage::from_bytes([0xff; 32]).decompress(), None);
}

#[test]
fn ring_offsets() {
  assert_eq!(absolute_to_relative(&[]), Vec::<u64>::new());
  assert_eq!(absolute_to_relative(&[7]), vec![7]);
  assert_eq!(absolute_to_relative(&[10, 15, 15, 100]), vec![10, 5, 0, 85]);
  // Sorted before encoding
  assert_eq!(absolute_to_relative(&[100, 10, 15]), vec![10, 5, 85]);
  assert_eq!(relative_to_absolute(&[10, 5, 0, 85]), vec![10, 15, 15, 100]);

  for _ in 0 .. 100 {
    let mut indexes = (0 .. 11).map(|_| OsRng.next_u64() >> 8).collect::<Vec<_>>();
    indexes.sort_unstable();
    assert_eq!(relative_to_absolute(&absolute_to_relative(&indexes)), indexes);
  }

  // The sum wraps
  assert_eq!(relative_to_absolute(&[u64::MAX, 2]), vec![u64::MAX, 1]);
}
