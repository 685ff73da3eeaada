use rand_core::{RngCore, OsRng};

use curve25519_dalek::{traits::Identity, edwards::EdwardsPoint};

use crate::*;

#[test]
fn keccak() {
  // Keccak-256, not SHA3-256, of the empty string
  assert_eq!(
    hex::encode(keccak256(b"")),
    "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
  );
}

#[test]
fn test_vectors() {
  // In the format of CryptoNote's tests/crypto/tests.txt
  let reader = include_str!("./tests.txt");

  for line in reader.lines() {
    let mut words = line.split_whitespace();
    let command = words.next().unwrap();

    match command {
      "hash_to_ec" => {
        let bytes = words.next().unwrap();
        let expected = words.next().unwrap();

        let actual = hash_to_point(hex::decode(bytes).unwrap().try_into().unwrap());
        assert_eq!(hex::encode(actual.compress().to_bytes()), expected);
      }
      _ => unreachable!("unknown command"),
    }
  }
}

#[test]
fn hash_to_point_prime_order() {
  for _ in 0 .. 50 {
    let mut bytes = [0; 32];
    OsRng.fill_bytes(&mut bytes);
    let point = hash_to_point(bytes);
    assert!(point.is_torsion_free());
    assert!(point != EdwardsPoint::identity());
    // Deterministic
    assert_eq!(point, hash_to_point(bytes));
  }
}
