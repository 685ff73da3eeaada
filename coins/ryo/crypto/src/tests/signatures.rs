use rand_core::{RngCore, OsRng};

use curve25519_dalek::scalar::Scalar;

use crate::*;

fn hash() -> [u8; 32] {
  let mut hash = [0; 32];
  OsRng.fill_bytes(&mut hash);
  hash
}

#[test]
fn schnorr() {
  let pair = generate_keys(&mut OsRng);
  let prefix_hash = hash();
  let sig = Signature::sign(&mut OsRng, &prefix_hash, &pair.public, &pair.secret);
  assert!(sig.verify(&prefix_hash, &pair.public));

  assert!(!sig.verify(&hash(), &pair.public));
  assert!(!sig.verify(&prefix_hash, &generate_keys(&mut OsRng).public));
  assert!(!sig.verify(&prefix_hash, &PublicKey::from_bytes([0xff; 32])));
  assert!(!Signature { c: sig.c + Scalar::ONE, r: sig.r }.verify(&prefix_hash, &pair.public));
  assert!(!Signature { c: sig.c, r: sig.r + Scalar::ONE }.verify(&prefix_hash, &pair.public));

  let mut buf = vec![];
  sig.write(&mut buf).unwrap();
  assert_eq!(buf.len(), 64);
  assert_eq!(Signature::read(&mut buf.as_slice()).unwrap(), sig);

  // An unreduced response is rejected when read
  buf[32 ..].copy_from_slice(&[0xff; 32]);
  assert!(Signature::read(&mut buf.as_slice()).is_err());
}

#[test]
#[should_panic]
fn schnorr_wrong_key() {
  let pair = generate_keys(&mut OsRng);
  let other = generate_keys(&mut OsRng);
  Signature::sign(&mut OsRng, &hash(), &other.public, &pair.secret);
}

#[allow(non_snake_case)]
#[test]
fn tx_proof() {
  let view = generate_keys(&mut OsRng);
  let tx = generate_keys(&mut OsRng);
  let prefix_hash = hash();

  let R = tx.public;
  let A = view.public;
  let D = PublicKey::from_point(&(A.decompress().unwrap() * tx.secret.scalar()));

  let proof = TxProof::sign(&mut OsRng, &prefix_hash, &R, &A, None, &D, &tx.secret).unwrap();
  assert!(proof.verify(&prefix_hash, &R, &A, None, &D));
  assert!(!proof.verify(&hash(), &R, &A, None, &D));
  assert!(!proof.verify(&prefix_hash, &R, &generate_keys(&mut OsRng).public, None, &D));
  assert!(!proof.verify(&prefix_hash, &R, &A, None, &R));
  assert!(!proof.verify(&prefix_hash, &R, &A, Some(&A), &D));
  assert!(!proof.verify(&prefix_hash, &PublicKey::from_bytes([0xff; 32]), &A, None, &D));

  // Invalid points are an error when proving
  assert_eq!(
    TxProof::sign(
      &mut OsRng,
      &prefix_hash,
      &R,
      &PublicKey::from_bytes([0xff; 32]),
      None,
      &D,
      &tx.secret
    ),
    Err(CryptoError::InvalidPoint)
  );
}

#[allow(non_snake_case)]
#[test]
fn subaddress_tx_proof() {
  let view = generate_keys(&mut OsRng);
  let spend = generate_keys(&mut OsRng);
  let r = generate_keys(&mut OsRng).secret;
  let prefix_hash = hash();

  let B = spend.public;
  let A = view.public;
  let R = PublicKey::from_point(&(B.decompress().unwrap() * r.scalar()));
  let D = PublicKey::from_point(&(A.decompress().unwrap() * r.scalar()));

  let proof = TxProof::sign(&mut OsRng, &prefix_hash, &R, &A, Some(&B), &D, &r).unwrap();
  assert!(proof.verify(&prefix_hash, &R, &A, Some(&B), &D));
  // Not valid as a proof over G
  assert!(!proof.verify(&prefix_hash, &R, &A, None, &D));
  assert!(!proof.verify(&prefix_hash, &R, &A, Some(&PublicKey::from_bytes([0xff; 32])), &D));
}

#[allow(non_snake_case)]
#[test]
#[should_panic]
fn tx_proof_wrong_derivation() {
  let view = generate_keys(&mut OsRng);
  let tx = generate_keys(&mut OsRng);
  let D = generate_keys(&mut OsRng).public;
  let _ = TxProof::sign(&mut OsRng, &hash(), &tx.public, &view.public, None, &D, &tx.secret);
}
