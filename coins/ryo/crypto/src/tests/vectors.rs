use crate::*;

fn bytes(hex: &str) -> [u8; 32] {
  hex::decode(hex).unwrap().try_into().unwrap()
}

fn expected_validity(word: &str) -> bool {
  match word {
    "true" => true,
    "false" => false,
    _ => unreachable!("invalid result"),
  }
}

#[test]
fn test_vectors() {
  // In the format of CryptoNote's tests/crypto/tests.txt
  let reader = include_str!("./tests.txt");

  for line in reader.lines() {
    let mut words = line.split_whitespace();
    let command = words.next().unwrap();

    match command {
      "generate_key_derivation" => {
        let public = PublicKey::from_bytes(bytes(words.next().unwrap()));
        let secret = SecretKey::from_bytes(&bytes(words.next().unwrap())).unwrap();

        let actual = generate_key_derivation(&public, &secret);
        if expected_validity(words.next().unwrap()) {
          let expected = words.next().unwrap();
          assert_eq!(hex::encode(actual.unwrap().as_bytes()), expected);
        } else {
          assert_eq!(actual, Err(CryptoError::InvalidPoint));
        }
      }
      "derive_public_key" => {
        let derivation = KeyDerivation::from_bytes(bytes(words.next().unwrap()));
        let index = words.next().unwrap().parse::<u64>().unwrap();
        let base = PublicKey::from_bytes(bytes(words.next().unwrap()));

        let actual = derive_public_key(&derivation, index, &base);
        if expected_validity(words.next().unwrap()) {
          let expected = words.next().unwrap();
          let actual = actual.unwrap();
          assert_eq!(hex::encode(actual.as_bytes()), expected);
          // The subaddress inverse recovers the base
          assert_eq!(derive_subaddress_public_key(&actual, &derivation, index), Ok(base));
        } else {
          assert_eq!(actual, Err(CryptoError::InvalidPoint));
        }
      }
      "generate_key_image" => {
        let public = PublicKey::from_bytes(bytes(words.next().unwrap()));
        let secret = SecretKey::from_bytes(&bytes(words.next().unwrap())).unwrap();
        let expected = words.next().unwrap();

        assert_eq!(hex::encode(generate_key_image(&public, &secret).as_bytes()), expected);
      }
      _ => unreachable!("unknown command"),
    }
  }
}
