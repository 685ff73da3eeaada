use curve25519_dalek::{constants::ED25519_BASEPOINT_POINT, scalar::Scalar};

use crate::*;

#[test]
fn varint() {
  for (value, encoded) in [
    (0u64, "00"),
    (1, "01"),
    (127, "7f"),
    (128, "8001"),
    (300, "ac02"),
    (16384, "808001"),
    (u64::MAX, "ffffffffffffffffff01"),
  ] {
    let bytes = varint_bytes(value);
    assert_eq!(hex::encode(&bytes), encoded);
    assert_eq!(varint_len(value), bytes.len());
    assert_eq!(read_varint::<_, u64>(&mut bytes.as_slice()).unwrap(), value);
  }
}

#[test]
fn varint_non_canonical() {
  // 0 with a redundant continuation byte
  assert!(read_varint::<_, u64>(&mut [0x80, 0x00].as_slice()).is_err());
  // 1 with a redundant continuation byte
  assert!(read_varint::<_, u64>(&mut [0x81, 0x00].as_slice()).is_err());
  // Truncated
  assert!(read_varint::<_, u64>(&mut [0x80].as_slice()).is_err());
}

#[test]
fn varint_overflow() {
  // u64::MAX + 1
  let mut too_large = vec![0x80; 9];
  too_large.push(0x02);
  assert!(read_varint::<_, u64>(&mut too_large.as_slice()).is_err());

  // 256 doesn't fit into a u8
  assert!(read_varint::<_, u8>(&mut varint_bytes(256u64).as_slice()).is_err());
  assert_eq!(read_varint::<_, u8>(&mut varint_bytes(255u64).as_slice()).unwrap(), 255);
}

#[test]
fn vec() {
  let values = [1u64, 128, 5];
  let mut buf = vec![];
  write_vec(write_varint, &values, &mut buf).unwrap();
  assert_eq!(hex::encode(&buf), "0301800105");
  assert_eq!(read_vec(read_varint::<_, u64>, &mut buf.as_slice()).unwrap(), values);

  // Claims more elements than present
  assert!(read_vec(read_varint::<_, u64>, &mut [0xff, 0x01, 0x01].as_slice()).is_err());
}

#[test]
fn point_canonicity() {
  let basepoint = ED25519_BASEPOINT_POINT.compress().to_bytes();
  assert_eq!(
    hex::encode(basepoint),
    "5866666666666666666666666666666666666666666666666666666666666666"
  );
  assert_eq!(decompress_point(basepoint), Some(ED25519_BASEPOINT_POINT));

  // Setting the sign bit on the identity yields -0, which isn't canonical
  let mut negative_zero = [0; 32];
  negative_zero[0] = 1;
  negative_zero[31] = 0x80;
  assert!(decompress_point(negative_zero).is_none());

  // y = p, an unreduced encoding of y = 0
  let mut unreduced = [0xff; 32];
  unreduced[0] = 0xed;
  unreduced[31] = 0x7f;
  assert!(decompress_point(unreduced).is_none());
}

#[test]
fn scalar_canonicity() {
  let mut buf = vec![];
  write_scalar(&Scalar::from(5u8), &mut buf).unwrap();
  assert_eq!(read_scalar(&mut buf.as_slice()).unwrap(), Scalar::from(5u8));

  // l itself
  let l = hex::decode("edd3f55c1a631258d69cf7a2def9de1400000000000000000000000000000010").unwrap();
  assert!(read_scalar(&mut l.as_slice()).is_err());
}
