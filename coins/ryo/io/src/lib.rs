#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]

use std::io::{self, Read, Write};

use curve25519_dalek::{
  scalar::Scalar,
  edwards::{EdwardsPoint, CompressedEdwardsY},
};

mod varint;
pub use varint::*;

#[cfg(test)]
mod tests;

/// Write a byte.
pub fn write_byte<W: Write>(byte: &u8, w: &mut W) -> io::Result<()> {
  w.write_all(&[*byte])
}

/// Write a scalar, as its canonical 32-byte little-endian encoding.
pub fn write_scalar<W: Write>(scalar: &Scalar, w: &mut W) -> io::Result<()> {
  w.write_all(&scalar.to_bytes())
}

/// Write a list of elements, prefixed with its length as a VarInt.
pub fn write_vec<T, W: Write, F: Fn(&T, &mut W) -> io::Result<()>>(
  f: F,
  values: &[T],
  w: &mut W,
) -> io::Result<()> {
  write_varint(&values.len(), w)?;
  for value in values {
    f(value, w)?;
  }
  Ok(())
}

/// Read a constant amount of bytes.
pub fn read_bytes<R: Read, const N: usize>(r: &mut R) -> io::Result<[u8; N]> {
  let mut res = [0; N];
  r.read_exact(&mut res)?;
  Ok(res)
}

/// Read a single byte.
pub fn read_byte<R: Read>(r: &mut R) -> io::Result<u8> {
  Ok(read_bytes::<_, 1>(r)?[0])
}

/// Read a canonically-encoded scalar.
///
/// Ring signature responses are required to be reduced. Values which only feed a hash, such as a
/// wallet's recovery seed, should be kept as `[u8; 32]` instead.
pub fn read_scalar<R: Read>(r: &mut R) -> io::Result<Scalar> {
  Option::from(Scalar::from_canonical_bytes(read_bytes(r)?))
    .ok_or_else(|| io::Error::other("unreduced scalar"))
}

/// Decompress a canonically-encoded Ed25519 point.
///
/// Unreduced y coordinates and the negative zero encoding are rejected, so each of the `8 * l`
/// points of the curve has exactly one accepted encoding. The point is not checked to be within
/// the prime-order subgroup.
pub fn decompress_point(bytes: [u8; 32]) -> Option<EdwardsPoint> {
  CompressedEdwardsY(bytes)
    .decompress()
    .filter(|point| point.compress().to_bytes() == bytes)
}

/// Read a length-prefixed list of elements.
///
/// The length is bounded by the remaining data only through `f` failing, so callers reading
/// untrusted data should read from a bounded source.
pub fn read_vec<R: Read, T, F: Fn(&mut R) -> io::Result<T>>(f: F, r: &mut R) -> io::Result<Vec<T>> {
  let len: usize = read_varint(r)?;
  // Don't preallocate off an attacker-controlled length
  let mut res = Vec::with_capacity(len.min(64));
  for _ in 0 .. len {
    res.push(f(r)?);
  }
  Ok(res)
}
