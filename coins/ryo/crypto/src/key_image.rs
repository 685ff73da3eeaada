use ryo_primitives::{PublicKey, KeyImage, SecretKey, hash_to_point};

/// The key image for a one-time key, `x * Hp(P)`.
///
/// `Hp` is applied to the encoding of `P` as provided, so `P` isn't required to be a valid point.
pub fn generate_key_image(public: &PublicKey, secret: &SecretKey) -> KeyImage {
  KeyImage::from_point(&(hash_to_point(public.to_bytes()) * secret.scalar()))
}
