use core::fmt;

use zeroize::Zeroizing;

use curve25519_dalek::{
  constants::ED25519_BASEPOINT_TABLE,
  scalar::Scalar,
  edwards::EdwardsPoint,
};

use ryo_io::decompress_point;

macro_rules! point_bytes {
  ($(#[$doc: meta])* $name: ident) => {
    $(#[$doc])*
    ///
    /// This holds the encoding as-received. It is only checked to be a valid point when
    /// decompressed.
    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct $name([u8; 32]);

    impl $name {
      /// Create from a 32-byte encoding.
      pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
      }

      /// Create from a point, compressing it.
      pub fn from_point(point: &EdwardsPoint) -> Self {
        Self(point.compress().to_bytes())
      }

      /// The 32-byte encoding.
      pub const fn to_bytes(&self) -> [u8; 32] {
        self.0
      }

      /// The 32-byte encoding, by reference.
      pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
      }

      /// Decompress the point, returning `None` if the encoding isn't canonical.
      pub fn decompress(&self) -> Option<EdwardsPoint> {
        decompress_point(self.0)
      }
    }

    impl fmt::Debug for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", stringify!($name))?;
        for byte in self.0 {
          write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
      }
    }
  };
}

point_bytes!(
  /// A public key, the compressed encoding of `x * G`.
  PublicKey
);
point_bytes!(
  /// A key image, `x * Hp(P)` for the one-time key `P = x * G`.
  KeyImage
);
point_bytes!(
  /// A key derivation, the cofactor-cleared Diffie-Hellman shared secret `8 * (a * B)`.
  KeyDerivation
);

/// A secret key, a canonical scalar zeroized on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(Zeroizing<Scalar>);

impl fmt::Debug for SecretKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SecretKey").finish_non_exhaustive()
  }
}

impl SecretKey {
  /// Create a secret key from a scalar.
  pub fn from_scalar(scalar: Scalar) -> SecretKey {
    SecretKey(Zeroizing::new(scalar))
  }

  /// Create a secret key from its encoding, returning `None` if it isn't a canonical scalar.
  pub fn from_bytes(bytes: &[u8; 32]) -> Option<SecretKey> {
    Option::<Scalar>::from(Scalar::from_canonical_bytes(*bytes)).map(SecretKey::from_scalar)
  }

  /// The encoding of this secret key.
  pub fn to_bytes(&self) -> Zeroizing<[u8; 32]> {
    Zeroizing::new(self.0.to_bytes())
  }

  /// The underlying scalar.
  pub fn scalar(&self) -> &Scalar {
    &self.0
  }

  /// The public key for this secret key, `x * G`.
  pub fn public_key(&self) -> PublicKey {
    PublicKey::from_point(&(&*self.0 * ED25519_BASEPOINT_TABLE))
  }
}

/// A pair of keys where `public == secret * G`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct KeyPair {
  /// The public key.
  pub public: PublicKey,
  /// The secret key.
  pub secret: SecretKey,
}

impl KeyPair {
  /// Create a key pair from its secret key.
  pub fn from_secret(secret: SecretKey) -> KeyPair {
    KeyPair { public: secret.public_key(), secret }
  }
}
