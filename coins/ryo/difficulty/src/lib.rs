#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

pub mod config;
use config::*;

mod windowed;
pub use windowed::{next_difficulty_v1, next_difficulty_v2};

mod lwma;
pub use lwma::{next_difficulty_v3, next_difficulty_v4, interpolate_timestamps};


/// An error when calculating the next difficulty.
#[derive(Clone, Copy, PartialEq, Eq, Debug, thiserror::Error)]
pub enum DifficultyError {
  /// The amount of timestamps and cumulative difficulties differed.
  #[error("{timestamps} timestamps yet {cumulative_difficulties} cumulative difficulties")]
  LengthMismatch {
    /// The amount of timestamps.
    timestamps: usize,
    /// The amount of cumulative difficulties.
    cumulative_difficulties: usize,
  },
  /// The algorithm requires exactly `expected` entries.
  #[error("window had {actual} entries, expected {expected}")]
  WindowLength {
    /// The amount of entries required.
    expected: usize,
    /// The amount of entries provided.
    actual: usize,
  },
}

pub(crate) fn check_lengths(
  timestamps: &[u64],
  cumulative_difficulties: &[u64],
) -> Result<(), DifficultyError> {
  if timestamps.len() != cumulative_difficulties.len() {
    Err(DifficultyError::LengthMismatch {
      timestamps: timestamps.len(),
      cumulative_difficulties: cumulative_difficulties.len(),
    })?;
  }
  Ok(())
}

/// A version of the difficulty adjustment algorithm.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DifficultyVersion {
  /// The CryptoNote windowed average.
  V1,
  /// The windowed average blended with the median block time.
  V2,
  /// LWMA.
  V3,
  /// LWMA weighted by the square of recency, over interpolated timestamps.
  V4,
}

impl DifficultyVersion {
  /// The amount of most recent blocks to provide this version's algorithm, oldest first.
  pub const fn window(self) -> usize {
    match self {
      DifficultyVersion::V1 => DIFFICULTY_BLOCKS_COUNT_V1,
      DifficultyVersion::V2 => DIFFICULTY_BLOCKS_COUNT_V2,
      DifficultyVersion::V3 => DIFFICULTY_WINDOW_V3 + 1,
      DifficultyVersion::V4 => DIFFICULTY_WINDOW_V4 + 1,
    }
  }

  /// The difficulty for the next block, given the timestamps and cumulative difficulties of the
  /// last `window()` blocks.
  ///
  /// V1 and V2 accept shorter histories, as present at the start of a chain.
  pub fn next_difficulty(
    self,
    timestamps: &[u64],
    cumulative_difficulties: &[u64],
  ) -> Result<u64, DifficultyError> {
    match self {
      DifficultyVersion::V1 => {
        next_difficulty_v1(timestamps, cumulative_difficulties, DIFFICULTY_TARGET)
      }
      DifficultyVersion::V2 => {
        next_difficulty_v2(timestamps, cumulative_difficulties, DIFFICULTY_TARGET)
      }
      DifficultyVersion::V3 => next_difficulty_v3(timestamps, cumulative_difficulties),
      DifficultyVersion::V4 => next_difficulty_v4(timestamps, cumulative_difficulties),
    }
  }
}

/// Check a proof-of-work hash satisfies the difficulty.
///
/// The hash is interpreted as a 256-bit little-endian integer, and is valid if multiplying it by
/// the difficulty doesn't overflow 256 bits.
pub fn check_hash(hash: &[u8; 32], difficulty: u64) -> bool {
  let mut carry = 0u128;
  for word in hash.chunks_exact(8) {
    let mut buf = [0; 8];
    buf.copy_from_slice(word);
    let product = (u128::from(u64::from_le_bytes(buf)) * u128::from(difficulty)) + carry;
    carry = product >> 64;
  }
  carry == 0
}
