use crate::{DifficultyError, check_lengths, config::*};

fn check_window(
  timestamps: &[u64],
  cumulative_difficulties: &[u64],
  expected: usize,
) -> Result<(), DifficultyError> {
  check_lengths(timestamps, cumulative_difficulties)?;
  if timestamps.len() != expected {
    Err(DifficultyError::WindowLength { expected, actual: timestamps.len() })?;
  }
  Ok(())
}

/// The V3 algorithm, LWMA.
///
/// Requires exactly `DIFFICULTY_WINDOW_V3 + 1` entries. Each block time is bounded to
/// `[-BLOCK_FUTURE_TIME_LIMIT_V3, 6 * DIFFICULTY_TARGET]` and weighted by its recency. The result
/// is biased 1% lower.
// Copyright (c) 2017-2018 Zawy, BSD-3 licensed
// https://github.com/zawy12/difficulty-algorithms/issues/3
#[allow(non_snake_case, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
pub fn next_difficulty_v3(
  timestamps: &[u64],
  cumulative_difficulties: &[u64],
) -> Result<u64, DifficultyError> {
  const T: i64 = DIFFICULTY_TARGET as i64;
  const N: usize = DIFFICULTY_WINDOW_V3;
  const FTL: i64 = BLOCK_FUTURE_TIME_LIMIT_V3 as i64;
  const WEIGHTS: i64 = T * (N as i64) * (N as i64 + 1) * 99;

  check_window(timestamps, cumulative_difficulties, N + 1)?;

  let mut L = 0i64;
  for i in 1 ..= N {
    let solve_time = (timestamps[i] as i64).wrapping_sub(timestamps[i - 1] as i64);
    L += solve_time.clamp(-FTL, 6 * T) * (i as i64);
  }
  // Bound the difficulty to [0.2, 2.5] times the window's average, which also keeps L positive
  L = L.clamp(WEIGHTS / 500, WEIGHTS / 40);

  // With CD the sum of N difficulties, and the sum of the weights 0.5 * N * (N + 1):
  // D = CD * 0.5 * N * (N + 1) * T / (N * L) = CD * (N + 1) * T / 2L
  let next_D = cumulative_difficulties[N]
    .wrapping_sub(cumulative_difficulties[0])
    .wrapping_mul(T as u64)
    .wrapping_mul(N as u64 + 1) /
    (2 * L as u64);
  // Applied separately to avoid an overflow at 6 GH/s
  let next_D = next_D.wrapping_mul(99) / 100;

  log::debug!(
    "difficulty sum: {}, L: {L}, next difficulty: {next_D}",
    cumulative_difficulties[N].wrapping_sub(cumulative_difficulties[0])
  );
  Ok(next_D)
}

// The last non-zero timestamp before i, defaulting to the first timestamp
fn last_valid(timestamps: &[u64], i: usize) -> u64 {
  timestamps[1 .. i]
    .iter()
    .rev()
    .find(|timestamp| **timestamp != 0)
    .copied()
    .unwrap_or(timestamps[0])
}

/// Replace invalid timestamps by interpolating between their valid neighbors.
///
/// The first and last timestamps are always considered valid. Every other timestamp is masked if
/// it isn't greater than the last valid timestamp before it, or isn't less than the last
/// timestamp. Masking a timestamp also masks the one preceding it, as either could be the
/// manipulated timestamp.
pub fn interpolate_timestamps(timestamps: &mut [u64]) {
  if timestamps.len() < 2 {
    return;
  }
  let n = timestamps.len() - 1;

  let max_valid = timestamps[n];
  for i in 1 .. n {
    if (timestamps[i] <= last_valid(timestamps, i)) || (timestamps[i] >= max_valid) {
      if i != 1 {
        timestamps[i - 1] = 0;
      }
      timestamps[i] = 0;
    }
  }

  // Replace each masked timestamp with its position in its run of masked timestamps
  let mut masked = 0;
  for timestamp in &mut timestamps[1 .. n] {
    if *timestamp == 0 {
      masked += 1;
      *timestamp = masked;
    } else {
      masked = 0;
    }
  }

  // Working backwards, place each masked timestamp on the line between the last valid timestamp
  // and the timestamp after it
  for i in (1 .. n).rev() {
    if timestamps[i] > u64::try_from(n).unwrap() {
      continue;
    }
    let num = timestamps[i];
    let Some(start) = usize::try_from(num).ok().and_then(|num| i.checked_sub(num)) else {
      continue;
    };
    let delta = timestamps[i + 1].wrapping_sub(timestamps[start]);
    timestamps[i] = timestamps[start].wrapping_add(delta.wrapping_mul(num) / (num + 1));
  }
}

/// The V4 algorithm, LWMA weighted by the square of recency.
///
/// Requires exactly `DIFFICULTY_WINDOW_V4 + 1` entries. The newest timestamp is bounded, the
/// timestamps are interpolated, and each block time is capped at `5 * DIFFICULTY_TARGET`. The
/// result is bounded to `[67%, 150%]` of the prior block's difficulty.
#[allow(non_snake_case)]
pub fn next_difficulty_v4(
  timestamps: &[u64],
  cumulative_difficulties: &[u64],
) -> Result<u64, DifficultyError> {
  const T: u64 = DIFFICULTY_TARGET;
  const N: usize = DIFFICULTY_WINDOW_V4;
  // The sum of the weights, N * (N + 1) * (2N + 1) / 6, times T / N
  // This is exact as T * (N + 1) * (2N + 1) is a multiple of 6
  const TSUM: u64 = (T * (N as u64 + 1) * ((2 * N as u64) + 1)) / 6;

  check_window(timestamps, cumulative_difficulties, N + 1)?;
  let mut timestamps = timestamps.to_vec();

  // The newest timestamp may not be older than the prior, nor more than 5 block times newer
  timestamps[N] = timestamps[N].max(timestamps[N - 1]).min(timestamps[N - 1].wrapping_add(5 * T));
  // The newest timestamp must be newer than the oldest
  timestamps[N] = timestamps[N].max(timestamps[0].wrapping_add(1));

  interpolate_timestamps(&mut timestamps);

  let mut L = 0u64;
  for i in 1 ..= N {
    let i_u64 = u64::try_from(i).unwrap();
    L += timestamps[i].wrapping_sub(timestamps[i - 1]).min(5 * T) * i_u64 * i_u64;
  }
  let L = L.max(1);

  let next_D =
    cumulative_difficulties[N].wrapping_sub(cumulative_difficulties[0]).wrapping_mul(TSUM) / L;

  let prev_D = cumulative_difficulties[N].wrapping_sub(cumulative_difficulties[N - 1]);
  let next_D = next_D.min(prev_D.wrapping_mul(150) / 100).max(prev_D.wrapping_mul(67) / 100);
  log::debug!("L: {L}, previous difficulty: {prev_D}, next difficulty: {next_D}");
  Ok(next_D)
}
