use crate::{DifficultyError, check_lengths, config::*};

// The range of sorted timestamps which remain after cutting outliers from either end
fn cut(length: usize, window: usize, cut: usize) -> (usize, usize) {
  let kept = window - (2 * cut);
  if length <= kept {
    (0, length)
  } else {
    let begin = (length - kept + 1) / 2;
    (begin, begin + kept)
  }
}

// (low, high)
#[allow(clippy::cast_possible_truncation)]
fn mul(a: u64, b: u64) -> (u64, u64) {
  let product = u128::from(a) * u128::from(b);
  (product as u64, (product >> 64) as u64)
}

// The median, averaging the middle two elements of an even-length list
fn median(mut values: Vec<u64>) -> u64 {
  if values.is_empty() {
    return 0;
  }
  values.sort_unstable();
  let n = values.len() / 2;
  if values.len() % 2 == 1 {
    values[n]
  } else {
    values[n - 1].wrapping_add(values[n]) / 2
  }
}

/// The V1 algorithm, the CryptoNote windowed average.
///
/// Only the first `DIFFICULTY_WINDOW_V1` entries are used. The timestamps are sorted and
/// `DIFFICULTY_CUT_V1` outliers are cut from either end before averaging.
///
/// Returns `0` if the result overflows.
pub fn next_difficulty_v1(
  timestamps: &[u64],
  cumulative_difficulties: &[u64],
  target_seconds: u64,
) -> Result<u64, DifficultyError> {
  check_lengths(timestamps, cumulative_difficulties)?;
  let length = timestamps.len().min(DIFFICULTY_WINDOW_V1);
  if length <= 1 {
    return Ok(1);
  }
  let mut timestamps = timestamps[.. length].to_vec();
  timestamps.sort_unstable();

  let (begin, end) = cut(length, DIFFICULTY_WINDOW_V1, DIFFICULTY_CUT_V1);
  let time_span = timestamps[end - 1].wrapping_sub(timestamps[begin]).max(1);
  let total_work = cumulative_difficulties[end - 1].wrapping_sub(cumulative_difficulties[begin]);

  let (low, high) = mul(total_work, target_seconds);
  if high != 0 {
    return Ok(0);
  }
  let Some(rounded) = low.checked_add(time_span - 1) else { return Ok(0) };
  Ok(rounded / time_span)
}

/// The V2 algorithm, the windowed average blended with the median block time.
///
/// Only the first `DIFFICULTY_BLOCKS_COUNT_V2` entries are used. The average block time is
/// weighted `0.8` and `0.3` of the median-derived time is added, as the median of a Poisson
/// process is 70% of its mean. The result is bounded to average block times within
/// `[DIFFICULTY_TARGET / 24, DIFFICULTY_TARGET * 6]`.
///
/// Returns `0` if the result overflows.
pub fn next_difficulty_v2(
  timestamps: &[u64],
  cumulative_difficulties: &[u64],
  target_seconds: u64,
) -> Result<u64, DifficultyError> {
  const MAX_AVERAGE_TIMESPAN: u64 = DIFFICULTY_TARGET * 6;
  const MIN_AVERAGE_TIMESPAN: u64 = DIFFICULTY_TARGET / 24;

  check_lengths(timestamps, cumulative_difficulties)?;
  let length = timestamps.len().min(DIFFICULTY_BLOCKS_COUNT_V2);
  if length <= 1 {
    return Ok(1);
  }
  let mut timestamps = timestamps[.. length].to_vec();
  timestamps.sort_unstable();

  let (begin, end) = cut(length, DIFFICULTY_BLOCKS_COUNT_V2, DIFFICULTY_CUT_V2);
  let total_timespan = timestamps[end - 1].wrapping_sub(timestamps[begin]).max(1);

  let mut timespan_median = 0;
  if (begin > 0) && (length >= ((begin * 2) + 3)) {
    let time_spans = ((length - (begin * 2) - 3) .. (length - 1))
      .map(|i| {
        let time_span = timestamps[i + 1].wrapping_sub(timestamps[i]).max(1);
        log::trace!("timespan {i}: {time_span}");
        time_span
      })
      .collect::<Vec<_>>();
    timespan_median = median(time_spans);
  }

  let timespan_length = u64::try_from(length - (begin * 2) - 1).unwrap();
  log::debug!(
    "timespan median: {timespan_median}, timespan average: {}",
    total_timespan / timespan_length
  );

  let total_timespan_median = if timespan_median > 0 {
    timespan_median.wrapping_mul(timespan_length)
  } else {
    total_timespan.wrapping_mul(7) / 10
  };
  let adjusted_total_timespan = (total_timespan
    .wrapping_mul(8)
    .wrapping_add(total_timespan_median.wrapping_mul(3)) /
    10)
    .clamp(MIN_AVERAGE_TIMESPAN * timespan_length, MAX_AVERAGE_TIMESPAN * timespan_length);

  let total_work = cumulative_difficulties[end - 1].wrapping_sub(cumulative_difficulties[begin]);
  let (low, high) = mul(total_work, target_seconds);
  if high != 0 {
    return Ok(0);
  }

  let next_difficulty =
    (low.wrapping_add(adjusted_total_timespan - 1) / adjusted_total_timespan).max(1);
  log::debug!(
    "total timespan: {total_timespan}, adjusted total timespan: {adjusted_total_timespan}, \
      total work: {total_work}, next difficulty: {next_difficulty}"
  );
  Ok(next_difficulty)
}
