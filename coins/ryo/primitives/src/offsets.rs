/// Convert relative ring offsets to absolute output indexes.
///
/// The first offset is absolute, and every following offset is from its prior member.
/// Accumulation wraps on overflow.
pub fn relative_to_absolute(offsets: &[u64]) -> Vec<u64> {
  let mut res = Vec::with_capacity(offsets.len());
  let mut last = 0u64;
  for offset in offsets {
    last = last.wrapping_add(*offset);
    res.push(last);
  }
  res
}

/// Convert absolute output indexes to relative ring offsets.
///
/// The indexes are sorted first, so the relative form is independent of the order provided.
pub fn absolute_to_relative(indexes: &[u64]) -> Vec<u64> {
  let mut res = indexes.to_vec();
  res.sort_unstable();
  for i in (1 .. res.len()).rev() {
    res[i] -= res[i - 1];
  }
  res
}
