//! Consensus constants for difficulty adjustment.

/// The targeted amount of seconds between blocks.
pub const DIFFICULTY_TARGET: u64 = 240;

/// The amount of timestamps V1 considers.
pub const DIFFICULTY_WINDOW_V1: usize = 720;
/// The amount of most recent blocks V1 ignores.
pub const DIFFICULTY_LAG_V1: usize = 15;
/// The amount of outliers V1 cuts from either end of the sorted timestamps.
pub const DIFFICULTY_CUT_V1: usize = 60;
/// The amount of blocks to provide V1.
pub const DIFFICULTY_BLOCKS_COUNT_V1: usize = DIFFICULTY_WINDOW_V1 + DIFFICULTY_LAG_V1;

/// The amount of timestamps V2 considers after cutting.
pub const DIFFICULTY_WINDOW_V2: usize = 17;
/// The amount of outliers V2 cuts from either end of the sorted timestamps.
pub const DIFFICULTY_CUT_V2: usize = 6;
/// The amount of blocks to provide V2.
pub const DIFFICULTY_BLOCKS_COUNT_V2: usize = DIFFICULTY_WINDOW_V2 + (DIFFICULTY_CUT_V2 * 2);

/// The amount of block times V3 weighs.
pub const DIFFICULTY_WINDOW_V3: usize = 60 + 1;
/// How far into the future a block's timestamp may be, as of V3.
pub const BLOCK_FUTURE_TIME_LIMIT_V3: u64 = DIFFICULTY_TARGET * 3;

/// The amount of block times V4 weighs.
pub const DIFFICULTY_WINDOW_V4: usize = 60;
