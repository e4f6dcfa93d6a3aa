/// Rate denominator for fees and tolerances: 10^6 = 100%
pub const MAX_PERCENTAGE: u64 = 1_000_000;
