#![no_std]

/// One WAD, the 18-decimal fixed-point base unit for token quantities.
pub const WAD: u128 = 1_000_000_000_000_000_000;
pub const WAD_PRECISION: i64 = 18;

/// One RAY, the 27-decimal fixed-point unit for rates and accumulators.
pub const RAY: u128 = 1_000_000_000_000_000_000_000_000_000;
pub const RAY_PRECISION: i64 = 27;

/// RAD magnitudes (10^45) exceed `u128`; only the scale is representable here.
pub const RAD_PRECISION: i64 = 45;

pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// Significant digits carried through compounding exponentiation.
pub const POW_PRECISION: u64 = 100;

/// Fractional digits of annualized rates.
pub const APR_PRECISION: i64 = 3;

/// Default fractional digits for derived vault metrics.
pub const METRIC_PRECISION: i64 = 2;

/// Fractional digits used by the market read transforms.
pub const FEED_PRECISION: i64 = 5;

/// Decimals assumed for price feed words unless a feed declares otherwise.
pub const FEED_DECIMALS: i64 = WAD_PRECISION;
