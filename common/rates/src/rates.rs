use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::One;

use common_constants::{APR_PRECISION, RAY_PRECISION, SECONDS_PER_YEAR};

/// Annualizes a per-second compounding rate.
///
/// **Scope**: Stability fees are stored on-chain as a per-second growth
/// factor in RAY scale (`1.000000000005 * 10^27` style values). Screens and
/// downstream formulas want the yearly figure.
///
/// **Formula**: `(raw / RAY)^secondsPerYear - 1`, rounded half-up to
/// `APR_PRECISION` fractional digits. Intermediates are carried at
/// `POW_PRECISION` significant digits by `common_math::pow`, so the
/// 3-decimal output is exact for every realistic duty value.
///
/// # Arguments
/// - `raw_per_second`: RAY-scale growth factor straight off the ledger.
///
/// # Returns
/// - `BigDecimal`: annualized rate as a fraction (`0.050` for 5% a year).
pub fn annualized_rate(raw_per_second: &BigInt) -> BigDecimal {
    let per_second = common_math::from_units(raw_per_second, RAY_PRECISION);
    let compounded = common_math::pow(&per_second, SECONDS_PER_YEAR);
    common_math::round_half_up(
        &common_math::sub(&compounded, &BigDecimal::one()),
        APR_PRECISION,
    )
}
