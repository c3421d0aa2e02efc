use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::BigInt;
use num_traits::{One, Zero};

use common_constants::{POW_PRECISION, RAD_PRECISION, RAY_PRECISION, WAD_PRECISION};

/// Interprets a raw ledger integer as a decimal at the given scale.
///
/// **Scope**: Entry point for every on-chain word that reaches this
/// workspace; ledger magnitudes exceed 64-bit range, so raw values arrive
/// as `BigInt` and all arithmetic stays in arbitrary-precision decimals.
///
/// **Formula**: `raw * 10^-scale`, exact, no rounding.
pub fn from_units(raw: &BigInt, scale: i64) -> BigDecimal {
    BigDecimal::new(raw.clone(), scale)
}

/// Converts an 18-decimal (WAD) raw integer, rounded half-up to `digits`
/// fractional digits.
pub fn from_wei(raw: &BigInt, digits: i64) -> BigDecimal {
    round_half_up(&from_units(raw, WAD_PRECISION), digits)
}

/// Converts a 27-decimal (RAY) raw integer, rounded half-up to `digits`
/// fractional digits.
pub fn from_ray(raw: &BigInt, digits: i64) -> BigDecimal {
    round_half_up(&from_units(raw, RAY_PRECISION), digits)
}

/// Converts a 45-decimal (RAD) raw integer, rounded half-up to `digits`
/// fractional digits.
pub fn from_rad(raw: &BigInt, digits: i64) -> BigDecimal {
    round_half_up(&from_units(raw, RAD_PRECISION), digits)
}

pub fn add(a: &BigDecimal, b: &BigDecimal) -> BigDecimal {
    a + b
}

pub fn sub(a: &BigDecimal, b: &BigDecimal) -> BigDecimal {
    a - b
}

pub fn mul(a: &BigDecimal, b: &BigDecimal) -> BigDecimal {
    a * b
}

/// Division with an explicit zero-divisor guard.
///
/// The calculators built on top of this module must stay total: a zero
/// divisor answers `None` instead of panicking or producing an infinity.
pub fn div(a: &BigDecimal, b: &BigDecimal) -> Option<BigDecimal> {
    if b.is_zero() {
        return None;
    }
    Some(a / b)
}

/// Rounds half-up (away from zero) to `digits` fractional digits.
pub fn round_half_up(value: &BigDecimal, digits: i64) -> BigDecimal {
    value.with_scale_round(digits, RoundingMode::HalfUp)
}

/// Integer exponentiation by squaring.
///
/// **Scope**: Rate compounding raises per-second rates to a seconds-per-year
/// exponent; naive repeated multiplication is both too slow and lets the
/// digit count explode.
///
/// **Formula**: `base^exp`, every intermediate product trimmed to
/// `POW_PRECISION` significant digits.
pub fn pow(base: &BigDecimal, mut exp: u64) -> BigDecimal {
    let mut result = BigDecimal::one();
    let mut acc = base.with_prec(POW_PRECISION);
    while exp > 0 {
        if exp & 1 == 1 {
            result = (&result * &acc).with_prec(POW_PRECISION);
        }
        exp >>= 1;
        if exp > 0 {
            acc = (&acc * &acc).with_prec(POW_PRECISION);
        }
    }
    result
}

pub fn min(a: BigDecimal, b: BigDecimal) -> BigDecimal {
    if a < b {
        a
    } else {
        b
    }
}

pub fn max(a: BigDecimal, b: BigDecimal) -> BigDecimal {
    if a > b {
        a
    } else {
        b
    }
}
