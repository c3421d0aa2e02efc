// Arithmetic tests: no floating-point drift anywhere in the pipeline

use std::str::FromStr;

use bigdecimal::BigDecimal;

fn dec(value: &str) -> BigDecimal {
    BigDecimal::from_str(value).unwrap()
}

#[test]
fn test_add_has_no_binary_float_drift() {
    // the classic 0.1 + 0.2 case is exact in decimal arithmetic
    assert_eq!(common_math::add(&dec("0.1"), &dec("0.2")), dec("0.3"));
}

#[test]
fn test_sub() {
    assert_eq!(common_math::sub(&dec("2"), &dec("0.525")), dec("1.475"));
    assert_eq!(common_math::sub(&dec("0.2"), &dec("0.525")), dec("-0.325"));
}

#[test]
fn test_mul_keeps_full_precision() {
    let result = common_math::mul(&dec("1.000000000000000001"), &dec("2"));
    assert_eq!(result, dec("2.000000000000000002"));
}

#[test]
fn test_div() {
    assert_eq!(
        common_math::div(&dec("157.5"), &dec("300")),
        Some(dec("0.525"))
    );
    assert_eq!(common_math::div(&dec("600"), &dec("1.5")), Some(dec("400")));
}

#[test]
fn test_div_by_zero_is_none() {
    assert_eq!(common_math::div(&dec("1"), &dec("0")), None);
    assert_eq!(common_math::div(&dec("0"), &dec("0")), None);
}

#[test]
fn test_pow() {
    assert_eq!(common_math::pow(&dec("2"), 10), dec("1024"));
    assert_eq!(common_math::pow(&dec("7"), 0), dec("1"));
    assert_eq!(common_math::pow(&dec("1"), 31_536_000), dec("1"));
}

#[test]
fn test_pow_fractional_base() {
    // 1.01^12 = 1.126825030131969720661201...
    let result = common_math::pow(&dec("1.01"), 12);
    assert_eq!(common_math::round_half_up(&result, 6), dec("1.126825"));
}

#[test]
fn test_min_max() {
    assert_eq!(common_math::min(dec("1.5"), dec("2")), dec("1.5"));
    assert_eq!(common_math::max(dec("-0.325"), dec("0")), dec("0"));
    assert_eq!(common_math::max(dec("1.475"), dec("0")), dec("1.475"));
}
