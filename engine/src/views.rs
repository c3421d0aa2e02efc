use bigdecimal::BigDecimal;
use num_traits::Zero;

use common_structs::VaultView;

use crate::storage::EngineState;

/// Joins a vault record with its collateral type's market record.
///
/// An unknown id answers the default uninitialized view; a vault whose
/// market has not produced data yet joins against empty market fields.
/// Either way every derived getter below answers `None` for the missing
/// parts, never a numeric default.
pub fn get_vault(vault_id: &str, state: &EngineState) -> VaultView {
    let Some(record) = state.vaults.get(vault_id) else {
        return VaultView::default();
    };
    let market = record
        .collateral_type
        .as_ref()
        .and_then(|tag| state.markets.get(tag))
        .cloned()
        .unwrap_or_default();
    VaultView {
        initialized: record.initialized,
        collateral_amount: record.collateral_amount.clone(),
        debt_units: record.debt_units.clone(),
        collateral_type: record.collateral_type.clone(),
        market,
    }
}

// Derived metrics. Each getter takes the joined view plus a
// `(rounded, precision)` pair (canonical defaults: rounded, precision 2)
// and answers `None` when any dependency is unavailable. Formulas consume
// the unrounded form of their upstream metrics and round only their own
// output, so rounding error never compounds through the chain.

fn rounded_output(value: BigDecimal, rounded: bool, precision: i64) -> BigDecimal {
    if rounded {
        common_math::round_half_up(&value, precision)
    } else {
        value
    }
}

fn percent(ratio: &BigDecimal) -> Option<BigDecimal> {
    common_math::div(ratio, &BigDecimal::from(100))
}

fn debt_amount_raw(cdp: &VaultView) -> Option<BigDecimal> {
    let debt_units = cdp.debt_units.as_ref()?;
    let rate = cdp.market.rate_accumulator.as_ref()?;
    Some(common_math::mul(debt_units, rate))
}

fn collateral_price_raw(cdp: &VaultView) -> Option<BigDecimal> {
    cdp.market.price_usd.clone()
}

// Zero collateral is indistinguishable from "cannot divide by it" for
// every downstream consumer, so the getter reports it unavailable.
fn collateral_amount_raw(cdp: &VaultView) -> Option<BigDecimal> {
    let amount = cdp.collateral_amount.as_ref()?;
    if amount.is_zero() {
        return None;
    }
    Some(amount.clone())
}

fn collateral_value_usd_raw(cdp: &VaultView) -> Option<BigDecimal> {
    let amount = collateral_amount_raw(cdp)?;
    let price = collateral_price_raw(cdp)?;
    Some(common_math::mul(&amount, &price))
}

fn collateralization_ratio_raw(cdp: &VaultView) -> Option<BigDecimal> {
    let value = collateral_value_usd_raw(cdp)?;
    let debt = debt_amount_raw(cdp)?;
    let ratio = common_math::div(&value, &debt)?;
    Some(common_math::mul(&ratio, &BigDecimal::from(100)))
}

fn liquidation_price_raw(cdp: &VaultView) -> Option<BigDecimal> {
    let debt = debt_amount_raw(cdp)?;
    let ratio = cdp.market.liquidation_ratio.as_ref()?;
    let collateral = collateral_amount_raw(cdp)?;
    let required = common_math::mul(&debt, &percent(ratio)?);
    common_math::div(&required, &collateral)
}

fn min_collateral_needed_raw(cdp: &VaultView) -> Option<BigDecimal> {
    let debt = debt_amount_raw(cdp)?;
    let ratio = cdp.market.liquidation_ratio.as_ref()?;
    let price = collateral_price_raw(cdp)?;
    let required = common_math::mul(&debt, &percent(ratio)?);
    common_math::div(&required, &price)
}

fn collateral_available_amount_raw(cdp: &VaultView) -> Option<BigDecimal> {
    let collateral = collateral_amount_raw(cdp)?;
    let needed = min_collateral_needed_raw(cdp)?;
    Some(common_math::max(
        common_math::sub(&collateral, &needed),
        BigDecimal::zero(),
    ))
}

fn collateral_available_value_raw(cdp: &VaultView) -> Option<BigDecimal> {
    let available = collateral_available_amount_raw(cdp)?;
    let price = collateral_price_raw(cdp)?;
    Some(common_math::mul(&available, &price))
}

fn dai_available_raw(cdp: &VaultView) -> Option<BigDecimal> {
    let ratio = cdp.market.liquidation_ratio.as_ref()?;
    let value = collateral_value_usd_raw(cdp)?;
    let debt = debt_amount_raw(cdp)?;
    let headroom = common_math::div(&value, &percent(ratio)?)?;
    Some(common_math::sub(&headroom, &debt))
}

/// Debt units scaled by the ledger's cumulative rate accumulator.
pub fn get_debt_amount(cdp: &VaultView, rounded: bool, precision: i64) -> Option<BigDecimal> {
    Some(rounded_output(debt_amount_raw(cdp)?, rounded, precision))
}

/// Oracle USD price passthrough at the requested precision.
pub fn get_collateral_price(cdp: &VaultView, rounded: bool, precision: i64) -> Option<BigDecimal> {
    Some(rounded_output(collateral_price_raw(cdp)?, rounded, precision))
}

/// Locked collateral; unavailable while absent or zero.
pub fn get_collateral_amount(cdp: &VaultView, rounded: bool, precision: i64) -> Option<BigDecimal> {
    Some(rounded_output(collateral_amount_raw(cdp)?, rounded, precision))
}

/// USD value of the locked collateral.
pub fn get_collateral_value_usd(
    cdp: &VaultView,
    rounded: bool,
    precision: i64,
) -> Option<BigDecimal> {
    Some(rounded_output(collateral_value_usd_raw(cdp)?, rounded, precision))
}

/// Collateral value over debt, in percent. Guards the zero-debt case
/// explicitly rather than surfacing an infinity.
pub fn get_collateralization_ratio(
    cdp: &VaultView,
    rounded: bool,
    precision: i64,
) -> Option<BigDecimal> {
    Some(rounded_output(collateralization_ratio_raw(cdp)?, rounded, precision))
}

/// Collateral price at which the position becomes eligible for
/// liquidation.
pub fn get_liquidation_price(cdp: &VaultView, rounded: bool, precision: i64) -> Option<BigDecimal> {
    Some(rounded_output(liquidation_price_raw(cdp)?, rounded, precision))
}

/// Least collateral that keeps the position at the liquidation ratio.
pub fn get_min_collateral_needed(
    cdp: &VaultView,
    rounded: bool,
    precision: i64,
) -> Option<BigDecimal> {
    Some(rounded_output(min_collateral_needed_raw(cdp)?, rounded, precision))
}

/// Collateral withdrawable before hitting the liquidation ratio; clamped
/// at zero, an under-collateralized position has nothing available.
pub fn get_collateral_available_amount(
    cdp: &VaultView,
    rounded: bool,
    precision: i64,
) -> Option<BigDecimal> {
    Some(rounded_output(collateral_available_amount_raw(cdp)?, rounded, precision))
}

/// USD value of the withdrawable collateral.
pub fn get_collateral_available_value(
    cdp: &VaultView,
    rounded: bool,
    precision: i64,
) -> Option<BigDecimal> {
    Some(rounded_output(collateral_available_value_raw(cdp)?, rounded, precision))
}

/// Stablecoin still drawable against the collateral. Negative when the
/// position is already past the liquidation ratio; deliberately not
/// clamped.
pub fn get_dai_available(cdp: &VaultView, rounded: bool, precision: i64) -> Option<BigDecimal> {
    Some(rounded_output(dai_available_raw(cdp)?, rounded, precision))
}
