use std::collections::BTreeMap;

use common_structs::{
    CollateralTag, FieldUpdate, FieldValue, MarketField, MarketRecord, VaultField, VaultRecord,
};

pub type VaultsState = BTreeMap<String, VaultRecord>;
pub type MarketsState = BTreeMap<CollateralTag, MarketRecord>;

/// The engine's whole mutable surface: vault records keyed by id, market
/// records keyed by collateral tag. Mutated only by replacement through
/// [`apply`]; callers holding the previous value keep an unchanged state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineState {
    pub vaults: VaultsState,
    pub markets: MarketsState,
}

/// Folds one field update into the state, returning the next state.
///
/// The fold is idempotent and order-independent across fields of one
/// entity: no field's handling depends on another field already being
/// present, and an update never gets rejected for naming an unseen
/// entity. Updates whose value kind does not fit the named field are
/// dropped, mirroring the tolerance for unrecognized wire keys.
pub fn apply(state: &EngineState, update: &FieldUpdate) -> EngineState {
    match update {
        FieldUpdate::Vault {
            vault_id,
            field,
            collateral_type,
            value,
        } => EngineState {
            vaults: apply_vault(&state.vaults, vault_id, *field, collateral_type, value),
            markets: state.markets.clone(),
        },
        FieldUpdate::Market {
            collateral_type,
            field,
            value,
        } => EngineState {
            vaults: state.vaults.clone(),
            markets: apply_market(&state.markets, collateral_type, *field, value),
        },
    }
}

/// Folds a batch of updates, in order.
pub fn apply_all<'a>(
    state: &EngineState,
    updates: impl IntoIterator<Item = &'a FieldUpdate>,
) -> EngineState {
    updates
        .into_iter()
        .fold(state.clone(), |state, update| apply(&state, update))
}

/// Vault-record fold. An unseen id gets a default record marked
/// `initialized` with the event's collateral tag; a seen id changes only
/// the named field.
pub fn apply_vault(
    vaults: &VaultsState,
    vault_id: &str,
    field: VaultField,
    collateral_type: &CollateralTag,
    value: &FieldValue,
) -> VaultsState {
    let mut record = vaults.get(vault_id).cloned().unwrap_or_else(|| VaultRecord {
        initialized: true,
        collateral_type: Some(collateral_type.clone()),
        ..VaultRecord::default()
    });

    if !set_vault_field(&mut record, field, value) {
        log::debug!(
            "dropping {} update for vault {vault_id}: value kind mismatch",
            field.wire()
        );
        return vaults.clone();
    }

    log::debug!("vault {vault_id}: {} updated", field.wire());
    let mut next = vaults.clone();
    next.insert(vault_id.to_string(), record);
    next
}

/// Market-record fold, symmetric to the vault side.
pub fn apply_market(
    markets: &MarketsState,
    collateral_type: &CollateralTag,
    field: MarketField,
    value: &FieldValue,
) -> MarketsState {
    let mut record = markets.get(collateral_type).cloned().unwrap_or_default();

    if !set_market_field(&mut record, field, value) {
        log::debug!(
            "dropping {} update for market {collateral_type}: value kind mismatch",
            field.wire()
        );
        return markets.clone();
    }

    log::debug!("market {collateral_type}: {} updated", field.wire());
    let mut next = markets.clone();
    next.insert(collateral_type.clone(), record);
    next
}

fn set_vault_field(record: &mut VaultRecord, field: VaultField, value: &FieldValue) -> bool {
    match (field, value) {
        (VaultField::CollateralAmount, FieldValue::Decimal(amount)) => {
            record.collateral_amount = Some(amount.clone());
            true
        }
        (VaultField::DebtUnits, FieldValue::Decimal(units)) => {
            record.debt_units = Some(units.clone());
            true
        }
        (VaultField::CollateralType, FieldValue::Tag(tag)) => {
            record.collateral_type = Some(tag.clone());
            true
        }
        _ => false,
    }
}

fn set_market_field(record: &mut MarketRecord, field: MarketField, value: &FieldValue) -> bool {
    match (field, value) {
        (MarketField::FeedValueUsd, FieldValue::Decimal(price)) => {
            record.price_usd = Some(price.clone());
            true
        }
        (MarketField::FeedSetUsd, FieldValue::Status(status)) => {
            record.feed_status = Some(*status);
            true
        }
        (MarketField::Rate, FieldValue::Decimal(apr)) => {
            record.stability_fee_apr = Some(apr.clone());
            true
        }
        (MarketField::LastDrip, FieldValue::Decimal(timestamp)) => {
            record.last_drip = Some(timestamp.clone());
            true
        }
        (MarketField::IlkRate, FieldValue::Decimal(rate)) => {
            record.rate_accumulator = Some(rate.clone());
            true
        }
        (MarketField::PriceWithSafetyMargin, FieldValue::Decimal(price)) => {
            record.price_with_safety_margin = Some(price.clone());
            true
        }
        (MarketField::DebtCeiling, FieldValue::Decimal(ceiling)) => {
            record.debt_ceiling = Some(ceiling.clone());
            true
        }
        (MarketField::LiquidationRatio, FieldValue::Decimal(ratio)) => {
            record.liquidation_ratio = Some(ratio.clone());
            true
        }
        (MarketField::LiquidatorAddress, FieldValue::Address(address)) => {
            record.liquidator_address = Some(*address);
            true
        }
        (MarketField::LiquidationPenalty, FieldValue::Decimal(penalty)) => {
            record.liquidation_penalty = Some(penalty.clone());
            true
        }
        (MarketField::MaxAuctionLotSize, FieldValue::Decimal(size)) => {
            record.max_auction_lot_size = Some(size.clone());
            true
        }
        (MarketField::AdapterBalance, FieldValue::Decimal(balance)) => {
            record.adapter_balance = Some(balance.clone());
            true
        }
        _ => false,
    }
}
