// Normalizing reducer tests: creation defaults, idempotence, order
// independence, and the tolerance policy for events the engine ignores

use std::str::FromStr;

use bigdecimal::BigDecimal;

use engine::storage::{self, EngineState};
use engine::{CollateralTag, FeedStatus, FieldUpdate, FieldValue, MarketField, VaultField};

fn dec(value: &str) -> FieldValue {
    FieldValue::Decimal(BigDecimal::from_str(value).unwrap())
}

fn ink_update(vault_id: &str, value: &str) -> FieldUpdate {
    FieldUpdate::Vault {
        vault_id: vault_id.to_string(),
        field: VaultField::CollateralAmount,
        collateral_type: CollateralTag::new("ETH"),
        value: dec(value),
    }
}

fn art_update(vault_id: &str, value: &str) -> FieldUpdate {
    FieldUpdate::Vault {
        vault_id: vault_id.to_string(),
        field: VaultField::DebtUnits,
        collateral_type: CollateralTag::new("ETH"),
        value: dec(value),
    }
}

#[test]
fn test_first_update_creates_an_initialized_record() {
    let state = storage::apply(&EngineState::default(), &ink_update("123", "2"));

    let record = &state.vaults["123"];
    assert!(record.initialized);
    assert_eq!(
        record.collateral_amount,
        Some(BigDecimal::from_str("2").unwrap())
    );
    assert_eq!(record.debt_units, None);
    assert_eq!(record.collateral_type, Some(CollateralTag::new("ETH")));
}

#[test]
fn test_second_update_touches_only_the_named_field() {
    let state = storage::apply(&EngineState::default(), &ink_update("123", "2"));
    let state = storage::apply(&state, &art_update("123", "100"));

    let record = &state.vaults["123"];
    assert_eq!(
        record.collateral_amount,
        Some(BigDecimal::from_str("2").unwrap())
    );
    assert_eq!(record.debt_units, Some(BigDecimal::from_str("100").unwrap()));
}

#[test]
fn test_collateral_tag_is_pinned_by_the_first_event() {
    let state = storage::apply(&EngineState::default(), &ink_update("123", "2"));
    let later = FieldUpdate::Vault {
        vault_id: "123".to_string(),
        field: VaultField::DebtUnits,
        collateral_type: CollateralTag::new("BAT"),
        value: dec("100"),
    };
    let state = storage::apply(&state, &later);

    assert_eq!(
        state.vaults["123"].collateral_type,
        Some(CollateralTag::new("ETH"))
    );
}

#[test]
fn test_explicit_tag_update_changes_the_tag() {
    let state = storage::apply(&EngineState::default(), &ink_update("123", "2"));
    let retag = FieldUpdate::Vault {
        vault_id: "123".to_string(),
        field: VaultField::CollateralType,
        collateral_type: CollateralTag::new("BAT"),
        value: FieldValue::Tag(CollateralTag::new("BAT")),
    };
    let state = storage::apply(&state, &retag);

    assert_eq!(
        state.vaults["123"].collateral_type,
        Some(CollateralTag::new("BAT"))
    );
}

#[test]
fn test_idempotence() {
    let event = ink_update("123", "2");
    let once = storage::apply(&EngineState::default(), &event);
    let twice = storage::apply(&once, &event);
    assert_eq!(once, twice);
}

#[test]
fn test_order_independence_for_distinct_fields() {
    let ink = ink_update("123", "2");
    let art = art_update("123", "100");

    let ink_first = storage::apply_all(&EngineState::default(), [&ink, &art]);
    let art_first = storage::apply_all(&EngineState::default(), [&art, &ink]);
    assert_eq!(ink_first, art_first);
}

#[test]
fn test_fold_never_mutates_the_previous_state() {
    let empty = EngineState::default();
    let next = storage::apply(&empty, &ink_update("123", "2"));

    assert!(empty.vaults.is_empty());
    assert!(next.vaults.contains_key("123"));
}

#[test]
fn test_value_kind_mismatch_is_a_no_op() {
    let state = storage::apply(&EngineState::default(), &ink_update("123", "2"));
    let bogus = FieldUpdate::Vault {
        vault_id: "123".to_string(),
        field: VaultField::CollateralAmount,
        collateral_type: CollateralTag::new("ETH"),
        value: FieldValue::Status(FeedStatus::Live),
    };
    let after = storage::apply(&state, &bogus);
    assert_eq!(state, after);

    // a mismatched first event does not conjure a record either
    let from_empty = storage::apply(
        &EngineState::default(),
        &FieldUpdate::Vault {
            vault_id: "999".to_string(),
            field: VaultField::DebtUnits,
            collateral_type: CollateralTag::new("ETH"),
            value: FieldValue::Status(FeedStatus::Dead),
        },
    );
    assert_eq!(from_empty, EngineState::default());
}

#[test]
fn test_market_updates_fold_into_the_tagged_record() {
    let update = FieldUpdate::from_wire("ETH.ilkRate", dec("1.05")).unwrap();
    let state = storage::apply(&EngineState::default(), &update);

    let market = &state.markets[&CollateralTag::new("ETH")];
    assert_eq!(
        market.rate_accumulator,
        Some(BigDecimal::from_str("1.05").unwrap())
    );
    assert_eq!(market.price_usd, None);
    assert_eq!(market.debt_ceiling, None);
}

#[test]
fn test_market_fields_accumulate_across_events() {
    let updates = [
        FieldUpdate::from_wire("ETH.feedValueUSD", dec("300")).unwrap(),
        FieldUpdate::Market {
            collateral_type: CollateralTag::new("ETH"),
            field: MarketField::FeedSetUsd,
            value: FieldValue::Status(FeedStatus::Live),
        },
        FieldUpdate::from_wire("ETH.liquidationRatio", dec("150")).unwrap(),
    ];
    let state = storage::apply_all(&EngineState::default(), &updates);

    let market = &state.markets[&CollateralTag::new("ETH")];
    assert_eq!(market.price_usd, Some(BigDecimal::from_str("300").unwrap()));
    assert_eq!(market.feed_status, Some(FeedStatus::Live));
    assert_eq!(
        market.liquidation_ratio,
        Some(BigDecimal::from_str("150").unwrap())
    );
}
