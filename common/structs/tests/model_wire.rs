// Wire-boundary tests for the dotted update keys and fixed-width identifiers

use std::str::FromStr;

use bigdecimal::BigDecimal;
use common_structs::{
    CollateralTag, FeedStatus, FieldUpdate, FieldValue, MarketField, VaultField,
};

fn dec(value: &str) -> FieldValue {
    FieldValue::Decimal(BigDecimal::from_str(value).unwrap())
}

#[test]
fn test_vault_key_parses() {
    let update = FieldUpdate::from_wire("123.ink.ETH", dec("2")).unwrap();
    assert_eq!(
        update,
        FieldUpdate::Vault {
            vault_id: "123".to_string(),
            field: VaultField::CollateralAmount,
            collateral_type: CollateralTag::new("ETH"),
            value: dec("2"),
        }
    );
}

#[test]
fn test_market_key_parses() {
    let update = FieldUpdate::from_wire("ETH.ilkRate", dec("1.05")).unwrap();
    assert_eq!(
        update,
        FieldUpdate::Market {
            collateral_type: CollateralTag::new("ETH"),
            field: MarketField::IlkRate,
            value: dec("1.05"),
        }
    );
}

#[test]
fn test_unrecognized_keys_are_dropped() {
    // no dot segments (the bare pip cross-reference), unknown field names,
    // and overlong keys all answer None
    assert_eq!(FieldUpdate::from_wire("pipETH", dec("1")), None);
    assert_eq!(FieldUpdate::from_wire("", dec("1")), None);
    assert_eq!(FieldUpdate::from_wire("123.lastSeen.ETH", dec("1")), None);
    assert_eq!(FieldUpdate::from_wire("ETH.somethingElse", dec("1")), None);
    assert_eq!(FieldUpdate::from_wire("a.b.c.d", dec("1")), None);
}

#[test]
fn test_wire_key_round_trip() {
    let vault = FieldUpdate::from_wire("99.art.BAT", dec("100")).unwrap();
    assert_eq!(vault.wire_key(), "99.art.BAT");

    let market = FieldUpdate::from_wire("BAT.liquidationRatio", dec("150")).unwrap();
    assert_eq!(market.wire_key(), "BAT.liquidationRatio");
}

#[test]
fn test_field_wire_names() {
    assert_eq!(VaultField::CollateralAmount.wire(), "ink");
    assert_eq!(VaultField::from_wire("art"), Some(VaultField::DebtUnits));
    assert_eq!(VaultField::from_wire("feedValueUSD"), None);
    assert_eq!(
        MarketField::from_wire("feedValueUSD"),
        Some(MarketField::FeedValueUsd)
    );
    assert_eq!(MarketField::MaxAuctionLotSize.wire(), "maxAuctionLotSize");
}

#[test]
fn test_tag_bytes32_padding() {
    let encoded = CollateralTag::new("ETH").to_bytes32();
    assert_eq!(encoded[..3], *b"ETH");
    assert!(encoded[3..].iter().all(|byte| *byte == 0));
}

#[test]
fn test_feed_status_wire_tokens() {
    assert_eq!(FeedStatus::from_liveness(true).wire(), "live");
    assert_eq!(FeedStatus::from_liveness(false).wire(), "ded");
}
