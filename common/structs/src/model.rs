use core::fmt;

use alloy_primitives::{Address, B256};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

// Wire-level field names used by the multicall executor protocol. The
// tagged enums below are the in-process form; these strings survive only
// at the dotted-key boundary.
pub const INK: &str = "ink";
pub const ART: &str = "art";
pub const ILK: &str = "ilk";

pub const FEED_VALUE_USD: &str = "feedValueUSD";
pub const FEED_SET_USD: &str = "feedSetUSD";
pub const RATE: &str = "rate";
pub const LAST_DRIP: &str = "lastDrip";
pub const ILK_RATE: &str = "ilkRate";
pub const PRICE_WITH_SAFETY_MARGIN: &str = "priceWithSafetyMargin";
pub const DEBT_CEILING: &str = "debtCeiling";
pub const LIQUIDATION_RATIO: &str = "liquidationRatio";
pub const LIQUIDATOR_ADDRESS: &str = "liquidatorAddress";
pub const LIQUIDATION_PENALTY: &str = "liquidationPenalty";
pub const MAX_AUCTION_LOT_SIZE: &str = "maxAuctionLotSize";
pub const ADAPTER_BALANCE: &str = "adapterBalance";

/// Collateral-type identifier ("ETH", "BAT", ...). Keys the market record
/// and joins vault records against their market data.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollateralTag(String);

impl CollateralTag {
    pub fn new(tag: impl Into<String>) -> Self {
        CollateralTag(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Fixed-width identifier used as the `bytes32` call argument: the
    /// ASCII tag right-padded with zeros, truncated past 32 bytes.
    pub fn to_bytes32(&self) -> B256 {
        let mut buf = [0u8; 32];
        let bytes = self.0.as_bytes();
        let len = bytes.len().min(32);
        buf[..len].copy_from_slice(&bytes[..len]);
        B256::new(buf)
    }
}

impl fmt::Display for CollateralTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CollateralTag {
    fn from(tag: &str) -> Self {
        CollateralTag::new(tag)
    }
}

/// Oracle feed liveness as reported by the price feed read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedStatus {
    #[serde(rename = "live")]
    Live,
    #[serde(rename = "ded")]
    Dead,
}

impl FeedStatus {
    pub fn from_liveness(live: bool) -> Self {
        if live {
            FeedStatus::Live
        } else {
            FeedStatus::Dead
        }
    }

    /// Wire token used by the executor protocol.
    pub fn wire(&self) -> &'static str {
        match self {
            FeedStatus::Live => "live",
            FeedStatus::Dead => "ded",
        }
    }
}

/// The closed set of vault-record fields the reducer recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VaultField {
    CollateralAmount,
    DebtUnits,
    CollateralType,
}

impl VaultField {
    pub fn wire(&self) -> &'static str {
        match self {
            VaultField::CollateralAmount => INK,
            VaultField::DebtUnits => ART,
            VaultField::CollateralType => ILK,
        }
    }

    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            INK => Some(VaultField::CollateralAmount),
            ART => Some(VaultField::DebtUnits),
            ILK => Some(VaultField::CollateralType),
            _ => None,
        }
    }
}

/// Market-record fields produced by the collateral-type call model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketField {
    FeedValueUsd,
    FeedSetUsd,
    Rate,
    LastDrip,
    IlkRate,
    PriceWithSafetyMargin,
    DebtCeiling,
    LiquidationRatio,
    LiquidatorAddress,
    LiquidationPenalty,
    MaxAuctionLotSize,
    AdapterBalance,
}

impl MarketField {
    pub fn wire(&self) -> &'static str {
        match self {
            MarketField::FeedValueUsd => FEED_VALUE_USD,
            MarketField::FeedSetUsd => FEED_SET_USD,
            MarketField::Rate => RATE,
            MarketField::LastDrip => LAST_DRIP,
            MarketField::IlkRate => ILK_RATE,
            MarketField::PriceWithSafetyMargin => PRICE_WITH_SAFETY_MARGIN,
            MarketField::DebtCeiling => DEBT_CEILING,
            MarketField::LiquidationRatio => LIQUIDATION_RATIO,
            MarketField::LiquidatorAddress => LIQUIDATOR_ADDRESS,
            MarketField::LiquidationPenalty => LIQUIDATION_PENALTY,
            MarketField::MaxAuctionLotSize => MAX_AUCTION_LOT_SIZE,
            MarketField::AdapterBalance => ADAPTER_BALANCE,
        }
    }

    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            FEED_VALUE_USD => Some(MarketField::FeedValueUsd),
            FEED_SET_USD => Some(MarketField::FeedSetUsd),
            RATE => Some(MarketField::Rate),
            LAST_DRIP => Some(MarketField::LastDrip),
            ILK_RATE => Some(MarketField::IlkRate),
            PRICE_WITH_SAFETY_MARGIN => Some(MarketField::PriceWithSafetyMargin),
            DEBT_CEILING => Some(MarketField::DebtCeiling),
            LIQUIDATION_RATIO => Some(MarketField::LiquidationRatio),
            LIQUIDATOR_ADDRESS => Some(MarketField::LiquidatorAddress),
            LIQUIDATION_PENALTY => Some(MarketField::LiquidationPenalty),
            MAX_AUCTION_LOT_SIZE => Some(MarketField::MaxAuctionLotSize),
            ADAPTER_BALANCE => Some(MarketField::AdapterBalance),
            _ => None,
        }
    }
}

/// A decoded-and-transformed value carried by a field update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Decimal(BigDecimal),
    Address(Address),
    Status(FeedStatus),
    Tag(CollateralTag),
}

/// One discrete field update emitted by the multicall executor.
///
/// The executor's dotted string keys (`"<vaultId>.<field>.<tag>"` for vault
/// fields, `"<tag>.<field>"` for market fields) exist only at the wire
/// boundary; in process the update is this tagged structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldUpdate {
    Vault {
        vault_id: String,
        field: VaultField,
        collateral_type: CollateralTag,
        value: FieldValue,
    },
    Market {
        collateral_type: CollateralTag,
        field: MarketField,
        value: FieldValue,
    },
}

impl FieldUpdate {
    /// Parses a dotted wire key. Keys with no dot segments, unknown field
    /// names, or any other shape answer `None`; the reducer treats that as
    /// a no-op rather than an error.
    pub fn from_wire(key: &str, value: FieldValue) -> Option<Self> {
        let segments: Vec<&str> = key.split('.').collect();
        match segments.as_slice() {
            [vault_id, field, tag] => {
                VaultField::from_wire(field).map(|field| FieldUpdate::Vault {
                    vault_id: (*vault_id).to_string(),
                    field,
                    collateral_type: CollateralTag::new(*tag),
                    value,
                })
            }
            [tag, field] => MarketField::from_wire(field).map(|field| FieldUpdate::Market {
                collateral_type: CollateralTag::new(*tag),
                field,
                value,
            }),
            _ => None,
        }
    }

    /// The dotted wire form of this update's key.
    pub fn wire_key(&self) -> String {
        match self {
            FieldUpdate::Vault {
                vault_id,
                field,
                collateral_type,
                ..
            } => format!("{}.{}.{}", vault_id, field.wire(), collateral_type),
            FieldUpdate::Market {
                collateral_type,
                field,
                ..
            } => format!("{}.{}", collateral_type, field.wire()),
        }
    }
}

/// Normalized per-vault record. All data fields start absent; `Some(0)`
/// and `None` are distinct states and downstream getters never conflate
/// them with a numeric default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VaultRecord {
    pub initialized: bool,
    pub collateral_amount: Option<BigDecimal>,
    pub debt_units: Option<BigDecimal>,
    pub collateral_type: Option<CollateralTag>,
}

/// Per-collateral-type market data assembled from the eight reads of the
/// call model. A field stays `None` until its read has been decoded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketRecord {
    pub price_usd: Option<BigDecimal>,
    pub feed_status: Option<FeedStatus>,
    pub stability_fee_apr: Option<BigDecimal>,
    pub last_drip: Option<BigDecimal>,
    pub rate_accumulator: Option<BigDecimal>,
    pub price_with_safety_margin: Option<BigDecimal>,
    pub debt_ceiling: Option<BigDecimal>,
    pub liquidation_ratio: Option<BigDecimal>,
    pub liquidator_address: Option<Address>,
    pub liquidation_penalty: Option<BigDecimal>,
    pub max_auction_lot_size: Option<BigDecimal>,
    pub adapter_balance: Option<BigDecimal>,
}

/// A vault record joined with its collateral type's market record; the
/// input every derived metric is computed from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VaultView {
    pub initialized: bool,
    pub collateral_amount: Option<BigDecimal>,
    pub debt_units: Option<BigDecimal>,
    pub collateral_type: Option<CollateralTag>,
    pub market: MarketRecord,
}
