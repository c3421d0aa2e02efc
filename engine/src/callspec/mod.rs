use alloy_primitives::{Address, B256, U256};
use bigdecimal::BigDecimal;
use num_bigint::{BigInt, BigUint};
use serde::Serialize;

use common_constants::{FEED_DECIMALS, FEED_PRECISION, RAY};
use common_errors::EngineError;
use common_structs::{CollateralTag, FeedStatus, FieldValue, MarketField};

use crate::config::AddressBook;

const SIG_PEEK: &str = "peek()(uint256,bool)";
const SIG_JUG_ILKS: &str = "ilks(bytes32)(uint256,uint48)";
const SIG_VAT_ILKS: &str = "ilks(bytes32)(uint256,uint256,uint256,uint256,uint256)";
const SIG_PIT_ILKS: &str = "ilks(bytes32)(uint256,uint256)";
const SIG_SPOT_ILKS: &str = "ilks(bytes32)(address,uint256)";
const SIG_CAT_ILKS: &str = "ilks(bytes32)(address,uint256,uint256)";
const SIG_BALANCE_OF: &str = "balanceOf(address)(uint256)";

/// One declarative read request for the multicall executor: where to call,
/// what to call, and how each positional output binds back into the state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallSpec {
    /// `None` when the address lookup failed; the executor reports that at
    /// dispatch time, the factory never substitutes a default.
    pub target: Option<Address>,
    pub call: Call,
    /// One binding per declared output, `Skip` included, so decoder
    /// alignment is positional.
    pub returns: Vec<ReturnBinding>,
}

/// Human-readable function signature plus positional arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Call {
    pub signature: &'static str,
    pub args: Vec<CallArg>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CallArg {
    /// Fixed-width collateral identifier.
    Bytes32(B256),
    /// Cross-referenced contract address; `None` when the lookup failed.
    Address(Option<Address>),
}

/// How one positional output of a call maps into the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ReturnBinding {
    /// Output is decoded (keeping alignment) but not bound to any field.
    Skip,
    Keep {
        key: OutputKey,
        transform: Option<Transform>,
    },
}

impl ReturnBinding {
    pub fn keep(key: OutputKey, transform: Transform) -> Self {
        ReturnBinding::Keep {
            key,
            transform: Some(transform),
        }
    }

    /// Binds an output without transforming the decoded value.
    pub fn keep_raw(key: OutputKey) -> Self {
        ReturnBinding::Keep {
            key,
            transform: None,
        }
    }
}

/// Field-update key a kept output is emitted under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum OutputKey {
    /// Market-level binding; wire form `<tag>.<field>`.
    Market {
        collateral_type: CollateralTag,
        field: MarketField,
    },
    /// Bare cross-reference key outside the record model, e.g. the
    /// `pip<TAG>` feed address.
    CrossRef(String),
}

impl OutputKey {
    pub fn wire(&self) -> String {
        match self {
            OutputKey::Market {
                collateral_type,
                field,
            } => format!("{}.{}", collateral_type, field.wire()),
            OutputKey::CrossRef(name) => name.clone(),
        }
    }
}

/// A decoded positional output word, as handed back by the executor's ABI
/// decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Word {
    Uint(U256),
    Bool(bool),
    Address(Address),
}

impl Word {
    fn to_bigint(self) -> Option<BigInt> {
        match self {
            Word::Uint(value) => Some(BigInt::from(BigUint::from_bytes_le(
                &value.to_le_bytes::<32>(),
            ))),
            _ => None,
        }
    }

    /// The untransformed field value, for bindings that keep the decoded
    /// word as-is (raw timestamps, cross-referenced addresses).
    pub fn into_raw_value(self) -> FieldValue {
        match self {
            Word::Uint(value) => FieldValue::Decimal(BigDecimal::from(BigInt::from(
                BigUint::from_bytes_le(&value.to_le_bytes::<32>()),
            ))),
            Word::Bool(live) => FieldValue::Status(FeedStatus::from_liveness(live)),
            Word::Address(address) => FieldValue::Address(address),
        }
    }
}

/// Unit conversion applied to a decoded word before it becomes a field
/// update. Declarative so call specs stay plain data; the executor applies
/// it through [`Transform::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Transform {
    /// `raw * 10^-decimals`, full precision; used for oracle prices.
    Usd { decimals: i64 },
    /// Nonzero word means the feed is live.
    Liveness,
    /// Per-second RAY growth factor compounded to a yearly fraction.
    AnnualizedRate,
    FromWei { digits: i64 },
    FromRay { digits: i64 },
    FromRad { digits: i64 },
    /// RAY ratio rebased to whole percent (1.5 RAY -> 150).
    RatioPercent,
    /// RAY growth factor rebased to percent over one (1.13 RAY -> 13.00).
    PenaltyPercent { digits: i64 },
}

impl Transform {
    pub fn apply(&self, word: Word) -> Result<FieldValue, EngineError> {
        match self {
            Transform::Usd { decimals } => {
                let raw = word.to_bigint().ok_or(EngineError::ValueKindMismatch)?;
                Ok(FieldValue::Decimal(common_math::from_units(&raw, *decimals)))
            }
            Transform::Liveness => match word {
                Word::Bool(live) => Ok(FieldValue::Status(FeedStatus::from_liveness(live))),
                Word::Uint(value) => Ok(FieldValue::Status(FeedStatus::from_liveness(
                    !value.is_zero(),
                ))),
                Word::Address(_) => Err(EngineError::ValueKindMismatch),
            },
            Transform::AnnualizedRate => {
                let raw = word.to_bigint().ok_or(EngineError::ValueKindMismatch)?;
                Ok(FieldValue::Decimal(common_rates::annualized_rate(&raw)))
            }
            Transform::FromWei { digits } => {
                let raw = word.to_bigint().ok_or(EngineError::ValueKindMismatch)?;
                Ok(FieldValue::Decimal(common_math::from_wei(&raw, *digits)))
            }
            Transform::FromRay { digits } => {
                let raw = word.to_bigint().ok_or(EngineError::ValueKindMismatch)?;
                Ok(FieldValue::Decimal(common_math::from_ray(&raw, *digits)))
            }
            Transform::FromRad { digits } => {
                let raw = word.to_bigint().ok_or(EngineError::ValueKindMismatch)?;
                Ok(FieldValue::Decimal(common_math::from_rad(&raw, *digits)))
            }
            Transform::RatioPercent => {
                let raw = word.to_bigint().ok_or(EngineError::ValueKindMismatch)?;
                let rebased = raw * BigInt::from(100u32);
                Ok(FieldValue::Decimal(common_math::from_ray(&rebased, 0)))
            }
            Transform::PenaltyPercent { digits } => {
                let raw = word.to_bigint().ok_or(EngineError::ValueKindMismatch)?;
                let rebased = (raw - BigInt::from(RAY)) * BigInt::from(100u32);
                Ok(FieldValue::Decimal(common_math::from_ray(&rebased, *digits)))
            }
        }
    }
}

fn market_key(tag: &CollateralTag, field: MarketField) -> OutputKey {
    OutputKey::Market {
        collateral_type: tag.clone(),
        field,
    }
}

/// Price feed read: oracle USD value plus feed liveness.
pub fn price_feed(book: &AddressBook, tag: &CollateralTag, decimals: i64) -> CallSpec {
    CallSpec {
        target: book.price_feed(tag),
        call: Call {
            signature: SIG_PEEK,
            args: vec![],
        },
        returns: vec![
            ReturnBinding::keep(
                market_key(tag, MarketField::FeedValueUsd),
                Transform::Usd { decimals },
            ),
            ReturnBinding::keep(market_key(tag, MarketField::FeedSetUsd), Transform::Liveness),
        ],
    }
}

/// Stability-fee read: the per-second duty annualized on the way in, plus
/// the raw last-drip timestamp.
pub fn stability_fee(book: &AddressBook, tag: &CollateralTag) -> CallSpec {
    CallSpec {
        target: book.jug(),
        call: Call {
            signature: SIG_JUG_ILKS,
            args: vec![CallArg::Bytes32(tag.to_bytes32())],
        },
        returns: vec![
            ReturnBinding::keep(market_key(tag, MarketField::Rate), Transform::AnnualizedRate),
            ReturnBinding::keep_raw(market_key(tag, MarketField::LastDrip)),
        ],
    }
}

/// Ledger-internal rate accumulator; only the second of the five ledger
/// outputs is of interest here.
pub fn rate_accumulator(book: &AddressBook, tag: &CollateralTag) -> CallSpec {
    CallSpec {
        target: book.vat(),
        call: Call {
            signature: SIG_VAT_ILKS,
            args: vec![CallArg::Bytes32(tag.to_bytes32())],
        },
        returns: vec![
            ReturnBinding::Skip,
            ReturnBinding::keep(
                market_key(tag, MarketField::IlkRate),
                Transform::FromRay {
                    digits: FEED_PRECISION,
                },
            ),
            ReturnBinding::Skip,
            ReturnBinding::Skip,
            ReturnBinding::Skip,
        ],
    }
}

/// Price with safety margin and the per-type debt ceiling.
pub fn safety_price(book: &AddressBook, tag: &CollateralTag) -> CallSpec {
    CallSpec {
        target: book.pit(),
        call: Call {
            signature: SIG_PIT_ILKS,
            args: vec![CallArg::Bytes32(tag.to_bytes32())],
        },
        returns: vec![
            ReturnBinding::keep(
                market_key(tag, MarketField::PriceWithSafetyMargin),
                Transform::FromRay {
                    digits: FEED_PRECISION,
                },
            ),
            ReturnBinding::keep(
                market_key(tag, MarketField::DebtCeiling),
                Transform::FromWei {
                    digits: FEED_PRECISION,
                },
            ),
        ],
    }
}

/// Liquidation ratio, with the feed address cross-referenced under a bare
/// `pip<TAG>` key.
pub fn liquidation_ratio(book: &AddressBook, tag: &CollateralTag) -> CallSpec {
    CallSpec {
        target: book.spot(),
        call: Call {
            signature: SIG_SPOT_ILKS,
            args: vec![CallArg::Bytes32(tag.to_bytes32())],
        },
        returns: vec![
            ReturnBinding::keep_raw(OutputKey::CrossRef(format!("pip{tag}"))),
            ReturnBinding::keep(
                market_key(tag, MarketField::LiquidationRatio),
                Transform::RatioPercent,
            ),
        ],
    }
}

/// Liquidator parameters: address, penalty over one, max auction lot size.
pub fn liquidator(book: &AddressBook, tag: &CollateralTag) -> CallSpec {
    CallSpec {
        target: book.cat(),
        call: Call {
            signature: SIG_CAT_ILKS,
            args: vec![CallArg::Bytes32(tag.to_bytes32())],
        },
        returns: vec![
            ReturnBinding::keep_raw(market_key(tag, MarketField::LiquidatorAddress)),
            ReturnBinding::keep(
                market_key(tag, MarketField::LiquidationPenalty),
                Transform::PenaltyPercent { digits: 2 },
            ),
            ReturnBinding::keep(
                market_key(tag, MarketField::MaxAuctionLotSize),
                Transform::FromWei {
                    digits: FEED_PRECISION,
                },
            ),
        ],
    }
}

/// Collateral held by the system's adapter, read off the token contract.
pub fn adapter_balance(book: &AddressBook, tag: &CollateralTag) -> CallSpec {
    CallSpec {
        target: book.collateral_token(tag),
        call: Call {
            signature: SIG_BALANCE_OF,
            args: vec![CallArg::Address(book.join_adapter(tag))],
        },
        returns: vec![ReturnBinding::keep(
            market_key(tag, MarketField::AdapterBalance),
            Transform::FromWei {
                digits: FEED_PRECISION,
            },
        )],
    }
}

/// Raw debt-ceiling "line" from the ledger; only the fifth positional
/// output is bound, the earlier four are decoded and discarded.
pub fn debt_ceiling_line(book: &AddressBook, tag: &CollateralTag) -> CallSpec {
    CallSpec {
        target: book.vat(),
        call: Call {
            signature: SIG_VAT_ILKS,
            args: vec![CallArg::Bytes32(tag.to_bytes32())],
        },
        returns: vec![
            ReturnBinding::Skip,
            ReturnBinding::Skip,
            ReturnBinding::Skip,
            ReturnBinding::Skip,
            ReturnBinding::keep(
                market_key(tag, MarketField::DebtCeiling),
                Transform::FromRad {
                    digits: FEED_PRECISION,
                },
            ),
        ],
    }
}

/// The complete read model for one collateral type: all eight call specs,
/// in dispatch order.
pub fn collateral_model(book: &AddressBook, tag: &CollateralTag) -> Vec<CallSpec> {
    vec![
        price_feed(book, tag, FEED_DECIMALS),
        stability_fee(book, tag),
        safety_price(book, tag),
        liquidation_ratio(book, tag),
        liquidator(book, tag),
        rate_accumulator(book, tag),
        adapter_balance(book, tag),
        debt_ceiling_line(book, tag),
    ]
}
