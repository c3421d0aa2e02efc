use std::collections::BTreeMap;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use common_errors::EngineError;
use common_structs::CollateralTag;

/// Contract address table keyed by the deployment's registry names
/// (`MCD_VAT`, `PIP_<TAG>`, ...). This is the engine's only configuration
/// input; call-spec builders resolve their targets from it by the naming
/// conventions below.
///
/// A failed lookup is not an error here: builders propagate `None` and the
/// executor reports the unresolvable call when it dispatches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressBook {
    entries: BTreeMap<String, Address>,
}

impl AddressBook {
    pub fn new(entries: BTreeMap<String, Address>) -> Self {
        AddressBook { entries }
    }

    /// Loads the table from its JSON form, a flat object of
    /// `"NAME": "0x..."` pairs.
    pub fn from_json(raw: &str) -> Result<Self, EngineError> {
        serde_json::from_str(raw).map_err(|err| EngineError::InvalidAddressBook(err.to_string()))
    }

    pub fn insert(&mut self, name: impl Into<String>, address: Address) {
        self.entries.insert(name.into(), address);
    }

    pub fn get(&self, name: &str) -> Option<Address> {
        let found = self.entries.get(name).copied();
        if found.is_none() {
            log::debug!("address book has no entry for {name}");
        }
        found
    }

    /// Price feed for a collateral type: `PIP_<TAG>`.
    pub fn price_feed(&self, tag: &CollateralTag) -> Option<Address> {
        self.get(&format!("PIP_{tag}"))
    }

    /// The collateral token itself: `<TAG>`.
    pub fn collateral_token(&self, tag: &CollateralTag) -> Option<Address> {
        self.get(tag.as_str())
    }

    /// Collateral adapter for a collateral type: `MCD_JOIN_<TAG>`.
    pub fn join_adapter(&self, tag: &CollateralTag) -> Option<Address> {
        self.get(&format!("MCD_JOIN_{tag}"))
    }

    /// Stability-fee accumulator singleton.
    pub fn jug(&self) -> Option<Address> {
        self.get("MCD_JUG")
    }

    /// Core ledger singleton.
    pub fn vat(&self) -> Option<Address> {
        self.get("MCD_VAT")
    }

    /// Safety-margin price singleton.
    pub fn pit(&self) -> Option<Address> {
        self.get("MCD_PIT")
    }

    /// Liquidation-ratio singleton.
    pub fn spot(&self) -> Option<Address> {
        self.get("MCD_SPOT")
    }

    /// Liquidator registry singleton.
    pub fn cat(&self) -> Option<Address> {
        self.get("MCD_CAT")
    }
}
