use thiserror::Error;

/// Failures the engine can actually construct.
///
/// Missing market data is not an error anywhere in this workspace: derived
/// metrics answer `None` and unrecognized field updates are dropped. The
/// variants below cover genuinely malformed input at the system boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Decoded value kind does not match the transform input.")]
    ValueKindMismatch,

    #[error("Invalid address book: {0}.")]
    InvalidAddressBook(String),
}
