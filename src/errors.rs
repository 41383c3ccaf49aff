//! Custom error types used in this crate.
use std::{cell::RefCell, fmt, rc::Rc};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Backing errors for all transaction-construction operations.
#[derive(Clone, Debug, Error)]
pub enum Error {
    /// CB58 or bech32 checksum verification failed.
    #[error("checksum mismatch (message: {message:?})")]
    Checksum { message: String },

    /// Bech32 HRP or encoding invalid.
    #[error("bech32 error (message: {message:?})")]
    Bech32 { message: String },

    /// Deserializer encountered a type id absent from the codec registry.
    #[error("unknown type id {type_id}")]
    UnknownType { type_id: u32 },

    /// Solver exhausted a UTXOSet without covering demand for an asset.
    #[error("insufficient funds for asset {asset_id}: short by {shortfall}")]
    InsufficientFunds {
        asset_id: crate::ids::Id,
        shortfall: u64,
    },

    /// Signing requested a key not present in the keychain.
    #[error("missing key for address {address:?}")]
    MissingKey { address: String },

    /// Invalid builder configuration: bad threshold, negative amount, oversized memo, mismatched fee asset.
    #[error("invalid configuration (message: {message:?})")]
    Config { message: String },

    /// Invalid ECDSA recovery id, or recovery failed against the supplied digest.
    #[error("signature recovery failed (message: {message:?})")]
    Recovery { message: String },

    #[error("failed API (message: {message:?}, retryable: {retryable:?})")]
    API { message: String, retryable: bool },
    #[error("failed for other reasons (message: {message:?}, retryable: {retryable:?})")]
    Other { message: String, retryable: bool },
}

impl Error {
    /// Returns the error message in "String".
    #[inline]
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Error::Checksum { message }
            | Error::Bech32 { message }
            | Error::Config { message }
            | Error::Recovery { message } => message.clone(),
            Error::UnknownType { type_id } => format!("unknown type id {type_id}"),
            Error::InsufficientFunds {
                asset_id,
                shortfall,
            } => format!("insufficient funds for asset {asset_id}: short by {shortfall}"),
            Error::MissingKey { address } => format!("missing key for address {address}"),
            Error::API { message, .. } | Error::Other { message, .. } => message.clone(),
        }
    }

    /// Returns if the error is retryable. Only the transport-shaped variants
    /// (`API`/`Other`) carry retry information; everything else is a
    /// deterministic construction failure and is never retryable.
    #[inline]
    #[must_use]
    pub fn retryable(&self) -> bool {
        match self {
            Error::API { retryable, .. } | Error::Other { retryable, .. } => *retryable,
            _ => false,
        }
    }

    /// Returns true if the error message contains the substring.
    #[inline]
    #[must_use]
    pub fn contains(&self, s: &str) -> bool {
        self.message().contains(s)
    }
}

#[derive(Debug)]
pub struct Errors {
    d: Rc<RefCell<Vec<Error>>>,
}

impl Errors {
    pub fn new() -> Self {
        Self {
            d: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn errored(&self) -> bool {
        !self.d.borrow().is_empty()
    }

    pub fn add(&self, e: Error) {
        self.d.borrow_mut().push(e);
    }
}

impl Default for Errors {
    fn default() -> Self {
        Self::new()
    }
}

/// ref. <https://doc.rust-lang.org/std/string/trait.ToString.html>
/// ref. <https://doc.rust-lang.org/std/fmt/trait.Display.html>
/// Use "Self.to_string()" to directly invoke this.
impl fmt::Display for Errors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut errs: Vec<String> = Vec::new();
        for e in self.d.borrow().iter() {
            errs.push(e.message());
        }
        write!(f, "{}", errs.join(", "))
    }
}
