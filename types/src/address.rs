//! Wallet address type with `0x` prefix.

use crate::error::ElectionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An Ethereum-style wallet address: `0x` followed by 40 hex characters.
///
/// All callers, admin and voters alike, are identified by their address;
/// mutating ledger calls carry it as the transaction sender.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WalletAddress(String);

impl WalletAddress {
    /// The standard prefix for all wallet addresses.
    pub const PREFIX: &'static str = "0x";

    /// Length of a full address string, prefix included.
    pub const LEN: usize = 42;

    /// Parse and validate an address string.
    ///
    /// Hex digits are kept in the casing they were given; comparison is
    /// case-insensitive via normalization at parse time.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, ElectionError> {
        let s = raw.as_ref().trim();
        if !Self::is_well_formed(s) {
            return Err(ElectionError::InvalidAddress(s.to_string()));
        }
        Ok(Self(format!("0x{}", s[2..].to_lowercase())))
    }

    /// Whether a raw string is a syntactically valid address.
    pub fn is_well_formed(s: &str) -> bool {
        s.len() == Self::LEN
            && s.starts_with(Self::PREFIX)
            && s[2..].bytes().all(|b| b.is_ascii_hexdigit())
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WalletAddress {
    type Err = ElectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for WalletAddress {
    type Error = ElectionError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<WalletAddress> for String {
    fn from(addr: WalletAddress) -> Self {
        addr.0
    }
}
