//! Address-shaped participant identities.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// A participant identity: `0x` followed by exactly 40 hex digits.
///
/// Input is accepted case-insensitively and stored lower-cased so that
/// identities compare by value regardless of how a caller cased them.
/// Construction is the single validation point — a held `Identity` is
/// always well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity(String);

impl Identity {
    /// The raw lower-cased address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(raw: &str) -> Result<(), LedgerError> {
        let hex = raw
            .strip_prefix("0x")
            .ok_or_else(|| invalid(raw, "missing 0x prefix"))?;
        if hex.len() != 40 {
            return Err(invalid(raw, "expected 40 hex digits"));
        }
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid(raw, "non-hex character"));
        }
        Ok(())
    }
}

fn invalid(raw: &str, reason: &str) -> LedgerError {
    LedgerError::InvalidInput(format!("malformed identity '{raw}': {reason}"))
}

impl FromStr for Identity {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Identity::validate(s)?;
        Ok(Identity(s.to_ascii_lowercase()))
    }
}

impl TryFrom<String> for Identity {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Identity> for String {
    fn from(identity: Identity) -> Self {
        identity.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
