//! The closed set of capability roles.
//!
//! Roles gate which identities may invoke which ledger operations.
//! `Admin` is special: it exists only as the single identity fixed at
//! ledger creation and can never be granted.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A capability tag granted to an identity.
///
/// Serialized in the upper-case wire form used by the grant interface
/// (`"MINER"`, `"CUTTER"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Miner,
    Cutter,
    Certifier,
    Retailer,
    Admin,
}

impl Role {
    /// Canonical wire/display name.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Miner => "MINER",
            Role::Cutter => "CUTTER",
            Role::Certifier => "CERTIFIER",
            Role::Retailer => "RETAILER",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
