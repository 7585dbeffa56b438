//! Simulation configuration loaded from environment variables.

use facet_core::Identity;

/// Actor identities and tunables for the supply-chain simulation.
///
/// All fields default to the well-known local development accounts, so
/// the binary runs out of the box. Override via environment variables.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// The one admin identity, fixed at ledger creation.
    pub admin: Identity,
    pub miner: Identity,
    pub cutter: Identity,
    pub certifier: Identity,
    pub retailer: Identity,
    /// The final buyer recorded at the sale.
    pub buyer: Identity,
    /// Live buffer capacity of the audit broadcast channel.
    pub audit_capacity: usize,
}

impl SimulationConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default                        |
    /// |-----------------------|--------------------------------|
    /// | `FACET_ADMIN`         | local dev account 0            |
    /// | `FACET_MINER`         | local dev account 1            |
    /// | `FACET_CUTTER`        | local dev account 2            |
    /// | `FACET_CERTIFIER`     | local dev account 3            |
    /// | `FACET_RETAILER`      | local dev account 4            |
    /// | `FACET_BUYER`         | local dev account 5            |
    /// | `FACET_AUDIT_CAPACITY`| `1024`                         |
    pub fn from_env() -> Self {
        let audit_capacity: usize = std::env::var("FACET_AUDIT_CAPACITY")
            .unwrap_or_else(|_| "1024".into())
            .parse()
            .expect("FACET_AUDIT_CAPACITY must be a valid usize");

        SimulationConfig {
            admin: identity_var("FACET_ADMIN", "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
            miner: identity_var("FACET_MINER", "0x70997970C51812dc3A010C7d01b50e0d17dc79C8"),
            cutter: identity_var("FACET_CUTTER", "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC"),
            certifier: identity_var(
                "FACET_CERTIFIER",
                "0x90F79bf6EB2c4f870365E785982E1f101E93b906",
            ),
            retailer: identity_var(
                "FACET_RETAILER",
                "0x15d34AAf54267DB7D7c367839AAf71A00a2C6A65",
            ),
            buyer: identity_var("FACET_BUYER", "0x9965507D1a55bcC2695C58ba16FB37d819B0A4dc"),
            audit_capacity,
        }
    }
}

fn identity_var(name: &str, default: &str) -> Identity {
    std::env::var(name)
        .unwrap_or_else(|_| default.into())
        .parse()
        .unwrap_or_else(|e| panic!("{name} is not a valid identity: {e}"))
}
