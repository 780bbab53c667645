use serde::{Deserialize, Serialize};

/// Fee-model configuration. Defaults mirror commonly quoted network
/// figures; they are inputs to the simulation, not live market data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeConfig {
    /// Assumed size of an average Bitcoin transaction
    pub btc_tx_size_bytes: u64,

    /// Bitcoin base rate at the Standard tier, in satoshi per byte
    pub btc_sat_per_byte: f64,

    /// Gas limit of a plain Ethereum transfer
    pub eth_gas_limit: u64,

    /// Ethereum base gas price at the Standard tier, in gwei
    pub eth_gas_price_gwei: f64,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            btc_tx_size_bytes: 250,
            btc_sat_per_byte: 20.0,
            eth_gas_limit: 21_000,
            eth_gas_price_gwei: 30.0,
        }
    }
}
