use std::fmt;

use serde::{Deserialize, Serialize};

/// Supported currencies. Each coin carries its own address format and its
/// own fee model (see `crate::fees`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoinType {
    /// Bitcoin (byte-rate fee model)
    Bitcoin,

    /// Ethereum (gas fee model)
    Ethereum,
}

impl CoinType {
    /// Ticker symbol used in log lines and displays
    pub fn symbol(&self) -> &'static str {
        match self {
            CoinType::Bitcoin => "BTC",
            CoinType::Ethereum => "ETH",
        }
    }

    /// Check whether an address is well-formed for this coin.
    ///
    /// Bitcoin addresses start with "1", "3" or "bc1". Ethereum addresses
    /// are "0x" followed by 40 hex characters. Empty or blank input is
    /// never valid.
    pub fn is_valid_address(&self, address: &str) -> bool {
        let address = address.trim();
        if address.is_empty() {
            return false;
        }

        match self {
            CoinType::Bitcoin => {
                address.starts_with('1') || address.starts_with('3') || address.starts_with("bc1")
            }
            CoinType::Ethereum => {
                address.len() == 42
                    && address.starts_with("0x")
                    && address[2..].chars().all(|c| c.is_ascii_hexdigit())
            }
        }
    }

    /// All supported coins
    pub fn all() -> [CoinType; 2] {
        [CoinType::Bitcoin, CoinType::Ethereum]
    }
}

impl fmt::Display for CoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Fee-priority tier chosen by the transaction creator. Each tier scales
/// the coin's base fee by a fixed multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FeeLevel {
    /// Cheapest tier, slowest expected confirmation
    Economic,

    /// Default tier
    Standard,

    /// Highest tier, fastest expected confirmation
    Fast,
}

impl FeeLevel {
    /// Multiplier applied to the coin's base fee
    pub fn multiplier(&self) -> f64 {
        match self {
            FeeLevel::Economic => 0.5,
            FeeLevel::Standard => 1.0,
            FeeLevel::Fast => 2.0,
        }
    }

    /// Human description of the expected wait at this tier
    pub fn description(&self) -> &'static str {
        match self {
            FeeLevel::Economic => "around 25 min",
            FeeLevel::Standard => "around 10 min",
            FeeLevel::Fast => "around 2 min",
        }
    }

    /// Apply this tier's multiplier to a base fee
    pub fn apply(&self, base_fee: f64) -> f64 {
        base_fee * self.multiplier()
    }

    /// All tiers, cheapest first
    pub fn all() -> [FeeLevel; 3] {
        [FeeLevel::Economic, FeeLevel::Standard, FeeLevel::Fast]
    }
}

impl fmt::Display for FeeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FeeLevel::Economic => "Economic",
            FeeLevel::Standard => "Standard",
            FeeLevel::Fast => "Fast",
        };
        f.write_str(name)
    }
}
