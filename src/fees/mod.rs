// Per-coin fee strategies.
//
// Each coin implements the `FeeCalculator` capability; the `FeeSchedule`
// selects the right calculator from the coin type. Calculations are pure;
// every computed fee is logged for audit.

pub mod bitcoin;
pub mod ethereum;

use crate::config::FeeConfig;
use crate::model::{CoinType, FeeLevel, Transaction};

pub use bitcoin::BitcoinFees;
pub use ethereum::EthereumFees;

/// Fee-calculation capability, one implementation per coin.
pub trait FeeCalculator: Send + Sync {
    /// Fee for a transaction, derived from its amount and fee level
    fn fee_for(&self, tx: &Transaction) -> f64 {
        self.fee_for_amount(tx.amount(), tx.fee_level())
    }

    /// Fee for a given amount at a given priority tier.
    ///
    /// In both supported models the fee depends on the tier but not on the
    /// amount (byte-rate and gas models price the transfer, not the value);
    /// the amount stays in the signature for comparison tables.
    fn fee_for_amount(&self, amount: f64, level: FeeLevel) -> f64;

    /// Fee at the Standard tier before any multiplier
    fn base_fee(&self) -> f64;

    /// Calculator name for logs and debugging
    fn name(&self) -> &'static str;
}

/// Lookup table mapping each coin to its fee calculator.
pub struct FeeSchedule {
    bitcoin: BitcoinFees,
    ethereum: EthereumFees,
}

impl FeeSchedule {
    pub fn new(config: &FeeConfig) -> Self {
        Self {
            bitcoin: BitcoinFees::new(config.btc_tx_size_bytes, config.btc_sat_per_byte),
            ethereum: EthereumFees::new(config.eth_gas_limit, config.eth_gas_price_gwei),
        }
    }

    /// The calculator for a coin
    pub fn calculator_for(&self, coin: CoinType) -> &dyn FeeCalculator {
        match coin {
            CoinType::Bitcoin => &self.bitcoin,
            CoinType::Ethereum => &self.ethereum,
        }
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self::new(&FeeConfig::default())
    }
}
