use log::debug;

use crate::fees::FeeCalculator;
use crate::model::FeeLevel;

/// 1 satoshi in BTC
const SATOSHI_TO_BTC: f64 = 0.000_000_01;

/// Byte-rate fee model: a transaction of a fixed average size pays a
/// per-byte satoshi rate scaled by the priority multiplier.
pub struct BitcoinFees {
    /// Assumed size of an average transaction
    tx_size_bytes: u64,

    /// Base rate at the Standard tier
    sat_per_byte: f64,
}

impl BitcoinFees {
    pub fn new(tx_size_bytes: u64, sat_per_byte: f64) -> Self {
        Self {
            tx_size_bytes,
            sat_per_byte,
        }
    }

    /// Fee for a transaction of an explicit size instead of the average
    pub fn fee_for_size(&self, size_bytes: u64, level: FeeLevel) -> f64 {
        let sat_per_byte = self.sat_per_byte * level.multiplier();
        size_bytes as f64 * sat_per_byte * SATOSHI_TO_BTC
    }

    /// Human-readable breakdown of the parameters at a tier
    pub fn calculation_details(&self, level: FeeLevel) -> String {
        let sat_per_byte = self.sat_per_byte * level.multiplier();
        format!(
            "Bitcoin - size: {} bytes, rate: {:.2} sat/byte, multiplier: {:.1}x",
            self.tx_size_bytes,
            sat_per_byte,
            level.multiplier()
        )
    }
}

impl Default for BitcoinFees {
    fn default() -> Self {
        Self::new(250, 20.0)
    }
}

impl FeeCalculator for BitcoinFees {
    fn fee_for_amount(&self, _amount: f64, level: FeeLevel) -> f64 {
        let sat_per_byte = self.sat_per_byte * level.multiplier();
        let total_satoshi = sat_per_byte * self.tx_size_bytes as f64;
        let fee_btc = total_satoshi * SATOSHI_TO_BTC;

        debug!(
            "BitcoinFees: level {}, {:.2} sat/byte -> {:.8} BTC",
            level, sat_per_byte, fee_btc
        );

        fee_btc
    }

    fn base_fee(&self) -> f64 {
        self.tx_size_bytes as f64 * self.sat_per_byte * SATOSHI_TO_BTC
    }

    fn name(&self) -> &'static str {
        "BitcoinFees"
    }
}
