use log::debug;

use crate::fees::FeeCalculator;
use crate::model::FeeLevel;

/// 1 gwei in ETH
const GWEI_TO_ETH: f64 = 0.000_000_001;

/// Gas fee model: a fixed gas limit priced at a per-gas gwei rate scaled
/// by the priority multiplier.
pub struct EthereumFees {
    /// Gas limit of a plain transfer
    gas_limit: u64,

    /// Base gas price at the Standard tier, in gwei
    base_gas_price_gwei: f64,
}

impl EthereumFees {
    pub fn new(gas_limit: u64, base_gas_price_gwei: f64) -> Self {
        Self {
            gas_limit,
            base_gas_price_gwei,
        }
    }

    /// Fee for an explicit gas limit instead of the plain-transfer limit
    pub fn fee_for_gas_limit(&self, gas_limit: u64, level: FeeLevel) -> f64 {
        let gas_price_eth = self.base_gas_price_gwei * level.multiplier() * GWEI_TO_ETH;
        gas_limit as f64 * gas_price_eth
    }

    /// Convert a gwei price to ETH
    pub fn gwei_to_eth(gwei: f64) -> f64 {
        gwei * GWEI_TO_ETH
    }

    /// Human-readable breakdown of the parameters at a tier
    pub fn calculation_details(&self, level: FeeLevel) -> String {
        let gas_price_gwei = self.base_gas_price_gwei * level.multiplier();
        format!(
            "Ethereum - gas limit: {}, price: {:.2} gwei, multiplier: {:.1}x",
            self.gas_limit,
            gas_price_gwei,
            level.multiplier()
        )
    }
}

impl Default for EthereumFees {
    fn default() -> Self {
        Self::new(21_000, 30.0)
    }
}

impl FeeCalculator for EthereumFees {
    fn fee_for_amount(&self, _amount: f64, level: FeeLevel) -> f64 {
        let gas_price_gwei = self.base_gas_price_gwei * level.multiplier();
        let gas_price_eth = gas_price_gwei * GWEI_TO_ETH;
        let fee_eth = self.gas_limit as f64 * gas_price_eth;

        debug!(
            "EthereumFees: level {}, {:.2} gwei -> {:.8} ETH",
            level, gas_price_gwei, fee_eth
        );

        fee_eth
    }

    fn base_fee(&self) -> f64 {
        self.gas_limit as f64 * self.base_gas_price_gwei * GWEI_TO_ETH
    }

    fn name(&self) -> &'static str {
        "EthereumFees"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_standard_fee() {
        let fees = EthereumFees::default();
        // 21000 gas * 30 gwei * 1e-9 = 0.00063 ETH
        assert!((fees.fee_for_amount(1.0, FeeLevel::Standard) - 0.00063).abs() < EPS);
        assert!((fees.base_fee() - 0.00063).abs() < EPS);
    }

    #[test]
    fn test_multiplier_scaling() {
        let fees = EthereumFees::default();
        let base = fees.fee_for_amount(1.0, FeeLevel::Standard);
        assert!((fees.fee_for_amount(1.0, FeeLevel::Economic) - base * 0.5).abs() < EPS);
        assert!((fees.fee_for_amount(1.0, FeeLevel::Fast) - base * 2.0).abs() < EPS);
    }

    #[test]
    fn test_custom_gas_limit() {
        let fees = EthereumFees::default();
        // Doubling the gas limit doubles the fee
        assert!(
            (fees.fee_for_gas_limit(42_000, FeeLevel::Standard) - 2.0 * fees.base_fee()).abs()
                < EPS
        );
    }

    #[test]
    fn test_calculation_details() {
        let fees = EthereumFees::default();
        let details = fees.calculation_details(FeeLevel::Economic);
        assert!(details.contains("21000"));
        assert!(details.contains("15.00 gwei"));
        assert!(details.contains("0.5x"));
    }

    #[test]
    fn test_gwei_conversion() {
        assert!((EthereumFees::gwei_to_eth(1_000_000_000.0) - 1.0).abs() < EPS);
    }
}
