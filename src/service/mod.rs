// Orchestration services.
//
// `TransactionService` validates and creates transactions, `MempoolService`
// owns the pending pool, `WalletService` keeps the wallet registry.
// `AppContext` wires them together once at startup; there are no global
// registries.

pub mod mempool_service;
pub mod transaction_service;
pub mod wallet_service;

use std::sync::Arc;

use thiserror::Error;

use crate::config::Config;
use crate::fees::FeeSchedule;
use crate::model::CoinType;
use crate::storage::LedgerStore;

pub use mempool_service::MempoolService;
pub use transaction_service::{LedgerStats, TransactionService};
pub use wallet_service::WalletService;

/// Error types for the service layer
#[derive(Error, Debug)]
pub enum SimError {
    /// Blank or missing address
    #[error("address cannot be empty")]
    EmptyAddress,

    /// Address does not match the coin's format
    #[error("invalid {coin} address: {address}")]
    InvalidAddress { address: String, coin: CoinType },

    /// Source and destination must differ
    #[error("source and destination addresses must be different")]
    SameAddress,

    /// Amount must be strictly positive
    #[error("invalid amount: {0} (must be positive)")]
    InvalidAmount(f64),

    /// Unknown transaction id
    #[error("transaction not found: {0}")]
    TransactionNotFound(String),

    /// Unknown wallet id
    #[error("wallet not found: {0}")]
    WalletNotFound(String),
}

/// Application state constructed once at startup and handed to whoever
/// needs it. Replaces any notion of process-wide singletons.
pub struct AppContext {
    pub wallets: WalletService,
    pub transactions: Arc<TransactionService>,
    pub mempool: MempoolService,
}

impl AppContext {
    pub fn new(config: &Config, store: Option<Arc<dyn LedgerStore>>) -> Self {
        let fees = FeeSchedule::new(&config.fees);
        let transactions = Arc::new(TransactionService::new(fees, store.clone()));
        let mempool = MempoolService::new(Arc::clone(&transactions), &config.mempool);
        let wallets = WalletService::new(store);

        Self {
            wallets,
            transactions,
            mempool,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FeeLevel;

    #[test]
    fn test_context_wiring() {
        let context = AppContext::new(&Config::default(), None);

        let tx = context
            .transactions
            .create(
                "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa",
                "1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2",
                0.5,
                CoinType::Bitcoin,
                FeeLevel::Standard,
            )
            .unwrap();

        assert!(context.mempool.add_transaction(tx.clone()));
        assert_eq!(context.mempool.position_of(tx.id()), Some(1));
    }
}
