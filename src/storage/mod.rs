// Persistence boundary.
//
// The in-memory services are the system of record; the store is a
// best-effort mirror. Services log a warning on store failure and never
// roll back an in-memory change because of one.

pub mod json_store;
pub mod memory;

use thiserror::Error;

use crate::model::{Transaction, TxStatus, Wallet};

pub use json_store::JsonStore;
pub use memory::MemoryStore;

/// Error types for ledger store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// IO error reading or writing the backing file
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot (de)serialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Unknown transaction or wallet id
    #[error("record not found: {0}")]
    NotFound(String),
}

/// Store for transaction and wallet records, keyed by id.
pub trait LedgerStore: Send + Sync {
    /// Save or overwrite a transaction record
    fn save_transaction(&self, tx: &Transaction) -> Result<(), StoreError>;

    /// Look up a transaction by id
    fn find_transaction(&self, id: &str) -> Result<Option<Transaction>, StoreError>;

    /// All stored transactions with the given status
    fn find_by_status(&self, status: TxStatus) -> Result<Vec<Transaction>, StoreError>;

    /// Update the status of a stored transaction
    fn update_status(&self, id: &str, status: TxStatus) -> Result<(), StoreError>;

    /// Save or overwrite a wallet record
    fn save_wallet(&self, wallet: &Wallet) -> Result<(), StoreError>;

    /// Update the balance of a stored wallet
    fn update_balance(&self, wallet_id: &str, balance: f64) -> Result<(), StoreError>;
}
