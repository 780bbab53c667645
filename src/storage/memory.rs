use std::collections::HashMap;
use std::sync::Mutex;

use crate::model::{Transaction, TxStatus, Wallet};
use crate::storage::{LedgerStore, StoreError};

/// In-memory ledger store. Default backing for tests and for runs
/// without a data file.
#[derive(Default)]
pub struct MemoryStore {
    transactions: Mutex<HashMap<String, Transaction>>,
    wallets: Mutex<HashMap<String, Wallet>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerStore for MemoryStore {
    fn save_transaction(&self, tx: &Transaction) -> Result<(), StoreError> {
        self.transactions
            .lock()
            .unwrap()
            .insert(tx.id().to_string(), tx.clone());
        Ok(())
    }

    fn find_transaction(&self, id: &str) -> Result<Option<Transaction>, StoreError> {
        Ok(self.transactions.lock().unwrap().get(id).cloned())
    }

    fn find_by_status(&self, status: TxStatus) -> Result<Vec<Transaction>, StoreError> {
        Ok(self
            .transactions
            .lock()
            .unwrap()
            .values()
            .filter(|tx| tx.status() == status)
            .cloned()
            .collect())
    }

    fn update_status(&self, id: &str, status: TxStatus) -> Result<(), StoreError> {
        let mut transactions = self.transactions.lock().unwrap();
        let tx = transactions
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        tx.set_status(status);
        Ok(())
    }

    fn save_wallet(&self, wallet: &Wallet) -> Result<(), StoreError> {
        self.wallets
            .lock()
            .unwrap()
            .insert(wallet.id().to_string(), wallet.clone());
        Ok(())
    }

    fn update_balance(&self, wallet_id: &str, balance: f64) -> Result<(), StoreError> {
        let mut wallets = self.wallets.lock().unwrap();
        let wallet = wallets
            .get_mut(wallet_id)
            .ok_or_else(|| StoreError::NotFound(wallet_id.to_string()))?;
        wallet.set_balance(balance);
        Ok(())
    }
}
