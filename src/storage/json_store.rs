use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::model::{Transaction, TxStatus, Wallet};
use crate::storage::{LedgerStore, StoreError};

/// On-disk snapshot of the ledger
#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    transactions: HashMap<String, Transaction>,
    wallets: HashMap<String, Wallet>,
}

/// Ledger store backed by a JSON snapshot file. The whole snapshot is
/// rewritten on every mutation; fine for simulator-sized ledgers.
pub struct JsonStore {
    path: PathBuf,
    snapshot: Mutex<Snapshot>,
}

impl JsonStore {
    /// Open a store at `path`, loading any existing snapshot
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let snapshot = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            serde_json::from_str(&contents)
                .map_err(|e| StoreError::Serialization(e.to_string()))?
        } else {
            Snapshot::default()
        };

        info!(
            "ledger store opened at {:?} ({} transactions, {} wallets)",
            path,
            snapshot.transactions.len(),
            snapshot.wallets.len()
        );

        Ok(Self {
            path,
            snapshot: Mutex::new(snapshot),
        })
    }

    fn flush(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(snapshot)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        fs::write(&self.path, contents)?;
        debug!("ledger snapshot written to {:?}", self.path);
        Ok(())
    }
}

impl LedgerStore for JsonStore {
    fn save_transaction(&self, tx: &Transaction) -> Result<(), StoreError> {
        let mut snapshot = self.snapshot.lock().unwrap();
        snapshot
            .transactions
            .insert(tx.id().to_string(), tx.clone());
        self.flush(&snapshot)
    }

    fn find_transaction(&self, id: &str) -> Result<Option<Transaction>, StoreError> {
        Ok(self.snapshot.lock().unwrap().transactions.get(id).cloned())
    }

    fn find_by_status(&self, status: TxStatus) -> Result<Vec<Transaction>, StoreError> {
        Ok(self
            .snapshot
            .lock()
            .unwrap()
            .transactions
            .values()
            .filter(|tx| tx.status() == status)
            .cloned()
            .collect())
    }

    fn update_status(&self, id: &str, status: TxStatus) -> Result<(), StoreError> {
        let mut snapshot = self.snapshot.lock().unwrap();
        let tx = snapshot
            .transactions
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        tx.set_status(status);
        self.flush(&snapshot)
    }

    fn save_wallet(&self, wallet: &Wallet) -> Result<(), StoreError> {
        let mut snapshot = self.snapshot.lock().unwrap();
        snapshot
            .wallets
            .insert(wallet.id().to_string(), wallet.clone());
        self.flush(&snapshot)
    }

    fn update_balance(&self, wallet_id: &str, balance: f64) -> Result<(), StoreError> {
        let mut snapshot = self.snapshot.lock().unwrap();
        let wallet = snapshot
            .wallets
            .get_mut(wallet_id)
            .ok_or_else(|| StoreError::NotFound(wallet_id.to_string()))?;
        wallet.set_balance(balance);
        self.flush(&snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CoinType, FeeLevel};
    use tempfile::tempdir;

    #[test]
    fn test_snapshot_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.json");

        let tx = Transaction::new(
            "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa",
            "1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2",
            0.25,
            CoinType::Bitcoin,
            FeeLevel::Fast,
        );
        let wallet = Wallet::new(CoinType::Bitcoin);

        {
            let store = JsonStore::open(&path).unwrap();
            store.save_transaction(&tx).unwrap();
            store.save_wallet(&wallet).unwrap();
            store.update_balance(wallet.id(), 2.5).unwrap();
        }

        let store = JsonStore::open(&path).unwrap();
        let found = store.find_transaction(tx.id()).unwrap().unwrap();
        assert_eq!(found.id(), tx.id());
        assert_eq!(found.status(), TxStatus::Pending);

        store.update_status(tx.id(), TxStatus::Confirmed).unwrap();
        let confirmed = store.find_by_status(TxStatus::Confirmed).unwrap();
        assert_eq!(confirmed.len(), 1);
    }

    #[test]
    fn test_update_unknown_ids() {
        let dir = tempdir().unwrap();
        let store = JsonStore::open(dir.path().join("ledger.json")).unwrap();

        assert!(matches!(
            store.update_status("missing", TxStatus::Rejected),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.update_balance("missing", 1.0),
            Err(StoreError::NotFound(_))
        ));
    }
}
