use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use log::{info, warn};

use crate::model::{CoinType, Wallet};
use crate::service::SimError;
use crate::storage::LedgerStore;

/// Wallet registry. The core only needs it for address material and the
/// affordability check; balances are simulator state, not real funds.
pub struct WalletService {
    wallets: Mutex<HashMap<String, Wallet>>,
    store: Option<Arc<dyn LedgerStore>>,
}

impl WalletService {
    pub fn new(store: Option<Arc<dyn LedgerStore>>) -> Self {
        info!("wallet service initialized");
        Self {
            wallets: Mutex::new(HashMap::new()),
            store,
        }
    }

    /// Create a wallet with a generated address for the coin
    pub fn create(&self, coin: CoinType) -> Wallet {
        let wallet = Wallet::new(coin);
        self.wallets
            .lock()
            .unwrap()
            .insert(wallet.id().to_string(), wallet.clone());

        if let Some(store) = &self.store {
            if let Err(e) = store.save_wallet(&wallet) {
                warn!("wallet store save failed for {}: {}", &wallet.id()[..8], e);
            }
        }

        wallet
    }

    pub fn find_by_id(&self, wallet_id: &str) -> Result<Wallet, SimError> {
        self.wallets
            .lock()
            .unwrap()
            .get(wallet_id)
            .cloned()
            .ok_or_else(|| SimError::WalletNotFound(wallet_id.to_string()))
    }

    pub fn find_by_address(&self, address: &str) -> Option<Wallet> {
        self.wallets
            .lock()
            .unwrap()
            .values()
            .find(|w| w.address() == address)
            .cloned()
    }

    pub fn list(&self) -> Vec<Wallet> {
        self.wallets.lock().unwrap().values().cloned().collect()
    }

    pub fn list_by_type(&self, coin: CoinType) -> Vec<Wallet> {
        self.wallets
            .lock()
            .unwrap()
            .values()
            .filter(|w| w.coin() == coin)
            .cloned()
            .collect()
    }

    /// Replace a wallet's balance
    pub fn update_balance(&self, wallet_id: &str, new_balance: f64) -> Result<(), SimError> {
        let mut wallets = self.wallets.lock().unwrap();
        let wallet = wallets
            .get_mut(wallet_id)
            .ok_or_else(|| SimError::WalletNotFound(wallet_id.to_string()))?;
        wallet.set_balance(new_balance);
        drop(wallets);

        if let Some(store) = &self.store {
            if let Err(e) = store.update_balance(wallet_id, new_balance) {
                warn!("wallet store balance update failed for {}: {}", wallet_id, e);
            }
        }

        Ok(())
    }

    /// Whether the wallet holding `address` can cover `amount + fee`.
    /// `None` when no wallet holds the address.
    pub fn can_afford(&self, address: &str, amount: f64, fee: f64) -> Option<bool> {
        self.find_by_address(address)
            .map(|w| w.can_afford(amount, fee))
    }

    /// Delete a wallet; only empty wallets can be deleted. Returns
    /// whether a wallet was removed.
    pub fn delete(&self, wallet_id: &str) -> bool {
        let mut wallets = self.wallets.lock().unwrap();
        match wallets.get(wallet_id) {
            Some(wallet) if wallet.balance() == 0.0 => {
                wallets.remove(wallet_id);
                info!("wallet {} deleted", &wallet_id[..wallet_id.len().min(8)]);
                true
            }
            Some(_) => {
                warn!(
                    "wallet {} not deleted: balance is not zero",
                    &wallet_id[..wallet_id.len().min(8)]
                );
                false
            }
            None => false,
        }
    }
}
