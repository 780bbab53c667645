use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use log::{info, warn};

use crate::fees::FeeSchedule;
use crate::model::{CoinType, FeeLevel, Transaction, TxStatus};
use crate::service::SimError;
use crate::storage::LedgerStore;

/// Counts over the transaction ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerStats {
    pub total: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub rejected: usize,
}

/// Creates transactions and tracks every one ever created.
///
/// Creation validates the inputs first and mutates nothing when
/// validation fails: no transaction is constructed, no fee computed,
/// nothing recorded. Persistence is best-effort; a store failure is
/// logged and the in-memory ledger stays authoritative.
pub struct TransactionService {
    /// Per-coin fee calculators
    fees: FeeSchedule,

    /// Append-only ledger of every created transaction
    ledger: Mutex<Vec<Transaction>>,

    /// Optional persistence mirror
    store: Option<Arc<dyn LedgerStore>>,
}

impl TransactionService {
    pub fn new(fees: FeeSchedule, store: Option<Arc<dyn LedgerStore>>) -> Self {
        info!("transaction service initialized with fee calculators");
        Self {
            fees,
            ledger: Mutex::new(Vec::new()),
            store,
        }
    }

    /// Validate inputs, create a pending transaction, price it with the
    /// coin's fee calculator and record it in the ledger.
    pub fn create(
        &self,
        from_address: &str,
        to_address: &str,
        amount: f64,
        coin: CoinType,
        level: FeeLevel,
    ) -> Result<Transaction, SimError> {
        validate_inputs(from_address, to_address, amount, coin)?;

        let mut tx = Transaction::new(from_address, to_address, amount, coin, level);

        let calculator = self.fees.calculator_for(coin);
        let fee = calculator.fee_for(&tx);
        tx.set_fee(fee);

        self.ledger.lock().unwrap().push(tx.clone());
        self.persist(&tx);

        info!(
            "tx {} created: fee {:.8} {} ({})",
            tx.short_id(),
            fee,
            coin.symbol(),
            calculator.name()
        );

        Ok(tx)
    }

    /// Look up a transaction by id
    pub fn find_by_id(&self, id: &str) -> Option<Transaction> {
        self.ledger
            .lock()
            .unwrap()
            .iter()
            .find(|tx| tx.id() == id)
            .cloned()
    }

    /// All transactions of a coin, in creation order
    pub fn list_by_type(&self, coin: CoinType) -> Vec<Transaction> {
        self.ledger
            .lock()
            .unwrap()
            .iter()
            .filter(|tx| tx.coin() == coin)
            .cloned()
            .collect()
    }

    /// All transactions with a status, in creation order
    pub fn list_by_status(&self, status: TxStatus) -> Vec<Transaction> {
        self.ledger
            .lock()
            .unwrap()
            .iter()
            .filter(|tx| tx.status() == status)
            .cloned()
            .collect()
    }

    /// Fee at every priority tier for the same amount, for side-by-side
    /// comparison
    pub fn compare_fees(&self, amount: f64, coin: CoinType) -> BTreeMap<FeeLevel, f64> {
        let calculator = self.fees.calculator_for(coin);

        let comparison = FeeLevel::all()
            .into_iter()
            .map(|level| (level, calculator.fee_for_amount(amount, level)))
            .collect();

        info!("fee comparison for {:.8} {}", amount, coin.symbol());
        comparison
    }

    /// Request a status transition on a ledger transaction.
    ///
    /// Unknown ids are an error; an illegal transition is not — the state
    /// machine logs it and keeps the current status. Returns the status
    /// after the request so callers can see whether it took effect.
    pub fn update_status(&self, id: &str, new_status: TxStatus) -> Result<TxStatus, SimError> {
        let mut ledger = self.ledger.lock().unwrap();
        let tx = ledger
            .iter_mut()
            .find(|tx| tx.id() == id)
            .ok_or_else(|| SimError::TransactionNotFound(id.to_string()))?;

        let changed = tx.set_status(new_status);
        let result = tx.status();
        drop(ledger);

        if changed {
            if let Some(store) = &self.store {
                if let Err(e) = store.update_status(id, new_status) {
                    warn!("ledger store update_status failed for {}: {}", id, e);
                }
            }
        }

        Ok(result)
    }

    /// Counts by status over the whole ledger
    pub fn stats(&self) -> LedgerStats {
        let ledger = self.ledger.lock().unwrap();
        let mut stats = LedgerStats {
            total: ledger.len(),
            pending: 0,
            confirmed: 0,
            rejected: 0,
        };
        for tx in ledger.iter() {
            match tx.status() {
                TxStatus::Pending => stats.pending += 1,
                TxStatus::Confirmed => stats.confirmed += 1,
                TxStatus::Rejected => stats.rejected += 1,
            }
        }
        stats
    }

    fn persist(&self, tx: &Transaction) {
        if let Some(store) = &self.store {
            if let Err(e) = store.save_transaction(tx) {
                warn!("ledger store save failed for {}: {}", tx.short_id(), e);
            }
        }
    }
}

/// Validation applied before any state is touched
fn validate_inputs(
    from_address: &str,
    to_address: &str,
    amount: f64,
    coin: CoinType,
) -> Result<(), SimError> {
    validate_address(from_address, coin)?;
    validate_address(to_address, coin)?;

    if amount <= 0.0 {
        return Err(SimError::InvalidAmount(amount));
    }
    if from_address == to_address {
        return Err(SimError::SameAddress);
    }

    Ok(())
}

fn validate_address(address: &str, coin: CoinType) -> Result<(), SimError> {
    if address.trim().is_empty() {
        return Err(SimError::EmptyAddress);
    }
    if !coin.is_valid_address(address) {
        return Err(SimError::InvalidAddress {
            address: address.to_string(),
            coin,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BTC_FROM: &str = "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa";
    const BTC_TO: &str = "1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2";

    fn service() -> TransactionService {
        TransactionService::new(FeeSchedule::default(), None)
    }

    #[test]
    fn test_create_then_find() {
        let service = service();
        let tx = service
            .create(BTC_FROM, BTC_TO, 0.5, CoinType::Bitcoin, FeeLevel::Standard)
            .unwrap();

        assert_eq!(tx.status(), TxStatus::Pending);
        assert!(tx.fee() > 0.0);

        let found = service.find_by_id(tx.id()).unwrap();
        assert_eq!(found.id(), tx.id());
        assert_eq!(found.status(), TxStatus::Pending);
    }

    #[test]
    fn test_same_address_rejected() {
        let service = service();
        let result = service.create(BTC_FROM, BTC_FROM, 1.0, CoinType::Bitcoin, FeeLevel::Fast);
        assert!(matches!(result, Err(SimError::SameAddress)));
        // Nothing recorded
        assert_eq!(service.stats().total, 0);
    }

    #[test]
    fn test_negative_amount_rejected() {
        let service = service();
        let result = service.create(BTC_FROM, BTC_TO, -5.0, CoinType::Bitcoin, FeeLevel::Fast);
        assert!(matches!(result, Err(SimError::InvalidAmount(_))));
        assert_eq!(service.stats().total, 0);
    }

    #[test]
    fn test_malformed_address_rejected() {
        let service = service();
        let result = service.create(
            "0x742d35Cc6634C0532925a3b8D9f4e676C2fC2f36",
            BTC_TO,
            1.0,
            CoinType::Bitcoin,
            FeeLevel::Standard,
        );
        assert!(matches!(result, Err(SimError::InvalidAddress { .. })));

        let result = service.create("", BTC_TO, 1.0, CoinType::Bitcoin, FeeLevel::Standard);
        assert!(matches!(result, Err(SimError::EmptyAddress)));
    }

    #[test]
    fn test_compare_fees_covers_all_levels() {
        let service = service();
        let comparison = service.compare_fees(1.0, CoinType::Ethereum);

        assert_eq!(comparison.len(), 3);
        let economic = comparison[&FeeLevel::Economic];
        let standard = comparison[&FeeLevel::Standard];
        let fast = comparison[&FeeLevel::Fast];
        assert!(economic < standard && standard < fast);
        assert!((fast - 4.0 * economic).abs() < 1e-12);
    }

    #[test]
    fn test_update_status() {
        let service = service();
        let tx = service
            .create(BTC_FROM, BTC_TO, 0.5, CoinType::Bitcoin, FeeLevel::Standard)
            .unwrap();

        let status = service.update_status(tx.id(), TxStatus::Rejected).unwrap();
        assert_eq!(status, TxStatus::Rejected);

        // Terminal state: a later Confirmed request is a no-op, not an error
        let status = service.update_status(tx.id(), TxStatus::Confirmed).unwrap();
        assert_eq!(status, TxStatus::Rejected);

        assert!(matches!(
            service.update_status("missing", TxStatus::Confirmed),
            Err(SimError::TransactionNotFound(_))
        ));
    }

    #[test]
    fn test_listings_and_stats() {
        let service = service();
        let btc = service
            .create(BTC_FROM, BTC_TO, 0.5, CoinType::Bitcoin, FeeLevel::Standard)
            .unwrap();
        let eth = service
            .create(
                "0x742d35cc6634c0532925a3b8d9f4e676c2fc2f36",
                "0x267be1c1d684f78cb4f6a176c4911b741e4ffdc0",
                2.0,
                CoinType::Ethereum,
                FeeLevel::Fast,
            )
            .unwrap();

        service.update_status(eth.id(), TxStatus::Confirmed).unwrap();

        assert_eq!(service.list_by_type(CoinType::Bitcoin).len(), 1);
        assert_eq!(service.list_by_status(TxStatus::Pending)[0].id(), btc.id());

        let stats = service.stats();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.confirmed, 1);
        assert_eq!(stats.rejected, 0);
    }
}
