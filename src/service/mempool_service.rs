use std::sync::Arc;
use std::time::Duration;

use log::{error, info};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::MempoolConfig;
use crate::mempool::{Mempool, PoolStats};
use crate::model::{CoinType, FeeLevel, Transaction, TxStatus};
use crate::service::TransactionService;

/// Fixed address set used for synthetic load
const BTC_ADDRESSES: [&str; 4] = [
    "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa",
    "1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2",
    "1C4dKM9RkWz2UqRdN9o4KZcXF8GYqF7XzG",
    "1D5zA7ZuTjp1UPCnPJzqV4hEqFxq2V6jNN",
];

const ETH_ADDRESSES: [&str; 4] = [
    "0x742d35cc6634c0532925a3b8d9f4e676c2fc2f36",
    "0x8ba1f109551bd432803012645aac136c69ad217b",
    "0x267be1c1d684f78cb4f6a176c4911b741e4ffdc0",
    "0xb47e3cd837ddf8e4c57f05d70ab865de6e193bbb",
];

/// Owns the pending pool: adds transactions, answers position and wait
/// queries, runs confirmation sweeps and seeds synthetic load.
pub struct MempoolService {
    pool: Mempool,
    transactions: Arc<TransactionService>,
    seed_min_amount: f64,
    seed_max_amount: f64,
}

impl MempoolService {
    pub fn new(transactions: Arc<TransactionService>, config: &MempoolConfig) -> Self {
        let block_interval = Duration::from_secs(config.block_interval_minutes * 60);
        Self {
            pool: Mempool::with_block_interval(block_interval),
            transactions,
            seed_min_amount: config.seed_min_amount,
            seed_max_amount: config.seed_max_amount,
        }
    }

    /// Add a pending transaction to the pool. Returns whether it was added.
    pub fn add_transaction(&self, tx: Transaction) -> bool {
        self.pool.insert(tx)
    }

    /// Seed the pool with `count` synthetic transactions: random coin,
    /// endpoints drawn (distinct) from a fixed address set, amount in the
    /// configured range, random priority tier. Returns how many were
    /// actually created; failures are logged and skipped.
    pub fn generate_random_transactions(&self, count: usize) -> usize {
        info!("generating {} random transactions", count);
        let mut rng = rand::thread_rng();
        let mut created = 0;

        for _ in 0..count {
            let coin = if rng.gen_bool(0.5) {
                CoinType::Bitcoin
            } else {
                CoinType::Ethereum
            };
            let addresses: &[&str] = match coin {
                CoinType::Bitcoin => &BTC_ADDRESSES,
                CoinType::Ethereum => &ETH_ADDRESSES,
            };

            let from = addresses.choose(&mut rng).copied().unwrap_or(addresses[0]);
            let mut to = addresses.choose(&mut rng).copied().unwrap_or(addresses[1]);
            while to == from {
                to = addresses.choose(&mut rng).copied().unwrap_or(addresses[1]);
            }

            let amount = rng.gen_range(self.seed_min_amount..self.seed_max_amount);
            let levels = FeeLevel::all();
            let level = *levels.choose(&mut rng).unwrap_or(&FeeLevel::Standard);

            match self.transactions.create(from, to, amount, coin, level) {
                Ok(tx) => {
                    if self.pool.insert(tx) {
                        created += 1;
                    }
                }
                Err(e) => error!("synthetic transaction generation failed: {}", e),
            }
        }

        created
    }

    /// 1-based rank position of a transaction, `None` if absent
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.pool.position_of(id)
    }

    /// Estimated wait until confirmation, `None` if absent
    pub fn estimate_wait(&self, id: &str) -> Option<Duration> {
        self.pool.estimate_wait(id)
    }

    /// All pending transactions ranked by fee descending
    pub fn current_state(&self) -> Vec<Transaction> {
        self.pool.ranked()
    }

    /// Confirmation sweep: confirm the top `n` ranked transactions,
    /// remove them from the pool and mirror the status change into the
    /// transaction ledger. Returns the confirmed set in rank order.
    pub fn confirm(&self, n: usize) -> Vec<Transaction> {
        let confirmed = self.pool.confirm_top(n);

        for tx in &confirmed {
            // The ledger copy is still Pending; keep it in sync
            if let Err(e) = self.transactions.update_status(tx.id(), TxStatus::Confirmed) {
                error!("ledger sync after confirmation failed: {}", e);
            }
        }

        confirmed
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Min/max/avg fee over the pool, `None` when empty
    pub fn stats(&self) -> Option<PoolStats> {
        self.pool.stats()
    }

    pub fn block_interval(&self) -> Duration {
        self.pool.block_interval()
    }
}
