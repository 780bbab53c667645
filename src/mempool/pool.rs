use std::cmp::Ordering;
use std::sync::Mutex;
use std::time::Duration;

use log::{debug, info, warn};

use crate::model::{Transaction, TxStatus};

/// Block interval used for wait estimation when none is configured
pub const DEFAULT_BLOCK_INTERVAL_MINUTES: u64 = 10;

/// Aggregate fee statistics over the pool
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoolStats {
    /// Number of pending transactions
    pub count: usize,

    /// Lowest fee in the pool
    pub min_fee: f64,

    /// Highest fee in the pool
    pub max_fee: f64,

    /// Mean fee over the pool
    pub avg_fee: f64,
}

/// The pending-transaction pool.
///
/// Transactions are ranked by fee descending; ties break by creation time
/// ascending and then id, so the order is stable and deterministic. The
/// ranking is recomputed on each query rather than incrementally
/// maintained, which is fine at simulator scale.
///
/// State lives behind a single `Mutex` so that `confirm_top`'s
/// read-then-mutate sweep is atomic with respect to concurrent inserts
/// and removals.
pub struct Mempool {
    /// Pending transactions, unordered; ranking sorts a view on demand
    transactions: Mutex<Vec<Transaction>>,

    /// Assumed interval between confirmation sweeps, for wait estimation
    block_interval: Duration,
}

impl Mempool {
    /// Create an empty pool with the default block interval
    pub fn new() -> Self {
        Self::with_block_interval(Duration::from_secs(DEFAULT_BLOCK_INTERVAL_MINUTES * 60))
    }

    /// Create an empty pool with an explicit block interval
    pub fn with_block_interval(block_interval: Duration) -> Self {
        info!(
            "mempool initialized (block interval {}s)",
            block_interval.as_secs()
        );
        Self {
            transactions: Mutex::new(Vec::new()),
            block_interval,
        }
    }

    pub fn block_interval(&self) -> Duration {
        self.block_interval
    }

    /// Insert a pending transaction.
    ///
    /// Returns whether the transaction was added. A duplicate id or a
    /// non-pending status is refused with a warning rather than an error.
    pub fn insert(&self, tx: Transaction) -> bool {
        if tx.status() != TxStatus::Pending {
            warn!(
                "mempool: refusing tx {} with status {}",
                tx.short_id(),
                tx.status()
            );
            return false;
        }

        let mut transactions = self.transactions.lock().unwrap();
        if transactions.iter().any(|t| t.id() == tx.id()) {
            warn!("mempool: duplicate tx {} ignored", tx.short_id());
            return false;
        }

        let id = tx.id().to_string();
        let short_id = tx.short_id();
        transactions.push(tx);

        let position = position_in(&transactions, &id).unwrap_or(transactions.len());
        info!(
            "mempool: tx {} added at position {}/{}",
            short_id,
            position,
            transactions.len()
        );
        true
    }

    /// Remove a transaction by id. Returns whether it was present.
    pub fn remove(&self, id: &str) -> bool {
        let mut transactions = self.transactions.lock().unwrap();
        let before = transactions.len();
        transactions.retain(|t| t.id() != id);
        let removed = transactions.len() < before;

        if removed {
            info!("mempool: tx {}... removed", &id[..id.len().min(8)]);
        }
        removed
    }

    /// All pending transactions ranked by fee descending
    pub fn ranked(&self) -> Vec<Transaction> {
        let transactions = self.transactions.lock().unwrap();
        ranked_view(&transactions)
    }

    /// 1-based position of a transaction in the ranking, `None` if absent
    pub fn position_of(&self, id: &str) -> Option<usize> {
        let transactions = self.transactions.lock().unwrap();
        position_in(&transactions, id)
    }

    /// Estimated wait until confirmation: ranking position times the
    /// block interval. Linear, not probabilistic. `None` if absent.
    pub fn estimate_wait(&self, id: &str) -> Option<Duration> {
        self.position_of(id)
            .map(|position| self.block_interval * position as u32)
    }

    /// Confirmation sweep: transition the top `n` ranked transactions to
    /// Confirmed, remove them from the pool and return them in rank
    /// order. Confirms the whole pool when `n` exceeds its size.
    pub fn confirm_top(&self, n: usize) -> Vec<Transaction> {
        let mut transactions = self.transactions.lock().unwrap();

        let mut view = ranked_view(&transactions);
        view.truncate(n);

        let mut confirmed = Vec::with_capacity(view.len());
        for mut tx in view {
            transactions.retain(|t| t.id() != tx.id());
            tx.set_status(TxStatus::Confirmed);
            info!(
                "mempool: tx {} confirmed and removed ({} left)",
                tx.short_id(),
                transactions.len()
            );
            confirmed.push(tx);
        }

        debug!("confirmation sweep done: {} confirmed", confirmed.len());
        confirmed
    }

    /// Min/max/avg fee over the pool, `None` when empty
    pub fn stats(&self) -> Option<PoolStats> {
        let transactions = self.transactions.lock().unwrap();
        if transactions.is_empty() {
            return None;
        }

        let count = transactions.len();
        let mut min_fee = f64::INFINITY;
        let mut max_fee = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for tx in transactions.iter() {
            min_fee = min_fee.min(tx.fee());
            max_fee = max_fee.max(tx.fee());
            sum += tx.fee();
        }

        Some(PoolStats {
            count,
            min_fee,
            max_fee,
            avg_fee: sum / count as f64,
        })
    }

    pub fn len(&self) -> usize {
        self.transactions.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.lock().unwrap().is_empty()
    }
}

impl Default for Mempool {
    fn default() -> Self {
        Self::new()
    }
}

/// Rank ordering: fee descending, then creation time ascending, then id.
/// The timestamp tie-break keeps equal-fee transactions in arrival order.
fn rank_order(a: &Transaction, b: &Transaction) -> Ordering {
    b.fee()
        .total_cmp(&a.fee())
        .then_with(|| a.created_at().cmp(&b.created_at()))
        .then_with(|| a.id().cmp(b.id()))
}

fn ranked_view(transactions: &[Transaction]) -> Vec<Transaction> {
    let mut view = transactions.to_vec();
    view.sort_by(rank_order);
    view
}

fn position_in(transactions: &[Transaction], id: &str) -> Option<usize> {
    let view = ranked_view(transactions);
    view.iter()
        .position(|t| t.id() == id)
        .map(|index| index + 1)
}
