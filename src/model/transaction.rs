use std::fmt;

use chrono::{DateTime, Utc};
use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::model::coin::{CoinType, FeeLevel};

/// Lifecycle status of a transaction.
///
/// `Pending` is the initial state; `Confirmed` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxStatus {
    /// Waiting in the mempool for confirmation
    Pending,

    /// Confirmed and removed from the mempool
    Confirmed,

    /// Refused (validation failure discovered after creation)
    Rejected,
}

impl TxStatus {
    /// Whether the state machine allows moving from `self` to `next`.
    /// Only Pending -> Confirmed and Pending -> Rejected are legal;
    /// self-transitions and transitions out of a terminal state are not.
    pub fn can_transition_to(&self, next: TxStatus) -> bool {
        matches!(
            (self, next),
            (TxStatus::Pending, TxStatus::Confirmed) | (TxStatus::Pending, TxStatus::Rejected)
        )
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, TxStatus::Pending)
    }

    /// Human description shown in displays
    pub fn description(&self) -> &'static str {
        match self {
            TxStatus::Pending => "waiting for validation",
            TxStatus::Confirmed => "validated successfully",
            TxStatus::Rejected => "refused",
        }
    }
}

impl fmt::Display for TxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TxStatus::Pending => "PENDING",
            TxStatus::Confirmed => "CONFIRMED",
            TxStatus::Rejected => "REJECTED",
        };
        f.write_str(name)
    }
}

/// A single transfer between two addresses of the same coin.
///
/// The id, endpoints, amount, coin, fee level and creation time are fixed
/// at construction. The fee starts at zero and is assigned once by the fee
/// calculator; the status only moves along the `TxStatus` state machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction id (hex-encoded digest)
    id: String,

    /// Source address
    from_address: String,

    /// Destination address
    to_address: String,

    /// Transferred amount, denominated in the coin
    amount: f64,

    /// Currency of the transfer
    coin: CoinType,

    /// Fee-priority tier chosen by the creator
    fee_level: FeeLevel,

    /// Fee in coin units; 0.0 until the calculator assigns it
    fee: f64,

    /// Lifecycle status
    status: TxStatus,

    /// Creation timestamp
    created_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new pending transaction with a zero fee.
    ///
    /// The caller (normally `TransactionService`) is responsible for
    /// validating the addresses and amount before construction.
    pub fn new(
        from_address: impl Into<String>,
        to_address: impl Into<String>,
        amount: f64,
        coin: CoinType,
        fee_level: FeeLevel,
    ) -> Self {
        let from_address = from_address.into();
        let to_address = to_address.into();
        let created_at = Utc::now();
        let id = compute_tx_id(&from_address, &to_address, amount, coin, fee_level, &created_at);

        debug!(
            "tx {} CREATED: {} -> {}, amount {:.8} {}",
            &id[..8],
            from_address,
            to_address,
            amount,
            coin.symbol()
        );

        Self {
            id,
            from_address,
            to_address,
            amount,
            coin,
            fee_level,
            fee: 0.0,
            status: TxStatus::Pending,
            created_at,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Abbreviated id for log lines and displays
    pub fn short_id(&self) -> String {
        format!("{}...", &self.id[..8])
    }

    pub fn from_address(&self) -> &str {
        &self.from_address
    }

    pub fn to_address(&self) -> &str {
        &self.to_address
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn coin(&self) -> CoinType {
        self.coin
    }

    pub fn fee_level(&self) -> FeeLevel {
        self.fee_level
    }

    pub fn fee(&self) -> f64 {
        self.fee
    }

    pub fn status(&self) -> TxStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Amount plus fee, what the sender's wallet must cover
    pub fn total_amount(&self) -> f64 {
        self.amount + self.fee
    }

    /// Assign the calculated fee. Called exactly once after creation,
    /// by the fee calculator path.
    pub fn set_fee(&mut self, fee: f64) {
        self.fee = fee;
        debug!(
            "tx {} FEE_SET: {:.8} {} at level {}",
            &self.id[..8],
            fee,
            self.coin.symbol(),
            self.fee_level
        );
    }

    /// Request a status transition.
    ///
    /// Illegal transitions (out of a terminal state, or self-transitions)
    /// are logged and ignored; the status is left unchanged. Returns
    /// whether the transition took effect, and callers that ignore the
    /// return value can still check `status()`.
    pub fn set_status(&mut self, new_status: TxStatus) -> bool {
        if self.status.can_transition_to(new_status) {
            let old_status = self.status;
            self.status = new_status;
            debug!(
                "tx {} STATUS_CHANGED: {} -> {}",
                &self.id[..8],
                old_status,
                new_status
            );
            true
        } else {
            warn!(
                "tx {} invalid status transition refused: {} -> {}",
                &self.id[..8],
                self.status,
                new_status
            );
            false
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transaction[{}] {} -> {}: {:.8} {} (fee: {:.8})",
            self.short_id(),
            self.from_address,
            self.to_address,
            self.amount,
            self.coin.symbol(),
            self.fee
        )
    }
}

/// Compute a transaction id: sha256 over the transaction fields plus a
/// random salt, hex-encoded. The salt keeps ids distinct even when two
/// transactions carry identical fields in the same instant.
fn compute_tx_id(
    from: &str,
    to: &str,
    amount: f64,
    coin: CoinType,
    fee_level: FeeLevel,
    created_at: &DateTime<Utc>,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(from.as_bytes());
    hasher.update(to.as_bytes());
    hasher.update(amount.to_be_bytes());
    hasher.update(coin.symbol().as_bytes());
    hasher.update([fee_level.multiplier() as u8]);
    hasher.update(created_at.timestamp_nanos_opt().unwrap_or_default().to_be_bytes());
    hasher.update(rand::thread_rng().gen::<u64>().to_be_bytes());

    hex::encode(hasher.finalize())
}
