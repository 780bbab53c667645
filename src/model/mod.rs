// Domain entities for the transaction lifecycle simulator:
// - Coin types and fee-priority tiers
// - The transaction entity and its status state machine
// - Wallets with per-coin address generation

pub mod coin;
pub mod transaction;
pub mod wallet;

pub use coin::{CoinType, FeeLevel};
pub use transaction::{Transaction, TxStatus};
pub use wallet::Wallet;
