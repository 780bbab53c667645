// Pending-transaction pool (mempool).
//
// The pool keeps every not-yet-confirmed transaction and ranks them by
// fee to decide confirmation order and estimated wait time. All access
// goes through `Mempool`, which serializes mutation behind a single lock.

pub mod pool;

pub use pool::{Mempool, PoolStats, DEFAULT_BLOCK_INTERVAL_MINUTES};
