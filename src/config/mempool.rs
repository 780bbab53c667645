use serde::{Deserialize, Serialize};

/// Mempool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MempoolConfig {
    /// Assumed minutes between confirmation sweeps, used for wait estimation
    pub block_interval_minutes: u64,

    /// Lower bound of the synthetic-load amount range
    pub seed_min_amount: f64,

    /// Upper bound of the synthetic-load amount range
    pub seed_max_amount: f64,
}

impl Default for MempoolConfig {
    fn default() -> Self {
        Self {
            block_interval_minutes: 10,
            seed_min_amount: 0.001,
            seed_max_amount: 1.0,
        }
    }
}
