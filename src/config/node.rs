use serde::{Deserialize, Serialize};

/// Node-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Node name used in log lines
    pub node_name: String,

    /// Log level (passed to the logger when RUST_LOG is not set)
    pub log_level: String,

    /// Path to the JSON ledger snapshot; empty disables persistence
    pub data_file: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            node_name: "cryptosim-node".to_string(),
            log_level: "info".to_string(),
            data_file: String::new(),
        }
    }
}
