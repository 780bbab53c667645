use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

mod fees;
mod mempool;
mod node;

pub use fees::FeeConfig;
pub use mempool::MempoolConfig;
pub use node::NodeConfig;

/// Main configuration for the simulator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Node-level configuration
    pub node: NodeConfig,

    /// Mempool configuration
    pub mempool: MempoolConfig,

    /// Fee-model configuration
    pub fees: FeeConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let config_str = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let config: Config = toml::from_str(&config_str)
            .map_err(|e| format!("Failed to parse config file: {}", e))?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let config_str = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(path, config_str)
            .map_err(|e| format!("Failed to write config file: {}", e))?;

        Ok(())
    }

    /// Generate a default configuration file if it doesn't exist
    pub fn generate_default<P: AsRef<Path>>(path: P) -> Result<(), String> {
        let path = path.as_ref();

        if path.exists() {
            info!("Config file already exists at {:?}", path);
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|e| format!("Failed to create config directory: {}", e))?;
            }
        }

        let config = Config::default();
        config.save(path)?;

        info!("Generated default config at {:?}", path);
        Ok(())
    }
}
