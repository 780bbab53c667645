// Cryptosim - a simulator for the cryptocurrency transaction lifecycle:
// per-coin fee strategies, a fee-ranked mempool and confirmation sweeps.

pub mod config;
pub mod fees;
pub mod mempool;
pub mod model;
pub mod service;
pub mod storage;

// Initialize logging
pub fn init_logger() {
    env_logger::init();
}
