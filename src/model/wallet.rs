use std::fmt;

use chrono::{DateTime, Utc};
use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::model::coin::CoinType;

const BASE58_CHARS: &[u8] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
const HEX_CHARS: &[u8] = b"0123456789abcdef";

/// A wallet holding a balance in one coin.
///
/// The simulator only needs wallets for the affordability check and for
/// producing plausible-looking addresses; there is no key material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    /// Unique wallet id (hex-encoded digest)
    id: String,

    /// Currency this wallet holds
    coin: CoinType,

    /// Receiving address, well-formed for the coin
    address: String,

    /// Current balance in coin units
    balance: f64,

    /// Creation timestamp
    created_at: DateTime<Utc>,
}

impl Wallet {
    /// Create a wallet with a freshly generated address and a zero balance
    pub fn new(coin: CoinType) -> Self {
        let address = generate_address(coin);
        let id = compute_wallet_id(&address);

        info!(
            "wallet {} created [{}] address {}",
            &id[..8],
            coin.symbol(),
            address
        );

        Self {
            id,
            coin,
            address,
            balance: 0.0,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn coin(&self) -> CoinType {
        self.coin
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether the balance covers an amount plus its fee
    pub fn can_afford(&self, amount: f64, fee: f64) -> bool {
        self.balance >= amount + fee
    }

    /// Replace the balance with a new value
    pub fn set_balance(&mut self, new_balance: f64) {
        debug!(
            "wallet {} balance {:.8} -> {:.8} {}",
            &self.id[..8],
            self.balance,
            new_balance,
            self.coin.symbol()
        );
        self.balance = new_balance;
    }
}

impl fmt::Display for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wallet[{}] {} - balance: {:.8} {}",
            &self.id[..8],
            self.address,
            self.balance,
            self.coin.symbol()
        )
    }
}

/// Generate a plausible-looking address for the coin. The output passes
/// `CoinType::is_valid_address`; it carries no cryptographic meaning.
pub fn generate_address(coin: CoinType) -> String {
    let mut rng = rand::thread_rng();

    match coin {
        CoinType::Bitcoin => {
            let prefixes = ["1", "3", "bc1"];
            let prefix = prefixes[rng.gen_range(0..prefixes.len())];
            // bech32-style addresses are longer than legacy ones
            let tail_len = if prefix == "bc1" { 39 } else { 33 };

            let mut address = String::from(prefix);
            for _ in 0..tail_len {
                address.push(BASE58_CHARS[rng.gen_range(0..BASE58_CHARS.len())] as char);
            }
            address
        }
        CoinType::Ethereum => {
            let mut address = String::from("0x");
            for _ in 0..40 {
                address.push(HEX_CHARS[rng.gen_range(0..HEX_CHARS.len())] as char);
            }
            address
        }
    }
}

fn compute_wallet_id(address: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(address.as_bytes());
    hasher.update(rand::thread_rng().gen::<u64>().to_be_bytes());
    hex::encode(hasher.finalize())
}
