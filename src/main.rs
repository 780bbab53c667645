use std::path::PathBuf;
use std::sync::Arc;

use log::{error, info, warn};
use structopt::StructOpt;

use cryptosim::config::Config;
use cryptosim::init_logger;
use cryptosim::model::{CoinType, FeeLevel};
use cryptosim::service::AppContext;
use cryptosim::storage::{JsonStore, LedgerStore};

#[derive(Debug, StructOpt)]
#[structopt(name = "cryptosim", about = "Cryptocurrency transaction lifecycle simulator")]
struct Opt {
    /// Configuration file
    #[structopt(long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Number of synthetic transactions to seed the mempool with
    #[structopt(long, default_value = "8")]
    seed: usize,

    /// Number of transactions to confirm in the demo sweep
    #[structopt(long, default_value = "3")]
    confirm: usize,

    /// Ledger snapshot file (overrides the config's data_file)
    #[structopt(long, parse(from_os_str))]
    data_file: Option<PathBuf>,
}

fn main() {
    init_logger();

    let opt = Opt::from_args();

    let config = match &opt.config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };

    info!("starting {}...", config.node.node_name);

    // Persistence is best-effort: a store that fails to open degrades to
    // memory-only operation
    let data_file = opt.data_file.clone().or_else(|| {
        if config.node.data_file.is_empty() {
            None
        } else {
            Some(PathBuf::from(&config.node.data_file))
        }
    });
    let store: Option<Arc<dyn LedgerStore>> = match data_file {
        Some(path) => match JsonStore::open(&path) {
            Ok(store) => Some(Arc::new(store)),
            Err(e) => {
                warn!("ledger store unavailable, running memory-only: {}", e);
                None
            }
        },
        None => None,
    };

    let context = AppContext::new(&config, store);

    // Seed the pool with synthetic traffic
    let created = context.mempool.generate_random_transactions(opt.seed);
    info!("seeded mempool with {} transactions", created);

    println!("\n=== Mempool state (ranked by fee) ===");
    for (index, tx) in context.mempool.current_state().iter().enumerate() {
        println!("{:>3}. {}", index + 1, tx);
    }

    if let Some(stats) = context.mempool.stats() {
        println!(
            "\n{} pending | fees min {:.8} / max {:.8} / avg {:.8}",
            stats.count, stats.min_fee, stats.max_fee, stats.avg_fee
        );
    }

    // Position and wait estimate for the lowest-ranked transaction
    if let Some(last) = context.mempool.current_state().last() {
        let position = context.mempool.position_of(last.id()).unwrap_or_default();
        let wait = context.mempool.estimate_wait(last.id()).unwrap_or_default();
        println!(
            "\ntx {} is at position {} -> estimated wait {} min",
            last.short_id(),
            position,
            wait.as_secs() / 60
        );
    }

    // Side-by-side fee comparison
    for coin in CoinType::all() {
        println!("\n=== Fee comparison for 1.0 {} ===", coin.symbol());
        for (level, fee) in context.transactions.compare_fees(1.0, coin) {
            println!(
                "{:<10} {:.8} {} ({})",
                level.to_string(),
                fee,
                coin.symbol(),
                level.description()
            );
        }
    }

    // Confirmation sweep
    println!("\n=== Confirming top {} ===", opt.confirm);
    for tx in context.mempool.confirm(opt.confirm) {
        println!("confirmed {}", tx);
    }

    // A funded wallet and its affordability check
    let wallet = context.wallets.create(CoinType::Bitcoin);
    if let Err(e) = context.wallets.update_balance(wallet.id(), 1.0) {
        error!("balance update failed: {}", e);
    }
    let fee = context.transactions.compare_fees(0.5, CoinType::Bitcoin)[&FeeLevel::Standard];
    println!(
        "\nwallet {} can afford 0.5 BTC + fee {:.8}: {:?}",
        wallet.address(),
        fee,
        context.wallets.can_afford(wallet.address(), 0.5, fee)
    );

    let stats = context.transactions.stats();
    println!(
        "\nledger: {} total ({} pending, {} confirmed, {} rejected) | mempool size {}",
        stats.total,
        stats.pending,
        stats.confirmed,
        stats.rejected,
        context.mempool.len()
    );
}
