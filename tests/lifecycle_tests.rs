//! End-to-end scenarios over the whole lifecycle: creation, ranking,
//! wait estimation, confirmation sweeps and the persistence mirror.

use std::sync::Arc;
use std::time::Duration;

use cryptosim::config::Config;
use cryptosim::model::{CoinType, FeeLevel, TxStatus};
use cryptosim::service::{AppContext, SimError};
use cryptosim::storage::{JsonStore, LedgerStore};

const BTC_FROM: &str = "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa";
const BTC_TO: &str = "1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2";

fn context() -> AppContext {
    AppContext::new(&Config::default(), None)
}

/// Create a BTC transaction with a chosen fee level and push it into the pool
fn create_and_pool(context: &AppContext, amount: f64, level: FeeLevel) -> String {
    let tx = context
        .transactions
        .create(BTC_FROM, BTC_TO, amount, CoinType::Bitcoin, level)
        .unwrap();
    let id = tx.id().to_string();
    assert!(context.mempool.add_transaction(tx));
    id
}

#[test]
fn created_transactions_are_pending_with_positive_fees() {
    let context = context();
    let tx = context
        .transactions
        .create(BTC_FROM, BTC_TO, 0.42, CoinType::Bitcoin, FeeLevel::Economic)
        .unwrap();

    let found = context.transactions.find_by_id(tx.id()).unwrap();
    assert_eq!(found.status(), TxStatus::Pending);
    assert!(found.fee() > 0.0);
}

#[test]
fn ranking_orders_by_fee_descending() {
    let context = context();

    // Economic/Standard/Fast map to fees 0.000025 / 0.00005 / 0.0001 BTC
    let economic = create_and_pool(&context, 0.1, FeeLevel::Economic);
    let fast = create_and_pool(&context, 0.2, FeeLevel::Fast);
    let standard = create_and_pool(&context, 0.3, FeeLevel::Standard);

    let ranked = context.mempool.current_state();
    let ids: Vec<&str> = ranked.iter().map(|tx| tx.id()).collect();
    assert_eq!(ids, vec![fast.as_str(), standard.as_str(), economic.as_str()]);

    // fees strictly descending implies positions strictly ascending
    for pair in ranked.windows(2) {
        assert!(pair[0].fee() > pair[1].fee());
    }

    assert_eq!(context.mempool.position_of(&standard), Some(2));
    assert_eq!(
        context.mempool.estimate_wait(&standard),
        Some(context.mempool.block_interval() * 2)
    );
}

#[test]
fn wait_estimate_is_position_times_block_interval() {
    let context = context();
    for level in FeeLevel::all() {
        create_and_pool(&context, 0.5, level);
    }

    for tx in context.mempool.current_state() {
        let position = context.mempool.position_of(tx.id()).unwrap();
        assert_eq!(
            context.mempool.estimate_wait(tx.id()),
            Some(Duration::from_secs(600) * position as u32)
        );
    }
}

#[test]
fn sweep_confirms_top_ranked_and_shrinks_pool() {
    let context = context();
    let economic = create_and_pool(&context, 0.1, FeeLevel::Economic);
    let fast = create_and_pool(&context, 0.2, FeeLevel::Fast);
    create_and_pool(&context, 0.3, FeeLevel::Standard);

    let confirmed = context.mempool.confirm(2);
    assert_eq!(confirmed.len(), 2);
    assert_eq!(confirmed[0].id(), fast);
    assert!(confirmed.iter().all(|tx| tx.status() == TxStatus::Confirmed));

    assert_eq!(context.mempool.len(), 1);
    assert_eq!(context.mempool.position_of(&economic), Some(1));

    // The ledger mirrors the confirmations
    let in_ledger = context.transactions.find_by_id(&fast).unwrap();
    assert_eq!(in_ledger.status(), TxStatus::Confirmed);
}

#[test]
fn sweep_larger_than_pool_confirms_everything() {
    let context = context();
    for level in FeeLevel::all() {
        create_and_pool(&context, 0.5, level);
    }

    let confirmed = context.mempool.confirm(100);
    assert_eq!(confirmed.len(), 3);
    assert!(context.mempool.is_empty());
    assert_eq!(context.transactions.stats().confirmed, 3);
}

#[test]
fn failed_validation_leaves_everything_untouched() {
    let context = context();
    create_and_pool(&context, 0.5, FeeLevel::Standard);
    let size_before = context.mempool.len();

    // Identical source and destination
    let result =
        context
            .transactions
            .create(BTC_FROM, BTC_FROM, 1.0, CoinType::Bitcoin, FeeLevel::Fast);
    assert!(matches!(result, Err(SimError::SameAddress)));

    // Non-positive amount, rejected before any fee computation
    let result =
        context
            .transactions
            .create(BTC_FROM, BTC_TO, -5.0, CoinType::Bitcoin, FeeLevel::Fast);
    assert!(matches!(result, Err(SimError::InvalidAmount(_))));

    assert_eq!(context.mempool.len(), size_before);
    assert_eq!(context.transactions.stats().total, 1);
}

#[test]
fn rejected_is_terminal() {
    let context = context();
    let tx = context
        .transactions
        .create(BTC_FROM, BTC_TO, 0.5, CoinType::Bitcoin, FeeLevel::Standard)
        .unwrap();

    let status = context
        .transactions
        .update_status(tx.id(), TxStatus::Rejected)
        .unwrap();
    assert_eq!(status, TxStatus::Rejected);

    let status = context
        .transactions
        .update_status(tx.id(), TxStatus::Confirmed)
        .unwrap();
    assert_eq!(status, TxStatus::Rejected);
}

#[test]
fn store_failure_does_not_break_in_memory_flow() {
    // Point the store at a directory path so every write fails
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::open(dir.path().join("ledger.json")).unwrap();
    std::fs::create_dir(dir.path().join("ledger.json")).ok();

    let store: Arc<dyn LedgerStore> = Arc::new(store);
    let context = AppContext::new(&Config::default(), Some(store));

    // Creation still succeeds; persistence failures only warn
    let tx = context
        .transactions
        .create(BTC_FROM, BTC_TO, 0.5, CoinType::Bitcoin, FeeLevel::Standard)
        .unwrap();
    assert!(context.transactions.find_by_id(tx.id()).is_some());
}

#[test]
fn persisted_ledger_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.json");

    let tx_id = {
        let store: Arc<dyn LedgerStore> = Arc::new(JsonStore::open(&path).unwrap());
        let context = AppContext::new(&Config::default(), Some(store));
        let id = create_and_pool(&context, 0.5, FeeLevel::Fast);
        context.mempool.confirm(1);
        id
    };

    let store = JsonStore::open(&path).unwrap();
    let restored = store.find_transaction(&tx_id).unwrap().unwrap();
    assert_eq!(restored.status(), TxStatus::Confirmed);
}
