//! Shared test-only `MarketEnv` double: an in-memory ledger with a
//! controllable clock, caller, and attached value, used by every
//! integration suite in this crate.

use std::collections::HashMap;
use std::sync::Once;

use racer_core::{Identity, MarketEnv, TransferError};

static TRACING_INIT: Once = Once::new();

/// Initializes a test-friendly `tracing` subscriber. Safe to call from every
/// test; only the first call takes effect, mirroring
/// `programs/feels/tests/common/tracing.rs`.
pub fn init_test_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .init();
    });
}

pub struct TestEnv {
    pub block: u64,
    pub caller: Identity,
    pub value: u128,
    pub balances: HashMap<Identity, u128>,
    pub reject_transfers_to: Option<Identity>,
}

impl TestEnv {
    pub fn new() -> Self {
        init_test_tracing();
        Self {
            block: 0,
            caller: identity(0),
            value: 0,
            balances: HashMap::new(),
            reject_transfers_to: None,
        }
    }

    pub fn at_block(&mut self, block: u64) -> &mut Self {
        self.block = block;
        self
    }

    pub fn as_caller(&mut self, who: Identity) -> &mut Self {
        self.caller = who;
        self
    }

    pub fn with_value(&mut self, value: u128) -> &mut Self {
        self.value = value;
        self
    }

    pub fn balance_of(&self, who: Identity) -> u128 {
        *self.balances.get(&who).unwrap_or(&0)
    }
}

impl MarketEnv for TestEnv {
    fn now(&self) -> u64 {
        self.block
    }

    fn caller(&self) -> Identity {
        self.caller
    }

    fn value_in(&self) -> u128 {
        self.value
    }

    fn transfer(&mut self, to: Identity, amount: u128) -> Result<(), TransferError> {
        if self.reject_transfers_to == Some(to) {
            return Err(TransferError);
        }
        *self.balances.entry(to).or_insert(0) += amount;
        Ok(())
    }
}

/// A deterministic 20-byte identity from a single repeated byte, readable at
/// a glance in test failures (`identity(1)` is `[1; 20]`, etc).
pub fn identity(n: u8) -> Identity {
    Identity::new([n; 20])
}

pub fn symbol(s: &[u8; 4]) -> racer_core::Symbol {
    racer_core::Symbol::new(*s)
}
