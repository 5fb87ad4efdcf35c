#![doc(test(attr(deny(warnings))))]

//! Budget Tracker keeps transactions, budget categories, and savings goals in
//! memory and derives the dashboard views built on top of them: category
//! totals, monthly income/expense series, budget usage, and goal progress.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod utils;

pub use crate::core::store::{ActionOutcome, BudgetStore, LedgerAction};
pub use errors::{FinanceError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Budget Tracker tracing initialized.");
    });
}
