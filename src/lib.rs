#![doc(test(attr(deny(warnings))))]

//! Ledger Core maintains the running-balance aggregate of a personal finance
//! tracker: totals are updated one entry delta at a time and are never
//! recomputed from history on the hot path.

pub mod errors;
pub mod ledger;
pub mod storage;
pub mod store;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Ledger Core tracing initialized.");
    });
}
