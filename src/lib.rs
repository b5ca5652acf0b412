#![doc(test(attr(deny(warnings))))]

//! Projected checking balance: forecasts a checking account's running
//! balance from bills, debts and income notes kept in a markdown vault, and
//! proposes draws from funding sources wherever the balance dips under the
//! buffer.

pub mod cli;
pub mod errors;
pub mod render;
pub mod report;
pub mod utils;

pub use errors::{CliError, PcbError};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    init_with(false);
}

/// Like [`init`], with `debug` lowering the default filter to debug level.
/// Only the first call in a process takes effect.
pub fn init_with(debug: bool) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(debug);
        tracing::debug!("pcb tracing initialized");
    });
}
