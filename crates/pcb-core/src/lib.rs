//! pcb-core
//!
//! Forecasting engine: schedule resolution, event collection, funding offers,
//! injector allocation and the running-balance ledger walk.
//! Depends on pcb-domain. No CLI, no terminal I/O, no direct storage interactions.

pub mod allocator;
pub mod collector;
pub mod context;
pub mod error;
pub mod forecast_service;
pub mod ledger_builder;
pub mod money;
pub mod normalize;
pub mod offers;
pub mod schedule;
pub mod source;
pub mod summary;
pub mod time;

pub use allocator::{allocate, InjectionBudget};
pub use collector::collect;
pub use context::{parse_date, RunParams};
pub use error::CoreError;
pub use forecast_service::*;
pub use ledger_builder::LedgerBuilder;
pub use offers::build_offers;
pub use source::{MemorySource, RawRecord, RecordSource};
pub use summary::{ForecastSummary, OfferUsage};
pub use time::{Clock, FixedClock, SystemClock};

#[cfg(test)]
mod tests;
