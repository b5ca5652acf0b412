//! pcb-domain
//!
//! Pure forecasting models (cash events, schedules, funding offers, run context).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod context;
pub mod event;
pub mod ledger;
pub mod offer;
pub mod record;
pub mod schedule;
pub mod window;

pub use context::*;
pub use event::*;
pub use ledger::*;
pub use offer::*;
pub use record::*;
pub use schedule::*;
pub use window::*;
