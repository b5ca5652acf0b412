use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::DateWindow;

pub const DEFAULT_BUFFER_THRESHOLD: f64 = 100.0;
pub const DEFAULT_MAX_INJECTIONS: usize = 500;

/// Explicit parameters for a single forecast run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunContext {
    pub run_id: Uuid,
    pub base_path: PathBuf,
    /// Reference date; funding latency counts from here.
    pub run_date: NaiveDate,
    pub window: DateWindow,
    pub buffer_threshold: f64,
    /// Ceiling on injector events created in one run.
    pub max_injections: usize,
    /// Replaces the aggregated checking balance when set.
    #[serde(default)]
    pub opening_balance: Option<f64>,
}

impl RunContext {
    pub fn new(base_path: impl Into<PathBuf>, run_date: NaiveDate) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            base_path: base_path.into(),
            run_date,
            window: DateWindow::single_day(run_date),
            buffer_threshold: DEFAULT_BUFFER_THRESHOLD,
            max_injections: DEFAULT_MAX_INJECTIONS,
            opening_balance: None,
        }
    }

    pub fn with_window(mut self, window: DateWindow) -> Self {
        self.window = window;
        self
    }

    pub fn with_buffer_threshold(mut self, threshold: f64) -> Self {
        self.buffer_threshold = threshold;
        self
    }

    pub fn with_max_injections(mut self, ceiling: usize) -> Self {
        self.max_injections = ceiling;
        self
    }

    pub fn with_opening_balance(mut self, balance: Option<f64>) -> Self {
        self.opening_balance = balance;
        self
    }
}
