//! Turns caller-supplied run parameters into a validated [`RunContext`].

use std::path::PathBuf;

use chrono::NaiveDate;

use pcb_domain::{DateWindow, RunContext};

use crate::CoreError;

/// Parses `YYYY-MM-DD` or `M/D/YYYY`.
pub fn parse_date(value: &str) -> Result<NaiveDate, CoreError> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%m/%d/%Y"))
        .map_err(|_| CoreError::InvalidDate(trimmed.to_string()))
}

/// Unvalidated run parameters as they arrive from a CLI or host.
#[derive(Debug, Clone, Default)]
pub struct RunParams {
    pub base_path: PathBuf,
    pub date: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub buffer_threshold: Option<f64>,
    pub max_injections: Option<usize>,
    pub opening_balance: Option<f64>,
}

impl RunParams {
    pub fn new(base_path: impl Into<PathBuf>, date: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            date: Some(date.into()),
            ..Self::default()
        }
    }

    /// Validates the parameters. Window bounds default to the run date.
    pub fn resolve(&self) -> Result<RunContext, CoreError> {
        let raw_date = self
            .date
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .ok_or(CoreError::MissingRunDate)?;
        let run_date = parse_date(raw_date)?;
        let from = match self.from.as_deref() {
            Some(value) => parse_date(value)?,
            None => run_date,
        };
        let to = match self.to.as_deref() {
            Some(value) => parse_date(value)?,
            None => run_date,
        };
        let window = DateWindow::new(from, to)
            .map_err(|err| CoreError::InvalidWindow(format!("{err}: {from} .. {to}")))?;

        let mut context = RunContext::new(self.base_path.clone(), run_date)
            .with_window(window)
            .with_opening_balance(self.opening_balance);
        if let Some(threshold) = self.buffer_threshold {
            if !threshold.is_finite() {
                return Err(CoreError::InvalidParameter(format!(
                    "buffer threshold must be a finite number, got {threshold}"
                )));
            }
            context = context.with_buffer_threshold(threshold);
        }
        if let Some(ceiling) = self.max_injections {
            context = context.with_max_injections(ceiling);
        }
        if let Some(balance) = self.opening_balance {
            if !balance.is_finite() {
                return Err(CoreError::InvalidParameter(format!(
                    "opening balance must be a finite number, got {balance}"
                )));
            }
        }
        Ok(context)
    }
}
