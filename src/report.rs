//! Composed report: snapshots followed by the ledger, each section optional.

use serde::Serialize;
use tracing::debug;

use pcb_core::{CoreError, Forecast, ForecastInputs, ForecastService, RecordSource};
use pcb_domain::{AccountRecord, RecordKind, RunContext};

use crate::render::{
    render_accounts, render_checking, render_incomes, render_injectors, render_ledger,
};

/// Which report sections to include. Everything but `debug` is on by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportSections {
    pub incomes: bool,
    pub accounts: bool,
    pub checking: bool,
    pub injectors: bool,
    pub ledger: bool,
    #[serde(skip)]
    pub debug: bool,
}

impl Default for ReportSections {
    fn default() -> Self {
        Self {
            incomes: true,
            accounts: true,
            checking: true,
            injectors: true,
            ledger: true,
            debug: false,
        }
    }
}

impl ReportSections {
    pub const NAMES: [&'static str; 5] = ["incomes", "accounts", "checking", "injectors", "ledger"];

    /// Turns a section off by name. Returns `false` for unknown names.
    pub fn disable(&mut self, name: &str) -> bool {
        let flag = match name {
            "incomes" => &mut self.incomes,
            "accounts" => &mut self.accounts,
            "checking" => &mut self.checking,
            "injectors" => &mut self.injectors,
            "ledger" | "pcb" => &mut self.ledger,
            _ => return false,
        };
        *flag = false;
        true
    }
}

/// Everything a report renders, read once from the source.
#[derive(Debug, Clone)]
pub struct ReportData {
    pub inputs: ForecastInputs,
    pub accounts: Vec<AccountRecord>,
    pub forecast: Forecast,
}

impl ReportData {
    pub fn load(context: &RunContext, source: &dyn RecordSource) -> Result<Self, CoreError> {
        let inputs = ForecastInputs::load(source)?;
        let accounts = ForecastService::load_accounts(source, RecordKind::Account)?;
        let forecast = ForecastService::forecast(context, &inputs);
        Ok(Self {
            inputs,
            accounts,
            forecast,
        })
    }
}

/// Renders the enabled sections in fixed order and collapses blank-line runs.
pub fn render_report(data: &ReportData, sections: &ReportSections) -> String {
    let context = &data.forecast.context;
    let mut parts = Vec::new();

    if sections.debug {
        let flags = serde_json::to_string(sections).unwrap_or_default();
        parts.push(
            [
                "## Debug".to_string(),
                format!("- date: `{}`", context.run_date),
                format!("- run_id: `{}`", context.run_id),
                format!("- flags: `{flags}`"),
                String::new(),
            ]
            .join("\n"),
        );
    }
    if sections.incomes {
        parts.push(render_incomes(&data.inputs.incomes, context));
    }
    if sections.accounts {
        parts.push(render_accounts(&data.accounts, context.run_date));
    }
    if sections.checking {
        parts.push(render_checking(&data.inputs.checking, context.run_date));
    }
    if sections.injectors {
        let offers = ForecastService::offers(context, &data.inputs.funding);
        parts.push(render_injectors(&offers, context.run_date));
    }
    if sections.ledger {
        parts.push(render_ledger(&data.forecast));
    }
    debug!(sections = parts.len(), "report composed");

    let mut report = collapse_blank_lines(&parts.join("\n"));
    report.push('\n');
    report
}

/// Squeezes three or more consecutive newlines down to two.
pub fn collapse_blank_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut newlines = 0;
    for ch in text.chars() {
        if ch == '\n' {
            newlines += 1;
            if newlines > 2 {
                continue;
            }
        } else {
            newlines = 0;
        }
        out.push(ch);
    }
    out
}
