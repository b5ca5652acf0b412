//! Forecast orchestration: records in, ordered ledger with running totals out.

use tracing::{debug, info, info_span};

use pcb_domain::{
    AccountRecord, CashEvent, EventKind, FundingOffer, FundingSourceRecord, Ledger, RecordKind,
    RunContext, ScheduledRecord,
};

use crate::{
    collector::collect, ledger_builder::LedgerBuilder, normalize, offers::build_offers,
    source::RecordSource, summary::ForecastSummary, CoreError,
};

/// Normalized records for one run, fully read before any computation starts.
#[derive(Debug, Clone, Default)]
pub struct ForecastInputs {
    pub bills: Vec<ScheduledRecord>,
    pub debts: Vec<ScheduledRecord>,
    pub incomes: Vec<ScheduledRecord>,
    pub funding: Vec<FundingSourceRecord>,
    pub checking: Vec<AccountRecord>,
}

impl ForecastInputs {
    pub fn load(source: &dyn RecordSource) -> Result<Self, CoreError> {
        Ok(Self {
            bills: ForecastService::load_scheduled(source, RecordKind::Bill)?,
            debts: ForecastService::load_scheduled(source, RecordKind::Debt)?,
            incomes: ForecastService::load_scheduled(source, RecordKind::Income)?,
            funding: ForecastService::load_funding_sources(source)?,
            checking: ForecastService::load_accounts(source, RecordKind::Checking)?,
        })
    }
}

/// Result of one forecast run.
#[derive(Debug, Clone)]
pub struct Forecast {
    pub context: RunContext,
    pub ledger: Ledger,
    /// Offer state after the walk; `remaining` reflects every draw.
    pub offers: Vec<FundingOffer>,
    pub summary: ForecastSummary,
}

pub struct ForecastService;

impl ForecastService {
    /// Reads and normalizes bills, debts or incomes. Unusable records are dropped.
    pub fn load_scheduled(
        source: &dyn RecordSource,
        kind: RecordKind,
    ) -> Result<Vec<ScheduledRecord>, CoreError> {
        let Some(event_kind) = kind.event_kind() else {
            return Err(CoreError::InvalidParameter(format!(
                "{kind:?} records are not schedulable"
            )));
        };
        let raw = source.load(kind)?;
        let total = raw.len();
        let records: Vec<ScheduledRecord> = raw
            .iter()
            .filter_map(|record| match event_kind {
                EventKind::Income => normalize::income(record),
                _ => normalize::obligation(record, event_kind),
            })
            .collect();
        debug!(?kind, total, usable = records.len(), "scheduled records loaded");
        Ok(records)
    }

    pub fn load_funding_sources(
        source: &dyn RecordSource,
    ) -> Result<Vec<FundingSourceRecord>, CoreError> {
        Ok(source
            .load(RecordKind::Injector)?
            .iter()
            .map(normalize::funding_source)
            .collect())
    }

    pub fn load_accounts(
        source: &dyn RecordSource,
        kind: RecordKind,
    ) -> Result<Vec<AccountRecord>, CoreError> {
        let mut accounts: Vec<AccountRecord> =
            source.load(kind)?.iter().map(normalize::account).collect();
        accounts.sort_by(|a, b| a.label.cmp(&b.label));
        Ok(accounts)
    }

    /// Sum of every checking balance; records without a balance contribute nothing.
    pub fn opening_balance(checking: &[AccountRecord]) -> f64 {
        checking.iter().filter_map(|account| account.balance).sum()
    }

    /// Fresh offers for the run date. Call once per run; offers are consumed by the walk.
    pub fn offers(context: &RunContext, funding: &[FundingSourceRecord]) -> Vec<FundingOffer> {
        build_offers(funding, context.run_date)
    }

    /// Every income, bill and debt event inside the run window, unordered across kinds.
    pub fn collect_events(context: &RunContext, inputs: &ForecastInputs) -> Vec<CashEvent> {
        let window = context.window;
        let mut events = collect(&inputs.incomes, EventKind::Income, window);
        events.extend(collect(&inputs.bills, EventKind::Bill, window));
        events.extend(collect(&inputs.debts, EventKind::Debt, window));
        events
    }

    /// Reads every record from `source`, then runs the forecast.
    pub fn run(context: &RunContext, source: &dyn RecordSource) -> Result<Forecast, CoreError> {
        let inputs = ForecastInputs::load(source)?;
        Ok(Self::forecast(context, &inputs))
    }

    /// Pure forecast over already-loaded inputs.
    pub fn forecast(context: &RunContext, inputs: &ForecastInputs) -> Forecast {
        let span = info_span!("forecast", run_id = %context.run_id);
        let _guard = span.enter();

        let opening_balance = context
            .opening_balance
            .unwrap_or_else(|| Self::opening_balance(&inputs.checking));
        let events = Self::collect_events(context, inputs);
        let mut offers = Self::offers(context, &inputs.funding);

        let ledger = LedgerBuilder::new(opening_balance, context.window.start)
            .buffer_threshold(context.buffer_threshold)
            .max_injections(context.max_injections)
            .build(events, &mut offers);
        let summary = ForecastSummary::from_ledger(&ledger, &offers, context.buffer_threshold);

        info!(
            from = %context.window.start,
            to = %context.window.end,
            events = ledger.len(),
            injected = summary.injected,
            ending = summary.ending_balance,
            "forecast built"
        );

        Forecast {
            context: context.clone(),
            ledger,
            offers,
            summary,
        }
    }
}
