//! Normalized source records. Alias resolution happens before these exist.

use serde::{Deserialize, Serialize};

use crate::{EventKind, ScheduleSpec};

/// Folder-level category of a source record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Bill,
    Debt,
    Income,
    Injector,
    Account,
    Checking,
}

impl RecordKind {
    pub const ALL: [RecordKind; 6] = [
        RecordKind::Bill,
        RecordKind::Debt,
        RecordKind::Income,
        RecordKind::Injector,
        RecordKind::Account,
        RecordKind::Checking,
    ];

    /// Ledger event kind produced by scheduled records of this kind.
    pub fn event_kind(self) -> Option<EventKind> {
        match self {
            RecordKind::Bill => Some(EventKind::Bill),
            RecordKind::Debt => Some(EventKind::Debt),
            RecordKind::Income => Some(EventKind::Income),
            RecordKind::Injector | RecordKind::Account | RecordKind::Checking => None,
        }
    }
}

/// An obligation or income stream ready for scheduling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduledRecord {
    pub id: String,
    pub label: String,
    pub kind: EventKind,
    /// Declared magnitude; the sign is forced by `kind` when events are emitted.
    pub amount: f64,
    /// Per-occurrence amounts, paired positionally with day-of-month lists.
    #[serde(default)]
    pub due_amounts: Vec<f64>,
    pub schedule: Option<ScheduleSpec>,
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub cycle: String,
    #[serde(default)]
    pub autopay: bool,
    /// Covered records are excluded from the forecast.
    #[serde(default)]
    pub covered: bool,
    #[serde(default)]
    pub source: String,
}

impl ScheduledRecord {
    pub fn new(id: impl Into<String>, kind: EventKind, amount: f64) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            kind,
            amount,
            due_amounts: Vec::new(),
            schedule: None,
            account: String::new(),
            cycle: String::new(),
            autopay: false,
            covered: false,
            source: String::new(),
        }
    }

    pub fn with_schedule(mut self, schedule: ScheduleSpec) -> Self {
        self.schedule = Some(schedule);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// Funding source definition, before it becomes a per-run offer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FundingSourceRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub reference: String,
    pub enabled: bool,
    pub priority: i64,
    pub latency_days: i64,
    pub cap: f64,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub chunk: f64,
}

impl FundingSourceRecord {
    pub fn new(name: impl Into<String>, priority: i64, latency_days: i64, cap: f64) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            reference: name.clone(),
            name,
            enabled: true,
            priority,
            latency_days,
            cap,
            cost: 0.0,
            chunk: 0.0,
        }
    }

    pub fn with_chunk(mut self, chunk: f64) -> Self {
        self.chunk = chunk;
        self
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }
}

/// Balance-bearing account snapshot (accounts and checking folders).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountRecord {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub account_key: String,
    #[serde(default)]
    pub kind: String,
    pub balance: Option<f64>,
    #[serde(default)]
    pub as_of: String,
    #[serde(default)]
    pub source: String,
}
