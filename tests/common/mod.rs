#![allow(dead_code)]

use std::{fs, path::Path};

use assert_fs::TempDir;
use pcb_core::{MemorySource, RunParams};
use pcb_domain::{RecordKind, RunContext};
use serde_json::json;

/// January 2026, run on the 1st, buffer 100.
pub fn january_context() -> RunContext {
    RunParams {
        from: Some("2026-01-01".into()),
        to: Some("2026-01-31".into()),
        buffer_threshold: Some(100.0),
        ..RunParams::new("/vault", "2026-01-01")
    }
    .resolve()
    .expect("valid run params")
}

/// Checking 1000, a 1200 mortgage on the 15th and a 500 savings injector.
pub fn mortgage_source() -> MemorySource {
    MemorySource::new()
        .with(RecordKind::Checking, "Chase", json!({ "balance": 1000, "as_of": "2026-01-01" }))
        .with(
            RecordKind::Bill,
            "Mortgage",
            json!({ "amount": 1200, "due_days": [15] }),
        )
        .with(
            RecordKind::Injector,
            "Savings",
            json!({ "injector_priority": 1, "injector_cap": 500 }),
        )
}

/// Writes a small vault with one note per record kind.
pub fn sample_vault() -> TempDir {
    let vault = TempDir::new().expect("temp vault");
    write_note(
        vault.path(),
        "Engine Room/Checking/Chase.md",
        "---\nbalance: 1000\nas_of: 2026-01-01\n---\n",
    );
    write_note(
        vault.path(),
        "Engine Room/Accounts/Brokerage.md",
        "---\nlabel: Brokerage\naccount_key: fidelity\nkind: investment\nbalance: 2500\n---\n",
    );
    write_note(
        vault.path(),
        "Engine Room/Bills/Mortgage.md",
        "---\nref: Mortgage\namount: 1200\ndue_days: [15]\ncycle: monthly\n---\n",
    );
    write_note(
        vault.path(),
        "Engine Room/Debts/Car loan.md",
        "---\namount: 400\ncycle: biweekly\nanchor_date: 2026-01-02\n---\n",
    );
    write_note(
        vault.path(),
        "Engine Room/Income/SSI.md",
        "---\namount: 1026\nschedule: 2nd Wednesday\ndeposit_to: chase\ntags: [income]\n---\n",
    );
    write_note(
        vault.path(),
        "Engine Room/Injectors/Savings.md",
        "---\ninjector_priority: 1\ninjector_cap: 500\ninjector_latency_days: 0\n---\n",
    );
    vault
}

pub fn write_note(root: &Path, relative: &str, body: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create note folder");
    }
    fs::write(path, body).expect("write note");
}
