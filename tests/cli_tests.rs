mod common;

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;
use std::error::Error;

fn pcb(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pcb").expect("pcb binary");
    cmd.env("PCB_HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn ledger_command_renders_injections_from_vault() -> Result<(), Box<dyn Error>> {
    let home = TempDir::new()?;
    let vault = common::sample_vault();

    pcb(&home)
        .args(["ledger", "--date", "2026-01-01", "--from", "2026-01-01", "--to", "2026-01-31"])
        .arg("--vault")
        .arg(vault.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("| [[Car loan]] | 2026-01-02 | -$400 | +$600 | biweekly |")
                .and(predicate::str::contains("| [[SSI]] | 2026-01-14 | +$1,026 | +$1,626 |"))
                .and(predicate::str::contains(
                    "| Inject: [[Savings]] | 2026-01-16 | +$74 | +$100 | injector |",
                ))
                .and(predicate::str::contains(
                    "| Inject: [[Savings]] | 2026-01-30 | +$400 | +$100 | injector |",
                )),
        );
    Ok(())
}

#[test]
fn default_report_includes_every_section() -> Result<(), Box<dyn Error>> {
    let home = TempDir::new()?;
    let vault = common::sample_vault();

    pcb(&home)
        .args(["--date", "2026-01-01", "--to", "2026-01-31"])
        .arg("--vault")
        .arg(vault.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("## Incomes")
                .and(predicate::str::contains(
                    "| Brokerage | fidelity | investment | $2,500 |",
                ))
                .and(predicate::str::contains("## Checking"))
                .and(predicate::str::contains("## Injectors"))
                .and(predicate::str::contains("## PCB")),
        );
    Ok(())
}

#[test]
fn section_flags_drop_sections() -> Result<(), Box<dyn Error>> {
    let home = TempDir::new()?;
    let vault = common::sample_vault();

    pcb(&home)
        .args(["report", "--date=2026-01-01", "--no-incomes", "--no-accounts", "--no-ledger"])
        .arg("--vault")
        .arg(vault.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("## Incomes")
                .not()
                .and(predicate::str::contains("## PCB").not())
                .and(predicate::str::contains("## Checking")),
        );
    Ok(())
}

#[test]
fn missing_run_date_fails() -> Result<(), Box<dyn Error>> {
    let home = TempDir::new()?;
    let vault = common::sample_vault();

    pcb(&home)
        .arg("ledger")
        .arg("--vault")
        .arg(vault.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Run date is required"));
    Ok(())
}

#[test]
fn invalid_date_fails() -> Result<(), Box<dyn Error>> {
    let home = TempDir::new()?;
    let vault = common::sample_vault();

    pcb(&home)
        .args(["ledger", "--date", "2026-13-45"])
        .arg("--vault")
        .arg(vault.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
    Ok(())
}

#[test]
fn unknown_command_suggests_a_match() -> Result<(), Box<dyn Error>> {
    let home = TempDir::new()?;
    pcb(&home)
        .arg("injectrs")
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("Unknown command `injectrs`")
                .and(predicate::str::contains("Suggestion: `injectors`?")),
        );
    Ok(())
}

#[test]
fn config_set_persists_buffer() -> Result<(), Box<dyn Error>> {
    let home = TempDir::new()?;

    pcb(&home)
        .args(["config", "set", "buffer_threshold", "250"])
        .assert()
        .success();
    home.child("config/config.json")
        .assert(predicate::str::contains("\"buffer_threshold\": 250.0"));

    pcb(&home)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"buffer_threshold\": 250.0"));
    Ok(())
}

#[test]
fn help_and_version_need_no_vault() -> Result<(), Box<dyn Error>> {
    let home = TempDir::new()?;
    pcb(&home)
        .arg("help")
        .assert()
        .success()
        .stdout(predicate::str::contains("injectors").and(predicate::str::contains("--no-<section>")));
    pcb(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("pcb "));
    Ok(())
}
