use std::{env, io::Write, path::PathBuf};

use tracing::info;

use pcb_config::{Config, ConfigManager, VaultLayout};
use pcb_core::{Clock, ForecastService, RunParams};
use pcb_domain::{RecordKind, RunContext};
use pcb_storage_md::MarkdownVault;

use crate::{
    errors::CliError,
    render::{render_accounts, render_checking, render_incomes, render_injectors, render_ledger},
    report::{render_report, ReportData, ReportSections},
    utils::build_info,
};

use super::{
    args::{CliArgs, Command},
    output,
};

/// Overrides the per-user config directory.
pub const HOME_ENV: &str = "PCB_HOME";

/// Runs one parsed command, writing markdown to `out`.
pub fn execute(args: &CliArgs, clock: &dyn Clock, out: &mut dyn Write) -> Result<(), CliError> {
    match args.command {
        Command::Help => {
            write!(out, "{}", help_text())?;
            Ok(())
        }
        Command::Version => {
            writeln!(out, "{}", build_info::current().describe())?;
            Ok(())
        }
        Command::Config => cmd_config(&args.rest, out),
        command => {
            let config = config_manager()?.load()?;
            let context = run_context(args, &config, clock)?;
            let vault = open_vault(&context, &config.layout);
            info!(command = command.name(), vault = %vault.root().display(), "running");
            let markdown = forecast_command(command, &context, &vault, args.sections)?;
            write!(out, "{markdown}")?;
            Ok(())
        }
    }
}

fn forecast_command(
    command: Command,
    context: &RunContext,
    vault: &MarkdownVault,
    sections: ReportSections,
) -> Result<String, CliError> {
    let markdown = match command {
        Command::Ledger => render_ledger(&ForecastService::run(context, vault)?),
        Command::Incomes => render_incomes(
            &ForecastService::load_scheduled(vault, RecordKind::Income)?,
            context,
        ),
        Command::Accounts => render_accounts(
            &ForecastService::load_accounts(vault, RecordKind::Account)?,
            context.run_date,
        ),
        Command::Checking => render_checking(
            &ForecastService::load_accounts(vault, RecordKind::Checking)?,
            context.run_date,
        ),
        Command::Injectors => render_injectors(
            &ForecastService::offers(context, &ForecastService::load_funding_sources(vault)?),
            context.run_date,
        ),
        _ => render_report(&ReportData::load(context, vault)?, &sections),
    };
    Ok(markdown)
}

/// Resolves CLI flags over stored defaults. `--date today` reads the clock.
pub fn run_context(
    args: &CliArgs,
    config: &Config,
    clock: &dyn Clock,
) -> Result<RunContext, CliError> {
    let today = |value: &Option<String>| match value.as_deref() {
        Some(raw) if raw.eq_ignore_ascii_case("today") => Some(clock.today().to_string()),
        other => other.map(str::to_string),
    };
    let params = RunParams {
        base_path: args
            .vault
            .clone()
            .unwrap_or_else(|| config.resolve_vault_root()),
        date: today(&args.date),
        from: today(&args.from),
        to: today(&args.to),
        buffer_threshold: Some(args.buffer.unwrap_or(config.buffer_threshold)),
        max_injections: Some(config.max_injections),
        opening_balance: args.opening,
    };
    Ok(params.resolve()?)
}

fn open_vault(context: &RunContext, layout: &VaultLayout) -> MarkdownVault {
    MarkdownVault::new(context.base_path.clone())
        .with_folder(RecordKind::Bill, layout.bills.clone())
        .with_folder(RecordKind::Debt, layout.debts.clone())
        .with_folder(RecordKind::Income, layout.income.clone())
        .with_folder(RecordKind::Injector, layout.injectors.clone())
        .with_folder(RecordKind::Account, layout.accounts.clone())
        .with_folder(RecordKind::Checking, layout.checking.clone())
}

fn config_manager() -> Result<ConfigManager, CliError> {
    let base = env::var_os(HOME_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(ConfigManager::default_base_dir);
    Ok(ConfigManager::with_base_dir(base)?)
}

fn cmd_config(rest: &[String], out: &mut dyn Write) -> Result<(), CliError> {
    let manager = config_manager()?;
    let mut config = manager.load()?;

    match rest {
        [] => {
            writeln!(out, "# {}", manager.config_path().display())?;
            writeln!(out, "{}", serde_json::to_string_pretty(&config)?)?;
            Ok(())
        }
        [action, key, value] if action == "set" => {
            config.set(key, value)?;
            manager.save(&config)?;
            output::success(format!("{key} updated"));
            Ok(())
        }
        _ => Err(CliError::Usage(format!(
            "usage: pcb config [set <key> <value>] (keys: {})",
            Config::KEYS.join(", ")
        ))),
    }
}

pub fn help_text() -> String {
    let mut text = String::from("Usage: pcb [command] [options]\n\nCommands:\n");
    for command in Command::ALL {
        text.push_str(&format!("  {:<10} {}\n", command.name(), command.summary()));
    }
    text.push_str(
        "\nOptions:\n  --date <YYYY-MM-DD|today>  Run date (required for forecasts)\n  --from <date>              Window start (defaults to the run date)\n  --to <date>                Window end (defaults to the run date)\n  --vault <path>             Vault root\n  --buffer <amount>          Minimum running balance\n  --opening <amount>         Opening balance override\n",
    );
    text.push_str(&format!(
        "  --no-<section>             Skip a report section ({})\n  --debug                    Debug logging and report header\n",
        ReportSections::NAMES.join(", ")
    ));
    text
}
