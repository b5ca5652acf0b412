use std::path::PathBuf;

use strsim::levenshtein;

use crate::{errors::CliError, report::ReportSections};

const SUGGESTION_DISTANCE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Report,
    Ledger,
    Incomes,
    Accounts,
    Checking,
    Injectors,
    Config,
    Version,
    Help,
}

impl Command {
    pub const ALL: [Command; 9] = [
        Command::Report,
        Command::Ledger,
        Command::Incomes,
        Command::Accounts,
        Command::Checking,
        Command::Injectors,
        Command::Config,
        Command::Version,
        Command::Help,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Command::Report => "report",
            Command::Ledger => "ledger",
            Command::Incomes => "incomes",
            Command::Accounts => "accounts",
            Command::Checking => "checking",
            Command::Injectors => "injectors",
            Command::Config => "config",
            Command::Version => "version",
            Command::Help => "help",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            Command::Report => "Snapshots plus the projected ledger (default)",
            Command::Ledger => "Projected ledger with running balance",
            Command::Incomes => "Income notes and their next deposit",
            Command::Accounts => "Account balances",
            Command::Checking => "Checking balances feeding the opening balance",
            Command::Injectors => "Funding sources as offers for the run date",
            Command::Config => "Show or change stored defaults (config set <key> <value>)",
            Command::Version => "Show build metadata",
            Command::Help => "Show available commands",
        }
    }

    /// Needs a run context and a vault.
    pub fn is_forecast(self) -> bool {
        !matches!(self, Command::Config | Command::Version | Command::Help)
    }

    pub fn parse(input: &str) -> Result<Self, CliError> {
        let lowered = input.to_ascii_lowercase();
        if let Some(command) = Self::ALL.into_iter().find(|c| c.name() == lowered) {
            return Ok(command);
        }
        let suggestion = Self::ALL
            .into_iter()
            .map(|c| (levenshtein(c.name(), &lowered), c.name()))
            .min_by_key(|(distance, _)| *distance)
            .filter(|(distance, _)| *distance <= SUGGESTION_DISTANCE)
            .map(|(_, name)| name.to_string());
        Err(CliError::UnknownCommand {
            input: input.to_string(),
            suggestion,
        })
    }
}

/// Parsed command line. Options may appear before or after the command.
#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub command: Command,
    pub date: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub vault: Option<PathBuf>,
    pub buffer: Option<f64>,
    pub opening: Option<f64>,
    pub sections: ReportSections,
    pub debug: bool,
    /// Positional arguments after the command.
    pub rest: Vec<String>,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            command: Command::Report,
            date: None,
            from: None,
            to: None,
            vault: None,
            buffer: None,
            opening: None,
            sections: ReportSections::default(),
            debug: false,
            rest: Vec::new(),
        }
    }
}

impl CliArgs {
    pub fn parse<I, S>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parsed = CliArgs::default();
        let mut command: Option<Command> = None;
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            let Some(option) = arg.strip_prefix("--") else {
                match command {
                    None => command = Some(Command::parse(&arg)?),
                    Some(_) => parsed.rest.push(arg),
                }
                continue;
            };
            let (name, inline) = match option.split_once('=') {
                Some((name, value)) => (name, Some(value.to_string())),
                None => (option, None),
            };

            match name {
                "debug" => {
                    parsed.debug = true;
                    parsed.sections.debug = true;
                }
                "help" => command = Some(Command::Help),
                "version" => command = Some(Command::Version),
                "date" | "from" | "to" | "vault" | "buffer" | "opening" => {
                    let value = match inline {
                        Some(value) => value,
                        None => args
                            .next()
                            .ok_or_else(|| CliError::Usage(format!("--{name} needs a value")))?,
                    };
                    match name {
                        "date" => parsed.date = Some(value),
                        "from" => parsed.from = Some(value),
                        "to" => parsed.to = Some(value),
                        "vault" => parsed.vault = Some(PathBuf::from(value)),
                        "buffer" => parsed.buffer = Some(parse_amount(name, &value)?),
                        _ => parsed.opening = Some(parse_amount(name, &value)?),
                    }
                }
                other => {
                    let disabled = other
                        .strip_prefix("no-")
                        .map(|section| parsed.sections.disable(section))
                        .unwrap_or(false);
                    if !disabled {
                        return Err(CliError::Usage(format!("Unknown option `--{other}`")));
                    }
                }
            }
        }

        parsed.command = command.unwrap_or(Command::Report);
        Ok(parsed)
    }
}

fn parse_amount(name: &str, value: &str) -> Result<f64, CliError> {
    value
        .trim()
        .replace(['$', ','], "")
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| CliError::Usage(format!("--{name} expects a number, got `{value}`")))
}
