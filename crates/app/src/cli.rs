use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use finance_engine::ExportKind;

#[derive(Parser, Debug)]
#[command(name = "finance")]
#[command(about = "Record income and expenses, check the balance, export CSV reports")]
pub struct Cli {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Override the directory holding the entries file.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
    /// Override the currency symbol used in tables.
    #[arg(long, global = true)]
    pub currency_symbol: Option<String>,
    /// Override the log level (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Income entries.
    Income(Kind),
    /// Output (expense) entries.
    Output(Kind),
    /// Most recent entries of both kinds, newest first.
    Recent {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Totals and recent activity.
    Balance,
    /// Delete one entry.
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
    /// Delete every entry.
    Clear {
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
    /// Write a CSV report.
    Export {
        #[arg(value_enum)]
        report: Report,
        /// Directory the report is written to.
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
pub struct Kind {
    #[command(subcommand)]
    pub command: KindCommand,
}

#[derive(Subcommand, Debug)]
pub enum KindCommand {
    Add(AddArgs),
    List,
}

#[derive(Args, Debug, Clone, Default)]
pub struct AddArgs {
    /// Amount, rounded to two decimals. Must not be zero.
    #[arg(long, allow_hyphen_values = true)]
    pub amount: Option<String>,
    /// Date as YYYY-MM-DD, today when omitted.
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long)]
    pub desc: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Report {
    All,
    Income,
    Output,
    Balance,
}

impl From<Report> for ExportKind {
    fn from(report: Report) -> Self {
        match report {
            Report::All => ExportKind::All,
            Report::Income => ExportKind::Income,
            Report::Output => ExportKind::Output,
            Report::Balance => ExportKind::Balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_with_negative_amount() {
        let cli = Cli::try_parse_from([
            "finance", "output", "add", "--amount", "-5", "--desc", "refund",
        ])
        .unwrap();
        let Command::Output(Kind {
            command: KindCommand::Add(args),
        }) = cli.command
        else {
            panic!("expected output add");
        };
        assert_eq!(args.amount.as_deref(), Some("-5"));
        assert_eq!(args.desc.as_deref(), Some("refund"));
        assert_eq!(args.date, None);
    }

    #[test]
    fn parses_export_and_global_flags() {
        let cli = Cli::try_parse_from([
            "finance",
            "export",
            "balance",
            "--out-dir",
            "reports",
            "--data-dir",
            "/tmp/ledger",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/ledger")));
        let Command::Export { report, out_dir } = cli.command else {
            panic!("expected export");
        };
        assert_eq!(ExportKind::from(report), ExportKind::Balance);
        assert_eq!(out_dir, Some(PathBuf::from("reports")));
    }

    #[test]
    fn add_parses_without_amount() {
        let cli = Cli::try_parse_from(["finance", "income", "add"]).unwrap();
        let Command::Income(Kind {
            command: KindCommand::Add(args),
        }) = cli.command
        else {
            panic!("expected income add");
        };
        assert_eq!(args.amount, None);
    }
}
