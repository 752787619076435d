use clap::Parser;
use finance_engine::{EntryKind, EntryStore, FileStorage};

use crate::{
    app::App,
    cli::{Cli, Command, Kind, KindCommand},
    error::Result,
    prompt::TerminalConfirm,
};

mod app;
mod cli;
mod error;
mod prompt;
mod settings;
mod views;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = settings::load(&cli)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "finance={level},finance_engine={level}",
            level = settings.level
        ))
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        data_dir = %settings.data_dir.display(),
        key = %settings.storage_key,
        "opening entry store"
    );
    let store = EntryStore::builder()
        .storage(FileStorage::new(&settings.data_dir))
        .key(&settings.storage_key)
        .build()?;
    let app = App::new(store, settings);

    let mut out = std::io::stdout().lock();
    match cli.command {
        Command::Income(Kind { command }) => run_kind(&app, &mut out, EntryKind::Income, command),
        Command::Output(Kind { command }) => run_kind(&app, &mut out, EntryKind::Output, command),
        Command::Recent { limit } => app.recent(&mut out, limit),
        Command::Balance => app.balance(&mut out),
        Command::Delete { id, yes } => app.delete(&mut out, &id, &mut TerminalConfirm::new(yes)),
        Command::Clear { yes } => app.clear(&mut out, &mut TerminalConfirm::new(yes)),
        Command::Export { report, out_dir } => {
            app.export(&mut out, report.into(), out_dir.as_deref())
        }
    }
}

fn run_kind(
    app: &App<FileStorage>,
    out: &mut impl std::io::Write,
    kind: EntryKind,
    command: KindCommand,
) -> Result<()> {
    match command {
        KindCommand::Add(args) => app.add(out, kind, &args),
        KindCommand::List => app.list(out, kind),
    }
}
