use std::{fs, io::Write, path::Path};

use finance_engine::{
    Confirm, CsvExport, EngineError, EntryKind, EntryStore, ExportKind, MoneyCents, Outcome,
    Storage, filter_by_type, recent, totals,
};

use crate::{
    cli::AddArgs,
    error::Result,
    settings::AppConfig,
    views::{entry_table, recent_table, totals_block},
};

/// Front end over an [`EntryStore`]: turns raw command arguments into store
/// calls and renders the reloaded collection after each change.
pub struct App<S> {
    store: EntryStore<S>,
    config: AppConfig,
}

impl<S: Storage> App<S> {
    pub fn new(store: EntryStore<S>, config: AppConfig) -> Self {
        Self { store, config }
    }

    pub fn add(&self, out: &mut impl Write, kind: EntryKind, args: &AddArgs) -> Result<()> {
        let parsed = args.amount.as_deref().map(str::parse::<MoneyCents>);
        let amount = match parsed {
            Some(Ok(amount)) if !amount.is_zero() => amount,
            _ => {
                writeln!(out, "Enter an amount")?;
                return Ok(());
            }
        };

        match self
            .store
            .add(kind, args.date.as_deref(), amount, args.desc.as_deref())
        {
            Ok(entry) => writeln!(out, "Added {kind} {}", entry.id)?,
            Err(EngineError::InvalidDate(raw)) => {
                writeln!(out, "Enter a date as YYYY-MM-DD (got \"{raw}\")")?;
                return Ok(());
            }
            Err(EngineError::InvalidAmount(_)) => {
                writeln!(out, "Enter an amount")?;
                return Ok(());
            }
            Err(err) => warn_unsaved(out, &err)?,
        }
        self.list(out, kind)
    }

    pub fn list(&self, out: &mut impl Write, kind: EntryKind) -> Result<()> {
        let entries = self.store.load_all();
        let symbol = &self.config.currency_symbol;
        writeln!(out, "{}", entry_table(&filter_by_type(&entries, kind), symbol))?;
        writeln!(out)?;
        writeln!(out, "{}", totals_block(&totals(&entries), symbol))?;
        Ok(())
    }

    pub fn recent(&self, out: &mut impl Write, limit: Option<usize>) -> Result<()> {
        let entries = self.store.load_all();
        let limit = limit.unwrap_or(self.config.recent_limit);
        writeln!(
            out,
            "{}",
            recent_table(&recent(&entries, limit), &self.config.currency_symbol)
        )?;
        Ok(())
    }

    pub fn balance(&self, out: &mut impl Write) -> Result<()> {
        let entries = self.store.load_all();
        let symbol = &self.config.currency_symbol;
        writeln!(out, "{}", totals_block(&totals(&entries), symbol))?;
        writeln!(out)?;
        writeln!(out, "Recent activity")?;
        writeln!(
            out,
            "{}",
            recent_table(&recent(&entries, self.config.recent_limit), symbol)
        )?;
        Ok(())
    }

    pub fn delete(
        &self,
        out: &mut impl Write,
        id: &str,
        confirm: &mut impl Confirm,
    ) -> Result<()> {
        match self.store.remove(id, confirm) {
            Ok(Outcome::Declined) => {
                writeln!(out, "Nothing deleted")?;
                return Ok(());
            }
            Ok(Outcome::Applied) => writeln!(out, "Deleted {id}")?,
            Err(err) => warn_unsaved(out, &err)?,
        }
        self.balance(out)
    }

    pub fn clear(&self, out: &mut impl Write, confirm: &mut impl Confirm) -> Result<()> {
        match self.store.clear(confirm) {
            Ok(Outcome::Declined) => {
                writeln!(out, "Nothing deleted")?;
                return Ok(());
            }
            Ok(Outcome::Applied) => writeln!(out, "All entries cleared")?,
            Err(err) => warn_unsaved(out, &err)?,
        }
        self.balance(out)
    }

    pub fn export(
        &self,
        out: &mut impl Write,
        kind: ExportKind,
        out_dir: Option<&Path>,
    ) -> Result<()> {
        let entries = self.store.load_all();
        let Some(export) = CsvExport::build(kind, &entries)? else {
            writeln!(out, "{}", kind.empty_notice())?;
            return Ok(());
        };

        let dir = out_dir.unwrap_or(self.config.export_dir.as_path());
        fs::create_dir_all(dir)?;
        let path = dir.join(export.file_name);
        fs::write(&path, &export.body)?;
        tracing::info!(
            path = %path.display(),
            rows = export.body.lines().count().saturating_sub(1),
            "report written"
        );
        writeln!(out, "Wrote {} ({})", path.display(), export.mime_type)?;
        Ok(())
    }
}

/// Storage failures must not abort the session; they are reported and the
/// views are rendered from whatever is stored.
fn warn_unsaved(out: &mut impl Write, err: &EngineError) -> Result<()> {
    tracing::warn!("storage failure: {err}");
    writeln!(out, "Warning: changes could not be saved ({err})")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use finance_engine::{AssumeYes, MemoryStorage};

    use super::*;

    fn app(storage: MemoryStorage) -> App<MemoryStorage> {
        let store = EntryStore::builder().storage(storage).build().unwrap();
        App::new(store, AppConfig::default())
    }

    fn args(amount: &str, date: &str, desc: &str) -> AddArgs {
        AddArgs {
            amount: Some(amount.to_string()),
            date: Some(date.to_string()),
            desc: Some(desc.to_string()),
        }
    }

    fn output(run: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        run(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn add_renders_list_and_totals() {
        let app = app(MemoryStorage::new());
        let text = output(|out| {
            app.add(out, EntryKind::Income, &args("100.5", "2024-03-01", "salary"))
        });
        assert!(text.starts_with("Added income f"));
        assert!(text.contains("salary"));
        assert!(text.contains("Balance:       $100.50"));
    }

    #[test]
    fn invalid_amounts_are_rejected_with_a_notice() {
        let app = app(MemoryStorage::new());
        for amount in ["", "0", "0.00", "abc"] {
            let text =
                output(|out| app.add(out, EntryKind::Output, &args(amount, "2024-03-01", "")));
            assert_eq!(text, "Enter an amount\n");
        }
        assert!(app.store.load_all().is_empty());
    }

    #[test]
    fn missing_amount_is_rejected_with_a_notice() {
        let app = app(MemoryStorage::new());
        let args = AddArgs {
            amount: None,
            ..args("", "2024-03-01", "lunch")
        };
        let text = output(|out| app.add(out, EntryKind::Output, &args));
        assert_eq!(text, "Enter an amount\n");
        assert!(app.store.load_all().is_empty());
    }

    #[test]
    fn invalid_date_is_rejected_with_a_notice() {
        let app = app(MemoryStorage::new());
        let text = output(|out| app.add(out, EntryKind::Output, &args("5", "tomorrow", "")));
        assert!(text.starts_with("Enter a date"));
        assert!(app.store.load_all().is_empty());
    }

    #[test]
    fn failed_save_warns_and_still_renders() {
        let app = app(MemoryStorage::with_quota(10));
        let text = output(|out| app.add(out, EntryKind::Income, &args("5", "2024-03-01", "")));
        assert!(text.starts_with("Warning: changes could not be saved"));
        assert!(text.contains("(none)"));
    }

    #[test]
    fn declined_delete_keeps_entry() {
        let app = app(MemoryStorage::new());
        output(|out| app.add(out, EntryKind::Income, &args("1", "2024-03-01", "keep")));
        let id = app.store.load_all()[0].id.clone();

        let text = output(|out| app.delete(out, &id, &mut |_: &str| false));
        assert_eq!(text, "Nothing deleted\n");
        assert_eq!(app.store.load_all().len(), 1);

        let text = output(|out| app.delete(out, &id, &mut AssumeYes));
        assert!(text.starts_with(&format!("Deleted {id}")));
        assert!(app.store.load_all().is_empty());
    }

    #[test]
    fn clear_renders_empty_balance() {
        let app = app(MemoryStorage::new());
        output(|out| app.add(out, EntryKind::Income, &args("1", "2024-03-01", "")));
        let text = output(|out| app.clear(out, &mut AssumeYes));
        assert!(text.starts_with("All entries cleared"));
        assert!(text.contains("Balance:       $0.00"));
        assert!(text.contains("(none)"));
    }

    #[test]
    fn export_writes_named_file_or_notice() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(MemoryStorage::new());

        let text = output(|out| app.export(out, ExportKind::Income, Some(dir.path())));
        assert_eq!(text, "No income entries to export\n");
        assert!(!dir.path().join("finance-income.csv").exists());

        output(|out| app.add(out, EntryKind::Income, &args("10", "2024-01-01", "pay")));
        output(|out| app.add(out, EntryKind::Output, &args("3", "2024-01-02", "lunch")));
        let text = output(|out| app.export(out, ExportKind::Balance, Some(dir.path())));
        assert!(text.ends_with("(text/csv)\n"));
        let body = fs::read_to_string(dir.path().join("finance-balance.csv")).unwrap();
        assert_eq!(
            body,
            "date,description,income,output,running_balance\n\
             2024-01-01,pay,10,,10\n\
             2024-01-02,lunch,,3,7"
        );
    }

    #[test]
    fn recent_respects_limit() {
        let app = app(MemoryStorage::new());
        output(|out| app.add(out, EntryKind::Income, &args("1", "2024-01-01", "first")));
        output(|out| app.add(out, EntryKind::Output, &args("2", "2024-02-01", "second")));
        let text = output(|out| app.recent(out, Some(1)));
        assert!(text.contains("second"));
        assert!(!text.contains("first"));
    }
}
