//! CSV reports over the entry collection.
//!
//! Every report starts with a header row, joins rows with `\n` and has no
//! trailing newline. A report over an empty selection is `None`: callers show
//! [`ExportKind::empty_notice`] instead of producing a file.

use csv::{QuoteStyle, Terminator, Writer, WriterBuilder};

use crate::{
    EngineError, Entry, EntryKind, MoneyCents, ResultEngine, aggregate::sort_chronological,
};

pub const MIME_TYPE: &str = "text/csv";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExportKind {
    All,
    Income,
    Output,
    Balance,
}

impl ExportKind {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::All => "finance-entries.csv",
            Self::Income => "finance-income.csv",
            Self::Output => "finance-output.csv",
            Self::Balance => "finance-balance.csv",
        }
    }

    pub fn empty_notice(self) -> &'static str {
        match self {
            Self::All | Self::Balance => "No entries to export",
            Self::Income => "No income entries to export",
            Self::Output => "No output entries to export",
        }
    }
}

/// A finished report, ready to be written out or downloaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsvExport {
    pub kind: ExportKind,
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub body: String,
}

impl CsvExport {
    pub fn build(kind: ExportKind, entries: &[Entry]) -> ResultEngine<Option<Self>> {
        let body = match kind {
            ExportKind::All => entries_csv(entries)?,
            ExportKind::Income => income_csv(entries)?,
            ExportKind::Output => output_csv(entries)?,
            ExportKind::Balance => balance_csv(entries)?,
        };
        Ok(body.map(|body| Self {
            kind,
            file_name: kind.file_name(),
            mime_type: MIME_TYPE,
            body,
        }))
    }
}

/// Every entry as `id,type,date,amount,description`.
///
/// The description is always quoted; the other cells are written as they are.
pub fn entries_csv(entries: &[Entry]) -> ResultEngine<Option<String>> {
    if entries.is_empty() {
        return Ok(None);
    }
    let mut writer = writer(QuoteStyle::Never);
    writer.write_record(["id", "type", "date", "amount", "description"])?;
    for entry in entries {
        let amount = amount_cell(entry.amount);
        let desc = always_quoted(&entry.desc);
        writer.write_record([
            entry.id.as_str(),
            entry.kind.as_str(),
            entry.date.as_str(),
            amount.as_str(),
            desc.as_str(),
        ])?;
    }
    finish(writer).map(Some)
}

/// Income entries as `id,date,amount,description`.
///
/// Here and in the other per-kind reports the description is quoted only
/// when it holds a comma, a quote or a line feed.
pub fn income_csv(entries: &[Entry]) -> ResultEngine<Option<String>> {
    kind_csv(entries, EntryKind::Income)
}

/// Output entries as `id,date,amount,description`.
pub fn output_csv(entries: &[Entry]) -> ResultEngine<Option<String>> {
    kind_csv(entries, EntryKind::Output)
}

/// Chronological ledger as `date,description,income,output,running_balance`.
///
/// The income and output cells are empty unless the entry is of that kind;
/// the running balance is filled on every row.
pub fn balance_csv(entries: &[Entry]) -> ResultEngine<Option<String>> {
    if entries.is_empty() {
        return Ok(None);
    }
    let mut writer = writer(QuoteStyle::Never);
    writer.write_record(["date", "description", "income", "output", "running_balance"])?;
    let mut balance = MoneyCents::ZERO;
    for entry in sort_chronological(entries) {
        let (income, output) = match entry.kind {
            EntryKind::Income => (entry.amount, MoneyCents::ZERO),
            EntryKind::Output => (MoneyCents::ZERO, entry.amount),
        };
        balance += income - output;
        let income = amount_cell(income);
        let output = amount_cell(output);
        let running = balance.to_compact_string();
        let desc = escaped(&entry.desc);
        writer.write_record([
            entry.date.as_str(),
            desc.as_str(),
            income.as_str(),
            output.as_str(),
            running.as_str(),
        ])?;
    }
    finish(writer).map(Some)
}

fn kind_csv(entries: &[Entry], kind: EntryKind) -> ResultEngine<Option<String>> {
    let mut selected = entries.iter().filter(|entry| entry.kind == kind).peekable();
    if selected.peek().is_none() {
        return Ok(None);
    }
    let mut writer = writer(QuoteStyle::Never);
    writer.write_record(["id", "date", "amount", "description"])?;
    for entry in selected {
        let amount = amount_cell(entry.amount);
        let desc = escaped(&entry.desc);
        writer.write_record([
            entry.id.as_str(),
            entry.date.as_str(),
            amount.as_str(),
            desc.as_str(),
        ])?;
    }
    finish(writer).map(Some)
}

fn writer(quote_style: QuoteStyle) -> Writer<Vec<u8>> {
    WriterBuilder::new()
        .quote_style(quote_style)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new())
}

fn finish(writer: Writer<Vec<u8>>) -> ResultEngine<String> {
    let bytes = writer
        .into_inner()
        .map_err(|err| EngineError::Export(err.to_string()))?;
    let mut text = String::from_utf8(bytes).map_err(|err| EngineError::Export(err.to_string()))?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

/// Zero amounts are left blank.
fn amount_cell(amount: MoneyCents) -> String {
    if amount.is_zero() {
        String::new()
    } else {
        amount.to_compact_string()
    }
}

fn always_quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn escaped(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        always_quoted(value)
    } else {
        value.to_string()
    }
}
