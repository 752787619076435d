//! Core of the finance ledger: entries, their persistence, totals and CSV
//! reports.
//!
//! The front end owns no state. It builds an [`EntryStore`] over some
//! [`Storage`], calls the store to mutate the collection, then reloads and
//! renders with the pure functions in [`aggregate`], [`export`] and
//! [`format`].
//!
//! ```rust
//! use finance_engine::{EntryKind, EntryStore, MemoryStorage, MoneyCents, totals};
//!
//! let store = EntryStore::builder()
//!     .storage(MemoryStorage::new())
//!     .build()
//!     .unwrap();
//! store
//!     .add(EntryKind::Income, Some("2024-03-01"), MoneyCents::new(100_50), Some("salary"))
//!     .unwrap();
//! store
//!     .add(EntryKind::Output, Some("2024-03-02"), MoneyCents::new(40_00), Some("groceries"))
//!     .unwrap();
//!
//! let totals = totals(&store.load_all());
//! assert_eq!(totals.balance, MoneyCents::new(60_50));
//! ```

pub use aggregate::{
    DEFAULT_RECENT_LIMIT, Totals, filter_by_type, recent, sort_chronological, totals,
};
pub use confirm::{AssumeYes, Confirm, Outcome};
pub use entry::{Entry, EntryKind};
pub use error::EngineError;
pub use export::{
    CsvExport, ExportKind, MIME_TYPE, balance_csv, entries_csv, income_csv, output_csv,
};
pub use format::{format_date, format_money, parse_timestamp, today};
pub use money::MoneyCents;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{DEFAULT_KEY, EntryStore, EntryStoreBuilder};

pub mod aggregate;
mod confirm;
mod entry;
mod error;
pub mod export;
pub mod format;
mod money;
mod storage;
mod store;

pub type ResultEngine<T> = Result<T, EngineError>;
