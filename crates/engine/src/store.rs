//! The entry store: the only owner of the persisted collection.

use crate::{
    Confirm, EngineError, Entry, EntryKind, MoneyCents, Outcome, ResultEngine, Storage,
    format::{parse_timestamp, today},
};

/// Slot name used when the builder is not given one.
pub const DEFAULT_KEY: &str = "financeEntries";

const DELETE_PROMPT: &str = "Delete this entry?";
const CLEAR_PROMPT: &str = "Clear ALL finance entries? This cannot be undone.";

/// Loads, saves and mutates the entry collection kept in one storage slot.
///
/// Every mutation reads the full collection, changes it, and writes it back.
/// There is no cache: callers reload after each mutation to render.
#[derive(Debug)]
pub struct EntryStore<S> {
    storage: S,
    key: String,
}

impl<S: Storage> EntryStore<S> {
    /// Return a builder for `EntryStore`. Help to build the struct.
    pub fn builder() -> EntryStoreBuilder<S> {
        EntryStoreBuilder::default()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Reads the persisted collection.
    ///
    /// Never fails: a missing slot, an unreadable slot, `null` or malformed
    /// JSON all yield an empty collection.
    pub fn load_all(&self) -> Vec<Entry> {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key = %self.key, "no stored entries");
                return Vec::new();
            }
            Err(err) => {
                tracing::warn!(key = %self.key, "failed to read entries: {err}");
                return Vec::new();
            }
        };
        if raw.trim().is_empty() {
            return Vec::new();
        }
        match serde_json::from_str::<Option<Vec<Entry>>>(&raw) {
            Ok(entries) => entries.unwrap_or_default(),
            Err(err) => {
                tracing::warn!(key = %self.key, "discarding corrupt entries: {err}");
                Vec::new()
            }
        }
    }

    /// Overwrites the persisted collection.
    ///
    /// Failures are logged and returned; the previously stored collection is
    /// left untouched.
    pub fn save_all(&self, entries: &[Entry]) -> ResultEngine<()> {
        let result = serde_json::to_string(entries)
            .map_err(EngineError::from)
            .and_then(|payload| self.storage.set(&self.key, &payload));
        if let Err(err) = &result {
            tracing::warn!(key = %self.key, count = entries.len(), "failed to save entries: {err}");
        }
        result
    }

    /// Creates and persists a new entry.
    ///
    /// - `date` defaults to today when missing or blank and is stored as
    ///   `YYYY-MM-DD`.
    /// - A zero `amount` is rejected. Negative amounts are accepted.
    pub fn add(
        &self,
        kind: EntryKind,
        date: Option<&str>,
        amount: MoneyCents,
        desc: Option<&str>,
    ) -> ResultEngine<Entry> {
        if amount.is_zero() {
            return Err(EngineError::InvalidAmount("amount must not be zero".to_string()));
        }
        let date = match date.map(str::trim).filter(|d| !d.is_empty()) {
            None => today(),
            Some(raw) => parse_timestamp(raw)
                .map(|ts| ts.date().format("%Y-%m-%d").to_string())
                .ok_or_else(|| EngineError::InvalidDate(raw.to_string()))?,
        };

        let entry = Entry::new(kind, date, amount, desc.unwrap_or_default().to_string());
        let mut entries = self.load_all();
        entries.push(entry.clone());
        self.save_all(&entries)?;
        tracing::info!(id = %entry.id, kind = %entry.kind, amount = %entry.amount, "entry added");
        Ok(entry)
    }

    /// Deletes the entry with `id` after confirmation.
    ///
    /// An unknown id leaves the collection as it is.
    pub fn remove(&self, id: &str, confirm: &mut impl Confirm) -> ResultEngine<Outcome> {
        if !confirm.confirm(DELETE_PROMPT) {
            return Ok(Outcome::Declined);
        }
        let mut entries = self.load_all();
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        if entries.len() == before {
            tracing::debug!(%id, "no entry to delete");
        } else {
            tracing::info!(%id, "entry deleted");
        }
        self.save_all(&entries)?;
        Ok(Outcome::Applied)
    }

    /// Drops the whole collection after confirmation.
    pub fn clear(&self, confirm: &mut impl Confirm) -> ResultEngine<Outcome> {
        if !confirm.confirm(CLEAR_PROMPT) {
            return Ok(Outcome::Declined);
        }
        self.storage.remove(&self.key)?;
        tracing::info!(key = %self.key, "all entries cleared");
        Ok(Outcome::Applied)
    }
}

#[derive(Debug)]
pub struct EntryStoreBuilder<S> {
    storage: Option<S>,
    key: String,
}

impl<S> Default for EntryStoreBuilder<S> {
    fn default() -> Self {
        Self {
            storage: None,
            key: DEFAULT_KEY.to_string(),
        }
    }
}

impl<S: Storage> EntryStoreBuilder<S> {
    /// Pass the storage backing the store.
    pub fn storage(mut self, storage: S) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Override the slot name.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Construct `EntryStore`.
    pub fn build(self) -> ResultEngine<EntryStore<S>> {
        let storage = self.storage.ok_or_else(|| {
            EngineError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "entry store built without storage",
            ))
        })?;
        Ok(EntryStore {
            storage,
            key: self.key,
        })
    }
}
