//! The module contains the `Entry` type, the only persisted record.
//!
//! Both income and expenses ("output") are represented by `Entry`; the
//! [`EntryKind`] tells them apart.
use core::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::MoneyCents;

/// Whether an entry adds to or takes from the balance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Income,
    Output,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Output => "output",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single income or expense record.
///
/// Entries are never mutated once stored; the store only appends and removes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(default)]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: MoneyCents,
    #[serde(default)]
    pub desc: String,
}

impl Entry {
    /// Creates an entry with a fresh id.
    ///
    /// The id is `f` followed by a UUIDv7, so ids are time-ordered and never
    /// collide even when created within the same millisecond.
    pub fn new(kind: EntryKind, date: String, amount: MoneyCents, desc: String) -> Self {
        Self {
            id: format!("f{}", Uuid::now_v7().simple()),
            kind,
            date,
            amount,
            desc,
        }
    }
}

/// Missing, null or non-numeric amounts count as zero instead of rejecting
/// the whole collection.
fn lenient_amount<'de, D>(deserializer: D) -> Result<MoneyCents, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64().and_then(MoneyCents::from_major),
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    };
    Ok(amount.unwrap_or(MoneyCents::ZERO))
}
