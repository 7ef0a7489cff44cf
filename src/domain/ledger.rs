//! Append-only history of saved estimates.
//!
//! The ledger owns the in-memory sequence and rewrites the whole sequence to
//! its [`KeyValueStore`] after every append.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;

use super::dates::DateStyle;
use super::fees::FeeBreakdown;
use super::form::{CostForm, ValidationError};
use crate::util::persistence::{KeyValueStore, PersistenceError};

/// Storage slot holding the serialized record sequence.
pub const LEDGER_KEY: &str = "etsyCalculations";

/// Record identifier, written as a plain integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

/// One saved estimate. Never changed after creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    #[serde(flatten)]
    pub form: CostForm,
    #[serde(flatten)]
    pub breakdown: FeeBreakdown,
    pub date: String,
    pub id: RecordId,
}

/// Hands out strictly increasing ids seeded from wall-clock milliseconds.
#[derive(Clone, Debug, Default)]
struct IdSequence {
    last: Option<u64>,
}

impl IdSequence {
    fn observe(&mut self, id: RecordId) {
        self.last = Some(self.last.map_or(id.0, |last| last.max(id.0)));
    }

    fn next(&mut self, now: OffsetDateTime) -> RecordId {
        let millis = u64::try_from(now.unix_timestamp_nanos() / 1_000_000).unwrap_or(0);
        let id = match self.last {
            Some(last) if millis <= last => last + 1,
            _ => millis,
        };
        self.last = Some(id);
        RecordId(id)
    }
}

#[derive(Clone, Debug, Default)]
enum LedgerState {
    #[default]
    Uninitialized,
    Loaded(Vec<CalculationRecord>),
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("saved calculations have not been loaded yet")]
    NotLoaded,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The record is part of the in-memory ledger but is not durable.
    #[error("calculation kept for this session but could not be saved: {source}")]
    Persistence {
        record: Box<CalculationRecord>,
        #[source]
        source: PersistenceError,
    },
}

/// Result of a successful append.
#[derive(Debug)]
pub struct Appended<'a> {
    pub records: &'a [CalculationRecord],
    pub record: CalculationRecord,
}

#[derive(Clone, Debug)]
pub struct Ledger<S> {
    store: S,
    state: LedgerState,
    ids: IdSequence,
    date_style: DateStyle,
}

impl<S: KeyValueStore> Ledger<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: LedgerState::Uninitialized,
            ids: IdSequence::default(),
            date_style: DateStyle::default(),
        }
    }

    pub fn with_date_style(mut self, date_style: DateStyle) -> Self {
        self.date_style = date_style;
        self
    }

    pub fn set_date_style(&mut self, date_style: DateStyle) {
        self.date_style = date_style;
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, LedgerState::Loaded(_))
    }

    /// Saved records in save order; empty until [`Ledger::load`] runs.
    pub fn records(&self) -> &[CalculationRecord] {
        match &self.state {
            LedgerState::Loaded(records) => records,
            LedgerState::Uninitialized => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    /// Hydrates the ledger from storage.
    ///
    /// Missing, unreadable or malformed data produces an empty ledger.
    pub fn load(&mut self) -> &[CalculationRecord] {
        let records = self.read_records();
        self.ids = IdSequence::default();
        for record in &records {
            self.ids.observe(record.id);
        }
        tracing::info!(count = records.len(), "loaded saved calculations");
        self.state = LedgerState::Loaded(records);
        self.records()
    }

    fn read_records(&self) -> Vec<CalculationRecord> {
        let text = match self.store.read(LEDGER_KEY) {
            Ok(Some(text)) => text,
            Ok(None) => return Vec::new(),
            Err(err) => {
                tracing::warn!(error = %err, "could not read saved calculations");
                return Vec::new();
            }
        };
        match serde_json::from_str(&text) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(error = %err, "saved calculations are unreadable, starting empty");
                Vec::new()
            }
        }
    }

    /// Saves a new record built from `form` and `breakdown` and persists the
    /// full sequence.
    ///
    /// A failed write leaves the record in memory and is reported as
    /// [`LedgerError::Persistence`].
    pub fn append(
        &mut self,
        form: &CostForm,
        breakdown: FeeBreakdown,
        now: OffsetDateTime,
    ) -> Result<Appended<'_>, LedgerError> {
        let LedgerState::Loaded(records) = &mut self.state else {
            return Err(LedgerError::NotLoaded);
        };
        form.validate()?;
        if !breakdown.is_finite() {
            return Err(ValidationError::AmountTooLarge.into());
        }

        let record = CalculationRecord {
            form: form.clone(),
            breakdown,
            date: self.date_style.format(now),
            id: self.ids.next(now),
        };
        records.push(record.clone());

        let written = serde_json::to_string_pretty(records.as_slice())
            .map_err(PersistenceError::from)
            .and_then(|json| self.store.write(LEDGER_KEY, &json));
        if let Err(source) = written {
            tracing::error!(id = record.id.0, error = %source, "failed to persist calculation");
            return Err(LedgerError::Persistence {
                record: Box::new(record),
                source,
            });
        }

        tracing::info!(id = record.id.0, total = records.len(), "saved calculation");
        Ok(Appended {
            records: records.as_slice(),
            record,
        })
    }
}
