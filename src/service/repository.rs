//! Error-frequency store.
//!
//! Counts how often each failing question has been asked. Records are keyed
//! by the question text: the first failure fixes the method and kind, and
//! later failures of the same text bump the count.

use super::snapshot::{ErrorSnapshot, SnapshotError};
use super::Method;
use crate::error::ErrorKind;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// How often one question failed, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpressionError {
    pub expression: String,
    pub method: Method,
    pub kind: ErrorKind,
    pub frequency: u64,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("error count for {expression:?} overflowed")]
    CounterOverflow { expression: String },

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Storage for error records. Implementations must serialize concurrent
/// increments of the same expression.
pub trait ErrorRepository: Send + Sync {
    /// Count one more failure of `expression`, returning the new frequency.
    fn increment(
        &self,
        expression: &str,
        method: Method,
        kind: ErrorKind,
    ) -> Result<u64, RepositoryError>;

    /// Every record, sorted by expression.
    fn all(&self) -> Result<Vec<ExpressionError>, RepositoryError>;
}

impl<T: ErrorRepository + ?Sized> ErrorRepository for Arc<T> {
    fn increment(
        &self,
        expression: &str,
        method: Method,
        kind: ErrorKind,
    ) -> Result<u64, RepositoryError> {
        (**self).increment(expression, method, kind)
    }

    fn all(&self) -> Result<Vec<ExpressionError>, RepositoryError> {
        (**self).all()
    }
}

/// Process-local store on a sharded concurrent map.
#[derive(Debug, Default)]
pub struct InMemoryErrorRepository {
    records: DashMap<String, ExpressionError>,
}

impl InMemoryErrorRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from a snapshot.
    pub fn from_snapshot(snapshot: ErrorSnapshot) -> Self {
        let records = snapshot
            .records
            .into_iter()
            .map(|record| (record.expression.clone(), record))
            .collect();
        Self { records }
    }

    pub fn snapshot(&self) -> Result<ErrorSnapshot, RepositoryError> {
        Ok(ErrorSnapshot::new(self.all()?))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ErrorRepository for InMemoryErrorRepository {
    fn increment(
        &self,
        expression: &str,
        method: Method,
        kind: ErrorKind,
    ) -> Result<u64, RepositoryError> {
        let now = Utc::now();
        let mut record = self
            .records
            .entry(expression.to_string())
            .or_insert_with(|| ExpressionError {
                expression: expression.to_string(),
                method,
                kind,
                frequency: 0,
                first_seen: now,
                last_seen: now,
            });

        record.frequency =
            record
                .frequency
                .checked_add(1)
                .ok_or_else(|| RepositoryError::CounterOverflow {
                    expression: expression.to_string(),
                })?;
        record.last_seen = now;

        tracing::trace!(
            target: "mathq::store",
            expression,
            frequency = record.frequency,
            "Counted failure"
        );
        Ok(record.frequency)
    }

    fn all(&self) -> Result<Vec<ExpressionError>, RepositoryError> {
        let mut records: Vec<ExpressionError> = self
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by(|a, b| a.expression.cmp(&b.expression));
        Ok(records)
    }
}
