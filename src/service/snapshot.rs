//! Persistable snapshots of the error store.
//!
//! A snapshot carries every counted expression so that counters survive a
//! restart. It serializes to JSON for files a person may read, or to a
//! compact binary form.

use super::repository::ExpressionError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Errors that can occur while saving or loading a snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    #[error("Unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The snapshot decoded but its records are inconsistent.
    #[error("Snapshot validation failed: {0}")]
    ValidationFailed(String),
}

/// Point-in-time copy of every error record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorSnapshot {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: Uuid,

    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,

    /// Records sorted by expression
    pub records: Vec<ExpressionError>,
}

impl ErrorSnapshot {
    pub fn new(records: Vec<ExpressionError>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            records,
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.validate()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.validate()
    }

    fn validate(self) -> Result<Self, SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }

        let mut seen = HashSet::new();
        for record in &self.records {
            if !seen.insert(record.expression.as_str()) {
                return Err(SnapshotError::ValidationFailed(format!(
                    "duplicate record for {:?}",
                    record.expression
                )));
            }
            if record.frequency == 0 {
                return Err(SnapshotError::ValidationFailed(format!(
                    "record for {:?} has zero frequency",
                    record.expression
                )));
            }
            if record.last_seen < record.first_seen {
                return Err(SnapshotError::ValidationFailed(format!(
                    "record for {:?} was last seen before it was first seen",
                    record.expression
                )));
            }
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::service::Method;
    use chrono::Duration;

    fn record(expression: &str, frequency: u64) -> ExpressionError {
        let now = Utc::now();
        ExpressionError {
            expression: expression.to_string(),
            method: Method::Evaluate,
            kind: ErrorKind::InvalidSyntax,
            frequency,
            first_seen: now,
            last_seen: now,
        }
    }

    #[test]
    fn json_and_binary_forms_restore_the_same_snapshot() {
        let snapshot = ErrorSnapshot::new(vec![record("What is?", 3), record("Who?", 1)]);

        let from_json = ErrorSnapshot::from_json(&snapshot.to_json().unwrap()).unwrap();
        let from_bytes = ErrorSnapshot::from_bytes(&snapshot.to_bytes().unwrap()).unwrap();

        assert_eq!(from_json, snapshot);
        assert_eq!(from_bytes, snapshot);
    }

    #[test]
    fn json_uses_readable_kind_names() {
        let json = ErrorSnapshot::new(vec![record("What is?", 1)]).to_json().unwrap();
        assert!(json.contains("\"invalid_syntax\""));
        assert!(json.contains("\"evaluate\""));
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let mut snapshot = ErrorSnapshot::new(vec![]);
        snapshot.version = SNAPSHOT_VERSION + 1;
        let json = snapshot.to_json().unwrap();

        assert!(matches!(
            ErrorSnapshot::from_json(&json),
            Err(SnapshotError::UnsupportedVersion { found: 2, supported: 1 })
        ));
    }

    #[test]
    fn inconsistent_records_are_rejected() {
        let duplicate = ErrorSnapshot::new(vec![record("x", 1), record("x", 2)]);
        assert!(matches!(
            ErrorSnapshot::from_json(&duplicate.to_json().unwrap()),
            Err(SnapshotError::ValidationFailed(_))
        ));

        let zero = ErrorSnapshot::new(vec![record("x", 0)]);
        assert!(matches!(
            ErrorSnapshot::from_bytes(&zero.to_bytes().unwrap()),
            Err(SnapshotError::ValidationFailed(_))
        ));

        let mut backwards = record("x", 1);
        backwards.last_seen = backwards.first_seen - Duration::seconds(5);
        let snapshot = ErrorSnapshot::new(vec![backwards]);
        assert!(matches!(
            ErrorSnapshot::from_json(&snapshot.to_json().unwrap()),
            Err(SnapshotError::ValidationFailed(_))
        ));
    }

    #[test]
    fn garbage_fails_to_decode() {
        assert!(matches!(
            ErrorSnapshot::from_json("not json"),
            Err(SnapshotError::DeserializationFailed(_))
        ));
        assert!(matches!(
            ErrorSnapshot::from_bytes(&[1, 2, 3]),
            Err(SnapshotError::DeserializationFailed(_))
        ));
    }
}
