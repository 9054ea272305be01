//! Message fingerprints and the seen-set used for intake deduplication.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fmt;

/// Derived identifier for an inbound message, used as the dedup key.
///
/// Computed as the sha256 digest of the transport message id and the message
/// timestamp. Hashing keeps the fingerprint fixed-width and avoids collisions
/// from naive string concatenation when transports reuse identifier formats.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Computes the fingerprint for a message id and timestamp pair.
    #[must_use]
    pub fn compute(message_id: &str, received_at: DateTime<Utc>) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(message_id.as_bytes());
        hasher.update(b"\n");
        hasher.update(received_at.to_rfc3339().as_bytes());
        Self(format!("{:x}", hasher.finalize()))
    }

    /// Reconstructs a fingerprint from its persisted hex form.
    #[must_use]
    pub fn from_value(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the hex-encoded digest.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Durable set of fingerprints of already-processed inbound messages.
///
/// Append-only during a polling cycle; persisted atomically at the end of
/// the cycle. A fingerprint once recorded is never reprocessed into a new
/// task record, even across process restarts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeenSet(BTreeSet<Fingerprint>);

impl SeenSet {
    /// Creates an empty seen-set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Returns `true` when the fingerprint has already been recorded.
    #[must_use]
    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.0.contains(fingerprint)
    }

    /// Records a fingerprint, returning `false` when it was already present.
    pub fn record(&mut self, fingerprint: Fingerprint) -> bool {
        self.0.insert(fingerprint)
    }

    /// Returns the number of recorded fingerprints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no fingerprints have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
