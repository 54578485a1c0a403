//! Record snapshots with integrity hashing
//!
//! A snapshot captures every record bound in the store. Ledger balances are
//! not included: the ledger is external and keeps its own state. Records
//! live in a `BTreeMap`, so the same store always encodes to the same bytes
//! and hashes identically.

use crowdfunding_types::ids::Pubkey;
use crowdfunding_types::numeric::UnixTimestamp;
use crowdfunding_types::record::Record;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use tracing::info;

use crate::clock::Clock;
use crate::config::ProgramConfig;
use crate::errors::SnapshotError;
use crate::ledger::Ledger;
use crate::program::Crowdfunding;
use crate::store::RecordStore;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Format version for forward compatibility.
    pub version: u32,
    /// Program clock reading when the snapshot was taken.
    pub taken_at: UnixTimestamp,
    pub records: BTreeMap<Pubkey, Record>,
    /// SHA-256 (hex) of the serialized records.
    pub integrity_hash: String,
}

impl Snapshot {
    /// Capture `records` and compute their integrity hash.
    pub fn capture(
        records: BTreeMap<Pubkey, Record>,
        taken_at: UnixTimestamp,
    ) -> Result<Self, SnapshotError> {
        let integrity_hash = compute_hash(&records)?;
        Ok(Self {
            version: SNAPSHOT_VERSION,
            taken_at,
            records,
            integrity_hash,
        })
    }

    /// Check the format version and recompute the integrity hash.
    pub fn verify(&self) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(self.version));
        }
        let actual = compute_hash(&self.records)?;
        if actual != self.integrity_hash {
            return Err(SnapshotError::IntegrityFailure {
                expected: self.integrity_hash.clone(),
                actual,
            });
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode and verify in one step. A snapshot that fails verification is
    /// never handed back.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        snapshot.verify()?;
        Ok(snapshot)
    }
}

fn compute_hash(records: &BTreeMap<Pubkey, Record>) -> Result<String, SnapshotError> {
    let bytes = serde_json::to_vec(records)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

impl<L: Ledger, C: Clock> Crowdfunding<L, C> {
    /// Capture every record currently bound.
    pub fn snapshot(&self) -> Result<Snapshot, SnapshotError> {
        Snapshot::capture(self.store.records().clone(), self.now())
    }

    /// Rebuild a program from a verified snapshot. The event log starts empty.
    pub fn restore(
        snapshot: Snapshot,
        ledger: L,
        clock: C,
        config: ProgramConfig,
    ) -> Result<Self, SnapshotError> {
        snapshot.verify()?;
        info!(
            records = snapshot.records.len(),
            taken_at = snapshot.taken_at,
            "restoring from snapshot"
        );
        Ok(Self::with_store(
            RecordStore::from_records(snapshot.records),
            ledger,
            clock,
            config,
        ))
    }
}
