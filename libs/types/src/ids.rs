//! Key types for signer identities and derived record addresses
//!
//! Signers and records share one 32-byte key space, mirroring the ledger the
//! program was first deployed on. Keys render as lowercase hex.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Length of a key in bytes.
pub const PUBKEY_BYTES: usize = 32;

/// A 32-byte public key.
///
/// Identifies either a signer (campaign owner, contributor) or a record
/// located by address derivation. The engine never generates signer keys
/// itself; they arrive from the transport layer already authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Pubkey([u8; PUBKEY_BYTES]);

/// Address of a campaign record.
pub type CampaignAddress = Pubkey;

/// Address of a contribution record.
pub type ContributionAddress = Pubkey;

impl Pubkey {
    /// Wrap raw key bytes.
    pub const fn new_from_array(bytes: [u8; PUBKEY_BYTES]) -> Self {
        Self(bytes)
    }

    /// A fresh key for tests and tooling.
    ///
    /// The upper half carries UUID v7 bits (time-ordered), the lower half
    /// carries random v4 bits, so two calls never collide in practice.
    pub fn new_unique() -> Self {
        let mut bytes = [0u8; PUBKEY_BYTES];
        bytes[..16].copy_from_slice(Uuid::now_v7().as_bytes());
        bytes[16..].copy_from_slice(Uuid::new_v4().as_bytes());
        Self(bytes)
    }

    pub fn to_bytes(self) -> [u8; PUBKEY_BYTES] {
        self.0
    }

    pub fn as_array(&self) -> &[u8; PUBKEY_BYTES] {
        &self.0
    }
}

impl AsRef<[u8]> for Pubkey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; PUBKEY_BYTES]> for Pubkey {
    fn from(bytes: [u8; PUBKEY_BYTES]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Errors from parsing a key out of text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsePubkeyError {
    #[error("Invalid hex in key: {0}")]
    InvalidHex(String),

    #[error("Invalid key length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

impl FromStr for Pubkey {
    type Err = ParsePubkeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|e| ParsePubkeyError::InvalidHex(e.to_string()))?;
        let array: [u8; PUBKEY_BYTES] =
            bytes
                .as_slice()
                .try_into()
                .map_err(|_| ParsePubkeyError::InvalidLength {
                    expected: PUBKEY_BYTES,
                    actual: bytes.len(),
                })?;
        Ok(Self(array))
    }
}

impl Serialize for Pubkey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Pubkey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Pubkey::from_str(&s).map_err(serde::de::Error::custom)
    }
}
