//! Campaign record
//!
//! One record per (owner, name) pair. Configuration is immutable after
//! creation; only the running totals move.

use crate::ids::Pubkey;
use crate::numeric::{Lamports, UnixTimestamp};
use serde::{Deserialize, Serialize};

/// Default upper bound on a campaign name, in bytes.
pub const MAX_NAME_LEN: usize = 64;

/// Default upper bound on a campaign description, in bytes.
pub const MAX_DESCRIPTION_LEN: usize = 256;

/// Escrow unit holding contributor funds until the target/deadline gates
/// decide who may take them.
///
/// Invariant: `amount_donated` equals the campaign's custody balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    pub owner: Pubkey,
    pub name: String,
    pub description: String,
    /// Funding target; `None` means withdrawals are never target-gated.
    pub target_amount: Option<Lamports>,
    /// Absolute deadline; `None` means the campaign never closes.
    pub deadline: Option<UnixTimestamp>,
    /// Funds currently held in custody and not yet paid out.
    pub amount_donated: Lamports,
    /// Lamports parked in the record's account for storage. Never custody.
    pub storage_deposit: Lamports,
    pub created_at: UnixTimestamp,
}

impl Campaign {
    /// A freshly created campaign with nothing raised.
    pub fn new(
        owner: Pubkey,
        name: impl Into<String>,
        description: impl Into<String>,
        target_amount: Option<Lamports>,
        deadline: Option<UnixTimestamp>,
        created_at: UnixTimestamp,
    ) -> Self {
        Self {
            owner,
            name: name.into(),
            description: description.into(),
            target_amount,
            deadline,
            amount_donated: 0,
            storage_deposit: 0,
            created_at,
        }
    }

    pub fn with_storage_deposit(mut self, storage_deposit: Lamports) -> Self {
        self.storage_deposit = storage_deposit;
        self
    }

    /// True when a target is defined and the custody held meets it.
    /// Withdrawals lower `amount_donated`, so this can flip back to false.
    pub fn target_reached(&self) -> bool {
        self.target_amount
            .map_or(false, |target| self.amount_donated >= target)
    }

    /// True when a target is defined and the custody held is below it.
    pub fn target_pending(&self) -> bool {
        self.target_amount
            .map_or(false, |target| self.amount_donated < target)
    }

    /// Donations are accepted strictly before the deadline.
    pub fn is_accepting_donations(&self, now: UnixTimestamp) -> bool {
        self.deadline.map_or(true, |deadline| now < deadline)
    }

    /// Refunds open at the deadline, or immediately when there is none.
    pub fn has_ended(&self, now: UnixTimestamp) -> bool {
        self.deadline.map_or(true, |deadline| now >= deadline)
    }
}
