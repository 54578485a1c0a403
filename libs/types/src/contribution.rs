//! Contribution record
//!
//! One record per (campaign, contributor) pair. The record exists exactly as
//! long as the contributor holds a refundable claim; refunding destroys it.

use crate::ids::Pubkey;
use crate::numeric::{Lamports, UnixTimestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    pub contributor: Pubkey,
    /// Address of the owning campaign record
    pub campaign: Pubkey,
    /// Outstanding claim
    pub amount: Lamports,
    pub first_donated_at: UnixTimestamp,
    pub last_donated_at: UnixTimestamp,
}

impl Contribution {
    pub fn new(
        contributor: Pubkey,
        campaign: Pubkey,
        amount: Lamports,
        timestamp: UnixTimestamp,
    ) -> Self {
        Self {
            contributor,
            campaign,
            amount,
            first_donated_at: timestamp,
            last_donated_at: timestamp,
        }
    }

    /// Add a repeat donation to the claim. Returns `None` on overflow and
    /// leaves the record untouched.
    pub fn checked_add(&self, amount: Lamports, timestamp: UnixTimestamp) -> Option<Self> {
        let total = self.amount.checked_add(amount)?;
        Some(Self {
            amount: total,
            last_donated_at: timestamp,
            ..self.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_add_accumulates() {
        let c = Contribution::new(Pubkey::new_unique(), Pubkey::new_unique(), 10, 100);
        let c2 = c.checked_add(5, 200).unwrap();
        assert_eq!(c2.amount, 15);
        assert_eq!(c2.first_donated_at, 100);
        assert_eq!(c2.last_donated_at, 200);
    }

    #[test]
    fn test_checked_add_overflow() {
        let c = Contribution::new(Pubkey::new_unique(), Pubkey::new_unique(), u64::MAX, 100);
        assert!(c.checked_add(1, 200).is_none());
    }
}
