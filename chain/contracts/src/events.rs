//! Program events
//!
//! Immutable records emitted by every successful instruction, in the order
//! the instructions were applied.

use crowdfunding_types::ids::Pubkey;
use crowdfunding_types::numeric::{Lamports, UnixTimestamp};
use serde::{Deserialize, Serialize};

/// Campaign record initialized
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignCreated {
    pub campaign: Pubkey,
    pub owner: Pubkey,
    pub name: String,
    pub target_amount: Option<Lamports>,
    pub deadline: Option<UnixTimestamp>,
    pub created_at: UnixTimestamp,
}

/// Funds moved from a contributor into campaign custody
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationReceived {
    pub campaign: Pubkey,
    pub contributor: Pubkey,
    pub amount: Lamports,
    /// Campaign `amount_donated` after this donation
    pub amount_donated: Lamports,
    /// Contributor's outstanding claim after this donation
    pub contribution_total: Lamports,
    /// First donation from this contributor opened a contribution record
    pub opened_contribution: bool,
    pub timestamp: UnixTimestamp,
}

/// Owner released funds out of custody
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundsWithdrawn {
    pub campaign: Pubkey,
    pub owner: Pubkey,
    pub amount: Lamports,
    /// Campaign `amount_donated` after the withdrawal
    pub amount_donated: Lamports,
    pub timestamp: UnixTimestamp,
}

/// Contributor claim paid back and its record closed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundIssued {
    pub campaign: Pubkey,
    pub contributor: Pubkey,
    pub amount: Lamports,
    /// Storage deposit returned with the closed record
    pub reclaimed_deposit: Lamports,
    pub amount_donated: Lamports,
    pub timestamp: UnixTimestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgramEvent {
    CampaignCreated(CampaignCreated),
    DonationReceived(DonationReceived),
    FundsWithdrawn(FundsWithdrawn),
    RefundIssued(RefundIssued),
}

impl ProgramEvent {
    /// Campaign the event belongs to.
    pub fn campaign(&self) -> &Pubkey {
        match self {
            ProgramEvent::CampaignCreated(e) => &e.campaign,
            ProgramEvent::DonationReceived(e) => &e.campaign,
            ProgramEvent::FundsWithdrawn(e) => &e.campaign,
            ProgramEvent::RefundIssued(e) => &e.campaign,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_donation_received_serialization() {
        let event = DonationReceived {
            campaign: Pubkey::new_unique(),
            contributor: Pubkey::new_unique(),
            amount: 1_000_000_000,
            amount_donated: 1_000_000_000,
            contribution_total: 1_000_000_000,
            opened_contribution: true,
            timestamp: 1_708_123_456,
        };
        let json = serde_json::to_string(&event).unwrap();
        let deser: DonationReceived = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deser);
    }

    #[test]
    fn test_event_campaign_accessor() {
        let campaign = Pubkey::new_unique();
        let event = ProgramEvent::FundsWithdrawn(FundsWithdrawn {
            campaign,
            owner: Pubkey::new_unique(),
            amount: 5,
            amount_donated: 0,
            timestamp: 0,
        });
        assert_eq!(event.campaign(), &campaign);
    }
}
