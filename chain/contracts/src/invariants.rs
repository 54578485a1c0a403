//! Whole-state consistency checks
//!
//! Every completed transition must leave these holding. Tests call
//! [`check_invariants`] after each step; operators can run it against a
//! restored snapshot before serving traffic.

use crowdfunding_types::ids::Pubkey;
use crowdfunding_types::numeric::Lamports;
use thiserror::Error;

use crate::address::contribution_address;
use crate::clock::Clock;
use crate::ledger::Ledger;
use crate::program::Crowdfunding;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("Campaign {campaign}: custody {custody} != amount_donated {amount_donated}")]
    CustodyMismatch {
        campaign: Pubkey,
        custody: Lamports,
        amount_donated: Lamports,
    },

    #[error("Contribution {address} references missing campaign {campaign}")]
    OrphanContribution { address: Pubkey, campaign: Pubkey },

    #[error("Contribution stored at {actual}, derivation gives {expected}")]
    MisplacedContribution { expected: Pubkey, actual: Pubkey },

    #[error("Contribution {address} has a zero claim")]
    EmptyContribution { address: Pubkey },
}

/// Check every campaign and contribution record against the ledger.
///
/// Returns the first violation found, in address order.
pub fn check_invariants<L: Ledger, C: Clock>(
    program: &Crowdfunding<L, C>,
) -> Result<(), InvariantViolation> {
    for (address, campaign) in program.store().campaigns() {
        let custody = program.ledger().balance(address).saturating_sub(campaign.storage_deposit);
        if custody != campaign.amount_donated {
            return Err(InvariantViolation::CustodyMismatch {
                campaign: *address,
                custody,
                amount_donated: campaign.amount_donated,
            });
        }
    }

    for (address, contribution) in program.store().contributions() {
        if program.store().campaign(&contribution.campaign).is_none() {
            return Err(InvariantViolation::OrphanContribution {
                address: *address,
                campaign: contribution.campaign,
            });
        }
        let expected = contribution_address(&contribution.campaign, &contribution.contributor);
        if expected != *address {
            return Err(InvariantViolation::MisplacedContribution {
                expected,
                actual: *address,
            });
        }
        if contribution.amount == 0 {
            return Err(InvariantViolation::EmptyContribution { address: *address });
        }
    }

    Ok(())
}
