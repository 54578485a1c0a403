use crowdfunding_types::ids::{CampaignAddress, Pubkey};
use tracing::{info, warn};

use crate::address::contribution_address;
use crate::clock::Clock;
use crate::errors::ProgramError;
use crate::events::{ProgramEvent, RefundIssued};
use crate::ledger::{Ledger, Transfer};
use crate::program::Crowdfunding;

impl<L: Ledger, C: Clock> Crowdfunding<L, C> {
    /// Pay `caller`'s whole contribution back out of custody and close the
    /// contribution record, returning its storage deposit.
    ///
    /// Once closed, a repeated refund fails with `NoContribution`.
    pub fn refund(&mut self, caller: &Pubkey, campaign: &CampaignAddress) -> Result<(), ProgramError> {
        self.process_refund(caller, campaign).map_err(|err| {
            warn!(%caller, %campaign, error = %err, "refund rejected");
            err
        })
    }

    fn process_refund(
        &mut self,
        caller: &Pubkey,
        address: &CampaignAddress,
    ) -> Result<(), ProgramError> {
        let now = self.now();
        let campaign = self.get_campaign(address)?;

        let record_address = contribution_address(address, caller);
        let amount = match self.store.contribution(&record_address) {
            Some(contribution) => contribution.amount,
            None => {
                return Err(ProgramError::NoContribution {
                    campaign: *address,
                    contributor: *caller,
                })
            }
        };

        if let Some(deadline) = campaign.deadline {
            if !campaign.has_ended(now) {
                return Err(ProgramError::CampaignStillActive { deadline });
            }
        }
        if let Some(target) = campaign.target_amount {
            if campaign.target_reached() {
                return Err(ProgramError::TargetWasReached {
                    raised: campaign.amount_donated,
                    target,
                });
            }
        }

        let available = self.releasable(address, campaign);
        if amount > available {
            return Err(ProgramError::InsufficientCustody {
                requested: amount,
                available,
            });
        }
        let amount_donated = campaign.amount_donated - amount;

        let reclaimed_deposit = self.ledger.balance(&record_address);
        let mut transfers = vec![Transfer::new(*address, *caller, amount)];
        if reclaimed_deposit > 0 {
            transfers.push(Transfer::new(record_address, *caller, reclaimed_deposit));
        }
        self.transfer(caller, &transfers)?;

        if let Some(campaign) = self.store.campaign_mut(address) {
            campaign.amount_donated = amount_donated;
        }
        self.store.close(&record_address);

        info!(
            %caller,
            campaign = %address,
            amount,
            reclaimed_deposit,
            amount_donated,
            "refund issued"
        );

        self.emit(ProgramEvent::RefundIssued(RefundIssued {
            campaign: *address,
            contributor: *caller,
            amount,
            reclaimed_deposit,
            amount_donated,
            timestamp: now,
        }));

        Ok(())
    }
}
