use crowdfunding_types::contribution::Contribution;
use crowdfunding_types::ids::{CampaignAddress, Pubkey};
use crowdfunding_types::numeric::Lamports;
use tracing::{info, warn};

use crate::address::contribution_address;
use crate::clock::Clock;
use crate::errors::ProgramError;
use crate::events::{DonationReceived, ProgramEvent};
use crate::ledger::{Ledger, Transfer};
use crate::program::Crowdfunding;

impl<L: Ledger, C: Clock> Crowdfunding<L, C> {
    /// Move `amount` from `caller` into the campaign's custody and credit
    /// the caller's contribution record, opening it on first donation.
    ///
    /// The owner may donate to their own campaign. Addresses that hold a
    /// program record cannot act as donors.
    pub fn donate(
        &mut self,
        caller: &Pubkey,
        campaign: &CampaignAddress,
        amount: Lamports,
    ) -> Result<(), ProgramError> {
        self.process_donate(caller, campaign, amount).map_err(|err| {
            warn!(%caller, %campaign, amount, error = %err, "donation rejected");
            err
        })
    }

    fn process_donate(
        &mut self,
        caller: &Pubkey,
        address: &CampaignAddress,
        amount: Lamports,
    ) -> Result<(), ProgramError> {
        if amount == 0 {
            return Err(ProgramError::InvalidAmount);
        }
        if self.store.contains(caller) {
            return Err(ProgramError::RecordAddressCaller { caller: *caller });
        }

        let now = self.now();
        let campaign = self.get_campaign(address)?;
        if let Some(deadline) = campaign.deadline {
            if !campaign.is_accepting_donations(now) {
                return Err(ProgramError::CampaignEnded { deadline });
            }
        }

        let amount_donated = campaign
            .amount_donated
            .checked_add(amount)
            .ok_or(ProgramError::Overflow)?;

        let record_address = contribution_address(address, caller);
        let existing = self.store.contribution(&record_address);
        let opened = existing.is_none();
        let contribution = match existing {
            Some(existing) => existing
                .checked_add(amount, now)
                .ok_or(ProgramError::Overflow)?,
            None => Contribution::new(*caller, *address, amount, now),
        };

        let mut transfers = vec![Transfer::new(*caller, *address, amount)];
        let deposit = self.config.contribution_deposit;
        if opened && deposit > 0 {
            transfers.push(Transfer::new(*caller, record_address, deposit));
        }
        self.transfer(caller, &transfers)?;

        if let Some(campaign) = self.store.campaign_mut(address) {
            campaign.amount_donated = amount_donated;
        }
        let contribution_total = contribution.amount;
        self.store.upsert_contribution(record_address, contribution);

        info!(
            %caller,
            campaign = %address,
            amount,
            amount_donated,
            opened_contribution = opened,
            "donation received"
        );

        self.emit(ProgramEvent::DonationReceived(DonationReceived {
            campaign: *address,
            contributor: *caller,
            amount,
            amount_donated,
            contribution_total,
            opened_contribution: opened,
            timestamp: now,
        }));

        Ok(())
    }
}
