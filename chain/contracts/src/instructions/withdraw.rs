use crowdfunding_types::ids::{CampaignAddress, Pubkey};
use crowdfunding_types::numeric::Lamports;
use tracing::{info, warn};

use crate::clock::Clock;
use crate::errors::ProgramError;
use crate::events::{FundsWithdrawn, ProgramEvent};
use crate::ledger::{Ledger, Transfer};
use crate::program::Crowdfunding;

impl<L: Ledger, C: Clock> Crowdfunding<L, C> {
    /// Release `amount` from custody to the campaign owner.
    ///
    /// Gates, in order: caller must be the owner, `amount_donated` must meet
    /// a defined target, and custody must cover `amount`. A withdrawal that
    /// drops `amount_donated` below the target closes the gate again.
    /// Contribution records are neither read nor touched.
    pub fn withdraw(
        &mut self,
        caller: &Pubkey,
        campaign: &CampaignAddress,
        amount: Lamports,
    ) -> Result<(), ProgramError> {
        self.process_withdraw(caller, campaign, amount)
            .map_err(|err| {
                warn!(%caller, %campaign, amount, error = %err, "withdrawal rejected");
                err
            })
    }

    fn process_withdraw(
        &mut self,
        caller: &Pubkey,
        address: &CampaignAddress,
        amount: Lamports,
    ) -> Result<(), ProgramError> {
        if amount == 0 {
            return Err(ProgramError::InvalidAmount);
        }

        let campaign = self.get_campaign(address)?;
        if campaign.owner != *caller {
            return Err(ProgramError::InvalidAdmin);
        }
        if let Some(target) = campaign.target_amount {
            if campaign.target_pending() {
                return Err(ProgramError::TargetNotReached {
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

        self.transfer(caller, &[Transfer::new(*address, *caller, amount)])?;

        if let Some(campaign) = self.store.campaign_mut(address) {
            campaign.amount_donated = amount_donated;
        }

        info!(
            owner = %caller,
            campaign = %address,
            amount,
            amount_donated,
            "funds withdrawn"
        );

        let timestamp = self.now();
        self.emit(ProgramEvent::FundsWithdrawn(FundsWithdrawn {
            campaign: *address,
            owner: *caller,
            amount,
            amount_donated,
            timestamp,
        }));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::clock::ManualClock;
    use crate::config::ProgramConfig;
    use crate::errors::ProgramError;
    use crate::ledger::{InMemoryLedger, Ledger};
    use crate::program::Crowdfunding;
    use crowdfunding_types::ids::{CampaignAddress, Pubkey};

    const NOW: i64 = 1_700_000_000;

    struct Fixture {
        program: Crowdfunding<InMemoryLedger, ManualClock>,
        owner: Pubkey,
        donor: Pubkey,
        campaign: CampaignAddress,
    }

    fn setup_campaign(target: Option<u64>) -> Fixture {
        let mut program = Crowdfunding::new(
            InMemoryLedger::new(),
            ManualClock::new(NOW),
            ProgramConfig::default(),
        );
        let owner = Pubkey::new_unique();
        let donor = Pubkey::new_unique();
        program.ledger_mut().airdrop(donor, 10_000).unwrap();
        let campaign = program.create(&owner, "fund", "", target, Some(60)).unwrap();
        Fixture {
            program,
            owner,
            donor,
            campaign,
        }
    }

    #[test]
    fn test_withdraw_after_target() {
        let Fixture {
            mut program,
            owner,
            donor,
            campaign,
        } = setup_campaign(Some(1_000));
        program.donate(&donor, &campaign, 1_200).unwrap();

        program.withdraw(&owner, &campaign, 700).unwrap();

        assert_eq!(program.ledger().balance(&owner), 700);
        assert_eq!(program.get_campaign(&campaign).unwrap().amount_donated, 500);
        assert_eq!(program.custody_balance(&campaign), Ok(500));
    }

    #[test]
    fn test_withdraw_by_non_owner() {
        let Fixture {
            mut program,
            donor,
            campaign,
            ..
        } = setup_campaign(Some(1_000));
        program.donate(&donor, &campaign, 1_000).unwrap();

        let result = program.withdraw(&donor, &campaign, 100);
        assert_eq!(result, Err(ProgramError::InvalidAdmin));
    }

    #[test]
    fn test_withdraw_before_target() {
        let Fixture {
            mut program,
            owner,
            donor,
            campaign,
        } = setup_campaign(Some(1_000));
        program.donate(&donor, &campaign, 999).unwrap();

        let result = program.withdraw(&owner, &campaign, 1);
        assert_eq!(
            result,
            Err(ProgramError::TargetNotReached {
                raised: 999,
                target: 1_000
            })
        );
    }

    #[test]
    fn test_withdraw_more_than_custody() {
        let Fixture {
            mut program,
            owner,
            donor,
            campaign,
        } = setup_campaign(None);
        program.donate(&donor, &campaign, 300).unwrap();

        let result = program.withdraw(&owner, &campaign, 301);
        assert_eq!(
            result,
            Err(ProgramError::InsufficientCustody {
                requested: 301,
                available: 300
            })
        );
        assert_eq!(program.get_campaign(&campaign).unwrap().amount_donated, 300);
    }

    #[test]
    fn test_partial_withdraw_below_target_closes_gate() {
        let Fixture {
            mut program,
            owner,
            donor,
            campaign,
        } = setup_campaign(Some(1_000));
        program.donate(&donor, &campaign, 1_000).unwrap();

        program.withdraw(&owner, &campaign, 600).unwrap();
        let result = program.withdraw(&owner, &campaign, 100);
        assert_eq!(
            result,
            Err(ProgramError::TargetNotReached {
                raised: 400,
                target: 1_000
            })
        );
        assert_eq!(program.custody_balance(&campaign), Ok(400));
        assert_eq!(program.ledger().balance(&owner), 600);
    }

    #[test]
    fn test_full_withdraw_at_target() {
        let Fixture {
            mut program,
            owner,
            donor,
            campaign,
        } = setup_campaign(Some(1_000));
        program.donate(&donor, &campaign, 1_000).unwrap();

        program.withdraw(&owner, &campaign, 1_000).unwrap();
        assert_eq!(program.custody_balance(&campaign), Ok(0));
        assert_eq!(program.get_campaign(&campaign).unwrap().amount_donated, 0);
    }

    #[test]
    fn test_repeated_withdrawals_without_target() {
        let Fixture {
            mut program,
            owner,
            donor,
            campaign,
        } = setup_campaign(None);
        program.donate(&donor, &campaign, 1_000).unwrap();

        program.withdraw(&owner, &campaign, 600).unwrap();
        program.withdraw(&owner, &campaign, 400).unwrap();
        assert_eq!(program.custody_balance(&campaign), Ok(0));
    }

    #[test]
    fn test_stray_lamports_are_not_withdrawable() {
        let Fixture {
            mut program,
            owner,
            donor,
            campaign,
        } = setup_campaign(None);
        program.donate(&donor, &campaign, 100).unwrap();
        program.ledger_mut().airdrop(campaign, 50).unwrap();

        let result = program.withdraw(&owner, &campaign, 150);
        assert_eq!(
            result,
            Err(ProgramError::InsufficientCustody {
                requested: 150,
                available: 100
            })
        );
    }

    #[test]
    fn test_withdraw_zero_and_unknown() {
        let Fixture {
            mut program, owner, ..
        } = setup_campaign(None);
        let missing = Pubkey::new_unique();
        assert_eq!(
            program.withdraw(&owner, &missing, 0),
            Err(ProgramError::InvalidAmount)
        );
        assert_eq!(
            program.withdraw(&owner, &missing, 1),
            Err(ProgramError::NotFound { address: missing })
        );
    }
}
