use crowdfunding_types::campaign::Campaign;
use crowdfunding_types::ids::{CampaignAddress, Pubkey};
use crowdfunding_types::numeric::Lamports;
use tracing::{info, warn};

use crate::address::campaign_address;
use crate::clock::Clock;
use crate::errors::ProgramError;
use crate::events::{CampaignCreated, ProgramEvent};
use crate::ledger::{Ledger, Transfer};
use crate::program::Crowdfunding;

impl<L: Ledger, C: Clock> Crowdfunding<L, C> {
    /// Open a campaign owned by `owner`, located at
    /// `campaign_address(owner, name)`.
    ///
    /// `duration` is converted to an absolute deadline against the program
    /// clock. Creating a second campaign under the same (owner, name) fails
    /// with `AlreadyExists` whatever the other arguments are.
    pub fn create(
        &mut self,
        owner: &Pubkey,
        name: &str,
        description: &str,
        target_amount: Option<Lamports>,
        duration: Option<u64>,
    ) -> Result<CampaignAddress, ProgramError> {
        self.process_create(owner, name, description, target_amount, duration)
            .map_err(|err| {
                warn!(%owner, name, error = %err, "create rejected");
                err
            })
    }

    fn process_create(
        &mut self,
        owner: &Pubkey,
        name: &str,
        description: &str,
        target_amount: Option<Lamports>,
        duration: Option<u64>,
    ) -> Result<CampaignAddress, ProgramError> {
        // Check inputs
        if name.is_empty() {
            return Err(ProgramError::EmptyName);
        }
        if name.len() > self.config.max_name_len {
            return Err(ProgramError::NameTooLong {
                len: name.len(),
                max: self.config.max_name_len,
            });
        }
        if description.len() > self.config.max_description_len {
            return Err(ProgramError::DescriptionTooLong {
                len: description.len(),
                max: self.config.max_description_len,
            });
        }
        if target_amount == Some(0) {
            return Err(ProgramError::InvalidTarget);
        }
        if self.store.contains(owner) {
            return Err(ProgramError::RecordAddressCaller { caller: *owner });
        }

        let now = self.now();
        let deadline = match duration {
            None => None,
            Some(secs) if secs == 0 || secs > self.config.max_duration_secs => {
                return Err(ProgramError::InvalidDuration {
                    max_secs: self.config.max_duration_secs,
                });
            }
            Some(secs) => Some(
                i64::try_from(secs)
                    .ok()
                    .and_then(|secs| now.checked_add(secs))
                    .ok_or(ProgramError::Overflow)?,
            ),
        };

        // Derivation collision is the uniqueness gate
        let address = campaign_address(owner, name);
        if self.store.contains(&address) {
            return Err(ProgramError::AlreadyExists { address });
        }

        // Lamports already sitting at the address count as storage, never custody.
        let deposit = self.config.campaign_deposit;
        let storage_deposit = self
            .ledger
            .balance(&address)
            .checked_add(deposit)
            .ok_or(ProgramError::Overflow)?;

        if deposit > 0 {
            self.transfer(owner, &[Transfer::new(*owner, address, deposit)])?;
        }

        let campaign = Campaign::new(*owner, name, description, target_amount, deadline, now)
            .with_storage_deposit(storage_deposit);
        self.store.init(address, campaign)?;

        info!(
            campaign = %address,
            %owner,
            name,
            ?target_amount,
            ?deadline,
            "campaign created"
        );

        self.emit(ProgramEvent::CampaignCreated(CampaignCreated {
            campaign: address,
            owner: *owner,
            name: name.to_string(),
            target_amount,
            deadline,
            created_at: now,
        }));

        Ok(address)
    }
}
