//! Thread-safe handle over a single program instance
//!
//! Every call holds the lock for the whole transition, so transitions are
//! totally ordered: two withdrawals or refunds against one campaign never
//! observe the same custody balance, and concurrent donations never lose an
//! update to `amount_donated`.

use crowdfunding_types::campaign::Campaign;
use crowdfunding_types::contribution::Contribution;
use crowdfunding_types::ids::{CampaignAddress, Pubkey};
use crowdfunding_types::numeric::Lamports;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::error;

use crate::clock::Clock;
use crate::errors::ProgramError;
use crate::ledger::Ledger;
use crate::program::Crowdfunding;

pub struct SharedCrowdfunding<L, C> {
    inner: Arc<Mutex<Crowdfunding<L, C>>>,
}

impl<L, C> Clone for SharedCrowdfunding<L, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<L: Ledger, C: Clock> SharedCrowdfunding<L, C> {
    pub fn new(program: Crowdfunding<L, C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(program)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Crowdfunding<L, C>>, ProgramError> {
        self.inner.lock().map_err(|_| {
            error!("program lock poisoned");
            ProgramError::Unavailable {
                reason: "program lock poisoned".to_string(),
            }
        })
    }

    /// Run `f` against the program while holding the lock.
    pub fn with<R>(&self, f: impl FnOnce(&mut Crowdfunding<L, C>) -> R) -> Result<R, ProgramError> {
        let mut program = self.lock()?;
        Ok(f(&mut program))
    }

    pub fn create(
        &self,
        owner: &Pubkey,
        name: &str,
        description: &str,
        target_amount: Option<Lamports>,
        duration: Option<u64>,
    ) -> Result<CampaignAddress, ProgramError> {
        self.lock()?
            .create(owner, name, description, target_amount, duration)
    }

    pub fn donate(
        &self,
        caller: &Pubkey,
        campaign: &CampaignAddress,
        amount: Lamports,
    ) -> Result<(), ProgramError> {
        self.lock()?.donate(caller, campaign, amount)
    }

    pub fn withdraw(
        &self,
        caller: &Pubkey,
        campaign: &CampaignAddress,
        amount: Lamports,
    ) -> Result<(), ProgramError> {
        self.lock()?.withdraw(caller, campaign, amount)
    }

    pub fn refund(&self, caller: &Pubkey, campaign: &CampaignAddress) -> Result<(), ProgramError> {
        self.lock()?.refund(caller, campaign)
    }

    pub fn get_campaign(&self, campaign: &CampaignAddress) -> Result<Campaign, ProgramError> {
        self.lock()?.get_campaign(campaign).cloned()
    }

    pub fn get_contribution(
        &self,
        campaign: &CampaignAddress,
        contributor: &Pubkey,
    ) -> Result<Option<Contribution>, ProgramError> {
        Ok(self.lock()?.get_contribution(campaign, contributor).cloned())
    }

    pub fn list_campaigns(&self) -> Result<Vec<(CampaignAddress, Campaign)>, ProgramError> {
        Ok(self.lock()?.list_campaigns())
    }

    pub fn custody_balance(&self, campaign: &CampaignAddress) -> Result<Lamports, ProgramError> {
        self.lock()?.custody_balance(campaign)
    }
}
