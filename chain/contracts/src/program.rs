//! Crowdfunding program: record store, ledger and clock behind one owner
//!
//! The four instructions live in [`crate::instructions`], one file each.
//! Every instruction follows the same shape:
//! 1. validate every gate against current state (no mutation),
//! 2. apply a single all-or-nothing ledger batch,
//! 3. write records (infallible at this point),
//! 4. emit an event.
//!
//! A failure in steps 1 or 2 leaves the program exactly as it was.

use crowdfunding_types::campaign::Campaign;
use crowdfunding_types::contribution::Contribution;
use crowdfunding_types::ids::{CampaignAddress, Pubkey};
use crowdfunding_types::numeric::{Lamports, UnixTimestamp};

use crate::address::contribution_address;
use crate::clock::Clock;
use crate::config::ProgramConfig;
use crate::errors::{LedgerError, ProgramError};
use crate::events::ProgramEvent;
use crate::ledger::{Ledger, Transfer};
use crate::store::RecordStore;

/// Escrow program state.
#[derive(Debug)]
pub struct Crowdfunding<L, C> {
    pub(crate) store: RecordStore,
    pub(crate) ledger: L,
    pub(crate) clock: C,
    pub(crate) config: ProgramConfig,
    /// Emitted events log (append-only)
    pub(crate) events: Vec<ProgramEvent>,
}

impl<L: Ledger, C: Clock> Crowdfunding<L, C> {
    pub fn new(ledger: L, clock: C, config: ProgramConfig) -> Self {
        Self::with_store(RecordStore::new(), ledger, clock, config)
    }

    pub(crate) fn with_store(
        store: RecordStore,
        ledger: L,
        clock: C,
        config: ProgramConfig,
    ) -> Self {
        Self {
            store,
            ledger,
            clock,
            config,
            events: Vec::new(),
        }
    }

    // ───────────────────────── Reads ─────────────────────────

    /// Fetch the campaign at `address`.
    pub fn get_campaign(&self, address: &CampaignAddress) -> Result<&Campaign, ProgramError> {
        self.store
            .campaign(address)
            .ok_or(ProgramError::NotFound { address: *address })
    }

    /// Fetch `contributor`'s outstanding claim against `campaign`, if any.
    pub fn get_contribution(
        &self,
        campaign: &CampaignAddress,
        contributor: &Pubkey,
    ) -> Option<&Contribution> {
        self.store
            .contribution(&contribution_address(campaign, contributor))
    }

    /// Every campaign with its address. Order is unspecified.
    pub fn list_campaigns(&self) -> Vec<(CampaignAddress, Campaign)> {
        self.store
            .campaigns()
            .map(|(address, campaign)| (*address, campaign.clone()))
            .collect()
    }

    /// Funds physically held for the campaign, excluding its storage deposit.
    pub fn custody_balance(&self, address: &CampaignAddress) -> Result<Lamports, ProgramError> {
        let campaign = self.get_campaign(address)?;
        Ok(self.custody_of(address, campaign))
    }

    pub fn config(&self) -> &ProgramConfig {
        &self.config
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Mutable access to the external ledger, for funding callers.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    // ───────────────────────── Events ─────────────────────────

    pub fn events(&self) -> &[ProgramEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<ProgramEvent> {
        std::mem::take(&mut self.events)
    }

    // ───────────────────────── Internal ─────────────────────────

    pub(crate) fn now(&self) -> UnixTimestamp {
        self.clock.unix_timestamp()
    }

    pub(crate) fn emit(&mut self, event: ProgramEvent) {
        self.events.push(event);
    }

    pub(crate) fn custody_of(&self, address: &CampaignAddress, campaign: &Campaign) -> Lamports {
        self.ledger
            .balance(address)
            .saturating_sub(campaign.storage_deposit)
    }

    /// Amount the program may pay out of custody: the smaller of what the
    /// ledger holds and what the record accounts for.
    pub(crate) fn releasable(&self, address: &CampaignAddress, campaign: &Campaign) -> Lamports {
        self.custody_of(address, campaign)
            .min(campaign.amount_donated)
    }

    /// Apply a ledger batch on behalf of `caller`, translating ledger
    /// failures into program errors.
    pub(crate) fn transfer(
        &mut self,
        caller: &Pubkey,
        transfers: &[Transfer],
    ) -> Result<(), ProgramError> {
        let err = match self.ledger.apply(transfers) {
            Ok(()) => return Ok(()),
            Err(err) => err,
        };

        Err(match err {
            LedgerError::InsufficientFunds { account, .. } if account == *caller => {
                // Report the caller's whole share of the batch, not the leg that tripped.
                ProgramError::InsufficientFunds {
                    required: transfers
                        .iter()
                        .filter(|t| t.from == *caller)
                        .fold(0, |sum: Lamports, t| sum.saturating_add(t.lamports)),
                    available: self.ledger.balance(caller),
                }
            }
            LedgerError::InsufficientFunds {
                required,
                available,
                ..
            } => ProgramError::InsufficientCustody {
                requested: required,
                available,
            },
            LedgerError::Overflow { .. } => ProgramError::Overflow,
        })
    }
}
