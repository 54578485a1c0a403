//! Ledger: the external balance system the program moves funds through
//!
//! The program never holds money itself. It asks the ledger to apply a batch
//! of transfers; the ledger either applies all of them or none. Callers'
//! external balances, campaign custody and record storage deposits all live
//! here, keyed by [`Pubkey`].

use crowdfunding_types::ids::Pubkey;
use crowdfunding_types::numeric::Lamports;
use std::collections::HashMap;

use crate::errors::LedgerError;

/// A single movement of lamports between two keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    pub from: Pubkey,
    pub to: Pubkey,
    pub lamports: Lamports,
}

impl Transfer {
    pub fn new(from: Pubkey, to: Pubkey, lamports: Lamports) -> Self {
        Self { from, to, lamports }
    }
}

/// Balance system consumed by the program.
///
/// `apply` must be atomic across the whole batch: if any transfer would
/// overdraw its source or overflow its destination, no balance changes.
pub trait Ledger {
    fn balance(&self, key: &Pubkey) -> Lamports;

    fn apply(&mut self, transfers: &[Transfer]) -> Result<(), LedgerError>;
}

/// In-process ledger backed by a map of balances.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    balances: HashMap<Pubkey, Lamports>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint lamports into `key`. Funding helper for tests and tooling.
    pub fn airdrop(&mut self, key: Pubkey, lamports: Lamports) -> Result<(), LedgerError> {
        let current = self.balances.entry(key).or_insert(0);
        *current = current
            .checked_add(lamports)
            .ok_or(LedgerError::Overflow { account: key })?;
        Ok(())
    }

    /// Sum of every balance. Transfers never change it.
    pub fn total_supply(&self) -> u128 {
        self.balances.values().map(|b| *b as u128).sum()
    }

    /// Compute post-batch balances for every touched key without mutating.
    fn simulate(&self, transfers: &[Transfer]) -> Result<HashMap<Pubkey, Lamports>, LedgerError> {
        let mut staged: HashMap<Pubkey, Lamports> = HashMap::new();

        for transfer in transfers {
            let from_balance = *staged
                .entry(transfer.from)
                .or_insert_with(|| self.balance(&transfer.from));
            if from_balance < transfer.lamports {
                return Err(LedgerError::InsufficientFunds {
                    account: transfer.from,
                    required: transfer.lamports,
                    available: from_balance,
                });
            }
            staged.insert(transfer.from, from_balance - transfer.lamports);

            let to_balance = *staged
                .entry(transfer.to)
                .or_insert_with(|| self.balance(&transfer.to));
            let credited = to_balance
                .checked_add(transfer.lamports)
                .ok_or(LedgerError::Overflow {
                    account: transfer.to,
                })?;
            staged.insert(transfer.to, credited);
        }

        Ok(staged)
    }
}

impl Ledger for InMemoryLedger {
    fn balance(&self, key: &Pubkey) -> Lamports {
        self.balances.get(key).copied().unwrap_or(0)
    }

    fn apply(&mut self, transfers: &[Transfer]) -> Result<(), LedgerError> {
        let staged = self.simulate(transfers)?;
        for (key, balance) in staged {
            if balance == 0 {
                self.balances.remove(&key);
            } else {
                self.balances.insert(key, balance);
            }
        }
        Ok(())
    }
}
