//! Record store: records bound to derived addresses
//!
//! A `BTreeMap` keeps iteration order deterministic, which snapshots rely on.

use crowdfunding_types::campaign::Campaign;
use crowdfunding_types::contribution::Contribution;
use crowdfunding_types::ids::Pubkey;
use crowdfunding_types::record::Record;
use std::collections::BTreeMap;

use crate::errors::ProgramError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    records: BTreeMap<Pubkey, Record>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_records(records: BTreeMap<Pubkey, Record>) -> Self {
        Self { records }
    }

    pub fn contains(&self, address: &Pubkey) -> bool {
        self.records.contains_key(address)
    }

    pub fn get(&self, address: &Pubkey) -> Option<&Record> {
        self.records.get(address)
    }

    /// Bind a new record. Fails if anything already lives at `address`.
    pub fn init(&mut self, address: Pubkey, record: impl Into<Record>) -> Result<(), ProgramError> {
        if self.records.contains_key(&address) {
            return Err(ProgramError::AlreadyExists { address });
        }
        self.records.insert(address, record.into());
        Ok(())
    }

    pub fn campaign(&self, address: &Pubkey) -> Option<&Campaign> {
        self.records.get(address).and_then(Record::as_campaign)
    }

    pub fn campaign_mut(&mut self, address: &Pubkey) -> Option<&mut Campaign> {
        match self.records.get_mut(address) {
            Some(Record::Campaign(campaign)) => Some(campaign),
            _ => None,
        }
    }

    pub fn contribution(&self, address: &Pubkey) -> Option<&Contribution> {
        self.records.get(address).and_then(Record::as_contribution)
    }

    /// Create or overwrite the contribution at `address`.
    pub fn upsert_contribution(&mut self, address: Pubkey, contribution: Contribution) {
        self.records
            .insert(address, Record::Contribution(contribution));
    }

    /// Unbind and return the record at `address`.
    pub fn close(&mut self, address: &Pubkey) -> Option<Record> {
        self.records.remove(address)
    }

    pub fn campaigns(&self) -> impl Iterator<Item = (&Pubkey, &Campaign)> {
        self.records
            .iter()
            .filter_map(|(address, record)| record.as_campaign().map(|c| (address, c)))
    }

    pub fn contributions(&self) -> impl Iterator<Item = (&Pubkey, &Contribution)> {
        self.records
            .iter()
            .filter_map(|(address, record)| record.as_contribution().map(|c| (address, c)))
    }

    pub fn records(&self) -> &BTreeMap<Pubkey, Record> {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_campaign() -> Campaign {
        Campaign::new(Pubkey::new_unique(), "name", "desc", Some(10), None, 0)
    }

    #[test]
    fn test_init_and_get() {
        let mut store = RecordStore::new();
        let address = Pubkey::new_unique();
        store.init(address, sample_campaign()).unwrap();

        assert!(store.contains(&address));
        assert_eq!(store.campaign(&address).unwrap().name, "name");
        assert!(store.contribution(&address).is_none());
    }

    #[test]
    fn test_init_rejects_bound_address() {
        let mut store = RecordStore::new();
        let address = Pubkey::new_unique();
        store.init(address, sample_campaign()).unwrap();

        let result = store.init(address, sample_campaign());
        assert_eq!(result, Err(ProgramError::AlreadyExists { address }));
    }

    #[test]
    fn test_upsert_and_close_contribution() {
        let mut store = RecordStore::new();
        let address = Pubkey::new_unique();
        let contribution =
            Contribution::new(Pubkey::new_unique(), Pubkey::new_unique(), 5, 1);

        store.upsert_contribution(address, contribution.clone());
        assert_eq!(store.contribution(&address), Some(&contribution));

        let closed = store.close(&address);
        assert_eq!(closed, Some(Record::Contribution(contribution)));
        assert!(store.contribution(&address).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_campaigns_iterator_skips_contributions() {
        let mut store = RecordStore::new();
        store.init(Pubkey::new_unique(), sample_campaign()).unwrap();
        store.init(Pubkey::new_unique(), sample_campaign()).unwrap();
        store.upsert_contribution(
            Pubkey::new_unique(),
            Contribution::new(Pubkey::new_unique(), Pubkey::new_unique(), 1, 1),
        );

        assert_eq!(store.campaigns().count(), 2);
        assert_eq!(store.contributions().count(), 1);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_campaign_mut_ignores_other_kinds() {
        let mut store = RecordStore::new();
        let address = Pubkey::new_unique();
        store.upsert_contribution(
            address,
            Contribution::new(Pubkey::new_unique(), Pubkey::new_unique(), 1, 1),
        );
        assert!(store.campaign_mut(&address).is_none());
    }
}
