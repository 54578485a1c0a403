//! Tagged union over every record kind the program stores

use crate::campaign::Campaign;
use crate::contribution::Contribution;
use serde::{Deserialize, Serialize};

/// A record bound to a derived address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    Campaign(Campaign),
    Contribution(Contribution),
}

impl Record {
    pub fn kind(&self) -> &'static str {
        match self {
            Record::Campaign(_) => "campaign",
            Record::Contribution(_) => "contribution",
        }
    }

    pub fn as_campaign(&self) -> Option<&Campaign> {
        match self {
            Record::Campaign(campaign) => Some(campaign),
            Record::Contribution(_) => None,
        }
    }

    pub fn as_contribution(&self) -> Option<&Contribution> {
        match self {
            Record::Contribution(contribution) => Some(contribution),
            Record::Campaign(_) => None,
        }
    }
}

impl From<Campaign> for Record {
    fn from(campaign: Campaign) -> Self {
        Record::Campaign(campaign)
    }
}

impl From<Contribution> for Record {
    fn from(contribution: Contribution) -> Self {
        Record::Contribution(contribution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::Pubkey;

    #[test]
    fn test_record_tagging() {
        let record = Record::from(Contribution::new(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            42,
            7,
        ));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["kind"], "contribution");
        assert_eq!(json["amount"], 42);
        assert_eq!(record.kind(), "contribution");
        assert!(record.as_campaign().is_none());
    }

    #[test]
    fn test_campaign_accessor() {
        let record = Record::from(Campaign::new(
            Pubkey::new_unique(),
            "name",
            "desc",
            None,
            None,
            0,
        ));
        assert_eq!(record.as_campaign().map(|c| c.name.as_str()), Some("name"));
        assert!(record.as_contribution().is_none());
    }
}
