use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::amount::Amount;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(pub String);

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single bank transaction as handed to feature extraction.
///
/// `date` is kept as the raw text from the source; it is normalised on
/// demand by [`crate::date::parse_date`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub user_id: UserId,
    /// Vendor / counterparty name.
    pub name: String,
    pub amount: Amount,
    pub date: String,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        name: impl Into<String>,
        amount: impl Into<Amount>,
        date: impl Into<String>,
    ) -> Self {
        Transaction {
            id: TransactionId(id.into()),
            user_id: UserId(user_id.into()),
            name: name.into(),
            amount: amount.into(),
            date: date.into(),
        }
    }
}

/// Splits a mixed list into per-user histories, keeping input order
/// within each user.
pub fn group_by_user(transactions: &[Transaction]) -> BTreeMap<UserId, Vec<Transaction>> {
    let mut groups: BTreeMap<UserId, Vec<Transaction>> = BTreeMap::new();
    for tx in transactions {
        groups
            .entry(tx.user_id.clone())
            .or_default()
            .push(tx.clone());
    }
    groups
}
