//! Per-user grouping of parsed records.
//!
//! Users are kept in first-seen order and matched case-sensitively. Both the
//! per-user detail view and the totals view are derived from the same groups.

use crate::error::{Error, Result};
use crate::parse::Record;
use std::cmp::Reverse;
use std::collections::HashMap;

/// Total bytes owned by one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserTotal {
    /// User name.
    pub user: String,
    /// Sum of that user's record sizes.
    pub bytes: u128,
}

#[derive(Debug, Clone)]
struct UserGroup {
    user: String,
    records: Vec<Record>,
}

/// Records grouped by owning user.
#[derive(Debug, Clone, Default)]
pub struct UsageTable {
    groups: Vec<UserGroup>,
    index: HashMap<String, usize>,
}

impl UsageTable {
    /// Group records by user, preserving input order inside each group.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        let mut table = Self::default();
        for record in records {
            let slot = match table.index.get(&record.user) {
                Some(&slot) => slot,
                None => {
                    let slot = table.groups.len();
                    table.index.insert(record.user.clone(), slot);
                    table.groups.push(UserGroup {
                        user: record.user.clone(),
                        records: Vec::new(),
                    });
                    slot
                }
            };
            table.groups[slot].records.push(record);
        }
        table
    }

    /// Users in first-seen order.
    pub fn users(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.user.as_str())
    }

    /// Number of distinct users.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of records across all users.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|g| g.records.len()).sum()
    }

    /// `true` when no records were grouped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// One user's records, largest first. Equal sizes keep input order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownUser`] if the user owns no records.
    pub fn detail_for(&self, user: &str) -> Result<Vec<&Record>> {
        let slot = self
            .index
            .get(user)
            .ok_or_else(|| Error::UnknownUser(user.to_string()))?;
        let mut detail: Vec<&Record> = self.groups[*slot].records.iter().collect();
        detail.sort_by_key(|r| Reverse(r.bytes));
        Ok(detail)
    }

    /// Per-user byte totals in first-seen order.
    #[must_use]
    pub fn totals(&self) -> Vec<UserTotal> {
        self.groups
            .iter()
            .map(|g| UserTotal {
                user: g.user.clone(),
                bytes: g.records.iter().map(|r| u128::from(r.bytes)).sum(),
            })
            .collect()
    }

    /// Sum of every record's size.
    #[must_use]
    pub fn total_bytes(&self) -> u128 {
        self.groups
            .iter()
            .flat_map(|g| &g.records)
            .map(|r| u128::from(r.bytes))
            .sum()
    }
}
