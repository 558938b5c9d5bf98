//! Percentage shares of the grand total, used as pie chart input.

use crate::aggregate::UserTotal;
use crate::error::{Error, Result};

/// One user's share of all reported bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct UserShare {
    /// User name.
    pub user: String,
    /// User's total bytes.
    pub bytes: u128,
    /// `floor(bytes / grand_total * 100)`.
    pub percent: u32,
}

/// Compute every user's whole-percent share, in the order given.
///
/// # Errors
///
/// Returns [`Error::EmptyDataset`] when the totals sum to zero.
pub fn shares(totals: &[UserTotal]) -> Result<Vec<UserShare>> {
    let grand_total: u128 = totals.iter().map(|t| t.bytes).sum();
    if grand_total == 0 {
        return Err(Error::EmptyDataset);
    }

    Ok(totals
        .iter()
        .map(|t| UserShare {
            user: t.user.clone(),
            bytes: t.bytes,
            percent: (t.bytes as f64 / grand_total as f64 * 100.0).floor() as u32,
        })
        .collect())
}

/// Shares that get a chart slice: users whose whole percent is zero are dropped.
///
/// # Errors
///
/// Returns [`Error::EmptyDataset`] when the totals sum to zero.
pub fn chart_shares(totals: &[UserTotal]) -> Result<Vec<UserShare>> {
    let mut shares = shares(totals)?;
    shares.retain(|s| s.percent > 0);
    Ok(shares)
}
