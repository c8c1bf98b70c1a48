//! Group key used to align records across sources.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// The (CB, Date, Account) tuple.
///
/// Missing date or account values are `None`. Two `None`s compare equal, so
/// all missing-date records of one CB/account aggregate together, and `None`
/// is distinct from every concrete value. Ordering is total with missing
/// values first.
///
/// # Examples
///
/// ```
/// use recon_core::types::GroupKey;
///
/// let a = GroupKey::new("  AB1 ", None, Some("ACC1".to_string()));
/// let b = GroupKey::new("AB1", None, Some("ACC1".to_string()));
/// assert_eq!(a, b);
/// assert_eq!(a.cb(), "AB1");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct GroupKey {
    cb: String,
    date: Option<NaiveDate>,
    account: Option<String>,
}

impl GroupKey {
    /// Build a key, trimming the broker code.
    pub fn new(cb: &str, date: Option<NaiveDate>, account: Option<String>) -> Self {
        Self {
            cb: cb.trim().to_string(),
            date,
            account,
        }
    }

    /// Broker code.
    pub fn cb(&self) -> &str {
        &self.cb
    }

    /// Trade date, if parseable.
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Clearing account, if present.
    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = self
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        write!(
            f,
            "{}/{}/{}",
            self.cb,
            date,
            self.account.as_deref().unwrap_or("-")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_values_compare_equal() {
        let a = GroupKey::new("X", None, None);
        let b = GroupKey::new("X", None, None);
        assert_eq!(a, b);
    }

    #[test]
    fn test_missing_distinct_from_concrete() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5);
        let missing = GroupKey::new("X", None, Some("A".to_string()));
        let concrete = GroupKey::new("X", date, Some("A".to_string()));
        assert_ne!(missing, concrete);
        assert!(missing < concrete);
    }

    #[test]
    fn test_display() {
        let key = GroupKey::new("AB1", NaiveDate::from_ymd_opt(2024, 1, 5), None);
        assert_eq!(key.to_string(), "AB1/2024-01-05/-");
    }
}
