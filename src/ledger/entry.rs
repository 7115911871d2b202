use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::LedgerError;

use super::category::Category;

/// A single dated income or expense transaction.
///
/// Identity is opaque and stable for the life of the record. The running
/// balance engine never sees it; only the [`EntryDelta`] projection reaches
/// the aggregate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    pub(crate) id: Uuid,
    pub(crate) amount: Decimal,
    pub(crate) date: NaiveDate,
    pub(crate) is_paid: bool,
    pub(crate) category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) note: Option<String>,
}

impl Entry {
    /// Creates an entry with a fresh identity.
    ///
    /// Expense entries start out unpaid; income is always considered settled,
    /// so `is_paid` is pinned to `true` for [`Category::Income`].
    pub fn new(
        amount: Decimal,
        date: NaiveDate,
        category: Category,
    ) -> Result<Self, LedgerError> {
        if amount.is_sign_negative() {
            return Err(LedgerError::NegativeAmount(amount));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            amount,
            date,
            is_paid: !category.is_expense(),
            category,
            note: None,
        })
    }

    pub fn with_paid(mut self, is_paid: bool) -> Self {
        if self.category.is_expense() {
            self.is_paid = is_paid;
        }
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn is_paid(&self) -> bool {
        self.is_paid
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// The `(amount, is_paid, category)` tuple the engine consumes.
    pub fn delta(&self) -> EntryDelta {
        EntryDelta {
            amount: self.amount,
            is_paid: self.is_paid,
            category: self.category,
        }
    }
}

/// One entry's contribution to the aggregate, detached from its identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryDelta {
    pub amount: Decimal,
    pub is_paid: bool,
    pub category: Category,
}

/// Partial update for an existing entry; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct EntryPatch {
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub is_paid: Option<bool>,
    pub category: Option<Category>,
    pub note: Option<Option<String>>,
}

impl EntryPatch {
    pub fn has_effect(&self) -> bool {
        self.amount.is_some()
            || self.date.is_some()
            || self.is_paid.is_some()
            || self.category.is_some()
            || self.note.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn rejects_negative_amounts() {
        let err = Entry::new(dec!(-1), day(), Category::Groceries)
            .expect_err("negative amount should fail");
        assert!(matches!(err, LedgerError::NegativeAmount(_)));
    }

    #[test]
    fn income_is_always_settled() {
        let entry = Entry::new(dec!(100), day(), Category::Income)
            .expect("valid entry")
            .with_paid(false);
        assert!(entry.is_paid());
    }

    #[test]
    fn expenses_start_unpaid() {
        let entry = Entry::new(dec!(42.50), day(), Category::Utilities).expect("valid entry");
        assert!(!entry.is_paid());
        assert_eq!(entry.delta().amount, dec!(42.50));
    }
}
