use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

use super::category::Category;
use super::entry::{Entry, EntryDelta};

/// Paid/unpaid running sums for one expense category.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryTotals {
    pub paid: Decimal,
    pub unpaid: Decimal,
}

/// Running-balance aggregate over the live set of entries.
///
/// One instance exists per dataset. All mutation flows through
/// [`Ledger::record_new`], [`Ledger::change_paid_status`], [`Ledger::delete`]
/// and [`Ledger::update`]; each applies a single entry's delta incrementally.
/// The aggregate holds no entry identities, so an edit is always expressed as
/// inverse-then-forward, never as a diff.
///
/// After every operation:
/// - `available_balance == total_income - total_paid_expense`
/// - `projected_overdraw == available_balance - total_unpaid_expense`
/// - per-category paid/unpaid sums add up to the matching grand totals
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ledger {
    total_income: Decimal,
    total_paid_expense: Decimal,
    total_unpaid_expense: Decimal,
    available_balance: Decimal,
    projected_overdraw: Decimal,
    category_totals: BTreeMap<Category, CategoryTotals>,
}

impl Ledger {
    /// Creates an empty aggregate with every expense category pre-populated
    /// at zero, so subtotal lookups never hit a missing key.
    pub fn new() -> Self {
        let category_totals = Category::expenses()
            .map(|category| (category, CategoryTotals::default()))
            .collect();
        Self {
            total_income: Decimal::ZERO,
            total_paid_expense: Decimal::ZERO,
            total_unpaid_expense: Decimal::ZERO,
            available_balance: Decimal::ZERO,
            projected_overdraw: Decimal::ZERO,
            category_totals,
        }
    }

    /// Rebuilds the aggregate by folding [`Ledger::record_new`] over a set of
    /// live entries. This is an explicit repair/audit path for callers whose
    /// persisted totals are suspect; no operation falls back to it.
    pub fn from_entries<'a, I>(entries: I) -> Result<Self, LedgerError>
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        let mut ledger = Self::new();
        for entry in entries {
            ledger.record_new(entry.delta())?;
        }
        Ok(ledger)
    }

    /// Applies the forward delta for one newly created entry.
    pub fn record_new(&mut self, delta: EntryDelta) -> Result<(), LedgerError> {
        check_amount(delta.amount)?;
        self.apply(delta, delta.amount);
        Ok(())
    }

    /// Removes a previously recorded entry's contribution. The tuple must
    /// match what was recorded; the aggregate has no way to verify that.
    pub fn delete(&mut self, delta: EntryDelta) -> Result<(), LedgerError> {
        check_amount(delta.amount)?;
        self.apply(delta, -delta.amount);
        Ok(())
    }

    /// Applies the net effect of flipping one expense entry's paid flag to
    /// `new_is_paid`. Income entries have no paid status to change.
    pub fn change_paid_status(
        &mut self,
        amount: Decimal,
        new_is_paid: bool,
        category: Category,
    ) -> Result<(), LedgerError> {
        check_amount(amount)?;
        if !category.is_expense() {
            return Err(LedgerError::IncomePaidStatus);
        }
        let moved = if new_is_paid { amount } else { -amount };
        {
            let slot = self.category_totals.entry(category).or_default();
            slot.paid += moved;
            slot.unpaid -= moved;
        }
        self.total_paid_expense += moved;
        self.total_unpaid_expense -= moved;
        self.refresh_derived();
        Ok(())
    }

    /// Replaces one entry's contribution, composed strictly as the inverse of
    /// the old tuple followed by the forward of the new one. Old and new may
    /// differ in amount, paid status, and category all at once.
    pub fn update(&mut self, old: EntryDelta, new: EntryDelta) -> Result<(), LedgerError> {
        // Validate both tuples before touching any field.
        check_amount(old.amount)?;
        check_amount(new.amount)?;
        self.apply(old, -old.amount);
        self.apply(new, new.amount);
        Ok(())
    }

    pub fn total_income(&self) -> Decimal {
        self.total_income
    }

    pub fn total_paid_expense(&self) -> Decimal {
        self.total_paid_expense
    }

    pub fn total_unpaid_expense(&self) -> Decimal {
        self.total_unpaid_expense
    }

    /// Funds actually on hand: income minus expenses actually paid.
    pub fn available_balance(&self) -> Decimal {
        self.available_balance
    }

    /// What the balance would be if every outstanding expense were paid now.
    /// Negative means a shortfall is projected.
    pub fn projected_overdraw(&self) -> Decimal {
        self.projected_overdraw
    }

    pub fn category_totals(&self) -> &BTreeMap<Category, CategoryTotals> {
        &self.category_totals
    }

    pub fn totals_for(&self, category: Category) -> CategoryTotals {
        self.category_totals
            .get(&category)
            .copied()
            .unwrap_or_default()
    }

    fn apply(&mut self, delta: EntryDelta, signed: Decimal) {
        if delta.category.is_expense() {
            {
                let slot = self.category_totals.entry(delta.category).or_default();
                if delta.is_paid {
                    slot.paid += signed;
                } else {
                    slot.unpaid += signed;
                }
            }
            if delta.is_paid {
                self.total_paid_expense += signed;
            } else {
                self.total_unpaid_expense += signed;
            }
        } else {
            // Income carries no paid distinction; it is settled on arrival.
            self.total_income += signed;
        }
        self.refresh_derived();
    }

    // Derived fields are recomputed from the accumulated totals, never
    // nudged incrementally.
    fn refresh_derived(&mut self) {
        self.available_balance = self.total_income - self.total_paid_expense;
        self.projected_overdraw = self.available_balance - self.total_unpaid_expense;
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

fn check_amount(amount: Decimal) -> Result<(), LedgerError> {
    if amount.is_sign_negative() {
        return Err(LedgerError::NegativeAmount(amount));
    }
    Ok(())
}
