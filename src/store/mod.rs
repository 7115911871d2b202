//! Facade that owns the authoritative entry list and its running-balance
//! aggregate, keeping the two in step within every call.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::LedgerError;
use crate::ledger::{Category, Entry, EntryDelta, EntryPatch, Ledger};

/// Owns the entries and the single [`Ledger`] for one dataset.
///
/// Every mutation performs the entry-list change and the matching ledger
/// operation as one synchronous unit, so the in-memory totals and the entry
/// list never diverge. Methods take `&mut self`; hosts that share a store
/// across threads wrap it in their own lock.
#[derive(Debug, Default)]
pub struct EntryStore {
    entries: Vec<Entry>,
    ledger: Ledger,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a store from persisted state, trusting it verbatim. Callers
    /// that suspect drift between the two halves follow up with
    /// [`EntryStore::rebuild_ledger`].
    pub fn from_parts(entries: Vec<Entry>, ledger: Ledger) -> Self {
        Self { entries, ledger }
    }

    pub fn add(&mut self, entry: Entry) -> Result<Uuid, LedgerError> {
        self.ledger.record_new(entry.delta())?;
        let id = entry.id();
        tracing::debug!(%id, category = %entry.category(), "entry recorded");
        self.entries.push(entry);
        Ok(id)
    }

    /// Applies a partial update. The ledger sees it as the inverse of the old
    /// tuple followed by the forward of the new one.
    pub fn edit(&mut self, id: Uuid, patch: EntryPatch) -> Result<(), LedgerError> {
        if !patch.has_effect() {
            return Ok(());
        }
        let index = self.index_of(id)?;
        let old = self.entries[index].delta();

        let amount = patch.amount.unwrap_or(old.amount);
        if amount.is_sign_negative() {
            return Err(LedgerError::NegativeAmount(amount));
        }
        let category = patch.category.unwrap_or(old.category);
        // Income is settled on arrival; a patch cannot mark it outstanding.
        let is_paid = if category.is_expense() {
            patch.is_paid.unwrap_or(old.is_paid)
        } else {
            true
        };
        let new = EntryDelta {
            amount,
            is_paid,
            category,
        };

        self.ledger.update(old, new)?;
        let entry = &mut self.entries[index];
        entry.amount = amount;
        entry.is_paid = is_paid;
        entry.category = category;
        if let Some(date) = patch.date {
            entry.date = date;
        }
        if let Some(note) = patch.note {
            entry.note = note;
        }
        tracing::debug!(%id, "entry edited");
        Ok(())
    }

    /// Flips one expense entry's paid flag. A no-op when the flag already has
    /// the requested value; an error for income entries.
    pub fn set_paid(&mut self, id: Uuid, paid: bool) -> Result<(), LedgerError> {
        let index = self.index_of(id)?;
        let entry = &self.entries[index];
        if !entry.category().is_expense() {
            return Err(LedgerError::IncomePaidStatus);
        }
        if entry.is_paid() == paid {
            return Ok(());
        }
        self.ledger
            .change_paid_status(entry.amount(), paid, entry.category())?;
        self.entries[index].is_paid = paid;
        tracing::debug!(%id, paid, "entry paid status changed");
        Ok(())
    }

    pub fn remove(&mut self, id: Uuid) -> Result<Entry, LedgerError> {
        let index = self.index_of(id)?;
        self.ledger.delete(self.entries[index].delta())?;
        let entry = self.entries.remove(index);
        tracing::debug!(%id, "entry removed");
        Ok(entry)
    }

    pub fn entry(&self, id: Uuid) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Entries dated within `[start, end)`, for period-scoped reporting. The
    /// ledger itself stays all-time only.
    pub fn entries_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<&Entry> {
        self.entries
            .iter()
            .filter(|entry| entry.date() >= start && entry.date() < end)
            .collect()
    }

    pub fn entries_for(&self, category: Category) -> Vec<&Entry> {
        self.entries
            .iter()
            .filter(|entry| entry.category() == category)
            .collect()
    }

    /// Re-derives the aggregate from the live entries and replaces it.
    /// Reconciliation hook for callers recovering from a suspect snapshot.
    pub fn rebuild_ledger(&mut self) -> Result<(), LedgerError> {
        self.ledger = Ledger::from_entries(&self.entries)?;
        Ok(())
    }

    pub fn into_parts(self) -> (Vec<Entry>, Ledger) {
        (self.entries, self.ledger)
    }

    fn index_of(&self, id: Uuid) -> Result<usize, LedgerError> {
        self.entries
            .iter()
            .position(|entry| entry.id() == id)
            .ok_or(LedgerError::UnknownEntry(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    fn seeded_store() -> EntryStore {
        let mut store = EntryStore::new();
        store
            .add(Entry::new(dec!(3000), day(), Category::Income).unwrap())
            .unwrap();
        store
            .add(
                Entry::new(dec!(900), day(), Category::Rent)
                    .unwrap()
                    .with_paid(true),
            )
            .unwrap();
        store
            .add(Entry::new(dec!(75.25), day(), Category::Groceries).unwrap())
            .unwrap();
        store
    }

    #[test]
    fn add_keeps_ledger_in_step() {
        let store = seeded_store();
        assert_eq!(store.ledger().total_income(), dec!(3000));
        assert_eq!(store.ledger().total_paid_expense(), dec!(900));
        assert_eq!(store.ledger().total_unpaid_expense(), dec!(75.25));
        assert_eq!(store.ledger().available_balance(), dec!(2100));
    }

    #[test]
    fn edit_moves_totals_between_categories() {
        let mut store = seeded_store();
        let id = store.entries_for(Category::Groceries)[0].id();

        store
            .edit(
                id,
                EntryPatch {
                    amount: Some(dec!(80)),
                    category: Some(Category::Healthcare),
                    is_paid: Some(true),
                    ..EntryPatch::default()
                },
            )
            .unwrap();

        assert_eq!(store.ledger().totals_for(Category::Groceries).unpaid, dec!(0));
        assert_eq!(store.ledger().totals_for(Category::Healthcare).paid, dec!(80));
        assert_eq!(store.ledger().total_unpaid_expense(), dec!(0));
    }

    #[test]
    fn edit_rejects_negative_amount_before_any_change() {
        let mut store = seeded_store();
        let id = store.entries_for(Category::Rent)[0].id();
        let ledger_before = store.ledger().clone();

        let err = store
            .edit(
                id,
                EntryPatch {
                    amount: Some(dec!(-10)),
                    ..EntryPatch::default()
                },
            )
            .expect_err("negative amount should fail");
        assert!(matches!(err, LedgerError::NegativeAmount(_)));
        assert_eq!(store.ledger(), &ledger_before);
        assert_eq!(store.entries_for(Category::Rent)[0].amount(), dec!(900));
    }

    #[test]
    fn set_paid_round_trip_restores_totals() {
        let mut store = seeded_store();
        let id = store.entries_for(Category::Groceries)[0].id();
        let before = store.ledger().clone();

        store.set_paid(id, true).unwrap();
        assert_eq!(store.ledger().available_balance(), dec!(2024.75));
        store.set_paid(id, false).unwrap();
        assert_eq!(store.ledger(), &before);
    }

    #[test]
    fn set_paid_is_a_no_op_when_unchanged() {
        let mut store = seeded_store();
        let id = store.entries_for(Category::Rent)[0].id();
        let before = store.ledger().clone();
        store.set_paid(id, true).unwrap();
        assert_eq!(store.ledger(), &before);
    }

    #[test]
    fn set_paid_rejects_income_entries() {
        let mut store = seeded_store();
        let id = store.entries_for(Category::Income)[0].id();
        let err = store.set_paid(id, false).expect_err("income is settled");
        assert!(matches!(err, LedgerError::IncomePaidStatus));
    }

    #[test]
    fn remove_unknown_id_errors() {
        let mut store = seeded_store();
        let err = store.remove(Uuid::new_v4()).expect_err("unknown id");
        assert!(matches!(err, LedgerError::UnknownEntry(_)));
    }

    #[test]
    fn remove_then_rebuild_agrees_with_incremental_totals() {
        let mut store = seeded_store();
        let id = store.entries_for(Category::Rent)[0].id();
        store.remove(id).unwrap();

        let incremental = store.ledger().clone();
        store.rebuild_ledger().unwrap();
        assert_eq!(store.ledger(), &incremental);
    }

    #[test]
    fn entries_between_filters_by_date_window() {
        let mut store = seeded_store();
        let later = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        store
            .add(Entry::new(dec!(10), later, Category::Other).unwrap())
            .unwrap();

        let window = store.entries_between(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
        );
        assert_eq!(window.len(), 1);
        assert_eq!(window[0].category(), Category::Other);
    }
}
