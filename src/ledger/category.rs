use std::fmt;

use serde::{Deserialize, Serialize};

/// Classifies a category as money coming in or money going out.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CategoryKind {
    Income,
    Expense,
}

/// Closed set of transaction categories.
///
/// Exactly one income tag; everything else is an expense. Display metadata
/// (icons, colors) lives in the consuming UI, not here.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub enum Category {
    Income,
    Rent,
    Utilities,
    Groceries,
    Transportation,
    Entertainment,
    Healthcare,
    Other,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 8] = [
        Category::Income,
        Category::Rent,
        Category::Utilities,
        Category::Groceries,
        Category::Transportation,
        Category::Entertainment,
        Category::Healthcare,
        Category::Other,
    ];

    pub fn kind(self) -> CategoryKind {
        match self {
            Category::Income => CategoryKind::Income,
            _ => CategoryKind::Expense,
        }
    }

    pub fn is_expense(self) -> bool {
        matches!(self.kind(), CategoryKind::Expense)
    }

    /// The expense subset, used to pre-populate per-category totals.
    pub fn expenses() -> impl Iterator<Item = Category> {
        Self::ALL.into_iter().filter(|category| category.is_expense())
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Income => "Income",
            Category::Rent => "Rent",
            Category::Utilities => "Utilities",
            Category::Groceries => "Groceries",
            Category::Transportation => "Transportation",
            Category::Entertainment => "Entertainment",
            Category::Healthcare => "Healthcare",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn income_is_the_only_non_expense() {
        let incomes: Vec<Category> = Category::ALL
            .into_iter()
            .filter(|category| !category.is_expense())
            .collect();
        assert_eq!(incomes, vec![Category::Income]);
    }

    #[test]
    fn expenses_covers_everything_but_income() {
        let expenses: Vec<Category> = Category::expenses().collect();
        assert_eq!(expenses.len(), Category::ALL.len() - 1);
        assert!(!expenses.contains(&Category::Income));
    }

    #[test]
    fn labels_are_unique() {
        let mut labels: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), Category::ALL.len());
    }
}
