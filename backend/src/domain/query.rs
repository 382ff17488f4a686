//! Filtering and ordering of expense snapshots.
//!
//! Produces a derived, read-only view of a snapshot: records are retained
//! according to the filter, then stable-sorted by the chosen key. The input
//! snapshot is never mutated; callers get a new owned sequence.

use shared::{Category, SortBy};

use super::models::expense::Expense;

/// Filter configuration for an expense list view.
///
/// The io layer builds this from `shared::ExpenseListRequest`; absent fields
/// match all records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseFilter {
    /// Keep only expenses in this category
    pub category: Option<Category>,
    /// Keep only expenses whose date falls in this YYYY-MM month
    pub month: Option<String>,
    /// Ordering of the resulting view
    pub sort_by: SortBy,
}

/// Apply a filter to a snapshot, returning a new ordered view.
///
/// Sorting is stable: records with equal keys keep their original relative
/// order. Date and amount views are descending (most recent / largest
/// first); the category view is ascending by category name.
pub fn apply_filter(expenses: &[Expense], filter: &ExpenseFilter) -> Vec<Expense> {
    let mut view: Vec<Expense> = expenses
        .iter()
        .filter(|e| filter.category.map_or(true, |category| e.category == category))
        .filter(|e| match filter.month.as_deref() {
            Some(month) if !month.is_empty() => e.year_month() == month,
            _ => true,
        })
        .cloned()
        .collect();

    match filter.sort_by {
        SortBy::Date => view.sort_by(|a, b| b.date.cmp(&a.date)),
        // Amounts are validated finite, so total_cmp imposes the plain
        // numeric order here
        SortBy::Amount => view.sort_by(|a, b| b.amount.total_cmp(&a.amount)),
        SortBy::Category => view.sort_by(|a, b| a.category.as_str().cmp(b.category.as_str())),
    }

    view
}
