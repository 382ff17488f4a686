//! Expense analytics for the expense tracker.
//!
//! All aggregation here is computed by pure, synchronous functions over an
//! immutable snapshot of expenses. They never fail: an empty snapshot yields
//! zero totals, empty maps and no top category. The service wrapper only
//! adds the snapshot fetch from the store.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use log::info;
use std::collections::HashMap;
use std::sync::Arc;

use shared::{AnalyticsOverview, Category, SummaryStatistics};

use crate::domain::models::expense::Expense;
use crate::storage::{Connection, ExpenseStorage};

/// Total amount per category. Only categories that appear in at least one
/// expense get a key; callers must not rely on key order.
pub fn category_totals(expenses: &[Expense]) -> HashMap<Category, f64> {
    let mut totals = HashMap::new();
    for expense in expenses {
        *totals.entry(expense.category).or_insert(0.0) += expense.amount;
    }
    totals
}

/// Total amount per year-month key (e.g. "2024-03").
pub fn monthly_totals(expenses: &[Expense]) -> HashMap<String, f64> {
    let mut totals = HashMap::new();
    for expense in expenses {
        *totals.entry(expense.year_month()).or_insert(0.0) += expense.amount;
    }
    totals
}

/// Total, count and average over a snapshot. The average of an empty
/// snapshot is 0.0, never NaN.
pub fn summary_statistics(expenses: &[Expense]) -> SummaryStatistics {
    let total: f64 = expenses.iter().map(|e| e.amount).sum();
    let count = expenses.len();
    let average = if count > 0 { total / count as f64 } else { 0.0 };

    SummaryStatistics {
        total,
        count,
        average,
    }
}

/// The category with the largest total, or `None` for an empty snapshot.
///
/// Ties go to the category encountered first in the snapshot's own order.
/// The walk is over the input, not over the totals map, so the result does
/// not depend on `HashMap` iteration order.
pub fn top_category(expenses: &[Expense]) -> Option<Category> {
    let totals = category_totals(expenses);

    let mut best: Option<(Category, f64)> = None;
    for expense in expenses {
        let total = totals[&expense.category];
        match best {
            Some((_, best_total)) if total <= best_total => {}
            _ => best = Some((expense.category, total)),
        }
    }

    best.map(|(category, _)| category)
}

/// Total spent in `reference_date`'s year-month.
pub fn current_month_total(expenses: &[Expense], reference_date: NaiveDate) -> f64 {
    let month_key = reference_date.format("%Y-%m").to_string();
    expenses
        .iter()
        .filter(|e| e.year_month() == month_key)
        .map(|e| e.amount)
        .sum()
}

/// Number of distinct categories in use.
pub fn distinct_category_count(expenses: &[Expense]) -> usize {
    category_totals(expenses).len()
}

/// Build the full analytics payload for a snapshot.
pub fn overview_for(expenses: &[Expense], reference_date: NaiveDate) -> AnalyticsOverview {
    let top = top_category(expenses)
        .map(|c| c.as_str().to_string())
        .unwrap_or_else(|| "None".to_string());

    AnalyticsOverview {
        summary: summary_statistics(expenses),
        category_totals: category_totals(expenses)
            .into_iter()
            .map(|(category, total)| (category.as_str().to_string(), total))
            .collect(),
        monthly_totals: monthly_totals(expenses),
        top_category: top,
        current_month_total: current_month_total(expenses, reference_date),
        distinct_categories: distinct_category_count(expenses),
    }
}

/// Service producing analytics payloads from the current store contents
#[derive(Clone)]
pub struct AnalyticsService<C: Connection> {
    expense_repository: C::ExpenseRepository,
}

impl<C: Connection> AnalyticsService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        let expense_repository = connection.create_expense_repository();
        Self { expense_repository }
    }

    /// Fetch a snapshot and compute the analytics payload against today's
    /// month.
    pub async fn overview(&self) -> Result<AnalyticsOverview> {
        self.overview_at(Local::now().date_naive()).await
    }

    /// Fetch a snapshot and compute the analytics payload against an
    /// explicit reference date.
    pub async fn overview_at(&self, reference_date: NaiveDate) -> Result<AnalyticsOverview> {
        let snapshot = self.expense_repository.list_expenses().await?;
        info!("Computing analytics overview over {} expenses", snapshot.len());
        Ok(overview_for(&snapshot, reference_date))
    }

    /// Fetch a snapshot and compute total/count/average.
    pub async fn summary(&self) -> Result<SummaryStatistics> {
        let snapshot = self.expense_repository.list_expenses().await?;
        Ok(summary_statistics(&snapshot))
    }
}
