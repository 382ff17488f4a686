//! Maps between domain expenses and the DTOs in the `shared` crate.
use anyhow::{anyhow, Result};

use shared::{Category, Expense as SharedExpense, ExpenseListRequest, SortBy};

use crate::domain::models::expense::Expense as DomainExpense;
use crate::domain::query::ExpenseFilter;

pub struct ExpenseMapper;

impl ExpenseMapper {
    /// Convert a domain expense into its presentation DTO
    pub fn to_dto(expense: DomainExpense) -> SharedExpense {
        SharedExpense {
            id: expense.id,
            title: expense.title,
            amount: expense.amount,
            category: expense.category,
            date: expense.date.format("%Y-%m-%d").to_string(),
            description: expense.description,
        }
    }

    /// Build a domain filter from a list request.
    ///
    /// Absent or empty category/month fields match all records. An
    /// unrecognized category name is a validation error; an unrecognized
    /// sort key falls back to the date ordering.
    pub fn to_filter(request: ExpenseListRequest) -> Result<ExpenseFilter> {
        let category = match request.category.as_deref() {
            None | Some("") => None,
            Some(name) => Some(
                Category::from_name(name).ok_or_else(|| anyhow!("Unknown category: {}", name))?,
            ),
        };

        Ok(ExpenseFilter {
            category,
            month: request.month.filter(|m| !m.is_empty()),
            sort_by: request
                .sort_by
                .as_deref()
                .map(SortBy::from_param)
                .unwrap_or_default(),
        })
    }
}
