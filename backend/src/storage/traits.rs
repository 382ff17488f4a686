//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::expense::Expense as DomainExpense;

/// Trait defining the interface for expense storage operations
///
/// This trait abstracts away the specific storage implementation details,
/// allowing the domain layer to work with different storage backends
/// (in-memory, CSV files, etc.) without modification.
#[async_trait]
pub trait ExpenseStorage: Send + Sync {
    /// Store a new expense. Fails if an expense with the same id already
    /// exists.
    async fn store_expense(&self, expense: &DomainExpense) -> Result<()>;

    /// Retrieve a specific expense by ID
    async fn get_expense(&self, expense_id: &str) -> Result<Option<DomainExpense>>;

    /// List all stored expenses as a snapshot; callers own the returned
    /// collection and may reorder it freely
    async fn list_expenses(&self) -> Result<Vec<DomainExpense>>;

    /// Replace an existing expense (matched by id). Fails if the id is not
    /// present.
    async fn update_expense(&self, expense: &DomainExpense) -> Result<()>;

    /// Delete a single expense
    /// Returns true if the expense was found and deleted, false otherwise
    async fn delete_expense(&self, expense_id: &str) -> Result<bool>;
}

/// Trait defining the interface for storage connections
///
/// This trait abstracts away the specific connection type (in-memory, CSV
/// directory, etc.) and provides factory methods for creating repositories.
/// The connection's lifecycle is owned by the composition root and handed
/// to services by reference; there is no process-wide storage state.
pub trait Connection: Send + Sync + Clone {
    /// The type of ExpenseStorage this connection creates
    type ExpenseRepository: ExpenseStorage + Clone;

    /// Create a new expense repository for this connection
    fn create_expense_repository(&self) -> Self::ExpenseRepository;
}
