//! In-memory expense store.
//!
//! The mock persistence backend: a shared vector behind a mutex. Used by
//! unit tests and anywhere a throwaway store is good enough; clones of a
//! connection share the same underlying records.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{info, warn};
use std::sync::{Arc, Mutex};

use crate::domain::models::expense::Expense as DomainExpense;
use crate::storage::traits::{Connection, ExpenseStorage};

/// Connection to an in-memory expense store
#[derive(Clone, Default)]
pub struct MemoryConnection {
    expenses: Arc<Mutex<Vec<DomainExpense>>>,
}

impl MemoryConnection {
    /// Create a new, empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

impl Connection for MemoryConnection {
    type ExpenseRepository = MemoryExpenseRepository;

    fn create_expense_repository(&self) -> Self::ExpenseRepository {
        MemoryExpenseRepository {
            expenses: Arc::clone(&self.expenses),
        }
    }
}

/// Expense repository backed by the in-memory store
#[derive(Clone)]
pub struct MemoryExpenseRepository {
    expenses: Arc<Mutex<Vec<DomainExpense>>>,
}

#[async_trait]
impl ExpenseStorage for MemoryExpenseRepository {
    async fn store_expense(&self, expense: &DomainExpense) -> Result<()> {
        let mut expenses = self.expenses.lock().unwrap();

        if expenses.iter().any(|e| e.id == expense.id) {
            return Err(anyhow!("Expense already exists: {}", expense.id));
        }

        expenses.push(expense.clone());
        info!("Stored expense in memory: {}", expense.id);
        Ok(())
    }

    async fn get_expense(&self, expense_id: &str) -> Result<Option<DomainExpense>> {
        let expenses = self.expenses.lock().unwrap();
        Ok(expenses.iter().find(|e| e.id == expense_id).cloned())
    }

    async fn list_expenses(&self) -> Result<Vec<DomainExpense>> {
        // Copy out so callers get a snapshot detached from the store
        let expenses = self.expenses.lock().unwrap();
        Ok(expenses.clone())
    }

    async fn update_expense(&self, expense: &DomainExpense) -> Result<()> {
        let mut expenses = self.expenses.lock().unwrap();

        match expenses.iter_mut().find(|e| e.id == expense.id) {
            Some(existing) => {
                *existing = expense.clone();
                info!("Updated expense in memory: {}", expense.id);
                Ok(())
            }
            None => {
                warn!("Expense not found for update: {}", expense.id);
                Err(anyhow!("Expense not found: {}", expense.id))
            }
        }
    }

    async fn delete_expense(&self, expense_id: &str) -> Result<bool> {
        let mut expenses = self.expenses.lock().unwrap();
        let initial_len = expenses.len();

        expenses.retain(|e| e.id != expense_id);

        let deleted = expenses.len() < initial_len;
        if deleted {
            info!("Deleted expense from memory: {}", expense_id);
        } else {
            warn!("Expense not found for deletion: {}", expense_id);
        }
        Ok(deleted)
    }
}
