use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use csv::{Reader, Writer};
use log::{info, warn};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};

use shared::Category;

use crate::domain::models::expense::Expense;
use crate::storage::traits::ExpenseStorage;

use super::connection::CsvConnection;

/// Column order of the expenses CSV file
pub const EXPENSES_CSV_HEADER: [&str; 6] =
    ["id", "title", "amount", "category", "date", "description"];

/// CSV-based expense repository
#[derive(Clone)]
pub struct ExpenseRepository {
    connection: CsvConnection,
}

impl ExpenseRepository {
    /// Create a new CSV expense repository
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Read all expenses from the CSV file
    ///
    /// A row that cannot be parsed back into a valid expense (bad amount,
    /// unknown category, malformed date) is a storage failure, not
    /// something to coerce: invalid records must never reach the
    /// aggregation inputs.
    fn read_expenses(&self) -> Result<Vec<Expense>> {
        self.connection.ensure_expenses_file_exists()?;

        let file_path = self.connection.expenses_file_path();
        let file = File::open(&file_path)?;
        let reader = BufReader::new(file);
        let mut csv_reader = Reader::from_reader(reader);

        let mut expenses = Vec::new();

        for result in csv_reader.records() {
            let record = result?;

            let id = record
                .get(0)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| anyhow!("Expense row is missing an id"))?
                .to_string();

            let amount_field = record.get(2).unwrap_or("");
            let amount = amount_field
                .parse::<f64>()
                .map_err(|_| anyhow!("Invalid amount '{}' for expense {}", amount_field, id))?;

            let category_field = record.get(3).unwrap_or("");
            let category = Category::from_name(category_field)
                .ok_or_else(|| anyhow!("Unknown category '{}' for expense {}", category_field, id))?;

            let date_field = record.get(4).unwrap_or("");
            let date = NaiveDate::parse_from_str(date_field, "%Y-%m-%d")
                .map_err(|_| anyhow!("Invalid date '{}' for expense {}", date_field, id))?;

            let description = record
                .get(5)
                .filter(|v| !v.is_empty())
                .map(|v| v.to_string());

            expenses.push(Expense {
                id,
                title: record.get(1).unwrap_or("").to_string(),
                amount,
                category,
                date,
                description,
            });
        }

        Ok(expenses)
    }

    /// Write all expenses to the CSV file
    fn write_expenses(&self, expenses: &[Expense]) -> Result<()> {
        let file_path = self.connection.expenses_file_path();

        // Write to a temporary file, then rename for an atomic replace
        let temp_path = file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;

            let writer = BufWriter::new(file);
            let mut csv_writer = Writer::from_writer(writer);

            csv_writer.write_record(EXPENSES_CSV_HEADER)?;

            for expense in expenses {
                csv_writer.write_record(&[
                    expense.id.clone(),
                    expense.title.clone(),
                    expense.amount.to_string(),
                    expense.category.as_str().to_string(),
                    expense.date.format("%Y-%m-%d").to_string(),
                    expense.description.clone().unwrap_or_default(),
                ])?;
            }

            csv_writer.flush()?;
        }

        std::fs::rename(&temp_path, &file_path)?;

        Ok(())
    }
}

#[async_trait]
impl ExpenseStorage for ExpenseRepository {
    async fn store_expense(&self, expense: &Expense) -> Result<()> {
        info!("Storing expense in CSV: {}", expense.id);

        let mut expenses = self.read_expenses()?;

        if expenses.iter().any(|e| e.id == expense.id) {
            return Err(anyhow!("Expense already exists: {}", expense.id));
        }

        expenses.push(expense.clone());

        // Keep the file in chronological order
        expenses.sort_by(|a, b| a.date.cmp(&b.date));

        self.write_expenses(&expenses)?;

        info!("Successfully stored expense: {}", expense.id);
        Ok(())
    }

    async fn get_expense(&self, expense_id: &str) -> Result<Option<Expense>> {
        let expenses = self.read_expenses()?;

        Ok(expenses.into_iter().find(|e| e.id == expense_id))
    }

    async fn list_expenses(&self) -> Result<Vec<Expense>> {
        self.read_expenses()
    }

    async fn update_expense(&self, expense: &Expense) -> Result<()> {
        info!("Updating expense in CSV: {}", expense.id);

        let mut expenses = self.read_expenses()?;

        match expenses.iter_mut().find(|e| e.id == expense.id) {
            Some(existing) => {
                *existing = expense.clone();
            }
            None => {
                warn!("Expense not found for update: {}", expense.id);
                return Err(anyhow!("Expense not found: {}", expense.id));
            }
        }

        expenses.sort_by(|a, b| a.date.cmp(&b.date));
        self.write_expenses(&expenses)?;

        info!("Successfully updated expense: {}", expense.id);
        Ok(())
    }

    async fn delete_expense(&self, expense_id: &str) -> Result<bool> {
        info!("Deleting expense from CSV: {}", expense_id);

        let mut expenses = self.read_expenses()?;
        let initial_len = expenses.len();

        expenses.retain(|e| e.id != expense_id);

        if expenses.len() < initial_len {
            self.write_expenses(&expenses)?;
            info!("Successfully deleted expense: {}", expense_id);
            Ok(true)
        } else {
            warn!("Expense not found for deletion: {}", expense_id);
            Ok(false)
        }
    }
}
