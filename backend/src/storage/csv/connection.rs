//! CSV storage connection.
use anyhow::Result;
use csv::Writer;
use log::info;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::storage::traits::Connection;

use super::expense_repository::{ExpenseRepository, EXPENSES_CSV_HEADER};

/// CsvConnection manages file paths and ensures the expenses CSV file exists
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: Arc<Mutex<PathBuf>>,
}

impl CsvConnection {
    /// Create a new CSV connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("Created expense data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: Arc::new(Mutex::new(base_path)),
        })
    }

    /// Get the base directory of this connection
    pub fn base_directory(&self) -> PathBuf {
        self.base_directory.lock().unwrap().clone()
    }

    /// Get the path of the expenses CSV file
    pub fn expenses_file_path(&self) -> PathBuf {
        self.base_directory().join("expenses.csv")
    }

    /// Create the expenses CSV file with its header row if it is missing
    pub fn ensure_expenses_file_exists(&self) -> Result<()> {
        let file_path = self.expenses_file_path();
        if file_path.exists() {
            return Ok(());
        }

        let file = File::create(&file_path)?;
        let mut csv_writer = Writer::from_writer(BufWriter::new(file));
        csv_writer.write_record(EXPENSES_CSV_HEADER)?;
        csv_writer.flush()?;

        info!("Created expenses file: {}", file_path.display());
        Ok(())
    }
}

impl Connection for CsvConnection {
    type ExpenseRepository = ExpenseRepository;

    fn create_expense_repository(&self) -> Self::ExpenseRepository {
        ExpenseRepository::new(self.clone())
    }
}
