//! Domain model for an expense record.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::Category;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub title: String,
    /// Always positive; validated before a record enters the store
    pub amount: f64,
    pub category: Category,
    pub date: NaiveDate,
    pub description: Option<String>,
}

impl Expense {
    /// Year-month key used for monthly bucketing (e.g. "2024-03")
    pub fn year_month(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}
