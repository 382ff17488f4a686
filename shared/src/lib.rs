use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Expense ID in format: "expense::<epoch_millis>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    /// Short display title (1-256 characters)
    pub title: String,
    /// Expense amount in currency units (always positive)
    pub amount: f64,
    /// Spending category
    pub category: Category,
    /// Calendar date of the expense (ISO 8601, YYYY-MM-DD)
    pub date: String,
    /// Optional free-text note
    pub description: Option<String>,
}

/// Fixed set of spending categories an expense can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Education,
    Entertainment,
    Health,
    Other,
}

impl Category {
    /// All categories, in the order the expense form presents them
    pub const ALL: [Category; 6] = [
        Category::Food,
        Category::Transport,
        Category::Education,
        Category::Entertainment,
        Category::Health,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Education => "Education",
            Category::Entertainment => "Entertainment",
            Category::Health => "Health",
            Category::Other => "Other",
        }
    }

    /// Parse a category from its display name. Returns `None` for anything
    /// outside the fixed set; unrecognized categories are never coerced.
    pub fn from_name(name: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort key for expense list views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortBy {
    /// Most recent first
    Date,
    /// Largest first
    Amount,
    /// Category name, ascending
    Category,
}

impl Default for SortBy {
    fn default() -> Self {
        SortBy::Date
    }
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Date => "date",
            SortBy::Amount => "amount",
            SortBy::Category => "category",
        }
    }

    /// Parse a sort key from a request parameter. Unrecognized values fall
    /// back to the date ordering rather than failing.
    pub fn from_param(param: &str) -> SortBy {
        match param {
            "amount" => SortBy::Amount,
            "category" => SortBy::Category,
            _ => SortBy::Date,
        }
    }
}

/// Request for creating a new expense
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateExpenseRequest {
    /// Short display title (1-256 characters)
    pub title: String,
    /// Expense amount, must be positive
    pub amount: f64,
    /// Category name (must be one of the fixed set)
    pub category: String,
    /// Calendar date (ISO 8601, YYYY-MM-DD)
    pub date: String,
    /// Optional free-text note
    pub description: Option<String>,
}

/// Request for replacing an existing expense. All mutable fields are
/// required; the id is preserved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateExpenseRequest {
    pub id: String,
    pub title: String,
    pub amount: f64,
    pub category: String,
    pub date: String,
    pub description: Option<String>,
}

/// Response after creating or updating an expense
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseResponse {
    pub expense: Expense,
    pub success_message: String,
}

/// Request for a filtered, ordered expense list view
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExpenseListRequest {
    /// Category name to keep; None or empty string matches all
    pub category: Option<String>,
    /// Year-month prefix (YYYY-MM) to keep; None or empty string matches all
    pub month: Option<String>,
    /// Sort key ("date", "amount" or "category"); unrecognized values fall
    /// back to "date"
    pub sort_by: Option<String>,
}

/// Response containing an ordered expense list view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseListResponse {
    pub expenses: Vec<Expense>,
}

/// Response after deleting an expense
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeleteExpenseResponse {
    pub deleted: bool,
    pub success_message: String,
}

/// Aggregate statistics over a set of expenses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryStatistics {
    /// Sum of all amounts
    pub total: f64,
    /// Number of expenses
    pub count: usize,
    /// total / count, or 0.0 when there are no expenses
    pub average: f64,
}

/// Everything the analytics dashboard renders, in one payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyticsOverview {
    pub summary: SummaryStatistics,
    /// Total amount per category name; only categories that appear in at
    /// least one expense have a key. Key order is not meaningful.
    pub category_totals: HashMap<String, f64>,
    /// Total amount per YYYY-MM key; same emptiness rule as above
    pub monthly_totals: HashMap<String, f64>,
    /// Name of the category with the largest total, or "None"
    pub top_category: String,
    /// Total spent in the reference month
    pub current_month_total: f64,
    /// Number of distinct categories in use
    pub distinct_categories: usize,
}

/// Validation result for expense form input
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseFormValidation {
    pub is_valid: bool,
    pub errors: Vec<ExpenseFormError>,
    /// Parsed amount when the amount field validated cleanly
    pub cleaned_amount: Option<f64>,
}

/// Specific validation errors for expense forms
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ExpenseFormError {
    EmptyTitle,
    TitleTooLong(usize),
    EmptyAmount,
    InvalidAmountFormat(String),
    AmountNotPositive,
    AmountTooLarge(f64),
    UnknownCategory(String),
    InvalidDate(String),
}

impl Expense {
    /// Generate an expense ID from a creation timestamp
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("expense::{}", epoch_millis)
    }

    /// Parse an expense ID to extract the creation timestamp
    pub fn parse_id(id: &str) -> Result<u64, ExpenseIdError> {
        let parts: Vec<&str> = id.split("::").collect();
        if parts.len() != 2 || parts[0] != "expense" {
            return Err(ExpenseIdError::InvalidFormat);
        }

        parts[1]
            .parse::<u64>()
            .map_err(|_| ExpenseIdError::InvalidTimestamp)
    }

    /// Extract the creation timestamp from this expense's ID
    pub fn extract_timestamp(&self) -> Result<u64, ExpenseIdError> {
        Self::parse_id(&self.id)
    }

    /// Year-month key of this expense (first 7 characters of the date)
    pub fn year_month(&self) -> &str {
        if self.date.len() >= 7 {
            &self.date[0..7]
        } else {
            &self.date
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpenseIdError {
    InvalidFormat,
    InvalidTimestamp,
}

impl fmt::Display for ExpenseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpenseIdError::InvalidFormat => write!(f, "Invalid expense ID format"),
            ExpenseIdError::InvalidTimestamp => write!(f, "Invalid timestamp in expense ID"),
        }
    }
}

impl std::error::Error for ExpenseIdError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_expense_id() {
        let id = Expense::generate_id(1702516122000);
        assert_eq!(id, "expense::1702516122000");
    }

    #[test]
    fn test_parse_expense_id() {
        // Valid ID
        let timestamp = Expense::parse_id("expense::1702516122000").unwrap();
        assert_eq!(timestamp, 1702516122000);

        // Invalid format
        assert!(Expense::parse_id("invalid::format").is_err());
        assert!(Expense::parse_id("expense").is_err());
        assert!(Expense::parse_id("expense::1::2").is_err());

        // Invalid timestamp
        assert!(Expense::parse_id("expense::not_a_number").is_err());
    }

    #[test]
    fn test_extract_timestamp() {
        let expense = Expense {
            id: "expense::1702516122000".to_string(),
            title: "Bus ticket".to_string(),
            amount: 2.75,
            category: Category::Transport,
            date: "2023-12-14".to_string(),
            description: None,
        };

        assert_eq!(expense.extract_timestamp().unwrap(), 1702516122000);
    }

    #[test]
    fn test_year_month_key() {
        let expense = Expense {
            id: "expense::1".to_string(),
            title: "Lunch".to_string(),
            amount: 8.50,
            category: Category::Food,
            date: "2024-03-15".to_string(),
            description: None,
        };

        assert_eq!(expense.year_month(), "2024-03");
    }

    #[test]
    fn test_category_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_name(category.as_str()), Some(category));
        }
    }

    #[test]
    fn test_category_from_unknown_name() {
        assert_eq!(Category::from_name("Groceries"), None);
        assert_eq!(Category::from_name("food"), None);
        assert_eq!(Category::from_name(""), None);
    }

    #[test]
    fn test_sort_by_from_param() {
        assert_eq!(SortBy::from_param("date"), SortBy::Date);
        assert_eq!(SortBy::from_param("amount"), SortBy::Amount);
        assert_eq!(SortBy::from_param("category"), SortBy::Category);

        // Unrecognized values fall back to date ordering
        assert_eq!(SortBy::from_param("title"), SortBy::Date);
        assert_eq!(SortBy::from_param(""), SortBy::Date);
    }

    #[test]
    fn test_sort_by_default() {
        assert_eq!(SortBy::default(), SortBy::Date);
    }

    #[test]
    fn test_expense_json_round_trip() {
        let expense = Expense {
            id: "expense::1702516122000".to_string(),
            title: "Bus ticket".to_string(),
            amount: 2.75,
            category: Category::Transport,
            date: "2023-12-14".to_string(),
            description: None,
        };

        let json = serde_json::to_string(&expense).unwrap();
        assert!(json.contains("\"category\":\"Transport\""));

        let back: Expense = serde_json::from_str(&json).unwrap();
        assert_eq!(back, expense);
    }
}
