//! Expense service domain logic for the expense tracker.
use anyhow::Result;
use chrono::NaiveDate;
use log::info;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

use shared::{
    Category, CreateExpenseRequest, DeleteExpenseResponse, Expense as SharedExpense,
    ExpenseFormError, ExpenseFormValidation, ExpenseListRequest, ExpenseListResponse,
    ExpenseResponse, UpdateExpenseRequest,
};

use crate::domain::models::expense::Expense as DomainExpense;
use crate::domain::query;
use crate::io::mappers::expense_mapper::ExpenseMapper;
use crate::storage::{Connection, ExpenseStorage};

/// Longest accepted title, in characters
pub const MAX_TITLE_LENGTH: usize = 256;
/// Largest accepted expense amount
pub const MAX_AMOUNT: f64 = 1_000_000.0;

/// Validation failures rejected before a record reaches the store
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpenseValidationError {
    #[error("Title must be between 1 and 256 characters")]
    InvalidTitle,
    #[error("Amount must be greater than zero")]
    AmountNotPositive,
    #[error("Amount must be a finite number")]
    AmountNotFinite,
    #[error("Amount must not exceed {0:.2}")]
    AmountTooLarge(f64),
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
}

#[derive(Clone)]
pub struct ExpenseService<C: Connection> {
    expense_repository: C::ExpenseRepository,
}

impl<C: Connection> ExpenseService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        let expense_repository = connection.create_expense_repository();
        Self { expense_repository }
    }

    pub async fn create_expense(&self, request: CreateExpenseRequest) -> Result<ExpenseResponse> {
        Self::validate_fields(&request.title, request.amount)?;
        let category = Self::parse_category(&request.category)?;
        let date = Self::parse_date(&request.date)?;

        let now_millis = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis() as u64;

        let expense = DomainExpense {
            id: SharedExpense::generate_id(now_millis),
            title: request.title.trim().to_string(),
            amount: request.amount,
            category,
            date,
            description: request
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
        };

        self.expense_repository.store_expense(&expense).await?;
        info!(
            "Created expense {}: '{}' for {:.2} ({})",
            expense.id, expense.title, expense.amount, expense.category
        );

        let success_message = format!("Expense '{}' added successfully", expense.title);
        Ok(ExpenseResponse {
            expense: ExpenseMapper::to_dto(expense),
            success_message,
        })
    }

    /// Replace all mutable fields of an existing expense; the id is
    /// preserved. An unknown id surfaces as the store's not-found error.
    pub async fn update_expense(&self, request: UpdateExpenseRequest) -> Result<ExpenseResponse> {
        Self::validate_fields(&request.title, request.amount)?;
        let category = Self::parse_category(&request.category)?;
        let date = Self::parse_date(&request.date)?;

        let expense = DomainExpense {
            id: request.id,
            title: request.title.trim().to_string(),
            amount: request.amount,
            category,
            date,
            description: request
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
        };

        self.expense_repository.update_expense(&expense).await?;
        info!("Updated expense {}", expense.id);

        let success_message = format!("Expense '{}' updated successfully", expense.title);
        Ok(ExpenseResponse {
            expense: ExpenseMapper::to_dto(expense),
            success_message,
        })
    }

    pub async fn delete_expense(&self, expense_id: &str) -> Result<DeleteExpenseResponse> {
        let deleted = self.expense_repository.delete_expense(expense_id).await?;

        let success_message = if deleted {
            "Expense deleted successfully".to_string()
        } else {
            "No expense was deleted".to_string()
        };

        Ok(DeleteExpenseResponse {
            deleted,
            success_message,
        })
    }

    pub async fn get_expense(&self, expense_id: &str) -> Result<Option<SharedExpense>> {
        let expense = self.expense_repository.get_expense(expense_id).await?;
        Ok(expense.map(ExpenseMapper::to_dto))
    }

    /// Produce the filtered, ordered list view for the given request.
    ///
    /// The store is read once for a snapshot; filtering and ordering happen
    /// in the pure query engine.
    pub async fn list_expenses(&self, request: ExpenseListRequest) -> Result<ExpenseListResponse> {
        let filter = ExpenseMapper::to_filter(request)?;
        let snapshot = self.expense_repository.list_expenses().await?;

        let view = query::apply_filter(&snapshot, &filter);

        Ok(ExpenseListResponse {
            expenses: view.into_iter().map(ExpenseMapper::to_dto).collect(),
        })
    }

    /// Validate expense form input without touching the store.
    ///
    /// Collects every field error instead of stopping at the first, so the
    /// form can highlight all problems at once.
    pub fn validate_expense_form(
        &self,
        title: &str,
        amount_input: &str,
        category: &str,
        date: &str,
    ) -> ExpenseFormValidation {
        let mut errors = Vec::new();

        let title_trimmed = title.trim();
        if title_trimmed.is_empty() {
            errors.push(ExpenseFormError::EmptyTitle);
        } else if title_trimmed.len() > MAX_TITLE_LENGTH {
            errors.push(ExpenseFormError::TitleTooLong(title_trimmed.len()));
        }

        let cleaned_amount = if amount_input.trim().is_empty() {
            errors.push(ExpenseFormError::EmptyAmount);
            None
        } else {
            match Self::clean_and_parse_amount(amount_input) {
                Ok(amount) => {
                    if !amount.is_finite() {
                        errors.push(ExpenseFormError::InvalidAmountFormat(
                            amount_input.trim().to_string(),
                        ));
                        None
                    } else if amount <= 0.0 {
                        errors.push(ExpenseFormError::AmountNotPositive);
                        None
                    } else if amount > MAX_AMOUNT {
                        errors.push(ExpenseFormError::AmountTooLarge(MAX_AMOUNT));
                        None
                    } else {
                        Some(amount)
                    }
                }
                Err(parse_error) => {
                    errors.push(ExpenseFormError::InvalidAmountFormat(parse_error));
                    None
                }
            }
        };

        if Category::from_name(category).is_none() {
            errors.push(ExpenseFormError::UnknownCategory(category.to_string()));
        }

        if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
            errors.push(ExpenseFormError::InvalidDate(date.to_string()));
        }

        ExpenseFormValidation {
            is_valid: errors.is_empty(),
            errors,
            cleaned_amount,
        }
    }

    /// Clean and parse amount input string (tolerates "$", commas, spaces)
    fn clean_and_parse_amount(amount_input: &str) -> Result<f64, String> {
        let cleaned = amount_input
            .trim()
            .replace('$', "")
            .replace(',', "")
            .replace(' ', "");

        if cleaned.is_empty() {
            return Err("Empty amount after cleaning".to_string());
        }

        cleaned
            .parse::<f64>()
            .map_err(|e| format!("Invalid number format: {}", e))
    }

    fn validate_fields(title: &str, amount: f64) -> Result<(), ExpenseValidationError> {
        let title = title.trim();
        if title.is_empty() || title.len() > MAX_TITLE_LENGTH {
            return Err(ExpenseValidationError::InvalidTitle);
        }

        if !amount.is_finite() {
            return Err(ExpenseValidationError::AmountNotFinite);
        }
        if amount <= 0.0 {
            return Err(ExpenseValidationError::AmountNotPositive);
        }
        if amount > MAX_AMOUNT {
            return Err(ExpenseValidationError::AmountTooLarge(MAX_AMOUNT));
        }

        Ok(())
    }

    fn parse_category(name: &str) -> Result<Category, ExpenseValidationError> {
        Category::from_name(name)
            .ok_or_else(|| ExpenseValidationError::UnknownCategory(name.to_string()))
    }

    fn parse_date(value: &str) -> Result<NaiveDate, ExpenseValidationError> {
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map_err(|_| ExpenseValidationError::InvalidDate(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryConnection;
    use tokio::time::{sleep, Duration};

    fn create_test_service() -> ExpenseService<MemoryConnection> {
        ExpenseService::new(Arc::new(MemoryConnection::new()))
    }

    fn create_request(title: &str, amount: f64, category: &str, date: &str) -> CreateExpenseRequest {
        CreateExpenseRequest {
            title: title.to_string(),
            amount,
            category: category.to_string(),
            date: date.to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_expense() {
        let service = create_test_service();

        let response = service
            .create_expense(create_request("Bus pass", 30.0, "Transport", "2024-01-05"))
            .await
            .unwrap();

        assert_eq!(response.expense.title, "Bus pass");
        assert_eq!(response.expense.category, Category::Transport);
        assert_eq!(response.expense.date, "2024-01-05");

        let fetched = service.get_expense(&response.expense.id).await.unwrap();
        assert_eq!(fetched, Some(response.expense));
    }

    #[tokio::test]
    async fn test_create_trims_title_and_empty_description() {
        let service = create_test_service();

        let mut request = create_request("  Coffee  ", 3.5, "Food", "2024-01-05");
        request.description = Some("   ".to_string());

        let response = service.create_expense(request).await.unwrap();
        assert_eq!(response.expense.title, "Coffee");
        assert_eq!(response.expense.description, None);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input() {
        let service = create_test_service();

        // Empty title
        let result = service
            .create_expense(create_request("   ", 10.0, "Food", "2024-01-05"))
            .await;
        assert!(result.is_err());

        // Non-positive amount
        let result = service
            .create_expense(create_request("Lunch", 0.0, "Food", "2024-01-05"))
            .await;
        assert_eq!(
            result.unwrap_err().downcast_ref::<ExpenseValidationError>(),
            Some(&ExpenseValidationError::AmountNotPositive)
        );

        let result = service
            .create_expense(create_request("Lunch", -4.0, "Food", "2024-01-05"))
            .await;
        assert!(result.is_err());

        // Amount above the cap
        let result = service
            .create_expense(create_request("Lunch", 2_000_000.0, "Food", "2024-01-05"))
            .await;
        assert!(result.is_err());

        // Unknown category
        let result = service
            .create_expense(create_request("Lunch", 10.0, "Rent", "2024-01-05"))
            .await;
        assert!(result.is_err());

        // Malformed date
        let result = service
            .create_expense(create_request("Lunch", 10.0, "Food", "05/01/2024"))
            .await;
        assert!(result.is_err());

        // Nothing slipped into the store
        let list = service
            .list_expenses(ExpenseListRequest::default())
            .await
            .unwrap();
        assert!(list.expenses.is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_preserves_id() {
        let service = create_test_service();

        let created = service
            .create_expense(create_request("Gym", 25.0, "Health", "2024-01-10"))
            .await
            .unwrap();

        let response = service
            .update_expense(UpdateExpenseRequest {
                id: created.expense.id.clone(),
                title: "Gym membership".to_string(),
                amount: 35.0,
                category: "Health".to_string(),
                date: "2024-01-12".to_string(),
                description: Some("Monthly".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(response.expense.id, created.expense.id);
        assert_eq!(response.expense.title, "Gym membership");
        assert_eq!(response.expense.amount, 35.0);
        assert_eq!(response.expense.date, "2024-01-12");
    }

    #[tokio::test]
    async fn test_update_unknown_id_fails() {
        let service = create_test_service();

        let result = service
            .update_expense(UpdateExpenseRequest {
                id: "expense::missing".to_string(),
                title: "Gym".to_string(),
                amount: 25.0,
                category: "Health".to_string(),
                date: "2024-01-12".to_string(),
                description: None,
            })
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_delete_expense_reports_outcome() {
        let service = create_test_service();

        let created = service
            .create_expense(create_request("Snacks", 4.2, "Food", "2024-01-10"))
            .await
            .unwrap();

        let response = service.delete_expense(&created.expense.id).await.unwrap();
        assert!(response.deleted);

        let response = service.delete_expense(&created.expense.id).await.unwrap();
        assert!(!response.deleted);
        assert_eq!(response.success_message, "No expense was deleted");
    }

    #[tokio::test]
    async fn test_list_expenses_filters_and_sorts() {
        let service = create_test_service();

        service
            .create_expense(create_request("Lunch", 10.0, "Food", "2024-01-01"))
            .await
            .unwrap();
        sleep(Duration::from_millis(2)).await;
        service
            .create_expense(create_request("Train", 50.0, "Transport", "2024-03-01"))
            .await
            .unwrap();
        sleep(Duration::from_millis(2)).await;
        service
            .create_expense(create_request("Dinner", 30.0, "Food", "2024-02-01"))
            .await
            .unwrap();

        // Default view: date descending
        let list = service
            .list_expenses(ExpenseListRequest::default())
            .await
            .unwrap();
        let dates: Vec<&str> = list.expenses.iter().map(|e| e.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-02-01", "2024-01-01"]);

        // Category filter with amount ordering
        let list = service
            .list_expenses(ExpenseListRequest {
                category: Some("Food".to_string()),
                month: None,
                sort_by: Some("amount".to_string()),
            })
            .await
            .unwrap();
        let amounts: Vec<f64> = list.expenses.iter().map(|e| e.amount).collect();
        assert_eq!(amounts, vec![30.0, 10.0]);

        // Month filter
        let list = service
            .list_expenses(ExpenseListRequest {
                category: None,
                month: Some("2024-03".to_string()),
                sort_by: None,
            })
            .await
            .unwrap();
        assert_eq!(list.expenses.len(), 1);
        assert_eq!(list.expenses[0].title, "Train");
    }

    #[tokio::test]
    async fn test_validate_expense_form_success() {
        let service = create_test_service();

        let validation = service.validate_expense_form("Lunch", "$12.50", "Food", "2024-01-05");
        assert!(validation.is_valid);
        assert!(validation.errors.is_empty());
        assert_eq!(validation.cleaned_amount, Some(12.5));
    }

    #[tokio::test]
    async fn test_validate_expense_form_collects_all_errors() {
        let service = create_test_service();

        let validation = service.validate_expense_form("", "abc", "Rent", "not-a-date");
        assert!(!validation.is_valid);
        assert!(validation.errors.contains(&ExpenseFormError::EmptyTitle));
        assert!(validation
            .errors
            .iter()
            .any(|e| matches!(e, ExpenseFormError::InvalidAmountFormat(_))));
        assert!(validation
            .errors
            .contains(&ExpenseFormError::UnknownCategory("Rent".to_string())));
        assert!(validation
            .errors
            .contains(&ExpenseFormError::InvalidDate("not-a-date".to_string())));
        assert_eq!(validation.cleaned_amount, None);
    }

    #[tokio::test]
    async fn test_validate_expense_form_rejects_non_positive_amount() {
        let service = create_test_service();

        let validation = service.validate_expense_form("Lunch", "0", "Food", "2024-01-05");
        assert!(!validation.is_valid);
        assert!(validation
            .errors
            .contains(&ExpenseFormError::AmountNotPositive));
    }
}
