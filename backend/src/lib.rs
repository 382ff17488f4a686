//! # Expense Tracker Backend
//!
//! Contains all non-UI logic for the expense tracker application.
//!
//! This crate serves as the orchestration layer that brings together:
//! - **Domain**: Business logic for expense records, aggregation and views
//! - **Storage**: Data persistence mechanisms (in-memory, CSV files)
//! - **IO**: Mappers that expose domain results as plain `shared` DTOs
//!
//! The backend is UI-agnostic: a desktop shell, a web frontend or a CLI can
//! sit on top of `AppState` without modification.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! ```text
//! Presentation Layer (out of scope here)
//!     ↓
//! IO Layer (DTO mappers)
//!     ↓
//! Domain Layer (services, pure aggregation and query engines)
//!     ↓
//! Storage Layer (pluggable expense stores)
//! ```
//!
//! Data flows one direction: store snapshots feed the pure engines, whose
//! results go out as DTOs. Nothing writes back to the store except explicit
//! create/update/delete calls on the expense service.

pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use log::info;
use std::sync::Arc;

use crate::domain::{AnalyticsService, ExpenseService};
use crate::storage::Connection;

pub use storage::{CsvConnection, MemoryConnection};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState<C: Connection> {
    pub expense_service: ExpenseService<C>,
    pub analytics_service: AnalyticsService<C>,
}

/// Initialize the backend with all required services.
///
/// The storage connection is created by the caller and handed in here; the
/// composition root owns its lifecycle and no service holds global state.
pub fn initialize_backend<C: Connection>(connection: Arc<C>) -> Result<AppState<C>> {
    info!("Setting up domain services");
    let expense_service = ExpenseService::new(Arc::clone(&connection));
    let analytics_service = AnalyticsService::new(connection);

    Ok(AppState {
        expense_service,
        analytics_service,
    })
}
