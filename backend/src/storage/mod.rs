//! # Storage Module
//!
//! Handles all data persistence operations for the expense tracker.
//!
//! This module abstracts away the specific storage implementation details and
//! provides a consistent interface for persisting and retrieving expense
//! records. The implementation can be swapped out (in-memory, CSV files,
//! a real database, cloud storage, etc.) without affecting the domain logic.
//!
//! ## Key Responsibilities
//!
//! - **Data Persistence**: Saving expense records to the chosen backend
//! - **Data Retrieval**: Loading stored records back as snapshots
//! - **Storage Abstraction**: Providing a consistent API regardless of backend
//! - **Uniqueness**: Rejecting duplicate record ids at the storage boundary
//!
//! ## Current Implementations
//!
//! - **In-memory**: mock-grade store for tests and throwaway sessions
//! - **CSV files**: one `expenses.csv` under a base directory, rewritten
//!   atomically on every mutation
//!
//! ## Design Principles
//!
//! - **Repository Pattern**: Clean separation between domain and data access
//! - **Dependency Inversion**: Domain depends on storage abstractions, not
//!   implementations
//! - **Explicit Lifecycle**: Connections are created by the composition root
//!   and passed by reference; no process-wide storage state

pub mod csv;
pub mod memory;
pub mod traits;

// Re-export the main types that other modules need
pub use csv::{CsvConnection, ExpenseRepository};
pub use memory::{MemoryConnection, MemoryExpenseRepository};
pub use traits::{Connection, ExpenseStorage};
