//! # Domain Module
//!
//! Contains all business logic for the expense tracker.
//!
//! This module encapsulates the core business rules, entities, and services
//! that define how expenses are modeled, aggregated and queried. It operates
//! independently of any specific UI framework or storage mechanism.
//!
//! ## Module Organization
//!
//! - **expense_service**: Expense CRUD operations, validation and list views
//! - **analytics_service**: Pure aggregation over expense snapshots
//!   (category totals, monthly totals, summary statistics, top category)
//! - **query**: Filtering and stable ordering of expense snapshots
//! - **models**: Domain entities
//!
//! ## Business Rules
//!
//! - Expenses must have a non-empty title and a positive, finite amount
//! - Every expense belongs to exactly one category from the fixed set
//! - Aggregation never fails: empty snapshots yield zero/empty results
//! - Derived views never mutate the snapshot they are computed from

pub mod analytics_service;
pub mod expense_service;
pub mod models;
pub mod query;

pub use analytics_service::*;
pub use expense_service::*;
pub use query::*;
