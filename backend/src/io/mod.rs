//! # IO Module
//!
//! The interface layer between the domain and whatever presentation sits on
//! top. Domain models stay internal; everything leaving the backend goes
//! through the mappers into the plain DTOs of the `shared` crate.

pub mod mappers;

pub use mappers::ExpenseMapper;
