//! Core budget logic for the life planner.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `budget` - Budget plans, period totals, base income and bucket variance
//! - `reports` - HTML report documents rendered from computed figures
//! - `store` - Storage traits implemented by the database layer

pub mod budget;
pub mod reports;
pub mod store;
