//! Shared types, errors, and configuration for the life planner budget service.
//!
//! This crate provides common types used across all other crates:
//! - Money and reporting-period helpers with decimal precision
//! - Typed IDs for type-safe entity references
//! - Application-wide error types
//! - Configuration management
//! - JWT claims and token validation
//! - An injected, expiring token cache

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod token_cache;
pub mod types;

#[cfg(test)]
mod jwt_tests;

pub use auth::Claims;
pub use config::AppConfig;
pub use error::AppError;
pub use jwt::{JwtConfig, JwtError, JwtService};
pub use token_cache::{CachedToken, TokenCache};
