//! Shared types, errors, and configuration for JustSplit.
//!
//! This crate provides common types used across all other crates:
//! - Currency codes and money with decimal precision
//! - Typed IDs for users, expenses, events, groups and settlements
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, ExchangeConfig, ServerConfig, StorageConfig};
pub use error::AppError;
pub use types::{CurrencyCode, Money};
