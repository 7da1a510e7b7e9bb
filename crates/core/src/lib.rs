//! Core settlement logic for JustSplit.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Network and storage access go through the traits in `currency::gateway`.
//!
//! # Modules
//!
//! - `expense` - Expenses, users, events and groups, and amount validation
//! - `currency` - Exchange rates, fallback table and the caching gateway
//! - `settlement` - Balance accumulation and debt netting
//! - `dashboard` - Spend summaries in a single currency

pub mod currency;
pub mod dashboard;
pub mod expense;
pub mod settlement;
