//! Progressive income tax engine for the Nigeria Tax Act 2025.
//!
//! This crate computes personal income tax for two taxpayer profiles: a
//! salaried worker with a fixed monthly income, and a variable-income worker
//! who logs income (possibly in a foreign currency) and work expenses month
//! by month. The bracket table, relief policy and default exchange rates are
//! loaded from YAML configuration.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;

pub use calculation::{BracketApplication, apply_brackets, calculate_tax};
