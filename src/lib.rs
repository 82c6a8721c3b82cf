//! Gratuity Engine for restaurant event close-out
//!
//! This crate computes sales and expense totals for a night's event, splits
//! the gratuity pool among the staff, closes events into immutable snapshots
//! and reports over them.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
