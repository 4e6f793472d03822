//! Maturity Lens - Digital operating maturity classification
//!
//! Scores a small business's multiple-choice intake against a weighted signal
//! table, optionally enriches the result with evidence gathered from the
//! business's website, map listing and social profile under a hard deadline,
//! and memoizes complete responses in a bounded, time-expiring cache.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
