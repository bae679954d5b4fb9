//! Core types shared across the report aggregator.
//!
//! - [`error`]: typed errors ([`AggregatorError`]) and their user-facing
//!   rendering ([`ErrorContext`], [`user_friendly_error`])

pub mod error;

pub use error::{AggregatorError, ErrorContext, user_friendly_error};
