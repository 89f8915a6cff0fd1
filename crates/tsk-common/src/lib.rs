//! Common utilities for the tskeys workspace.
//!
//! This crate provides the pieces every other tskeys crate leans on:
//! - Centralized recursion limits (`limits`)
//! - Stack growth for deep syntax tree walks (`stack`)
//! - Tracing subscriber setup driven by `TSK_LOG` / `TSK_LOG_FORMAT`

// Centralized limits and thresholds
pub mod limits;

// Stack growth for recursive walks
pub mod stack;

// Tracing subscriber configuration
pub mod tracing_config;
pub use tracing_config::{LogFormat, init_tracing};
