//! Structured logging and run reporting
//!
//! This module holds the logging helpers used across the application.

pub mod logging;
