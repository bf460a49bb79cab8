//! Utility modules.

/// Parsing of the date and timestamp formats registrars return.
pub mod datetime;

/// Log sanitization utilities to prevent credential exposure.
pub mod log_sanitizer;
