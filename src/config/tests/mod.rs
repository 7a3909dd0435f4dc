//! Unit tests for configuration loading and precedence.
//!
//! Tests are organised into modules by functional area:
//! - `helpers`: Shared test utilities
//! - `cli_flags`: Long and short command-line flags
//! - `precedence`: Layer precedence tests
//! - `operation_mode`: Operation mode determination and validation tests
//! - `field_resolution`: API URL, API key, page size, and filter resolution

mod helpers;
