//! Utility functions and helpers.
//!
//! Environment variable lookup with the `BILLING_KIT_` prefix.

pub mod env;

pub use env::{get_env_bool_with_prefix, get_env_list_with_prefix, get_env_with_prefix};
