//! Integration tests for the reshape gen/apply workflow

mod binary_cli;
mod config_integration;
mod test_utils;
