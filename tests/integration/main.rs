//! Integration tests

mod api_tests;
mod memory_store;
