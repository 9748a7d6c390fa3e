//! Property-based tests for the DbDesk core library

mod fixtures;

mod flow_tests;
mod label_tests;
mod selector_tests;
mod store_tests;
