//! End-to-end compilation tests
//!
//! These tests build filter trees by hand, compile them against the memo
//! and attachment catalogs, and check the exact SQL text and bind order.

mod helpers;

mod errors;
