//! Command registry integration tests
