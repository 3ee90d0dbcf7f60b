//! Configuration tree integration tests
//!
//! Covers path derivation, registration priorities, typed reads and writes,
//! difficulty tiers, persistence through `MemoryStore`, and schema upgrades.

mod codecs;
mod difficulty;
mod paths;
mod persistence;
mod registration;
