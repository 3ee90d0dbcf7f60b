/*! Integration tests for paperkit.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - config: Tests for the configuration tree, codecs, difficulty nodes and stores
 * - lang: Tests for translation lookup and message formatting
 * - storage: Tests for storage types and the MySQL connection manager
 * - commands: Tests for the command registry
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("paperkit=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod commands;
mod config;
mod helpers;
mod lang;
