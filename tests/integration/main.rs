//! Integration tests for markers
//!
//! Tests are organized by feature:
//! - cli_test: the `markers` binary end to end
//! - source_test: loading marker files from fixtures
//! - overlay_test: driving an overlay the way a host player does

mod cli_test;
mod helpers;
mod overlay_test;
mod source_test;
