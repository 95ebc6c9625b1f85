//! Report renderers for URL scoring results.
//!
//! - [`terminal`] — colored, tabular output with summary box and per-URL
//!   feature details; respects `--verbose` / `--quiet`.
//!
//! The JSON report is plain `serde_json` serialization of the scored
//! records and lives in `main`.

pub mod terminal;
