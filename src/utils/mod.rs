//! Shared utilities
//!
//! Logging helpers, progress bars and console summaries used by the
//! ingestion layer and the command line tool.

pub mod logging;
