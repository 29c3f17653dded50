//! # Opslog - Field Operations Logbook
//!
//! A command-line logbook for field service crews. An operator records the
//! phases of a job cycle - displacement, mobilization, the operation itself,
//! waiting periods, lunch breaks, refuelings and demobilization - and exports
//! a formatted report at the end.
//!
//! ## Features
//!
//! - **Phase Tracking**: Start/end timestamps and durations for every phase
//! - **Operation History**: Ordered, persisted record of all operations
//! - **Sub-events**: Waiting periods (with reasons), lunch breaks, refuelings
//! - **Report Generation**: HTML and plain-text operation reports
//! - **Data Export**: CSV and JSON export of the history
//! - **Remote Mirror**: Best-effort sync of closed operations to a remote
//!   document collection
//!
//! ## Usage
//!
//! ```rust,no_run
//! use opslog::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod libs;
pub mod store;
