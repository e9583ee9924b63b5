//! # lexcase-cli: Lifecycle Engine Command-Line Interface
//!
//! Thin clap front end over `lexcase-lifecycle`. Reads snapshots as JSON
//! files (or `-` for stdin), runs the engine, and prints text, JSON or YAML.
//!
//! ## Subcommands
//!
//! - `resolve`: Resolve a snapshot and report the deciding rule and drift
//! - `progress`: Render the step-indexed progress view
//! - `summary`: Dashboard summary for one snapshot or an array of them
//! - `table`: Export the status presentation table
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers live in their own modules.
//! - Handlers delegate to the engine. No lifecycle rules here.
//! - Renderers return `String` so they can be tested without capturing stdout.

pub mod input;
pub mod output;
pub mod progress;
pub mod resolve;
pub mod summary;
pub mod table;
