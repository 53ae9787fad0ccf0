//! Lawbook Janitor
//!
//! Reconciliation of stored statute and case records.
//!
//! # Overview
//!
//! Extraction and routing heuristics change over time, so records ingested
//! under older rules drift. A reconciliation pass re-runs the current
//! heuristics over everything in the store:
//! - **Migration**: records the router now places in the other collection
//!   are moved there (insert at target, then delete at source)
//! - **Backfill**: unset fields are extracted again; dispute and result
//!   summaries are replaced only by strictly longer matches
//! - **Reclassification**: records labelled `其他`, `案例`, or nothing get a
//!   computed legal domain
//! - **Merge repair**: long statute records that swallowed their neighbours
//!   are split into one record per article
//! - **Remnant strip**: a record's own marker is removed from the front of
//!   its content
//!
//! Each pass only tightens data. A second pass over an unchanged store
//! reports zero mutations.
//!
//! # Usage
//!
//! ## One-time Pass
//!
//! ```no_run
//! use lawbook_janitor::Reconciler;
//! use lawbook_store::SqliteStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = SqliteStore::new("lawbook.db")?;
//! let reconciler = Reconciler::default_config()?;
//!
//! let summary = reconciler.run(&mut store)?;
//! println!("{}", summary.summary());
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration Presets
//!
//! ```
//! use lawbook_janitor::JanitorConfig;
//!
//! // Every step, merge scan above 1000 characters
//! let config = JanitorConfig::default();
//!
//! // Every step, merge scan above 200 characters
//! let config = JanitorConfig::thorough();
//!
//! // Dry run without migration
//! let config = JanitorConfig::conservative();
//! ```
//!
//! # Configuration
//!
//! ```toml
//! [janitor]
//! merge_scan_min_chars = 1000
//! dry_run = false
//! migrate = true
//! backfill = true
//! split_merged = true
//! strip_marker_remnants = true
//! worker_interval_minutes = 60
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod metrics;
mod reconciler;
mod worker;

pub use config::JanitorConfig;
pub use error::JanitorError;
pub use metrics::ReconcileSummary;
pub use reconciler::Reconciler;
pub use worker::ReconcileWorker;
