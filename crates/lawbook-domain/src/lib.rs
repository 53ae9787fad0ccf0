//! Lawbook Domain Layer
//!
//! This crate contains the record model shared by every other Lawbook crate.
//! It defines the two persisted collections, their identity keys, the
//! partial-update patches used by reconciliation, the legal-domain labels,
//! and the `LegalStore` trait that the storage layer implements.
//!
//! ## Key Concepts
//!
//! - **ArticleRecord**: one statute article, keyed by `(title, article_number)`
//! - **CaseRecord**: one court case narrative, keyed by `title`
//! - **Collection**: which of the two record sets a document belongs in
//! - **LawDomain**: the legal subject-matter category of a record
//! - **RunId**: UUIDv7 tag attached to every import / reconciliation run
//!
//! ## Architecture
//!
//! - Pure data and trait definitions only
//! - No I/O; infrastructure implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod failure;
pub mod law_domain;
pub mod record;
pub mod run;
pub mod traits;

// Re-exports for convenience
pub use document::RawDocument;
pub use failure::{FailureStage, RecordFailure};
pub use law_domain::LawDomain;
pub use record::{ArticleKey, ArticlePatch, ArticleRecord, CasePatch, CaseRecord, Collection};
pub use run::RunId;
pub use traits::{LegalStore, RecordFilter};
