//! Lawbook Extractor
//!
//! Turns raw legal documents into statute articles and case records.
//!
//! # Overview
//!
//! Statute documents are cut into article units at line-initial
//! `第<numeral><unit>` markers. Case narratives are kept whole and mined for
//! court, dates, dispute point, and outcome. Both go through the Gatekeeper
//! for routing and domain classification before they reach the store.
//!
//! # Architecture
//!
//! ```text
//! RawDocument → RecordRouter → DocumentSegmenter / FieldExtractor
//!             → DomainClassifier → LegalStore
//! ```
//!
//! # Key Features
//!
//! - **Segmentation**: positional article splitting with merge repair
//! - **Field extraction**: ordered pattern + validation pairs, never guessing
//! - **Idempotent import**: existing keys are skipped, not duplicated
//! - **Fail-forward**: per-record failures land in the report, the run goes on
//!
//! # Example Usage
//!
//! ```no_run
//! use lawbook_domain::RawDocument;
//! use lawbook_extractor::{ExtractorConfig, IngestHint, Ingestor};
//! use lawbook_gatekeeper::GatekeeperConfig;
//! use lawbook_store::SqliteStore;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = SqliteStore::new(":memory:")?;
//! let ingestor = Ingestor::new(ExtractorConfig::default(), &GatekeeperConfig::default())?;
//!
//! let document = RawDocument::from_markdown(
//!     "contract-law",
//!     "# 中华人民共和国合同法\n\n第一条 为了保护合同当事人的合法权益，制定本法。",
//! );
//! let report = ingestor.ingest_document(&mut store, &document, &IngestHint::default());
//!
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
pub mod fields;
mod ingest;
pub mod segmenter;
pub mod tables;
mod types;

pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use fields::{is_valid_court_name, CaseFields, FieldExtractor, PublishInfo};
pub use ingest::{Ingestor, SKIP_DIRS, SKIP_FILES};
pub use segmenter::DocumentSegmenter;
pub use types::{
    ArticleMarker, ArticleUnit, IngestHint, IngestReport, MarkerUnit, MergeSplit,
};
