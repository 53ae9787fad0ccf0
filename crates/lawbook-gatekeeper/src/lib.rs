//! Lawbook Gatekeeper
//!
//! Decides where a document belongs before it is stored, and re-decides it
//! for stored records during reconciliation.
//!
//! The Gatekeeper provides:
//! - Legal-domain classification from weighted keyword tiers
//! - Statute / case routing from title shape and content features
//!
//! Both are pure functions of `(title, content)`: the same input always
//! yields the same answer.
//!
//! # Examples
//!
//! ```
//! use lawbook_domain::{Collection, LawDomain};
//! use lawbook_gatekeeper::{DomainClassifier, GatekeeperConfig, RecordRouter};
//!
//! let config = GatekeeperConfig::default();
//! let router = RecordRouter::new(&config).unwrap();
//! let classifier = DomainClassifier::new(&config);
//!
//! let title = "张三诉某公司劳动争议案";
//! let content = "争议焦点：是否存在劳动关系";
//! assert_eq!(router.route(title, content), Collection::Case);
//! assert_eq!(classifier.classify(title, content), LawDomain::Labor);
//! ```

#![warn(missing_docs)]

mod classifier;
mod config;
mod error;
pub mod keywords;
mod router;

pub use classifier::DomainClassifier;
pub use config::GatekeeperConfig;
pub use error::GatekeeperError;
pub use router::{is_regulation_title, RecordRouter, RouteDecision, RouteRule};
