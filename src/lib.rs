//! Graph-theoretic password strength analysis
//!
//! This library analyzes the structure of a password by building a small
//! graph over its characters and measuring how much of it is explained by
//! known weak relations: keyboard adjacency, shift pairs, alphabetic and
//! numeric sequences and repeated characters.
//!
//! # Features
//!
//! - `async` (default): Enables async analysis with cancellation support
//! - `tracing`: Enables logging via tracing crate
//! - `cli`: Builds the `pwd-graph` binary (analyze one password, print JSON)
//!
//! # Example
//!
//! ```rust,no_run
//! use pwd_graph::analyze_password;
//! use secrecy::SecretString;
//!
//! let password = SecretString::new("MyP@ssw0rd!".to_string().into());
//!
//! #[cfg(feature = "async")]
//! let result = analyze_password(&password, None);
//!
//! #[cfg(not(feature = "async"))]
//! let result = analyze_password(&password);
//!
//! let result = result.expect("non-empty password");
//! println!("Score: {:.1}", result.final_score);
//! println!("Rating: {}", result.rating);
//! ```

// Internal modules
mod analyzer;
mod graph;
mod metrics;
mod reference;
mod scoring;

// Public API
pub use analyzer::{AnalysisResult, AnalyzeError, MAX_PASSWORD_LEN, analyze_password};
pub use graph::{InducedEdge, InducedGraph};
pub use metrics::{LongestPath, StructuralMetrics, VertexCover};
pub use reference::{CharClass, ReferenceGraph, RelationKind, RelationSet, reference_graph};
pub use scoring::{REFERENCE_LENGTH, Rating};

#[cfg(feature = "async")]
pub use analyzer::analyze_password_tx;
