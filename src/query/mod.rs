//! Query translation for the two backing stores
//!
//! One [`ProteinFilter`](crate::model::ProteinFilter) drives both stores:
//! - `document` renders MongoDB query documents
//! - `cypher` renders parameterized Cypher statements

pub mod cypher;
pub mod document;

pub use cypher::{is_valid_identifier, CypherQueries, DEFAULT_NODE_LABEL, DEFAULT_RELATIONSHIP_TYPE};
pub use document::{document_filter, sequence_projection};
