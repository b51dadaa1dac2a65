//! Protein data model shared by the document store and the graph store

pub mod filter;
pub mod record;

pub use filter::{contains_ignore_case, ProteinFilter};
pub use record::{
    GraphProtein, Neighbor, ProteinNode, ProteinRecord, SimilarityEdge, FIELD_EC_NUMBER,
    FIELD_ENTRY, FIELD_INTERPRO, FIELD_SEQUENCE, MISSING_ATTRIBUTE,
};
