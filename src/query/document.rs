//! MongoDB query documents
//!
//! Absent filters are left out of the query document entirely; substring
//! filters become a case-insensitive `$regex` over the escaped user text so
//! they match literally, like Cypher `CONTAINS`.

use mongodb::bson::{doc, Document};

use crate::model::{ProteinFilter, FIELD_EC_NUMBER, FIELD_ENTRY, FIELD_INTERPRO, FIELD_SEQUENCE};

/// Translate a filter into a `find` / `count_documents` query document
pub fn document_filter(filter: &ProteinFilter) -> Document {
    let mut query = Document::new();

    if let Some(entry) = &filter.entry {
        query.insert(FIELD_ENTRY, entry.as_str());
    }
    if let Some(interpro) = &filter.interpro {
        query.insert(FIELD_INTERPRO, substring_pattern(interpro));
    }
    if let Some(ec_number) = &filter.ec_number {
        query.insert(FIELD_EC_NUMBER, substring_pattern(ec_number));
    }

    query
}

/// Projection that fetches only the sequence of each document
pub fn sequence_projection() -> Document {
    let mut projection = Document::new();
    projection.insert(FIELD_SEQUENCE, 1);
    projection.insert("_id", 0);
    projection
}

fn substring_pattern(text: &str) -> Document {
    doc! {
        "$regex": regex::escape(text),
        "$options": "i",
    }
}
