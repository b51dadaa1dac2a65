//! Summary statistics over the protein dataset
//!
//! - EC-number cardinality buckets, computed by the graph store
//! - Sequence lengths, extracted from the document store

pub mod ec;
pub mod lengths;

pub use ec::{ec_category_distribution, EcCategory, EcDistribution};
pub use lengths::{
    sequence_length, sequence_length_distribution, HistogramBin, LengthHistogram,
    DEFAULT_BIN_WIDTH,
};
