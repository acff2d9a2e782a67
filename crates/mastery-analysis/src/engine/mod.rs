//! Drivers around the posterior engine: per-record and batch classification,
//! and the dense mastery grid.

pub mod classifier;
pub mod grid;
pub mod types;

pub use classifier::MasteryClassifier;
pub use grid::MasteryGrid;
pub use types::{tier_counts, ClassifiedRecord, GridCell};
