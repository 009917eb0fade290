//! Core model for Bagua: the 64 hexagrams, their line patterns, and the
//! transformations between them.
//!
//! Everything here is deterministic. Randomness and session state live in
//! `bagua-oracle`; this crate only answers "which hexagram has these lines"
//! and "what does changing these lines produce".

/// Authored meanings of trigram pairs and model coverage.
pub mod combination;
/// The hexagram catalog and the pattern-resolution seam.
pub mod catalog;
/// Error types used throughout the crate.
pub mod error;
/// Hexagram numbers, line positions, line patterns, and changing-line sets.
pub mod lines;
/// Hand-authored thematic links between hexagrams.
pub mod links;
/// Interpretation guidelines keyed on the number of changing lines.
pub mod policy;
/// The precomputed single-line transformation table.
pub mod table;
/// Applying changing lines to a hexagram.
pub mod transform;
/// The eight trigrams and their mathematical readings.
pub mod trigram;

/// Re-export the model analysis.
pub use combination::ModelAnalysis;
/// Re-export catalog types.
pub use catalog::{Hexagram, HexagramCatalog, PatternResolver};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export line types.
pub use lines::{ChangingLines, HexagramNumber, Line, LinePosition, Lines};
/// Re-export the link table.
pub use links::TopicalLinkTable;
/// Re-export interpretation types.
pub use policy::{Focus, Guideline};
/// Re-export the transformation table.
pub use table::TransformationTable;
/// Re-export trigram types.
pub use trigram::{MathModel, Trigram};
