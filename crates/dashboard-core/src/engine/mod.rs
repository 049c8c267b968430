//! Filter and aggregate engine
//!
//! Pure projection from a loaded record set and a [`FilterState`] to a
//! [`FilteredView`]. Nothing here performs I/O or mutates the records.

pub mod filter;
pub mod summary;

pub use filter::{FilterState, FilteredView, RegionFilter, apply};
pub use summary::{
    ConfidenceLevel, HIGH_CONFIDENCE_THRESHOLD, MODERATE_CONFIDENCE_THRESHOLD, Summary,
};
