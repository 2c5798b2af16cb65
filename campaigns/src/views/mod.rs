//! Presentation view-models.
//!
//! Pure data shaping over loaded state. Rendering is out of scope; these
//! types end at presentation-ready data for whatever shell draws them.

pub mod grid;

// Re-export
pub use grid::{FilterCounts, GridPage, StatusFilter, display_label, filter_counts, grid_page};
