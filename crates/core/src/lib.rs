//! bbox-align - reading-order text lines from OCR word bounding boxes.
//!
//! Given word quadrilaterals in any order and a page boundary, the crate
//! infers which words share a visual line, splits lines that were merged by
//! mistake, and returns the lines top to bottom with words left to right.

pub mod bbox;
pub mod error;
pub mod geometry;
pub mod high_level;
pub mod layout;

pub use bbox::BoundingBox;
pub use error::{AlignError, Result};
pub use geometry::{Boundary, Coords, Point, Rect};
pub use high_level::{analyze, assemble_lines, process};
pub use layout::{AlignParams, Line, LineAnalysis, Lines, ResolutionPolicy};
