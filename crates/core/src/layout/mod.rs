//! Line reconstruction module.
//!
//! This module contains:
//! - Reconstruction parameters (AlignParams, ResolutionPolicy)
//! - Pairwise relationships (intersections, passthroughs)
//! - Same-line adjacency and connected components
//! - Overlap resolution policies
//! - Reading-order sorting and the end-to-end pipeline

pub mod analyze;
pub mod graph;
pub mod matrix;
pub mod params;
pub mod relationships;
pub mod resolve;
pub mod sort;

/// Indices of the boxes judged to lie on one physical text line.
pub type Line = Vec<usize>;

/// Lines in reading order.
pub type Lines = Vec<Line>;

pub use analyze::LineAnalysis;
pub use graph::{InLines, get_line, get_lines, nearest_intersection_partner};
pub use matrix::SquareMatrix;
pub use params::{AlignParams, ResolutionPolicy};
pub use relationships::{
    PassThroughs, PointOfIntersections, passes_through, passthroughs, point_of_intersection,
    point_of_intersections,
};
pub use resolve::{ResolveContext, bisect, has_overlaps, overlapping_pairs, resolution_score};
pub use sort::{line_y, sort_lines};
