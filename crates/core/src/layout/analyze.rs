//! Line reconstruction pipeline.
//!
//! boxes + boundary → relationships → adjacency → components → overlap
//! resolution → reading order.

use crate::bbox::BoundingBox;
use crate::error::Result;
use crate::geometry::{Boundary, Coords};

use super::Line;
use super::graph::{InLines, get_lines};
use super::params::AlignParams;
use super::relationships::{
    PassThroughs, PointOfIntersections, passthroughs, point_of_intersections,
};
use super::resolve::{ResolveContext, has_overlaps};
use super::sort::sort_lines;

/// Result of one reconstruction run, with the intermediate matrices.
#[derive(Debug, Clone)]
pub struct LineAnalysis {
    pub boxes: Vec<BoundingBox>,
    pub boundary: Boundary,
    pub pois: PointOfIntersections,
    pub passthroughs: PassThroughs,
    /// Adjacency after overlap resolution.
    pub inlines: InLines,
    /// Lines in reading order.
    pub lines: Vec<Line>,
}

impl LineAnalysis {
    /// Validates raw input and reconstructs lines.
    ///
    /// Every box must be four clockwise corners starting top-left and the
    /// boundary must be four points. Nothing is computed if any check fails.
    pub fn new<V: AsRef<[Coords]>>(
        boxes: &[V],
        boundary: &[Coords],
        params: &AlignParams,
    ) -> Result<Self> {
        params.validate()?;
        let boundary = Boundary::from_coords(boundary)?;
        let boxes = boxes
            .iter()
            .enumerate()
            .map(|(index, corners)| BoundingBox::from_coords(corners.as_ref(), index))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::from_boxes(boxes, boundary, params))
    }

    /// Reconstructs lines from boxes that are already built.
    ///
    /// Box positions in `boxes` are the indices reported in the output.
    pub fn from_boxes(boxes: Vec<BoundingBox>, boundary: Boundary, params: &AlignParams) -> Self {
        let pois = point_of_intersections(&boxes, &boundary);
        let passthroughs = passthroughs(&boxes, params.passthrough_tolerance);
        let mut inlines = InLines::build(&boxes, &pois, &passthroughs);

        let components = get_lines(&inlines);
        tracing::debug!(
            boxes = boxes.len(),
            components = components.len(),
            "built same-line adjacency"
        );

        let mut lines = if params.allow_overlaps {
            components
        } else {
            let ctx = ResolveContext {
                boxes: &boxes,
                boundary: &boundary,
                params,
            };
            let mut lines = Vec::with_capacity(components.len());
            let mut resolved = 0usize;
            for component in components {
                if !has_overlaps(&boxes, &component, params.overlap_threshold) {
                    lines.push(component);
                    continue;
                }
                let groups = params.policy.resolve(&ctx, &component);
                inlines.rewire(&component, &groups);
                resolved += 1;
                lines.extend(groups);
            }
            tracing::debug!(
                resolved,
                lines = lines.len(),
                policy = params.policy.name(),
                "resolved overlapping components"
            );
            lines
        };

        sort_lines(&boxes, &mut lines);

        Self {
            boxes,
            boundary,
            pois,
            passthroughs,
            inlines,
            lines,
        }
    }

    pub fn into_lines(self) -> Vec<Line> {
        self.lines
    }
}
