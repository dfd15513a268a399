//! Overlap resolution - splitting components that merged several lines.
//!
//! Boxes on one physical line do not overlap, so a component with
//! overlapping members must hold two or more lines. Each policy turns such
//! a component into overlap-free groups; the caller rewires the adjacency.

use itertools::Itertools;

use crate::bbox::BoundingBox;
use crate::geometry::Boundary;

use super::Line;
use super::graph::{InLines, get_lines};
use super::params::{AlignParams, ResolutionPolicy};
use super::relationships::{passthroughs, point_of_intersections};

/// Everything a policy needs to regroup boxes.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    pub boxes: &'a [BoundingBox],
    pub boundary: &'a Boundary,
    pub params: &'a AlignParams,
}

impl ResolutionPolicy {
    /// Splits `component` into groups whose members do not overlap.
    ///
    /// A component without overlaps comes back unchanged as a single group.
    pub fn resolve(&self, ctx: &ResolveContext<'_>, component: &[usize]) -> Vec<Line> {
        match *self {
            Self::Bisect => bisect(ctx.boxes, component, ctx.params.overlap_threshold),
            Self::ReduceTolerance {
                step,
                max_iterations,
            } => reduce_tolerance(ctx, component, step, max_iterations),
        }
    }
}

/// Pairs of members whose overlap exceeds `threshold` percent, in scan
/// order.
pub fn overlapping_pairs(
    boxes: &[BoundingBox],
    line: &[usize],
    threshold: f64,
) -> Vec<(usize, usize)> {
    line.iter()
        .copied()
        .tuple_combinations()
        .filter(|&(a, b)| exceeds(&boxes[a], &boxes[b], threshold))
        .collect()
}

pub fn has_overlaps(boxes: &[BoundingBox], line: &[usize], threshold: f64) -> bool {
    line.iter()
        .copied()
        .tuple_combinations()
        .any(|(a, b)| exceeds(&boxes[a], &boxes[b], threshold))
}

#[inline]
fn exceeds(a: &BoundingBox, b: &BoundingBox, threshold: f64) -> bool {
    let (overlapping, percentage) = a.is_overlapping(b);
    overlapping && percentage > threshold
}

/// How well box `r` fits the line seeded by `seed`; lower is better.
///
/// Harmonic mean of the vertical midpoint distance and the perpendicular
/// distance from `r`'s midpoint to the seed's orientation line. Zero when
/// either distance is zero.
pub fn resolution_score(r: &BoundingBox, seed: &BoundingBox) -> f64 {
    let vertical = (r.midpoint().y - seed.midpoint().y).abs();
    let perpendicular = r.midpoint().distance_to_line(&seed.orientation_line());
    if vertical == 0.0 || perpendicular == 0.0 {
        return 0.0;
    }
    2.0 * vertical * perpendicular / (vertical + perpendicular)
}

/// The overlapping pair with the smallest vertical midpoint separation;
/// the first pair in scan order wins ties.
fn anchor_pair(boxes: &[BoundingBox], overlaps: &[(usize, usize)]) -> Option<(usize, usize)> {
    let separation =
        |&(a, b): &(usize, usize)| (boxes[a].midpoint().y - boxes[b].midpoint().y).abs();

    let mut best: Option<((usize, usize), f64)> = None;
    for pair in overlaps {
        let d = separation(pair);
        if best.is_none_or(|(_, best_d)| d.total_cmp(&best_d).is_lt()) {
            best = Some((*pair, d));
        }
    }
    best.map(|(pair, _)| pair)
}

/// Seeds two groups with `a` and `b` and hands every other member of
/// `group` to the seed with the lower resolution score (ties go to `a`).
fn split_around(boxes: &[BoundingBox], group: &[usize], a: usize, b: usize) -> (Line, Line) {
    let mut first = vec![a];
    let mut second = vec![b];

    for &r in group.iter().filter(|&&r| r != a && r != b) {
        let to_a = resolution_score(&boxes[r], &boxes[a]);
        let to_b = resolution_score(&boxes[r], &boxes[b]);
        if to_b.total_cmp(&to_a).is_lt() {
            second.push(r);
        } else {
            first.push(r);
        }
    }

    (first, second)
}

/// Recursive bisection, run on an explicit worklist.
///
/// Groups come out in the order a depth-first recursion would produce
/// them: the first half of a split is fully resolved before the second.
pub fn bisect(boxes: &[BoundingBox], component: &[usize], threshold: f64) -> Vec<Line> {
    let mut resolved = Vec::new();
    let mut worklist = vec![component.to_vec()];

    while let Some(group) = worklist.pop() {
        let overlaps = overlapping_pairs(boxes, &group, threshold);
        let Some((a, b)) = anchor_pair(boxes, &overlaps) else {
            resolved.push(group);
            continue;
        };

        let (first, second) = split_around(boxes, &group, a, b);
        debug_assert!(first.len() < group.len() && second.len() < group.len());
        tracing::trace!(
            anchor_a = a,
            anchor_b = b,
            first = first.len(),
            second = second.len(),
            "split overlapping group"
        );

        worklist.push(second);
        worklist.push(first);
    }

    resolved
}

/// Regroups `component` with a shrinking passthrough tolerance, then
/// bisects whatever still overlaps.
fn reduce_tolerance(
    ctx: &ResolveContext<'_>,
    component: &[usize],
    step: f64,
    max_iterations: usize,
) -> Vec<Line> {
    let threshold = ctx.params.overlap_threshold;
    let mut finished = Vec::new();
    let mut pending = vec![component.to_vec()];
    let mut tolerance = ctx.params.passthrough_tolerance;

    for _ in 0..max_iterations {
        tolerance -= step;
        if tolerance <= 0.0 || pending.is_empty() {
            break;
        }

        let mut still_overlapping = Vec::new();
        for group in pending {
            for line in regroup(ctx, &group, tolerance) {
                if has_overlaps(ctx.boxes, &line, threshold) {
                    still_overlapping.push(line);
                } else {
                    finished.push(line);
                }
            }
        }
        tracing::trace!(
            tolerance,
            finished = finished.len(),
            pending = still_overlapping.len(),
            "reduced passthrough tolerance"
        );
        pending = still_overlapping;
    }

    for group in pending {
        finished.extend(bisect(ctx.boxes, &group, threshold));
    }
    finished
}

/// Rebuilds relationships and components for the boxes of `group` alone,
/// using `tolerance` for passthroughs. Returned lines hold original indices.
fn regroup(ctx: &ResolveContext<'_>, group: &[usize], tolerance: f64) -> Vec<Line> {
    let subset: Vec<BoundingBox> = group.iter().map(|&i| ctx.boxes[i].clone()).collect();

    let pois = point_of_intersections(&subset, ctx.boundary);
    let pass = passthroughs(&subset, tolerance);
    let inlines = InLines::build(&subset, &pois, &pass);

    get_lines(&inlines)
        .into_iter()
        .map(|local| local.into_iter().map(|k| group[k]).collect())
        .collect()
}
