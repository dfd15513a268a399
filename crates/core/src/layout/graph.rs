//! Same-line adjacency graph and connected components.
//!
//! The adjacency starts from the passthrough relation and links every box
//! to its best intersection partner. Edges are always written in both
//! directions, so components do not depend on scan order.

use crate::bbox::BoundingBox;

use super::Line;
use super::matrix::SquareMatrix;
use super::relationships::{PassThroughs, PointOfIntersections};

/// Symmetric boolean "same physical text line" relation.
#[derive(Debug, Clone, PartialEq)]
pub struct InLines {
    matrix: SquareMatrix<bool>,
}

impl InLines {
    /// Adjacency with no edges.
    pub fn empty(n: usize) -> Self {
        Self {
            matrix: SquareMatrix::new(n, false),
        }
    }

    /// Seeds the adjacency with a copy of the passthrough relation.
    pub fn from_passthroughs(passthroughs: &PassThroughs) -> Self {
        let mut inlines = Self {
            matrix: passthroughs.clone(),
        };
        inlines.symmetrize();
        inlines
    }

    /// Passthrough edges plus one link per box to its nearest intersection
    /// partner.
    pub fn build(
        boxes: &[BoundingBox],
        pois: &PointOfIntersections,
        passthroughs: &PassThroughs,
    ) -> Self {
        let mut inlines = Self::from_passthroughs(passthroughs);
        for i in 0..boxes.len() {
            if let Some(k) = nearest_intersection_partner(boxes, pois, i) {
                inlines.link(i, k);
            }
        }
        inlines
    }

    pub fn len(&self) -> usize {
        self.matrix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    pub fn matrix(&self) -> &SquareMatrix<bool> {
        &self.matrix
    }

    #[inline]
    pub fn is_linked(&self, i: usize, j: usize) -> bool {
        *self.matrix.get(i, j)
    }

    /// Adds the edge between `i` and `j` in both directions.
    pub fn link(&mut self, i: usize, j: usize) {
        self.matrix.set_symmetric(i, j, true);
    }

    /// Removes the edge between `i` and `j` in both directions.
    pub fn unlink(&mut self, i: usize, j: usize) {
        self.matrix.set_symmetric(i, j, false);
    }

    /// Makes every one-way edge two-way.
    pub fn symmetrize(&mut self) {
        let n = self.len();
        for i in 0..n {
            for j in i + 1..n {
                if self.is_linked(i, j) || self.is_linked(j, i) {
                    self.link(i, j);
                }
            }
        }
    }

    pub fn is_symmetric(&self) -> bool {
        self.matrix.is_symmetric()
    }

    pub fn neighbors(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        self.matrix
            .row(i)
            .iter()
            .enumerate()
            .filter_map(|(j, &linked)| linked.then_some(j))
    }

    /// Replaces the edges among `component` with the grouping in `lines`.
    ///
    /// Every edge between two members of `component` is cleared, then each
    /// pair inside the same line is linked.
    pub fn rewire(&mut self, component: &[usize], lines: &[Line]) {
        for (pos, &i) in component.iter().enumerate() {
            for &j in &component[pos + 1..] {
                self.unlink(i, j);
            }
        }
        for line in lines {
            for (pos, &i) in line.iter().enumerate() {
                for &j in &line[pos + 1..] {
                    self.link(i, j);
                }
            }
        }
    }
}

/// The box whose orientation line meets box `i`'s with the least vertical
/// travel from both midpoints.
///
/// The score for a candidate `k` is `|mid_i.y − poi.y| + |mid_k.y − poi.y|`;
/// candidates without a recorded intersection are skipped. Ties keep the
/// lowest index.
pub fn nearest_intersection_partner(
    boxes: &[BoundingBox],
    pois: &PointOfIntersections,
    i: usize,
) -> Option<usize> {
    let yi = boxes[i].midpoint().y;
    let mut best: Option<(usize, f64)> = None;

    for (k, bbox) in boxes.iter().enumerate() {
        if k == i {
            continue;
        }
        let Some(poi) = pois.get(i, k) else {
            continue;
        };
        let score = (yi - poi.y).abs() + (bbox.midpoint().y - poi.y).abs();
        if !score.is_finite() {
            continue;
        }
        if best.is_none_or(|(_, best_score)| score < best_score) {
            best = Some((k, score));
        }
    }

    best.map(|(k, _)| k)
}

/// All indices reachable from `start`, in ascending order.
pub fn get_line(inlines: &InLines, start: usize) -> Line {
    let mut visited = vec![false; inlines.len()];
    collect_component(inlines, start, &mut visited)
}

/// Partitions every index into connected components.
///
/// Components are discovered from the lowest unvisited index upward, and
/// each component lists its members in ascending order.
pub fn get_lines(inlines: &InLines) -> Vec<Line> {
    let n = inlines.len();
    let mut visited = vec![false; n];
    let mut lines = Vec::new();

    for start in 0..n {
        if !visited[start] {
            lines.push(collect_component(inlines, start, &mut visited));
        }
    }

    lines
}

fn collect_component(inlines: &InLines, start: usize, visited: &mut [bool]) -> Line {
    let mut line = Vec::new();
    let mut stack = vec![start];
    visited[start] = true;

    while let Some(current) = stack.pop() {
        line.push(current);
        for next in inlines.neighbors(current) {
            if !visited[next] {
                visited[next] = true;
                stack.push(next);
            }
        }
    }

    line.sort_unstable();
    line
}
