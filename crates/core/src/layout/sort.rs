//! Reading order for reconstructed lines.

use crate::bbox::BoundingBox;

use super::Line;

/// Mean midpoint y of the members of `line`.
pub fn line_y(boxes: &[BoundingBox], line: &[usize]) -> f64 {
    if line.is_empty() {
        return f64::INFINITY;
    }
    line.iter().map(|&i| boxes[i].midpoint().y).sum::<f64>() / line.len() as f64
}

/// Sorts members of each line left to right, then lines top to bottom.
///
/// Both sorts are stable, so sorting an already sorted result is a no-op.
pub fn sort_lines(boxes: &[BoundingBox], lines: &mut [Line]) {
    for line in lines.iter_mut() {
        line.sort_by(|&a, &b| boxes[a].midpoint().x.total_cmp(&boxes[b].midpoint().x));
    }
    lines.sort_by(|a, b| line_y(boxes, a).total_cmp(&line_y(boxes, b)));
}
