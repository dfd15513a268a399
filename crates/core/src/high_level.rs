//! High-level API for reconstructing lines.
//!
//! These functions cover the common case of turning raw OCR word
//! coordinates into lines of indices or lines of words.

use crate::error::Result;
use crate::geometry::Coords;
use crate::layout::{AlignParams, LineAnalysis, Lines};

/// Reconstructs reading-order lines from word bounding boxes.
///
/// `boxes` holds four clockwise corners per word, starting top-left.
/// `boundary` is the four-point region in which line intersections count.
/// The result lists lines top to bottom, each with box indices left to
/// right, and covers every index exactly once.
///
/// # Example
///
/// ```
/// use bbox_align::{AlignParams, process};
///
/// let boundary = [(0.0, 0.0), (670.0, 0.0), (670.0, 1000.0), (0.0, 1000.0)];
/// let boxes = vec![
///     vec![(250.0, 45.0), (350.0, 45.0), (350.0, 65.0), (250.0, 65.0)],
///     vec![(50.0, 40.0), (150.0, 40.0), (150.0, 60.0), (50.0, 60.0)],
/// ];
/// let lines = process(&boxes, &boundary, &AlignParams::default()).unwrap();
/// assert_eq!(lines, vec![vec![1, 0]]);
/// ```
pub fn process<V: AsRef<[Coords]>>(
    boxes: &[V],
    boundary: &[Coords],
    params: &AlignParams,
) -> Result<Lines> {
    LineAnalysis::new(boxes, boundary, params).map(LineAnalysis::into_lines)
}

/// Like [`process`], but keeps the intermediate matrices.
pub fn analyze<V: AsRef<[Coords]>>(
    boxes: &[V],
    boundary: &[Coords],
    params: &AlignParams,
) -> Result<LineAnalysis> {
    LineAnalysis::new(boxes, boundary, params)
}

/// Maps lines of indices onto caller payloads such as recognized words.
///
/// # Panics
/// Panics if a line refers to an index outside `payloads`.
pub fn assemble_lines<'a, T>(lines: &[Vec<usize>], payloads: &'a [T]) -> Vec<Vec<&'a T>> {
    lines
        .iter()
        .map(|line| line.iter().map(|&i| &payloads[i]).collect())
        .collect()
}
