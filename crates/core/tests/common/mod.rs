//! Deterministic synthetic pages shared by tests and benches.
#![allow(dead_code)]

use bbox_align::Coords;

pub const PAGE: [Coords; 4] = [(0.0, 0.0), (670.0, 0.0), (670.0, 1000.0), (0.0, 1000.0)];

/// SplitMix64 stream; every page is a pure function of its seed.
#[derive(Clone)]
pub struct SeededRng(u64);

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[min, max)`, from the top 53 bits.
    pub fn gen_f64(&mut self, min: f64, max: f64) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        min + (max - min) * unit
    }

    pub fn gen_index(&mut self, len: usize) -> usize {
        (self.next_u64() % len as u64) as usize
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.gen_index(i + 1);
            items.swap(i, j);
        }
    }
}

/// Clockwise corners of a `w`×`h` box centred on (cx, cy) whose top and
/// bottom edges have the given slope.
pub fn tilted(cx: f64, cy: f64, w: f64, h: f64, slope: f64) -> Vec<Coords> {
    let (hw, hh) = (w / 2.0, h / 2.0);
    let dy = slope * hw;
    vec![
        (cx - hw, cy - hh - dy),
        (cx + hw, cy - hh + dy),
        (cx + hw, cy + hh + dy),
        (cx - hw, cy + hh - dy),
    ]
}

pub fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Coords> {
    vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1)]
}

/// A page of `rows` skewed text lines with `cols` words each, jittered and
/// shuffled. Occasionally a word is detected twice with a small offset, as
/// OCR engines do.
pub fn synthetic_page(seed: u64, rows: usize, cols: usize) -> Vec<Vec<Coords>> {
    let mut rng = SeededRng::new(seed);
    let skew = rng.gen_f64(-0.03, 0.03);
    let mut boxes = Vec::with_capacity(rows * cols + rows);

    for row in 0..rows {
        let base_y = 40.0 + row as f64 * 60.0;
        for col in 0..cols {
            let w = rng.gen_f64(40.0, 70.0);
            let cx = 40.0 + col as f64 * 80.0 + w / 2.0;
            let cy = base_y + skew * cx + rng.gen_f64(-2.0, 2.0);
            let slope = skew + rng.gen_f64(-0.005, 0.005);
            boxes.push(tilted(cx, cy, w, 22.0, slope));

            if rng.gen_index(10) == 0 {
                let dx = rng.gen_f64(-4.0, 4.0);
                let dy = rng.gen_f64(-4.0, 4.0);
                boxes.push(tilted(cx + dx, cy + dy, w, 22.0, slope));
            }
        }
    }

    rng.shuffle(&mut boxes);
    boxes
}
