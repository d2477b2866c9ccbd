//! Sub-pixel iso-line extraction by marching squares.
//!
//! Every 2×2 cell of the mask is classified by which of its corners lie
//! strictly above the iso-level, and crossing points are linearly
//! interpolated along the cell edges. Segments are oriented so that values
//! above the level stay on a consistent side, then chained into contours
//! by exact endpoint matching.
//!
//! Contour order follows the first appearance of each contour in a
//! row-major scan. Closed contours repeat their first point at the end.

use std::collections::{HashMap, VecDeque};

use crate::mask::Mask;

/// One traced iso-line: ordered `(row, col)` points in mask coordinates.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Contour {
    points: Vec<[f64; 2]>,
}

impl Contour {
    /// Wrap an already-traced polyline of `(row, col)` points.
    pub fn new(points: Vec<[f64; 2]>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[[f64; 2]] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// A contour is closed when its last point repeats the first.
    pub fn is_closed(&self) -> bool {
        self.points.len() > 2 && self.points.first() == self.points.last()
    }

    pub fn into_points(self) -> Vec<[f64; 2]> {
        self.points
    }
}

type Point = [f64; 2];

/// Bit-exact hash key; shared cell edges produce identical floats.
type PointKey = (u64, u64);

#[inline]
fn key(p: Point) -> PointKey {
    (p[0].to_bits(), p[1].to_bits())
}

/// Fraction of the way from `from` to `to` where `level` is crossed.
#[inline]
fn crossing(from: f64, to: f64, level: f64) -> f64 {
    if to == from {
        0.0
    } else {
        (level - from) / (to - from)
    }
}

/// Find all iso-lines of `mask` at `level`.
pub fn find_contours(mask: &Mask, level: f64) -> Vec<Contour> {
    let segments = cell_segments(mask, level);
    let contours = assemble(&segments);
    tracing::trace!(
        "marching squares: {} segments -> {} contours",
        segments.len(),
        contours.len()
    );
    contours
}

/// Oriented segments of every cell, in row-major cell order.
fn cell_segments(mask: &Mask, level: f64) -> Vec<(Point, Point)> {
    let mut segments = Vec::new();
    if mask.rows() < 2 || mask.cols() < 2 {
        return segments;
    }

    for r0 in 0..mask.rows() - 1 {
        let r1 = r0 + 1;
        for c0 in 0..mask.cols() - 1 {
            let c1 = c0 + 1;
            let ul = mask.get(r0, c0);
            let ur = mask.get(r0, c1);
            let ll = mask.get(r1, c0);
            let lr = mask.get(r1, c1);

            let case = (ul > level) as u8
                | ((ur > level) as u8) << 1
                | ((ll > level) as u8) << 2
                | ((lr > level) as u8) << 3;
            if case == 0 || case == 15 {
                continue;
            }

            let (rf, cf) = (r0 as f64, c0 as f64);
            let top = [rf, cf + crossing(ul, ur, level)];
            let bottom = [r1 as f64, cf + crossing(ll, lr, level)];
            let left = [rf + crossing(ul, ll, level), cf];
            let right = [rf + crossing(ur, lr, level), c1 as f64];

            match case {
                1 => segments.push((top, left)),
                2 => segments.push((right, top)),
                3 => segments.push((right, left)),
                4 => segments.push((left, bottom)),
                5 => segments.push((top, bottom)),
                // Saddles: low-valued corners stay connected.
                6 => {
                    segments.push((right, top));
                    segments.push((left, bottom));
                }
                7 => segments.push((right, bottom)),
                8 => segments.push((bottom, right)),
                9 => {
                    segments.push((top, left));
                    segments.push((bottom, right));
                }
                10 => segments.push((bottom, top)),
                11 => segments.push((bottom, left)),
                12 => segments.push((left, right)),
                13 => segments.push((top, right)),
                14 => segments.push((left, top)),
                _ => unreachable!("case index is 4 bits"),
            }
        }
    }
    segments
}

/// Chain oriented segments into contours.
///
/// `starts`/`ends` map a free endpoint to the id of the partial contour it
/// belongs to. When two partials are joined the lower id survives, which
/// keeps the output in scan order.
fn assemble(segments: &[(Point, Point)]) -> Vec<Contour> {
    let mut partials: Vec<Option<VecDeque<Point>>> = Vec::new();
    let mut starts: HashMap<PointKey, usize> = HashMap::new();
    let mut ends: HashMap<PointKey, usize> = HashMap::new();

    for &(from, to) in segments {
        if from == to {
            continue;
        }
        let tail = starts.remove(&key(to));
        let head = ends.remove(&key(from));

        match (tail, head) {
            (Some(t), Some(h)) if t == h => {
                // Closing a loop.
                if let Some(c) = partials[h].as_mut() {
                    c.push_back(to);
                }
            }
            (Some(t), Some(h)) if t > h => {
                // Tail was created later: append it to head.
                let Some(tail_pts) = partials[t].take() else {
                    continue;
                };
                let Some(head_pts) = partials[h].as_mut() else {
                    continue;
                };
                head_pts.extend(tail_pts);
                relink(&mut starts, &mut ends, head_pts, h);
            }
            (Some(t), Some(h)) => {
                // Head was created later: prepend it to tail.
                let Some(head_pts) = partials[h].take() else {
                    continue;
                };
                if let Some(&first) = head_pts.front() {
                    starts.remove(&key(first));
                }
                let Some(tail_pts) = partials[t].as_mut() else {
                    continue;
                };
                for p in head_pts.into_iter().rev() {
                    tail_pts.push_front(p);
                }
                relink(&mut starts, &mut ends, tail_pts, t);
            }
            (None, None) => {
                let id = partials.len();
                partials.push(Some(VecDeque::from([from, to])));
                starts.insert(key(from), id);
                ends.insert(key(to), id);
            }
            (Some(t), None) => {
                if let Some(c) = partials[t].as_mut() {
                    c.push_front(from);
                }
                starts.insert(key(from), t);
            }
            (None, Some(h)) => {
                if let Some(c) = partials[h].as_mut() {
                    c.push_back(to);
                }
                ends.insert(key(to), h);
            }
        }
    }

    partials
        .into_iter()
        .flatten()
        .map(|pts| Contour::new(pts.into()))
        .collect()
}

fn relink(
    starts: &mut HashMap<PointKey, usize>,
    ends: &mut HashMap<PointKey, usize>,
    pts: &VecDeque<Point>,
    id: usize,
) {
    if let (Some(&first), Some(&last)) = (pts.front(), pts.back()) {
        starts.insert(key(first), id);
        ends.insert(key(last), id);
    }
}
