use imageproc::geometry::convex_hull;
use imageproc::point::Point;

use super::params::RadiusBounds;
use crate::models::{CandidateCircle, Contour};

/// Relative slack for point-in-circle tests.
const CONTAINS_EPS: f64 = 1e-7;

#[derive(Debug, Clone, Copy)]
struct Circle {
    cx: f64,
    cy: f64,
    r: f64,
}

impl Circle {
    fn point(p: (f64, f64)) -> Self {
        Self { cx: p.0, cy: p.1, r: 0.0 }
    }

    fn diameter(a: (f64, f64), b: (f64, f64)) -> Self {
        let cx = (a.0 + b.0) * 0.5;
        let cy = (a.1 + b.1) * 0.5;
        Self {
            cx,
            cy,
            r: (a.0 - cx).hypot(a.1 - cy),
        }
    }

    /// Circumcircle; collinear triples fall back to the widest pair.
    fn through(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> Self {
        let (bx, by) = (b.0 - a.0, b.1 - a.1);
        let (cx, cy) = (c.0 - a.0, c.1 - a.1);
        let d = 2.0 * (bx * cy - by * cx);
        if d.abs() < 1e-12 {
            let pairs = [Self::diameter(a, b), Self::diameter(a, c), Self::diameter(b, c)];
            return pairs
                .into_iter()
                .fold(pairs[0], |best, p| if p.r > best.r { p } else { best });
        }
        let b2 = bx * bx + by * by;
        let c2 = cx * cx + cy * cy;
        let ux = (cy * b2 - by * c2) / d;
        let uy = (bx * c2 - cx * b2) / d;
        Self {
            cx: a.0 + ux,
            cy: a.1 + uy,
            r: ux.hypot(uy),
        }
    }

    fn contains(&self, p: (f64, f64)) -> bool {
        (p.0 - self.cx).hypot(p.1 - self.cy) <= self.r * (1.0 + CONTAINS_EPS) + CONTAINS_EPS
    }
}

/// Smallest circle containing every point, as `(center, radius)`.
///
/// Runs the incremental construction over the convex hull, so the result
/// only depends on the point set and is identical across runs.
pub fn minimum_enclosing_circle(points: &[Point<i32>]) -> Option<((f32, f32), f32)> {
    if points.is_empty() {
        return None;
    }
    let hull = if points.len() >= 3 {
        convex_hull(points)
    } else {
        points.to_vec()
    };
    let hull = if hull.is_empty() { points.to_vec() } else { hull };
    let pts: Vec<(f64, f64)> = hull.iter().map(|p| (p.x as f64, p.y as f64)).collect();

    let mut circle = Circle::point(pts[0]);
    for i in 1..pts.len() {
        if circle.contains(pts[i]) {
            continue;
        }
        circle = Circle::point(pts[i]);
        for j in 0..i {
            if circle.contains(pts[j]) {
                continue;
            }
            circle = Circle::diameter(pts[i], pts[j]);
            for k in 0..j {
                if !circle.contains(pts[k]) {
                    circle = Circle::through(pts[i], pts[j], pts[k]);
                }
            }
        }
    }
    Some(((circle.cx as f32, circle.cy as f32), circle.r as f32))
}

/// Keep contours whose enclosing circle radius falls strictly inside `bounds`.
pub fn filter_candidates(contours: &[Contour], bounds: &RadiusBounds) -> Vec<CandidateCircle> {
    contours
        .iter()
        .enumerate()
        .filter_map(|(contour_index, contour)| {
            let (center, radius) = minimum_enclosing_circle(&contour.points)?;
            log::trace!(
                "contour {contour_index}: center=({:.1}, {:.1}) radius={radius:.2}",
                center.0,
                center.1
            );
            bounds.admits(radius).then_some(CandidateCircle {
                contour_index,
                center,
                radius,
            })
        })
        .collect()
}
