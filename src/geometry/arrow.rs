use crate::model::ScreenPoint;
use serde::{Deserialize, Serialize};

/// Direction marker for one segment: `top` is the apex, `left`/`right` span the base.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub top: ScreenPoint,
    pub left: ScreenPoint,
    pub right: ScreenPoint,
}

/// Isosceles arrowhead whose base is centred on the midpoint of `a`-`b`,
/// apex pointing from `a` toward `b`, base width `2 * (half_width - 2)`.
///
/// The triangle is always built as if the direction lay in the first
/// quadrant (screen y grows downward), then mirrored about `a` on x and/or y
/// according to the quadrant of the real direction vector. The `atan` of
/// absolute deltas cannot tell the quadrants apart, so the mirror step is
/// what orients the result.
pub fn arrowhead_triangle(a: ScreenPoint, b: ScreenPoint, half_width: f64) -> Triangle {
    let wd = half_width - 2.0;
    let dist_y = a.y - b.y;
    let dist_x = b.x - a.x;

    let angle = if dist_x == 0.0 {
        std::f64::consts::FRAC_PI_2
    } else {
        (dist_y.abs() / dist_x.abs()).atan()
    };
    let (sin, cos) = angle.sin_cos();

    // midpoint moved into the first quadrant relative to `a`
    let mid = ScreenPoint::new(
        a.x + (a.x - (a.x + b.x) / 2.0).abs(),
        a.y - (a.y - (a.y + b.y) / 2.0).abs(),
    );

    let mut top = ScreenPoint::new(mid.x + wd * cos, mid.y - wd * sin);
    let mut right = ScreenPoint::new(mid.x + wd * sin, mid.y + wd * cos);
    let mut left = ScreenPoint::new(mid.x - wd * sin, mid.y - wd * cos);

    let (flip_x, flip_y) = if dist_y >= 0.0 && dist_x < 0.0 {
        (true, false)
    } else if dist_y < 0.0 && dist_x <= 0.0 {
        (true, true)
    } else if dist_y < 0.0 && dist_x > 0.0 {
        (false, true)
    } else {
        (false, false)
    };
    for p in [&mut top, &mut right, &mut left] {
        if flip_x { p.x = a.x - (p.x - a.x); }
        if flip_y { p.y = a.y + (a.y - p.y); }
    }
    Triangle { top, left, right }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(p: ScreenPoint, x: f64, y: f64) -> bool {
        (p.x - x).abs() < 1e-9 && (p.y - y).abs() < 1e-9
    }

    fn base_mid(t: &Triangle) -> ScreenPoint {
        ScreenPoint::new((t.left.x + t.right.x) / 2.0, (t.left.y + t.right.y) / 2.0)
    }

    #[test]
    fn horizontal_points_right() {
        let t = arrowhead_triangle(ScreenPoint::new(100.0, 100.0), ScreenPoint::new(200.0, 100.0), 9.0);
        assert!(close(t.top, 157.0, 100.0));
        assert!(close(base_mid(&t), 150.0, 100.0));
        assert!(((t.left.y - t.right.y).abs() - 14.0).abs() < 1e-9);
    }

    #[test]
    fn every_quadrant_points_toward_b() {
        let a = ScreenPoint::new(50.0, 50.0);
        for (bx, by) in [(80.0, 10.0), (10.0, 20.0), (20.0, 90.0), (90.0, 80.0), (50.0, 90.0), (50.0, 10.0), (10.0, 50.0)] {
            let b = ScreenPoint::new(bx, by);
            let t = arrowhead_triangle(a, b, 9.0);
            let m = base_mid(&t);
            assert!(close(m, (a.x + b.x) / 2.0, (a.y + b.y) / 2.0), "base mid for {bx},{by}");
            // apex lies further along a->b than the base midpoint
            let along = (t.top.x - m.x) * (b.x - a.x) + (t.top.y - m.y) * (b.y - a.y);
            assert!(along > 0.0, "apex direction for {bx},{by}");
        }
    }

    #[test]
    fn degenerate_segment_does_not_panic() {
        let a = ScreenPoint::new(5.0, 5.0);
        let t = arrowhead_triangle(a, a, 9.0);
        assert!(t.top.x.is_finite() && t.top.y.is_finite());
    }
}
