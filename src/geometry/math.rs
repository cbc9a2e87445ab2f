use super::tolerance::{approx_eq, EPS_LEN, EPS_POS};
use crate::model::ScreenPoint;

/// Square-window proximity test: true iff `p` lies inside the axis-aligned
/// square of half-width `r` around `center` (edges inclusive).
///
/// This is not a circle. Every hit test in the editor uses the square, which
/// is cheaper and close enough at pointer scale.
#[inline]
pub fn in_radius(p: ScreenPoint, center: ScreenPoint, r: f64) -> bool {
    (p.x - center.x).abs() <= r && (p.y - center.y).abs() <= r
}

/// Squared distance from `p` to segment `a`-`b` and the clamped parameter of
/// the projection along the segment.
pub fn seg_distance_sq(p: ScreenPoint, a: ScreenPoint, b: ScreenPoint) -> (f64, f64) {
    let vx = b.x - a.x; let vy = b.y - a.y;
    let wx = p.x - a.x; let wy = p.y - a.y;
    let vv = vx*vx + vy*vy;
    let mut t = if vv > EPS_LEN { (wx*vx + wy*vy) / vv } else { 0.0 };
    if t < 0.0 { t = 0.0; } else if t > 1.0 { t = 1.0; }
    let projx = a.x + t * vx; let projy = a.y + t * vy;
    let dx = p.x - projx; let dy = p.y - projy;
    (dx*dx + dy*dy, t)
}

pub fn distance_to_segment(p: ScreenPoint, a: ScreenPoint, b: ScreenPoint) -> f64 {
    seg_distance_sq(p, a, b).0.sqrt()
}

pub fn closest_point_on_segment(p: ScreenPoint, a: ScreenPoint, b: ScreenPoint) -> ScreenPoint {
    let (_, t) = seg_distance_sq(p, a, b);
    if t <= 0.0 {
        return a;
    }
    if t >= 1.0 {
        return b;
    }
    ScreenPoint::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}

#[inline]
pub fn same_point(a: ScreenPoint, b: ScreenPoint) -> bool {
    approx_eq(a.x, b.x, EPS_POS) && approx_eq(a.y, b.y, EPS_POS)
}

/// True if `p` is one of `points` or within `tol` of the chain they form.
pub fn is_on_polyline(points: &[ScreenPoint], p: ScreenPoint, tol: f64) -> bool {
    for (i, start) in points.iter().enumerate() {
        if same_point(*start, p) {
            return true;
        }
        let Some(end) = points.get(i + 1) else { return false };
        if distance_to_segment(p, *start, *end) <= tol {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> ScreenPoint { ScreenPoint::new(x, y) }

    #[test]
    fn square_window_is_inclusive() {
        let c = pt(100.0, 100.0);
        assert!(in_radius(pt(114.0, 86.0), c, 14.0));
        assert!(!in_radius(pt(114.01, 100.0), c, 14.0));
        // corner of the square lies outside the circle of the same radius
        assert!(in_radius(pt(113.0, 113.0), c, 14.0));
    }

    #[test]
    fn point_on_segment_is_its_own_closest() {
        let a = pt(0.0, 0.0); let b = pt(10.0, 0.0);
        let p = pt(4.0, 0.0);
        assert_eq!(distance_to_segment(p, a, b), 0.0);
        assert_eq!(closest_point_on_segment(p, a, b), p);
    }

    #[test]
    fn clamps_beyond_endpoints() {
        let a = pt(0.0, 0.0); let b = pt(10.0, 0.0);
        assert_eq!(closest_point_on_segment(pt(-5.0, 3.0), a, b), a);
        assert_eq!(closest_point_on_segment(pt(15.0, 3.0), a, b), b);
        assert!((distance_to_segment(pt(13.0, 4.0), a, b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_segment_measures_to_point() {
        let a = pt(3.0, 4.0);
        assert!((distance_to_segment(pt(0.0, 0.0), a, a) - 5.0).abs() < 1e-12);
        assert_eq!(closest_point_on_segment(pt(0.0, 0.0), a, a), a);
    }

    #[test]
    fn polyline_membership() {
        let chain = [pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0)];
        assert!(is_on_polyline(&chain, pt(0.0, 0.0), 1.0));
        assert!(is_on_polyline(&chain, pt(10.5, 5.0), 1.0));
        assert!(!is_on_polyline(&chain, pt(5.0, 5.0), 1.0));
        assert!(!is_on_polyline(&[], pt(0.0, 0.0), 1.0));
    }
}
