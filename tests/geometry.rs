use polyedit::geometry::arrow::arrowhead_triangle;
use polyedit::geometry::math::{closest_point_on_segment, distance_to_segment, in_radius, is_on_polyline};
use polyedit::model::ScreenPoint;
use proptest::prelude::*;

fn pt() -> impl Strategy<Value = ScreenPoint> {
    (-1000.0f64..1000.0, -1000.0f64..1000.0).prop_map(|(x, y)| ScreenPoint::new(x, y))
}

fn dist(a: ScreenPoint, b: ScreenPoint) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

proptest! {
    #[test]
    fn closest_point_realises_segment_distance(p in pt(), a in pt(), b in pt()) {
        let c = closest_point_on_segment(p, a, b);
        let d = distance_to_segment(p, a, b);
        prop_assert!((dist(p, c) - d).abs() < 1e-6);
        prop_assert!(d <= dist(p, a) + 1e-9);
        prop_assert!(d <= dist(p, b) + 1e-9);
    }

    #[test]
    fn hit_square_is_symmetric(p in pt(), c in pt(), r in 0.0f64..50.0) {
        prop_assert_eq!(in_radius(p, c, r), in_radius(c, p, r));
    }

    #[test]
    fn segment_points_lie_on_the_chain(a in pt(), b in pt(), t in 0.0f64..=1.0) {
        let p = ScreenPoint::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t);
        prop_assert!(is_on_polyline(&[a, b], p, 1.0));
    }

    #[test]
    fn arrowhead_stays_near_its_segment(a in pt(), b in pt()) {
        prop_assume!(dist(a, b) > 1.0);
        let tri = arrowhead_triangle(a, b, 9.0);
        for v in [tri.top, tri.left, tri.right] {
            prop_assert!(v.x.is_finite() && v.y.is_finite());
            prop_assert!(distance_to_segment(v, a, b) <= 9.0 + 1e-6);
        }
    }
}
