// Centralized tolerances for screen-space hit testing

pub const EPS_POS: f64 = 1e-9;       // exact-coincidence slack (px)
pub const EPS_LEN: f64 = 1e-12;      // zero-length segment threshold (px^2)

// A point closer than this to a segment may be spliced into it (px)
pub const INSERT_TOLERANCE: f64 = 1.0;
// Polyline membership slack used when re-classifying the closing vertex (px)
pub const ON_LINE_TOLERANCE: f64 = 1.0;

#[inline] pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool { (a - b).abs() <= eps }
