// Ingestion limits to harden against untrusted path documents

pub const MAX_PATHS: usize = 20_000;
pub const MAX_POINTS_PER_PATH: usize = 10_000;
pub const MAX_POINTS_TOTAL: usize = 2_000_000;

pub const LAT_MIN: f64 = -90.0;
pub const LAT_MAX: f64 = 90.0;
pub const LNG_MIN: f64 = -540.0;
pub const LNG_MAX: f64 = 540.0;

#[inline]
pub fn in_lat_bounds(v: f64) -> bool { v.is_finite() && (LAT_MIN..=LAT_MAX).contains(&v) }

#[inline]
pub fn in_lng_bounds(v: f64) -> bool { v.is_finite() && (LNG_MIN..=LNG_MAX).contains(&v) }
