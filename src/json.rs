use crate::geometry::limits;
use crate::model::{GeoPoint, PathData};
use crate::surface::Surface;
use crate::PathCollection;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DOC_VERSION: u32 = 1;

pub fn to_json_impl<S: Surface>(c: &PathCollection<S>) -> Value {
    #[derive(Serialize)]
    struct Doc {
        version: u32,
        paths: Vec<PathData>,
    }
    // only saved paths belong in a persisted document
    let paths = c
        .sessions
        .iter()
        .filter(|s| s.saved && s.edge.as_ref().map_or(false, |e| !e.is_empty()))
        .map(|s| s.path_data())
        .collect();
    serde_json::to_value(Doc { version: DOC_VERSION, paths }).unwrap_or(Value::Null)
}

#[derive(Deserialize)]
struct DocDe {
    #[serde(default = "default_version")]
    version: u32,
    paths: Vec<PathData>,
}

fn default_version() -> u32 {
    DOC_VERSION
}

fn validate(doc: &DocDe) -> Result<(), (&'static str, String)> {
    if doc.version > DOC_VERSION {
        return Err(("invalid_json", format!("unsupported version {}", doc.version)));
    }
    if doc.paths.len() > limits::MAX_PATHS {
        return Err(("limit_exceeded", format!("paths>{}", limits::MAX_PATHS)));
    }
    let mut total: usize = 0;
    for p in &doc.paths {
        if p.coordinates.len() > limits::MAX_POINTS_PER_PATH {
            return Err(("limit_exceeded", format!("points_per_path>{}", limits::MAX_POINTS_PER_PATH)));
        }
        total += p.coordinates.len();
        if total > limits::MAX_POINTS_TOTAL {
            return Err(("limit_exceeded", format!("points_total>{}", limits::MAX_POINTS_TOTAL)));
        }
        if let Some(id) = &p.id {
            if id.is_empty() {
                return Err(("invalid_id", "empty path id".into()));
            }
        }
        for c in &p.coordinates {
            check_point(c)?;
        }
    }
    Ok(())
}

fn check_point(c: &GeoPoint) -> Result<(), (&'static str, String)> {
    if !c.is_finite() {
        return Err(("non_finite", format!("{},{}", c.lat, c.lng)));
    }
    if !limits::in_lat_bounds(c.lat) || !limits::in_lng_bounds(c.lng) {
        return Err(("out_of_bounds", format!("{},{}", c.lat, c.lng)));
    }
    Ok(())
}

pub fn from_json_impl<S: Surface>(c: &mut PathCollection<S>, v: Value) -> bool {
    match from_json_impl_strict(c, v) {
        Ok(_) => true,
        Err((code, msg)) => {
            tracing::warn!(code, %msg, "path document rejected");
            false
        }
    }
}

/// Validates the whole document before drawing anything, so a rejected
/// document leaves the collection untouched. Returns the number of paths
/// drawn.
pub fn from_json_impl_strict<S: Surface>(c: &mut PathCollection<S>, v: Value) -> Result<usize, (&'static str, String)> {
    let doc: DocDe = serde_json::from_value(v).map_err(|e| ("invalid_json", format!("{}", e)))?;
    validate(&doc)?;
    let mut drawn = 0;
    for p in doc.paths {
        if c.draw(p).is_some() {
            drawn += 1;
        }
    }
    tracing::debug!(drawn, "path document loaded");
    Ok(drawn)
}
