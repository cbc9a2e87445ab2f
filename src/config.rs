use crate::model::{Style, VertexKind};
use serde::{Deserialize, Serialize};

/// Half-width (px) of the square used for vertex proximity tests.
pub const HIT_RADIUS: f64 = 14.0;
/// Distance (px) within which a point counts as lying on a line.
pub const LINE_BUFFER: f64 = 9.0;
pub const BLINK_INTERVAL_MS: u64 = 1000;

/// Backdrop (animation) and foreground (display) style of one visual pair.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StylePair {
    pub back: Style,
    pub front: Style,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlinkStyles {
    pub before: Style,
    pub after: Style,
    pub default: Style,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub hit_radius: f64,
    pub line_buffer: f64,
    pub blink_interval_ms: u64,
    pub endpoint: StylePair,
    pub midpoint: StylePair,
    pub junction: StylePair,
    /// Base styles every vertex pair starts from before the kind styles apply.
    pub vertex_base: StylePair,
    pub edge: StylePair,
    pub vertex_blink: BlinkStyles,
    pub edge_blink: BlinkStyles,
    pub arrowhead: Style,
}

fn circle(radius: f64, fill: Option<&str>, color: Option<&str>) -> Style {
    Style {
        radius: Some(radius),
        fill_color: fill.map(str::to_string),
        color: color.map(str::to_string),
        ..Style::default()
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            hit_radius: HIT_RADIUS,
            line_buffer: LINE_BUFFER,
            blink_interval_ms: BLINK_INTERVAL_MS,
            endpoint: StylePair {
                back: circle(9.0, Some("#E20100"), None),
                front: circle(6.0, Some("#FFFFFF"), Some("#3388ff")),
            },
            midpoint: StylePair {
                back: circle(7.0, Some("#E20100"), None),
                front: circle(4.0, Some("#FFFFFF"), Some("#3388ff")),
            },
            junction: StylePair {
                back: circle(8.0, None, None),
                front: circle(5.0, Some("#fffd0c"), Some("#000000")),
            },
            vertex_base: StylePair {
                back: Style { stroke: Some(false), fill_opacity: Some(0.0), ..Style::default() },
                front: Style { fill_opacity: Some(1.0), weight: Some(1.0), ..Style::default() },
            },
            edge: StylePair {
                back: Style {
                    weight: Some(14.0),
                    color: Some("#e2200b".to_string()),
                    opacity: Some(0.0),
                    line_join: Some("round".to_string()),
                    ..Style::default()
                },
                front: Style {
                    weight: Some(3.0),
                    color: Some("#ffffff".to_string()),
                    opacity: Some(1.0),
                    ..Style::default()
                },
            },
            vertex_blink: BlinkStyles {
                before: Style { radius: Some(10.0), fill_opacity: Some(0.5), ..Style::default() },
                after: Style { radius: Some(14.0), fill_opacity: Some(0.8), ..Style::default() },
                default: Style { radius: Some(9.0), fill_opacity: Some(0.0), ..Style::default() },
            },
            edge_blink: BlinkStyles {
                before: Style { weight: Some(14.0), opacity: Some(0.5), ..Style::default() },
                after: Style { weight: Some(19.0), opacity: Some(0.8), ..Style::default() },
                default: Style { opacity: Some(0.0), ..Style::default() },
            },
            arrowhead: Style {
                color: Some("#4e4e4e".to_string()),
                weight: Some(1.0),
                fill_color: Some("#fff".to_string()),
                fill_opacity: Some(0.8),
                pane: Some("markerPane".to_string()),
                ..Style::default()
            },
        }
    }
}

impl EditorConfig {
    pub fn kind_styles(&self, kind: VertexKind) -> &StylePair {
        match kind {
            VertexKind::Endpoint => &self.endpoint,
            VertexKind::Midpoint => &self.midpoint,
            VertexKind::Junction => &self.junction,
        }
    }

    /// Full backdrop/foreground styles for a vertex of `kind`.
    pub fn vertex_styles(&self, kind: VertexKind) -> StylePair {
        let k = self.kind_styles(kind);
        StylePair {
            back: self.vertex_base.back.merged(&k.back),
            front: self.vertex_base.front.merged(&k.front),
        }
    }

    /// Overrides any subset of the defaults. Returns `None` when the value
    /// does not describe a config or carries non-positive radii.
    pub fn from_json_value(v: serde_json::Value) -> Option<Self> {
        let cfg: EditorConfig = serde_json::from_value(v).ok()?;
        if !(cfg.hit_radius.is_finite() && cfg.hit_radius > 0.0) {
            return None;
        }
        if !(cfg.line_buffer.is_finite() && cfg.line_buffer > 0.0) {
            return None;
        }
        if cfg.blink_interval_ms == 0 {
            return None;
        }
        Some(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn partial_override_keeps_defaults() {
        let cfg = EditorConfig::from_json_value(json!({"hit_radius": 20.0})).unwrap();
        assert_eq!(cfg.hit_radius, 20.0);
        assert_eq!(cfg.line_buffer, LINE_BUFFER);
        assert_eq!(cfg.endpoint, EditorConfig::default().endpoint);
    }

    #[test]
    fn rejects_non_positive_radius() {
        assert!(EditorConfig::from_json_value(json!({"line_buffer": 0.0})).is_none());
        assert!(EditorConfig::from_json_value(json!({"hit_radius": -1.0})).is_none());
    }

    #[test]
    fn kind_styles_merge_over_base() {
        let cfg = EditorConfig::default();
        let s = cfg.vertex_styles(VertexKind::Junction);
        assert_eq!(s.back.radius, Some(8.0));
        assert_eq!(s.back.stroke, Some(false));
        assert_eq!(s.front.fill_color.as_deref(), Some("#fffd0c"));
        assert_eq!(s.front.weight, Some(1.0));
    }
}
