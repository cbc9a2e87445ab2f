use js_sys::{Function, Reflect};
use polyedit::model::{GeoPoint, ScreenPoint, Style};
use polyedit::surface::{Layer, LayerId, Surface};
use wasm_bindgen::{JsCast, JsValue};

use crate::interop::{args, get_f64};

/// Rendering surface backed by a JS host object. The host implements
/// `project(lat, lng)`, `unproject(x, y)`, `addLayer(id, layer)`,
/// `removeLayer(id)`, `setStyle(id, style)`, `setLatLng(id, point)`,
/// `setLatLngs(id, points)`, `bringToFront(id)` and `setDragging(enabled)`.
/// Missing methods are skipped.
pub struct JsSurface {
    host: JsValue,
    next_id: u32,
}

impl JsSurface {
    pub fn new(host: JsValue) -> Self {
        JsSurface { host, next_id: 0 }
    }

    fn call(&self, method: &str, values: &[JsValue]) -> Option<JsValue> {
        let f = Reflect::get(&self.host, &JsValue::from_str(method)).ok()?;
        let f = f.dyn_into::<Function>().ok()?;
        match f.apply(&self.host, &args(values)) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(method, error = ?e, "host call failed");
                None
            }
        }
    }

    fn to_js<T: serde::Serialize>(v: &T) -> JsValue {
        serde_wasm_bindgen::to_value(v).unwrap_or(JsValue::NULL)
    }
}

impl Surface for JsSurface {
    fn project(&self, p: GeoPoint) -> ScreenPoint {
        let r = self.call("project", &[JsValue::from_f64(p.lat), JsValue::from_f64(p.lng)]);
        match r.and_then(|v| Some(ScreenPoint::new(get_f64(&v, "x")?, get_f64(&v, "y")?))) {
            Some(sp) => sp,
            None => ScreenPoint::new(p.lng, p.lat),
        }
    }
    fn unproject(&self, p: ScreenPoint) -> GeoPoint {
        let r = self.call("unproject", &[JsValue::from_f64(p.x), JsValue::from_f64(p.y)]);
        match r.and_then(|v| Some(GeoPoint::new(get_f64(&v, "lat")?, get_f64(&v, "lng")?))) {
            Some(g) => g,
            None => GeoPoint::new(p.y, p.x),
        }
    }
    fn add_layer(&mut self, layer: Layer) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        self.call("addLayer", &[JsValue::from_f64(id.0 as f64), Self::to_js(&layer)]);
        id
    }
    fn remove_layer(&mut self, id: LayerId) {
        self.call("removeLayer", &[JsValue::from_f64(id.0 as f64)]);
    }
    fn set_style(&mut self, id: LayerId, style: &Style) {
        self.call("setStyle", &[JsValue::from_f64(id.0 as f64), Self::to_js(style)]);
    }
    fn set_position(&mut self, id: LayerId, p: GeoPoint) {
        self.call("setLatLng", &[JsValue::from_f64(id.0 as f64), Self::to_js(&p)]);
    }
    fn set_points(&mut self, id: LayerId, points: &[GeoPoint]) {
        self.call("setLatLngs", &[JsValue::from_f64(id.0 as f64), Self::to_js(&points)]);
    }
    fn bring_to_front(&mut self, id: LayerId) {
        self.call("bringToFront", &[JsValue::from_f64(id.0 as f64)]);
    }
    fn set_dragging(&mut self, enabled: bool) {
        self.call("setDragging", &[JsValue::from_bool(enabled)]);
    }
}
