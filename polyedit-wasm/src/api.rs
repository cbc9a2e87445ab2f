use crate::error;
use crate::interop::arr_f64;
use crate::Editor;
use js_sys::Float64Array;
use polyedit::config::EditorConfig;
use polyedit::model::{GeoPoint, PathData, ScreenPoint, SessionKey};
use polyedit::surface::LayerId;
use polyedit::{PointerEvent, PointerKind, Target};
use serde::Serialize;
use wasm_bindgen::prelude::*;
type JsValue = wasm_bindgen::JsValue;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Installs the panic hook and routes `tracing` output to the browser
/// console. Safe to call more than once.
#[wasm_bindgen]
pub fn init() {
    set_panic_hook();
    #[cfg(target_arch = "wasm32")]
    {
        static ONCE: std::sync::Once = std::sync::Once::new();
        ONCE.call_once(tracing_wasm::set_as_global_default);
    }
}

fn parse_kind(kind: &str) -> Option<PointerKind> {
    Some(match kind {
        "click" => PointerKind::Click,
        "mousedown" => PointerKind::MouseDown,
        "mousemove" => PointerKind::MouseMove,
        "mouseup" => PointerKind::MouseUp,
        "mouseover" => PointerKind::MouseOver,
        "mouseout" => PointerKind::MouseOut,
        "contextmenu" => PointerKind::ContextMenu,
        _ => return None,
    })
}

#[wasm_bindgen]
impl Editor {
    #[wasm_bindgen(constructor)]
    pub fn new(host: JsValue) -> Editor {
        Editor::rs_new(host, EditorConfig::default())
    }

    /// Builds an editor with a partial config override.
    pub fn with_config_res(host: JsValue, config: JsValue) -> JsValue {
        let v: serde_json::Value = match serde_wasm_bindgen::from_value(config) {
            Ok(v) => v,
            Err(e) => return error::invalid_json(format!("{}", e)),
        };
        match EditorConfig::from_json_value(v) {
            Some(cfg) => error::ok(Editor::rs_new(host, cfg).into()),
            None => error::invalid_json("config rejected"),
        }
    }

    /// Draws a persisted `{id, coordinates}` path; returns its session key.
    pub fn draw(&mut self, path: JsValue) -> Option<u32> {
        let data: PathData = serde_wasm_bindgen::from_value(path).ok()?;
        self.inner.draw(data).map(|k| k.0)
    }
    pub fn draw_res(&mut self, path: JsValue) -> JsValue {
        let data: PathData = match serde_wasm_bindgen::from_value(path) {
            Ok(d) => d,
            Err(e) => return error::invalid_json(format!("{}", e)),
        };
        if data.coordinates.iter().any(|c| !c.is_finite()) {
            return error::non_finite("coordinates");
        }
        match self.inner.draw(data) {
            Some(k) => error::ok(JsValue::from_f64(k.0 as f64)),
            None => error::ok(JsValue::NULL),
        }
    }
    pub fn draw_new_line(&mut self) -> u32 {
        let key = self.inner.draw_new_line().0;
        self.rs_prune_binders();
        key
    }
    pub fn remove(&mut self, id: Option<String>) -> bool {
        let removed = self.inner.remove(id.as_deref());
        self.rs_prune_binders();
        removed
    }
    pub fn clear(&mut self) {
        self.inner.clear();
        self.binders.clear();
    }
    pub fn bind_path_id_res(&mut self, session: u32, id: String) -> JsValue {
        let Some(binder) = self.binders.get(&session).copied() else {
            return match self.inner.session(SessionKey(session)) {
                Some(s) if s.is_saved() => error::from_core(("already_bound", "binder was already used".into())),
                _ => error::invalid_id("session", session),
            };
        };
        match self.inner.bind_path_id(binder, &id) {
            Ok(()) => {
                self.binders.remove(&session);
                error::ok(JsValue::TRUE)
            }
            Err(e) => error::from_core(e),
        }
    }

    /// Forwards one pointer input. `layer` is the id the host received in
    /// `addLayer`, or undefined for the map. Returns the notifications it
    /// produced.
    pub fn handle_event(&mut self, kind: &str, layer: Option<u32>, x: f64, y: f64, lat: f64, lng: f64) -> JsValue {
        let Some(kind) = parse_kind(kind) else { return js_sys::Array::new().into() };
        let target = layer.map_or(Target::Map, |l| Target::Layer(LayerId(l)));
        let ev = PointerEvent { kind, target, screen: ScreenPoint::new(x, y), geo: GeoPoint::new(lat, lng) };
        self.inner.handle_event(&ev);
        self.rs_take_events()
    }
    pub fn handle_event_res(&mut self, kind: &str, layer: Option<u32>, x: f64, y: f64, lat: f64, lng: f64) -> JsValue {
        for (name, v) in [("x", x), ("y", y), ("lat", lat), ("lng", lng)] {
            if !v.is_finite() {
                return error::non_finite(name);
            }
        }
        if parse_kind(kind).is_none() {
            return error::invalid_kind(kind);
        }
        error::ok(self.handle_event(kind, layer, x, y, lat, lng))
    }
    pub fn zoom_end(&mut self) {
        self.inner.zoom_end();
    }
    pub fn tick(&mut self, elapsed_ms: f64) {
        if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
            self.inner.tick(elapsed_ms as u64);
        }
    }
    pub fn cancel_blink(&mut self) {
        self.inner.cancel_blink();
    }
    pub fn delete_point_res(&mut self, lat: f64, lng: f64) -> JsValue {
        if !lat.is_finite() {
            return error::non_finite("lat");
        }
        if !lng.is_finite() {
            return error::non_finite("lng");
        }
        let changed = self.inner.delete_point(GeoPoint::new(lat, lng));
        error::ok(JsValue::from_f64(changed.len() as f64))
    }
    pub fn take_events(&mut self) -> JsValue {
        self.rs_take_events()
    }

    pub fn pick(&self, x: f64, y: f64) -> JsValue {
        match self.inner.pick(ScreenPoint::new(x, y)) {
            Some(p) => serde_wasm_bindgen::to_value(&p).unwrap_or(JsValue::NULL),
            None => JsValue::NULL,
        }
    }
    pub fn pick_res(&self, x: f64, y: f64) -> JsValue {
        if !x.is_finite() {
            return error::non_finite("x");
        }
        if !y.is_finite() {
            return error::non_finite("y");
        }
        error::ok(self.pick(x, y))
    }
    /// Layer id to report for a pointer at (x, y), or undefined for the map.
    pub fn target_at(&self, x: f64, y: f64) -> Option<u32> {
        match self.inner.target_at(ScreenPoint::new(x, y)) {
            Target::Layer(l) => Some(l.0),
            Target::Map => None,
        }
    }

    pub fn context_menu(&self) -> JsValue {
        match self.inner.context_menu() {
            Some(m) => serde_wasm_bindgen::to_value(m).unwrap_or(JsValue::NULL),
            None => JsValue::NULL,
        }
    }
    /// Runs item `index` of the open context menu.
    pub fn run_menu_item_res(&mut self, index: u32) -> JsValue {
        let action = self.inner.context_menu().and_then(|m| m.items.get(index as usize)).map(|i| i.action.clone());
        let Some(action) = action else { return error::invalid_id("menu item", index) };
        let done = self.inner.run_menu_action(&action);
        self.rs_prune_binders();
        error::ok(JsValue::from_bool(done))
    }

    pub fn is_drawing(&self) -> bool {
        self.inner.is_drawing()
    }
    pub fn session_count(&self) -> u32 {
        self.inner.session_count() as u32
    }
    /// Flat `[lat, lng, lat, lng, ...]` of one session's path.
    pub fn path_coordinates(&self, session: u32) -> Option<Float64Array> {
        let s = self.inner.session(SessionKey(session))?;
        let flat: Vec<f64> = s.coordinates().iter().flat_map(|c| [c.lat, c.lng]).collect();
        Some(arr_f64(&flat))
    }
    pub fn paths(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.inner.paths()).unwrap_or(JsValue::NULL)
    }

    pub fn to_json(&self) -> JsValue {
        let v = self.inner.to_json_value();
        v.serialize(&serde_wasm_bindgen::Serializer::json_compatible()).unwrap_or(JsValue::NULL)
    }
    pub fn from_json(&mut self, v: JsValue) -> bool {
        match serde_wasm_bindgen::from_value::<serde_json::Value>(v) {
            Ok(val) => self.inner.from_json_value(val),
            Err(_) => false,
        }
    }
    pub fn from_json_res(&mut self, v: JsValue) -> JsValue {
        let val: serde_json::Value = match serde_wasm_bindgen::from_value(v) {
            Ok(val) => val,
            Err(e) => return error::invalid_json(format!("{}", e)),
        };
        match self.inner.from_json_value_strict(val) {
            Ok(n) => error::ok(JsValue::from_f64(n as f64)),
            Err(e) => error::from_core(e),
        }
    }
}
