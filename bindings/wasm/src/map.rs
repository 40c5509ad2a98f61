use wasm_bindgen::{JsValue, prelude::wasm_bindgen};

use choromap_core::{LoadStatus, LoadTicket, MapOptions, MapSession, PointerEvent, ZoomTransform};

use crate::common::*;

/// Interactive choropleth bound to a page. The page fetches `map_data.json`
/// itself and reports the result through `finish_load` / `fail_load`.
#[wasm_bindgen]
pub struct WasmChoropleth {
    inner: MapSession,
}

#[wasm_bindgen]
impl WasmChoropleth {
    /// options: JSON object text, e.g. '{"geog": "tract", "zoomThreshold": 4}'.
    /// Empty or missing text means all defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(options: Option<String>) -> Result<WasmChoropleth, JsValue> {
        let options = match options.as_deref().map(str::trim) {
            None | Some("") => MapOptions::default(),
            Some(text) => MapOptions::from_json_str(text).map_err(js_err)?,
        };
        Ok(WasmChoropleth { inner: MapSession::new(options).map_err(js_err)? })
    }

    /// Start a load; pass the returned ticket to `finish_load` or `fail_load`.
    pub fn begin_load(&mut self) -> f64 { self.inner.begin_load().generation() as f64 }

    /// Complete a load with the fetched JSON text.
    /// Returns "rendered", "stale", or "failed".
    pub fn finish_load(&mut self, ticket: f64, json: &str) -> Result<String, JsValue> {
        let result = choromap_core::read_features(json.as_bytes());
        let status = self.inner.finish_load(LoadTicket::from_generation(ticket as u64), result).map_err(js_err)?;
        Ok(status_name(status).to_string())
    }

    /// Report a failed fetch. Logged to the console; the current map stays.
    pub fn fail_load(&mut self, ticket: f64, message: &str) -> Result<String, JsValue> {
        let status = self.inner
            .finish_load(LoadTicket::from_generation(ticket as u64), Err(anyhow::anyhow!("{message}")))
            .map_err(js_err)?;
        Ok(status_name(status).to_string())
    }

    /// Current drawing instructions as a JS object.
    pub fn scene(&self) -> Result<JsValue, JsValue> { to_js_json(&self.inner.scene()) }

    /// Current scene as SVG text (UI can set innerHTML or create Blob).
    #[wasm_bindgen(js_name = "to_svg")]
    pub fn to_svg(&self) -> Result<String, JsValue> {
        choromap_core::scene_to_svg_string(&self.inner.scene()).map_err(js_err)
    }

    /// Forward a zoom event. Returns the level switched to, if any.
    pub fn zoom(&mut self, x: f64, y: f64, k: f64) -> Result<Option<String>, JsValue> {
        let outcome = self.inner.zoom(ZoomTransform::new(x, y, k)).map_err(js_err)?;
        Ok(outcome.switched_to.map(|level| level.to_string()))
    }

    /// Pan by (dx, dy) screen pixels from the current transform.
    pub fn pan(&mut self, dx: f64, dy: f64) -> Result<Option<String>, JsValue> {
        let transform = self.inner.zoom_transform().translate_by(dx, dy);
        self.zoom(transform.x, transform.y, transform.k)
    }

    /// Wheel zoom by `factor`, keeping the screen point (x, y) fixed.
    pub fn zoom_by(&mut self, x: f64, y: f64, factor: f64) -> Result<Option<String>, JsValue> {
        let transform = self.inner.zoom_transform().scale_about((x, y), factor);
        self.zoom(transform.x, transform.y, transform.k)
    }

    /// Pointer moved to (x, y) on the surface at `now` ms. Returns the hovered GEOID.
    pub fn pointer_move(&mut self, x: f64, y: f64, now: f64) -> Option<String> {
        self.inner.pointer_move(PointerEvent::at(x, y), now).map(|feature| feature.geoid.clone())
    }

    pub fn pointer_leave(&mut self, now: f64) { self.inner.pointer_leave(now) }

    /// Tooltip content, position and opacity at `now` ms.
    pub fn tooltip(&self, now: f64) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.tooltip(now)).map_err(|e| e.into())
    }

    /// Inline style pairs for the tooltip element.
    pub fn tooltip_style() -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(choromap_core::TOOLTIP_STYLE).map_err(|e| e.into())
    }

    /// Currently active granularity level, e.g. "tract".
    pub fn level(&self) -> String { self.inner.level().to_string() }
}

fn status_name(status: LoadStatus) -> &'static str {
    match status {
        LoadStatus::Rendered { .. } => "rendered",
        LoadStatus::Stale => "stale",
        LoadStatus::Failed => "failed",
    }
}
