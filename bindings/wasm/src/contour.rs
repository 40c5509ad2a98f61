use wasm_bindgen::{JsValue, prelude::wasm_bindgen};

use choromap_core::{ContourOptions, read_grid};

use crate::common::*;

/// Render a contour overlay.
/// grid: JSON text of a 2D array; options: JSON object text or empty.
/// Returns the scene as a JS object.
#[wasm_bindgen(js_name = "render_contours")]
pub fn render_contours(grid: &str, options: Option<String>) -> Result<JsValue, JsValue> {
    let options = match options.as_deref().map(str::trim) {
        None | Some("") => ContourOptions::default(),
        Some(text) => ContourOptions::from_json_str(text).map_err(js_err)?,
    };
    let grid = read_grid(grid.as_bytes()).map_err(js_err)?;
    let scene = choromap_core::render_contours(&grid, &options).map_err(js_err)?;
    to_js_json(&scene)
}
