use wasm_bindgen::prelude::*;

mod common;
mod contour;
mod map;

pub use contour::render_contours;
pub use map::WasmChoropleth;

/// Called automatically when the WASM module is instantiated.
/// Sets up panic hook so Rust panics appear as console.error in the browser,
/// and routes `log` records to the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    common::init_console_logger();
}
