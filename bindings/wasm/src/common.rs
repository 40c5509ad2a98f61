use serde::Serialize;
use wasm_bindgen::JsValue;

pub(crate) fn js_err(e: impl ToString) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Serialize through a JSON string and parse it on the JS side; large scenes
/// convert faster this way than field by field.
pub(crate) fn to_js_json<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(value)
        .map_err(|e| js_err(format!("Failed to serialize to JSON: {e}")))?;
    js_sys::JSON::parse(&json)
        .map_err(|e| js_err(format!("Failed to parse JSON: {e:?}")))
}

/// `log` backend writing to the browser console.
struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool { metadata.level() <= log::max_level() }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) { return }
        let msg = JsValue::from_str(&record.args().to_string());
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&msg),
            log::Level::Warn => web_sys::console::warn_1(&msg),
            log::Level::Info => web_sys::console::info_1(&msg),
            log::Level::Debug | log::Level::Trace => web_sys::console::debug_1(&msg),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

pub(crate) fn init_console_logger() {
    // A second init (module re-instantiated) keeps the first logger.
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Info);
    }
}
