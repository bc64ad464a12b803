//! Console logging for the browser build, stderr fallback on the host.

/// Severity attached to a console line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

/// Install the panic hook so Rust panics show up in the browser console.
pub fn init_logging() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Write one line at `level`.
#[cfg(target_arch = "wasm32")]
pub fn emit(level: Level, message: &str) {
    use wasm_bindgen::JsValue;
    use web_sys::console;

    let line = JsValue::from_str(message);
    match level {
        Level::Debug => console::debug_1(&line),
        Level::Info => console::log_1(&line),
        Level::Warn => console::warn_1(&line),
        Level::Error => console::error_1(&line),
    }
}

/// Write one line at `level`. Only warnings and errors reach stderr on the host.
#[cfg(not(target_arch = "wasm32"))]
pub fn emit(level: Level, message: &str) {
    match level {
        Level::Warn => eprintln!("WARN: {message}"),
        Level::Error => eprintln!("ERROR: {message}"),
        Level::Debug | Level::Info => {}
    }
}

/// Log an info message to the browser console
#[macro_export]
macro_rules! console_log {
    ($($t:tt)*) => {
        $crate::logging::emit($crate::logging::Level::Info, &format!($($t)*))
    }
}

/// Log a debug message to the browser console
#[macro_export]
macro_rules! console_debug {
    ($($t:tt)*) => {
        $crate::logging::emit($crate::logging::Level::Debug, &format!($($t)*))
    }
}

/// Log a warning message to the browser console
#[macro_export]
macro_rules! console_warn {
    ($($t:tt)*) => {
        $crate::logging::emit($crate::logging::Level::Warn, &format!($($t)*))
    }
}

/// Log an error message to the browser console
#[macro_export]
macro_rules! console_error {
    ($($t:tt)*) => {
        $crate::logging::emit($crate::logging::Level::Error, &format!($($t)*))
    }
}
