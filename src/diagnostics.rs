// Console logging. Native builds (unit tests) can't call into JS, so they
// print to stderr instead.

use crate::error::BoardError;

pub fn error(context: &str, err: &BoardError) {
    #[cfg(target_arch = "wasm32")]
    gloo::console::error!(context.to_string(), err.to_string());

    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("{context} {err}");
}

pub fn debug(line: &str) {
    #[cfg(target_arch = "wasm32")]
    gloo::console::debug!(line.to_string());

    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("{line}");
}
