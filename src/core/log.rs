//! Console logging.
//!
//! Every line is prefixed with the application tag so it can be filtered in
//! the browser console.

use web_sys::console;

const TAG: &str = "[mergedesk]";

pub fn info(message: &str) {
    console::log_1(&format!("{} {}", TAG, message).into());
}

pub fn warn(message: &str) {
    console::warn_1(&format!("{} {}", TAG, message).into());
}

pub fn error(message: &str) {
    console::error_1(&format!("{} {}", TAG, message).into());
}
