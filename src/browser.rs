//! Browser launch
//!
//! Best-effort opening of the default browser at the server URL. A failure
//! here is a warning only; the server keeps serving either way.

use crate::logger;

pub fn open_at(url: &str) {
    logger::log_browser_opening(url);
    if let Err(e) = open::that(url) {
        logger::log_browser_warning(url, &e);
    }
}
