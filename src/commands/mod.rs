pub mod apply;
pub mod diffusion;
pub mod render;
pub mod search;
pub mod verify;

use chrono::Local;

/// Timestamp embedded in every JSON report.
pub(crate) fn now_stamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
