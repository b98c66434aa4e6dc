//! Platform abstraction (clipboard).

#[cfg(feature = "native")]
mod native;
#[cfg(feature = "native")]
pub use native::copy_to_clipboard;

/// Without a clipboard backend every copy fails.
#[cfg(not(feature = "native"))]
pub fn copy_to_clipboard(_content: &str) -> bool {
    log::debug!("clipboard unavailable in this build");
    false
}
