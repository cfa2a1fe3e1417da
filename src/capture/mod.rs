//! Screen region selection and capture.
//!
//! Provides [`Region`] (the user-dragged rectangle), the [`CaptureBackend`]
//! seam, and [`XcapCapture`] — the production backend built on the `xcap`
//! crate.

pub mod region;
pub mod screen;

pub use region::Region;
pub use screen::{CaptureBackend, CaptureError, XcapCapture};

#[cfg(test)]
pub use screen::MockCapture;
