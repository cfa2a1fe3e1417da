//! Screen capture backends.
//!
//! [`CaptureBackend`] is the seam between the pipeline and the OS capture
//! mechanism. The production implementation [`XcapCapture`] grabs the
//! monitor that contains the region's top-left corner via the `xcap` crate
//! and crops the region out of it.
//!
//! Capture is blocking (xcap talks to the display server); the pipeline
//! runner wraps calls in `tokio::task::spawn_blocking`.

use image::DynamicImage;
use thiserror::Error;
use xcap::Monitor;

use crate::capture::region::Region;

// ---------------------------------------------------------------------------
// CaptureError
// ---------------------------------------------------------------------------

/// Errors that can arise while grabbing pixels from the screen.
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    /// Monitor enumeration failed or returned nothing.
    #[error("no monitor available: {0}")]
    NoMonitor(String),

    /// The region lies outside every monitor.
    #[error("region is outside all monitors")]
    RegionOffScreen,

    /// The OS capture call itself failed.
    #[error("screen grab failed: {0}")]
    Grab(String),
}

// ---------------------------------------------------------------------------
// CaptureBackend trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface for screen capture.
///
/// Implementations must be `Send + Sync` so they can be held behind an
/// `Arc<dyn CaptureBackend>` and called from a blocking task.
pub trait CaptureBackend: Send + Sync {
    /// Capture `region` and return its pixels.
    ///
    /// The returned image has exactly `region.width() × region.height()`
    /// pixels unless the region extends past the monitor edge, in which
    /// case it is clamped to the visible part.
    fn capture_region(&self, region: &Region) -> Result<DynamicImage, CaptureError>;
}

// Compile-time assertion: Box<dyn CaptureBackend> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn CaptureBackend>) {}
};

// ---------------------------------------------------------------------------
// XcapCapture
// ---------------------------------------------------------------------------

/// Production capture backend built on the `xcap` crate.
#[derive(Debug, Default)]
pub struct XcapCapture;

impl XcapCapture {
    pub fn new() -> Self {
        Self
    }

    /// Find the monitor whose bounds contain `(x, y)`.
    fn monitor_at(x: i32, y: i32) -> Result<Monitor, CaptureError> {
        let monitors = Monitor::all().map_err(|e| CaptureError::NoMonitor(e.to_string()))?;

        if monitors.is_empty() {
            return Err(CaptureError::NoMonitor("no monitors detected".into()));
        }

        for monitor in monitors {
            let (mx, my) = (
                monitor.x().map_err(|e| CaptureError::Grab(e.to_string()))?,
                monitor.y().map_err(|e| CaptureError::Grab(e.to_string()))?,
            );
            let (mw, mh) = (
                monitor.width().map_err(|e| CaptureError::Grab(e.to_string()))? as i32,
                monitor.height().map_err(|e| CaptureError::Grab(e.to_string()))? as i32,
            );

            if x >= mx && x < mx + mw && y >= my && y < my + mh {
                return Ok(monitor);
            }
        }

        Err(CaptureError::RegionOffScreen)
    }
}

impl CaptureBackend for XcapCapture {
    fn capture_region(&self, region: &Region) -> Result<DynamicImage, CaptureError> {
        let monitor = Self::monitor_at(region.left, region.top)?;

        let mx = monitor.x().map_err(|e| CaptureError::Grab(e.to_string()))?;
        let my = monitor.y().map_err(|e| CaptureError::Grab(e.to_string()))?;

        let screenshot = monitor
            .capture_image()
            .map_err(|e| CaptureError::Grab(e.to_string()))?;

        // Translate into monitor-local coordinates and clamp to its bounds.
        let x = (region.left - mx).max(0) as u32;
        let y = (region.top - my).max(0) as u32;
        let w = (region.width() as u32).min(screenshot.width().saturating_sub(x));
        let h = (region.height() as u32).min(screenshot.height().saturating_sub(y));

        if w == 0 || h == 0 {
            return Err(CaptureError::RegionOffScreen);
        }

        let cropped = image::imageops::crop_imm(&screenshot, x, y, w, h).to_image();
        Ok(DynamicImage::ImageRgba8(cropped))
    }
}

// ---------------------------------------------------------------------------
// MockCapture  (test-only)
// ---------------------------------------------------------------------------

/// Test double that returns a pre-configured image or error without touching
/// the display server.
#[cfg(test)]
pub struct MockCapture {
    response: Result<DynamicImage, CaptureError>,
}

#[cfg(test)]
impl MockCapture {
    /// A mock that returns a blank RGBA image of the given size.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            response: Ok(DynamicImage::new_rgba8(width, height)),
        }
    }

    /// A mock that always fails with `error`.
    pub fn err(error: CaptureError) -> Self {
        Self {
            response: Err(error),
        }
    }
}

#[cfg(test)]
impl CaptureBackend for MockCapture {
    fn capture_region(&self, _region: &Region) -> Result<DynamicImage, CaptureError> {
        self.response.clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_blank_returns_requested_size() {
        let capture = MockCapture::blank(64, 32);
        let region = Region::from_corners(0, 0, 64, 32).unwrap();
        let image = capture.capture_region(&region).unwrap();
        assert_eq!(image.width(), 64);
        assert_eq!(image.height(), 32);
    }

    #[test]
    fn mock_err_returns_configured_error() {
        let capture = MockCapture::err(CaptureError::Grab("denied".into()));
        let region = Region::from_corners(0, 0, 64, 32).unwrap();
        let err = capture.capture_region(&region).unwrap_err();
        assert!(matches!(err, CaptureError::Grab(_)));
    }

    #[test]
    fn capture_error_display_includes_cause() {
        let e = CaptureError::Grab("permission denied".into());
        assert!(e.to_string().contains("permission denied"));
    }

    #[test]
    fn box_dyn_capture_backend_compiles() {
        let backend: Box<dyn CaptureBackend> = Box::new(MockCapture::blank(1, 1));
        let region = Region::from_corners(0, 0, 20, 20).unwrap();
        let _ = backend.capture_region(&region);
    }
}
