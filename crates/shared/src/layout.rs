//! Pixel geometry of markers and popups inside the pane.
//!
//! All positions are pane-relative CSS pixels, rounded to whole pixels.

use crate::projection::Ratios;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Inset used when a popup would start left of the pane.
pub const LEFT_INSET: f64 = 1.0;

/// Top-left corner of a marker whose tip points at `at`.
pub fn marker_origin(container: Size, at: Ratios, marker: Size) -> Point {
    Point::new(
        (container.width * at.x - marker.width * 0.5).round(),
        (container.height * at.y - marker.height * 0.9).round(),
    )
}

/// Top-left corner of a popup, just under the marker tip.
pub fn popup_origin(container: Size, at: Ratios, marker: Size) -> Point {
    Point::new(
        (container.width * at.x - marker.width * 0.5).round(),
        (container.height * at.y + marker.height * 0.1).round(),
    )
}

/// Pull a popup back inside the pane.
///
/// Each edge is tested against the unclamped position. A popup running off the
/// right is shifted left by its width less most of a marker width; if that still
/// overflows it is aligned to the right edge. A popup running off the bottom is
/// lifted above the marker. Neither shift goes past zero.
pub fn clamp_popup(origin: Point, popup: Size, marker: Size, container: Size) -> Point {
    let mut clamped = origin;
    if origin.x < 0.0 {
        clamped.x = LEFT_INSET;
    }
    if origin.x + popup.width >= container.width {
        let shifted = clamped.x - popup.width + marker.width * 0.8;
        let flush = container.width - popup.width;
        clamped.x = shifted.min(flush).max(0.0).floor();
    }
    if origin.y + popup.height >= container.height {
        clamped.y = (clamped.y - popup.height + marker.height * 0.3)
            .max(0.0)
            .floor();
    }
    clamped
}
