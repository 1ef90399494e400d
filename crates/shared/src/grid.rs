//! Image grid cell geometry.
//!
//! Each record gets a square cell of `unit` pixels. Its images are stacked
//! diagonally from the top-left corner, shrinking as the count grows, so every
//! image stays partly visible. The literal divisors below are tuned visually.

use crate::layout::{Point, Size};

/// Vertical divisor centering a lone image; slightly above true center.
pub const SINGLE_IMAGE_TOP_DIVISOR: f64 = 2.5;
pub const SINGLE_IMAGE_LEFT_DIVISOR: f64 = 2.0;

/// Maximum side of each image in a cell holding `count` images.
pub fn image_side(unit: f64, count: usize) -> f64 {
    if count == 0 {
        return unit;
    }
    (unit / (count as f64).cbrt()).round()
}

/// Diagonal offset between consecutive images before they load.
pub fn stack_step(unit: f64, count: usize) -> f64 {
    if count < 2 {
        return 0.0;
    }
    ((unit - image_side(unit, count)) / (count - 1) as f64).floor()
}

/// Where an image link sits before its image has loaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anchor {
    TopLeft(Point),
    BottomRight,
}

pub fn initial_anchor(unit: f64, index: usize, count: usize) -> Anchor {
    if count > 1 && index == count - 1 {
        return Anchor::BottomRight;
    }
    let offset = index as f64 * stack_step(unit, count);
    Anchor::TopLeft(Point::new(offset, offset))
}

/// Where an image link moves once its image reports its rendered size.
///
/// The first of several images stays in the corner.
pub fn loaded_offset(unit: f64, index: usize, count: usize, image: Size) -> Option<Point> {
    if count == 1 {
        return Some(Point::new(
            ((unit - image.width) / SINGLE_IMAGE_LEFT_DIVISOR).floor(),
            ((unit - image.height) / SINGLE_IMAGE_TOP_DIVISOR).floor(),
        ));
    }
    if index == 0 {
        return None;
    }
    let spread = (count - 1) as f64;
    Some(Point::new(
        ((unit - image.width) / spread * index as f64).floor(),
        ((unit - image.height) / spread * index as f64).floor(),
    ))
}

/// Stacking order of image `index`: earlier images on top.
pub fn link_z(index: usize, count: usize) -> usize {
    count - index
}

/// Stacking order of a hovered image, above the label.
pub fn hover_z(count: usize) -> usize {
    count + 2
}

pub fn label_z(count: usize) -> usize {
    count + 1
}

/// Geometry of the zoomed overlay showing one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lightbox {
    /// Side of the square screen.
    pub screen: f64,
    /// Scale from a cell to the screen.
    pub zoom: f64,
}

impl Lightbox {
    pub fn new(viewport: Size, unit: f64) -> Self {
        let screen = viewport.width.min(viewport.height);
        Self {
            screen,
            zoom: screen / unit,
        }
    }

    /// Zoom applied to the cloned cell; cells are only ever enlarged.
    pub fn cell_zoom(&self) -> Option<f64> {
        (self.zoom > 1.0).then_some(self.zoom)
    }

    /// Zoom for the label and close control, which grow more gently.
    pub fn control_zoom(&self) -> f64 {
        1.0 / self.zoom.sqrt()
    }

    /// Zoom for the comment block, which keeps its natural text size.
    pub fn comment_zoom(&self) -> f64 {
        1.0 / self.zoom
    }

    pub fn close_z(children: usize) -> usize {
        children + 4
    }
}
