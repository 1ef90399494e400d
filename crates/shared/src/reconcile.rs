//! One rendering pass over a pane.
//!
//! The pass is written against [`PaneSurface`] so the browser DOM and the
//! in-memory pane used by the tests run the same steps.

use tracing::{debug, warn};

use crate::config::PaneConfig;
use crate::layout::{clamp_popup, marker_origin, popup_origin, Point, Size};
use crate::models::AnnotationRecord;
use crate::projection::{project, Ratios};
use crate::visibility::{Visibility, HIDDEN_LAYERING};

/// The mutable view of a pane the reconciler works through.
///
/// Every node created through this trait is owned by the pass and must be
/// removed by the next [`PaneSurface::clear_owned`]; other children of the pane
/// are never touched.
pub trait PaneSurface {
    type Marker;
    type Popup;
    type Error;

    /// Rendered size of the image the annotations sit on.
    fn container_size(&self) -> Size;

    /// Remove every node created by an earlier pass, keeping the order of the
    /// remaining children.
    fn clear_owned(&mut self) -> Result<(), Self::Error>;

    /// Append a marker for `record` and return it.
    fn add_marker(&mut self, record: &AnnotationRecord) -> Result<Self::Marker, Self::Error>;

    fn marker_size(&self, marker: &Self::Marker) -> Size;

    /// Append a popup with its content composed from `record`.
    fn add_popup(&mut self, record: &AnnotationRecord) -> Result<Self::Popup, Self::Error>;

    fn popup_size(&self, popup: &Self::Popup) -> Size;

    fn place_marker(&mut self, marker: &Self::Marker, at: Point, z: i32) -> Result<(), Self::Error>;

    fn place_popup(&mut self, popup: &Self::Popup, at: Point, z: i32) -> Result<(), Self::Error>;

    /// Wire the marker/popup pair to the visibility machine, starting at
    /// `initial`. Not called in show-all mode.
    fn bind_visibility(
        &mut self,
        marker: &Self::Marker,
        popup: &Self::Popup,
        initial: Visibility,
    ) -> Result<(), Self::Error>;
}

/// A record that made it onto the pane.
#[derive(Debug, Clone, PartialEq)]
pub struct Placed {
    pub label: String,
    pub ratios: Ratios,
    pub marker: Point,
    pub popup: Point,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PassReport {
    pub placed: Vec<Placed>,
    pub rejected: Vec<String>,
}

/// Replace the pane's annotations with `records`.
///
/// Records that fail projection are logged and skipped. A surface error stops
/// the pass where it happened.
pub fn reconcile<S: PaneSurface>(
    surface: &mut S,
    config: &PaneConfig,
    records: &[AnnotationRecord],
) -> Result<PassReport, S::Error> {
    surface.clear_owned()?;
    let container = surface.container_size();
    let mut report = PassReport::default();
    if !config.bounds.is_ordered() {
        warn!(
            north = config.bounds.start_lat,
            west = config.bounds.start_long,
            south = config.bounds.end_lat,
            east = config.bounds.end_long,
            "latlong corners out of order, only ratio records can be placed"
        );
    }

    for record in records {
        let ratios = match project(&config.bounds, record) {
            Ok(ratios) => ratios,
            Err(rejection) => {
                warn!("{}", rejection);
                report.rejected.push(rejection.label().to_string());
                continue;
            }
        };

        let marker = surface.add_marker(record)?;
        let marker_size = surface.marker_size(&marker);
        let marker_at = marker_origin(container, ratios, marker_size);
        surface.place_marker(&marker, marker_at, HIDDEN_LAYERING.marker_z)?;

        let popup = surface.add_popup(record)?;
        let unclamped = popup_origin(container, ratios, marker_size);
        surface.place_popup(&popup, unclamped, HIDDEN_LAYERING.popup_z)?;
        let popup_size = surface.popup_size(&popup);
        let popup_at = clamp_popup(unclamped, popup_size, marker_size, container);
        if popup_at != unclamped {
            surface.place_popup(&popup, popup_at, HIDDEN_LAYERING.popup_z)?;
        }

        if !config.show_all {
            surface.bind_visibility(&marker, &popup, Visibility::Hidden)?;
        }

        report.placed.push(Placed {
            label: record.label.clone(),
            ratios,
            marker: marker_at,
            popup: popup_at,
        });
    }

    debug!(
        placed = report.placed.len(),
        rejected = report.rejected.len(),
        width = container.width,
        "annotation pass done"
    );
    Ok(report)
}
