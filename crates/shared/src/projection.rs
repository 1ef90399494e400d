use std::f64::consts::PI;

use crate::config::BoundingBox;
use crate::error::Rejection;
use crate::models::AnnotationRecord;

/// Position of a record as fractions of the pane axes, origin at the top left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ratios {
    pub x: f64,
    pub y: f64,
}

/// Mercator-warped vertical coordinate of a latitude in degrees.
pub fn mercator_y(latitude: f64) -> f64 {
    (PI / 4.0 + latitude * PI / 360.0).tan().ln()
}

/// Horizontal coordinate of a longitude in degrees. Linear.
pub fn longitude_x(longitude: f64) -> f64 {
    longitude / 180.0
}

/// Place a record inside `bounds`.
///
/// Explicit ratios are used untouched. Coordinates are projected and must fall
/// inside the box (edges included); a box with its corners out of order or
/// collapsed to a line admits no coordinate at all.
pub fn project(bounds: &BoundingBox, record: &AnnotationRecord) -> Result<Ratios, Rejection> {
    let y = match record.yratio {
        Some(ratio) => ratio,
        None => y_ratio(bounds, record)?,
    };
    let x = match record.xratio {
        Some(ratio) => ratio,
        None => x_ratio(bounds, record)?,
    };
    Ok(Ratios { x, y })
}

fn y_ratio(bounds: &BoundingBox, record: &AnnotationRecord) -> Result<f64, Rejection> {
    let latitude = record
        .latitude
        .filter(|v| v.is_finite())
        .ok_or_else(|| Rejection::MissingLatitude(record.label.clone()))?;
    let start = mercator_y(bounds.start_lat);
    let end = mercator_y(bounds.end_lat);
    let value = mercator_y(latitude);
    if value > start {
        return Err(Rejection::NorthOfBounds(record.label.clone()));
    }
    if value < end || start <= end {
        return Err(Rejection::SouthOfBounds(record.label.clone()));
    }
    Ok((start - value) / (start - end))
}

fn x_ratio(bounds: &BoundingBox, record: &AnnotationRecord) -> Result<f64, Rejection> {
    let longitude = record
        .longitude
        .filter(|v| v.is_finite())
        .ok_or_else(|| Rejection::MissingLongitude(record.label.clone()))?;
    let start = longitude_x(bounds.start_long);
    let end = longitude_x(bounds.end_long);
    let value = longitude_x(longitude);
    if value < start {
        return Err(Rejection::WestOfBounds(record.label.clone()));
    }
    if value > end || start >= end {
        return Err(Rejection::EastOfBounds(record.label.clone()));
    }
    Ok((value - start) / (end - start))
}
