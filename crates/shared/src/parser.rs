//! Record tables: either a JSON array of objects or delimiter rows.
//!
//! A row starting with `|` is split on `|` (leading bar dropped), any other row
//! on `,`. Annotation rows need at least three columns; shorter rows are skipped.
//!
//! Annotation columns: `lat|ratio%, long|ratio%, label, text, images, links, style`.
//! Grid columns: `label, images, comment`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;

use crate::error::ParseError;
use crate::models::{AnnotationRecord, GridRecord};

static JSON_LIST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\[\s*\{[\s\S]+\}\s*\]\s*$").expect("static regex"));

static ITEM_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ ,|]+").expect("static regex"));

const MIN_ANNOTATION_COLUMNS: usize = 3;

/// Whether `text` looks like a JSON array of objects.
pub fn is_json_list(text: &str) -> bool {
    JSON_LIST.is_match(text)
}

pub fn parse_annotations(text: &str) -> Result<Vec<AnnotationRecord>, ParseError> {
    parse_with(text, annotation_from_row)
}

pub fn parse_grid(text: &str) -> Result<Vec<GridRecord>, ParseError> {
    parse_with(text, |cols| Some(grid_from_row(cols)))
}

fn parse_with<T, F>(text: &str, from_row: F) -> Result<Vec<T>, ParseError>
where
    T: DeserializeOwned,
    F: Fn(&[&str]) -> Option<T>,
{
    if is_json_list(text) {
        return Ok(serde_json::from_str(text)?);
    }
    Ok(rows(text).filter_map(|cols| from_row(&cols)).collect())
}

/// Non-blank trimmed lines split into raw columns.
fn rows(text: &str) -> impl Iterator<Item = Vec<&str>> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.strip_prefix('|') {
            Some(rest) => rest.split('|').collect(),
            None => line.split(',').collect(),
        })
}

/// Split a multi-value column on any run of spaces, commas or bars.
pub fn split_items(expr: &str) -> Vec<String> {
    ITEM_SEPARATOR
        .split(expr)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// A coordinate column: either a signed number or a percentage ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Axis {
    Coordinate(Option<f64>),
    Ratio(Option<f64>),
}

fn parse_axis(expr: &str) -> Axis {
    let expr = expr.trim();
    match expr.strip_suffix('%') {
        Some(pct) => Axis::Ratio(parse_number(pct).map(|v| v / 100.0)),
        None => Axis::Coordinate(parse_number(expr)),
    }
}

fn parse_number(expr: &str) -> Option<f64> {
    expr.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn annotation_from_row(cols: &[&str]) -> Option<AnnotationRecord> {
    if cols.len() < MIN_ANNOTATION_COLUMNS {
        return None;
    }
    let mut record = AnnotationRecord {
        label: cols[2].trim().to_string(),
        ..Default::default()
    };
    match parse_axis(cols[0]) {
        Axis::Ratio(v) => record.yratio = v,
        Axis::Coordinate(v) => record.latitude = v,
    }
    match parse_axis(cols[1]) {
        Axis::Ratio(v) => record.xratio = v,
        Axis::Coordinate(v) => record.longitude = v,
    }
    if let Some(text) = cols.get(3) {
        record.text = Some(text.trim().to_string());
    }
    if let Some(images) = cols.get(4) {
        record.images = split_items(images);
    }
    if let Some(links) = cols.get(5) {
        record.links = split_items(links);
    }
    if let Some(style) = cols.get(6) {
        record.style = style.trim().to_string();
    }
    Some(record)
}

fn grid_from_row(cols: &[&str]) -> GridRecord {
    GridRecord {
        label: cols.first().map(|c| c.trim().to_string()).unwrap_or_default(),
        images: cols.get(1).map(|c| split_items(c)).unwrap_or_default(),
        comment: cols.get(2).map(|c| c.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_full_row() {
        let recs = parse_annotations(
            "40.0,-70.0,Port,A nice port,img1.jpg img2.jpg,http://a http://b,blue",
        )
        .unwrap();
        assert_eq!(recs.len(), 1);
        let r = &recs[0];
        assert_eq!(r.latitude, Some(40.0));
        assert_eq!(r.longitude, Some(-70.0));
        assert_eq!(r.label, "Port");
        assert_eq!(r.text.as_deref(), Some("A nice port"));
        assert_eq!(r.images, vec!["img1.jpg", "img2.jpg"]);
        assert_eq!(r.links, vec!["http://a", "http://b"]);
        assert_eq!(r.style, "blue");
        assert!(r.yratio.is_none());
        assert!(r.xratio.is_none());
    }

    #[test]
    fn test_bar_row_allows_commas_in_lists() {
        let recs = parse_annotations("| 35.6 | 139.7 | Shrine | | a.jpg,b.jpg|c.jpg").unwrap();
        assert_eq!(recs.len(), 1);
        // the third image lands in the links column
        assert_eq!(recs[0].images, vec!["a.jpg", "b.jpg"]);
        assert_eq!(recs[0].links, vec!["c.jpg"]);
        assert_eq!(recs[0].text.as_deref(), Some(""));
    }

    #[test]
    fn test_percent_columns_are_ratios() {
        let recs = parse_annotations("25%,75%,Somewhere").unwrap();
        let r = &recs[0];
        assert!((r.yratio.unwrap() - 0.25).abs() < 1e-9);
        assert!((r.xratio.unwrap() - 0.75).abs() < 1e-9);
        assert!(r.latitude.is_none());
        assert!(r.longitude.is_none());
        assert!(r.text.is_none());
    }

    #[test]
    fn test_short_and_blank_rows_skipped() {
        let text = "\n  \n10,20\n10,20,Kept\n   \n|1|2\n";
        let recs = parse_annotations(text).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].label, "Kept");
    }

    #[test]
    fn test_json_detected() {
        let text = r#"
            [ {"label": "A", "yratio": 0.3, "xratio": 0.4, "images": ["x.png"]},
              {"label": "B", "latitude": 1.5, "longitude": 2.5} ]
        "#;
        assert!(is_json_list(text));
        let recs = parse_annotations(text).unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].yratio, Some(0.3));
        assert_eq!(recs[0].images, vec!["x.png"]);
        assert_eq!(recs[1].longitude, Some(2.5));
    }

    #[test]
    fn test_malformed_json_is_fatal() {
        let text = r#"[{"label": "A", "latitude": }]"#;
        assert!(is_json_list(text));
        assert!(matches!(parse_annotations(text), Err(ParseError::Json(_))));
    }

    #[test]
    fn test_bracket_without_object_is_table() {
        assert!(!is_json_list("[1, 2, 3]"));
        assert!(!is_json_list("10,20,Label"));
    }

    #[test]
    fn test_split_items_mixed_separators() {
        assert_eq!(
            split_items(" a.jpg, b.jpg||c.jpg  d.jpg ,"),
            vec!["a.jpg", "b.jpg", "c.jpg", "d.jpg"]
        );
        assert!(split_items("  ").is_empty());
    }

    #[test]
    fn test_grid_rows() {
        let recs = parse_grid("Cats,a.jpg b.jpg,Two cats\n|Dogs\n,x.jpg").unwrap();
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].label, "Cats");
        assert_eq!(recs[0].images, vec!["a.jpg", "b.jpg"]);
        assert_eq!(recs[0].comment.as_deref(), Some("Two cats"));
        assert_eq!(recs[1].label, "Dogs");
        assert!(recs[1].images.is_empty());
        assert!(recs[1].comment.is_none());
        assert_eq!(recs[2].display_label(), "[+]");
    }

    #[test]
    fn test_grid_json() {
        let recs = parse_grid(r#"[{"label": "L", "images": ["1.png", "2.png"], "comment": "c"}]"#)
            .unwrap();
        assert_eq!(recs[0].images.len(), 2);
        assert_eq!(recs[0].note(), Some("c"));
    }
}
