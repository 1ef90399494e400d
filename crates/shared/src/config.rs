use crate::error::ConfigError;

/// Pane attribute holding the bounding box, `"lat1,lon1,lat2,lon2"`.
pub const BOUNDS_ATTR: &str = "data-latlong";

/// Pane attribute switching every popup to permanently open.
pub const SHOW_ALL_ATTR: &str = "data-allopen";

/// Delay before the first pass, so the page can finish layout.
pub const INITIAL_RENDER_DELAY_MS: u32 = 100;

/// Quiet period a resize burst must leave before a pass runs.
pub const RESIZE_DEBOUNCE_MS: u32 = 100;

// Class names exposed as styling hooks.
pub const MARKER_CLASS: &str = "mapannotpinbox";
pub const MARKER_TEXT_CLASS: &str = "mapannotpintext";
pub const POPUP_CLASS: &str = "mapannotannotbox";
pub const LABEL_CLASS: &str = "mapannotannotlabel";
pub const TEXT_CLASS: &str = "mapannotannottext";
pub const IMAGE_BOX_CLASS: &str = "mapannotannotimagebox";
pub const IMAGE_LINK_CLASS: &str = "mapannotannotimagelink";
pub const IMAGE_CLASS: &str = "mapannotannotimage";
pub const LINK_BOX_CLASS: &str = "mapannotannotlinkbox";
pub const LINK_CLASS: &str = "mapannotannotlink";
pub const GRID_UNIT_CLASS: &str = "imagegridunit";
pub const GRID_LABEL_CLASS: &str = "imagegridlabel";
pub const GRID_LINK_CLASS: &str = "imagegridlink";
pub const GRID_COVER_CLASS: &str = "imagegridcover";
pub const GRID_SCREEN_CLASS: &str = "imagegridscreen";
pub const GRID_COMMENT_CLASS: &str = "imagegridcomment";
pub const GRID_CLOSE_CLASS: &str = "imagegridclose";

/// Geographic rectangle the pane image depicts, northwest corner first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub start_lat: f64,
    pub start_long: f64,
    pub end_lat: f64,
    pub end_long: f64,
}

impl BoundingBox {
    pub fn new(start_lat: f64, start_long: f64, end_lat: f64, end_long: f64) -> Self {
        Self {
            start_lat,
            start_long,
            end_lat,
            end_long,
        }
    }

    /// Whether the corners follow the northwest/southeast order.
    ///
    /// A box that does not still configures the pane, but no coordinate can
    /// fall inside it; only records with explicit ratios get placed.
    pub fn is_ordered(&self) -> bool {
        self.start_lat > self.end_lat && self.start_long < self.end_long
    }

    /// Parse the `data-latlong` form: four comma-separated numbers.
    pub fn parse(expr: &str) -> Result<Self, ConfigError> {
        let fields: Vec<&str> = expr.split(',').collect();
        if fields.len() != 4 {
            return Err(ConfigError::BoundsFieldCount(fields.len()));
        }
        let mut corners = [0.0; 4];
        for (slot, field) in corners.iter_mut().zip(&fields) {
            let field = field.trim();
            *slot = field
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ConfigError::BoundsValue(field.to_string()))?;
        }
        Ok(Self::new(corners[0], corners[1], corners[2], corners[3]))
    }
}

/// Settings read from the pane element for one pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaneConfig {
    pub bounds: BoundingBox,
    pub show_all: bool,
}

impl PaneConfig {
    /// Build from raw attribute values; `None` means the attribute is absent.
    pub fn from_attributes(
        bounds: Option<&str>,
        show_all: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let bounds = bounds.ok_or(ConfigError::MissingBounds)?;
        Ok(Self {
            bounds: BoundingBox::parse(bounds)?,
            show_all: show_all.is_some_and(parse_show_all),
        })
    }
}

/// `allopen`, `true` and `1` all turn the flag on.
pub fn parse_show_all(value: &str) -> bool {
    matches!(value, "allopen" | "true" | "1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bounds() {
        let b = BoundingBox::parse("35.8, 139.5,35.5,139.9").unwrap();
        assert!((b.start_lat - 35.8).abs() < 1e-9);
        assert!((b.start_long - 139.5).abs() < 1e-9);
        assert!((b.end_lat - 35.5).abs() < 1e-9);
        assert!((b.end_long - 139.9).abs() < 1e-9);
    }

    #[test]
    fn test_parse_bounds_field_count() {
        assert_eq!(
            BoundingBox::parse("1,2,3"),
            Err(ConfigError::BoundsFieldCount(3))
        );
    }

    #[test]
    fn test_parse_bounds_bad_number() {
        assert_eq!(
            BoundingBox::parse("35.8,east,35.5,139.9"),
            Err(ConfigError::BoundsValue("east".to_string()))
        );
    }

    #[test]
    fn test_parse_bounds_inverted() {
        // southeast corner given first
        let b = BoundingBox::parse("35.5,139.9,35.8,139.5").unwrap();
        assert!(!b.is_ordered());
        assert!(BoundingBox::parse("35.8,139.5,35.5,139.9").unwrap().is_ordered());
        assert!(!BoundingBox::new(10.0, 0.0, 10.0, 5.0).is_ordered());
    }

    #[test]
    fn test_inverted_bounds_still_configure_pane() {
        let cfg = PaneConfig::from_attributes(Some("35.5,139.9,35.8,139.5"), None).unwrap();
        assert!(!cfg.bounds.is_ordered());
    }

    #[test]
    fn test_show_all_values() {
        assert!(parse_show_all("allopen"));
        assert!(parse_show_all("true"));
        assert!(parse_show_all("1"));
        assert!(!parse_show_all("false"));
        assert!(!parse_show_all(""));
    }

    #[test]
    fn test_pane_config_requires_bounds() {
        assert_eq!(
            PaneConfig::from_attributes(None, Some("1")),
            Err(ConfigError::MissingBounds)
        );
        let cfg = PaneConfig::from_attributes(Some("10,0,0,10"), None).unwrap();
        assert!(!cfg.show_all);
        let cfg = PaneConfig::from_attributes(Some("10,0,0,10"), Some("true")).unwrap();
        assert!(cfg.show_all);
    }
}
