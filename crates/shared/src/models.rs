use serde::{Deserialize, Serialize};

/// One positioned annotation: a marker on the pane plus its popup.
///
/// Either `yratio` or `latitude` places the record vertically, and either
/// `xratio` or `longitude` horizontally. Ratios win when both are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub yratio: Option<f64>,
    #[serde(default)]
    pub xratio: Option<f64>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub links: Vec<String>,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub html: Option<String>,
}

impl AnnotationRecord {
    /// Body text, if there is any to show.
    pub fn body(&self) -> Option<&str> {
        non_empty(self.text.as_deref())
    }

    /// Raw markup appended to the popup, if any.
    pub fn markup(&self) -> Option<&str> {
        non_empty(self.html.as_deref())
    }

    /// Link the label points at: the first one listed.
    pub fn label_link(&self) -> Option<&str> {
        self.links.first().map(String::as_str)
    }

    /// Extra class for the marker box, derived from `style`.
    pub fn marker_class(&self) -> Option<String> {
        (!self.style.is_empty()).then(|| format!("{}pin", self.style))
    }

    /// Extra class for the popup box, derived from `style`.
    pub fn popup_class(&self) -> Option<String> {
        (!self.style.is_empty()).then(|| format!("{}annot", self.style))
    }
}

/// One cell of an image grid. Placed by its position in the list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridRecord {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl GridRecord {
    pub const EMPTY_LABEL: &'static str = "[+]";

    /// Text shown on the cell label.
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            Self::EMPTY_LABEL
        } else {
            &self.label
        }
    }

    pub fn note(&self) -> Option<&str> {
        non_empty(self.comment.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_record_defaults() {
        let rec: AnnotationRecord =
            serde_json::from_str(r#"{"label": "Pier", "latitude": 35.5, "longitude": 139.7}"#)
                .unwrap();
        assert_eq!(rec.label, "Pier");
        assert_eq!(rec.latitude, Some(35.5));
        assert!(rec.images.is_empty());
        assert!(rec.links.is_empty());
        assert_eq!(rec.style, "");
        assert!(rec.xratio.is_none());
    }

    #[test]
    fn test_style_classes() {
        let rec = AnnotationRecord {
            style: "blue".to_string(),
            ..Default::default()
        };
        assert_eq!(rec.marker_class().as_deref(), Some("bluepin"));
        assert_eq!(rec.popup_class().as_deref(), Some("blueannot"));
        assert!(AnnotationRecord::default().marker_class().is_none());
    }

    #[test]
    fn test_empty_text_is_hidden() {
        let rec = AnnotationRecord {
            text: Some(String::new()),
            html: Some("<b>x</b>".to_string()),
            ..Default::default()
        };
        assert!(rec.body().is_none());
        assert_eq!(rec.markup(), Some("<b>x</b>"));
    }

    #[test]
    fn test_grid_display_label() {
        let mut rec = GridRecord::default();
        assert_eq!(rec.display_label(), "[+]");
        rec.label = "Cats".to_string();
        assert_eq!(rec.display_label(), "Cats");
    }
}
