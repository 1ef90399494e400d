use thiserror::Error;

/// Problems with the page wiring: element references and pane attributes.
///
/// These never reach the caller; the render call logs them and gives up.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("missing element: {0}")]
    MissingElement(String),

    #[error("bad element: {0}")]
    BadElement(String),

    #[error("element with latlong is missing")]
    MissingBounds,

    #[error("bad latlong format: expected 4 fields, got {0}")]
    BoundsFieldCount(usize),

    #[error("bad latlong value: {0:?}")]
    BoundsValue(String),

    #[error("bad grid unit size: {0}")]
    UnitSize(f64),
}

/// Failure to read a record table. Only the JSON format can fail as a whole.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("malformed JSON record list: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a record was left off the pane.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Rejection {
    #[error("larger latitude: {0}")]
    NorthOfBounds(String),

    #[error("smaller latitude: {0}")]
    SouthOfBounds(String),

    #[error("smaller longitude: {0}")]
    WestOfBounds(String),

    #[error("larger longitude: {0}")]
    EastOfBounds(String),

    #[error("missing latitude: {0}")]
    MissingLatitude(String),

    #[error("missing longitude: {0}")]
    MissingLongitude(String),
}

impl Rejection {
    /// Label of the rejected record.
    pub fn label(&self) -> &str {
        match self {
            Rejection::NorthOfBounds(label)
            | Rejection::SouthOfBounds(label)
            | Rejection::WestOfBounds(label)
            | Rejection::EastOfBounds(label)
            | Rejection::MissingLatitude(label)
            | Rejection::MissingLongitude(label) => label,
        }
    }
}

/// Outcome of a failed render call, split by who gets to see it.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Logged and swallowed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Raised to the caller.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A browser call failed. Logged and swallowed.
    #[error("DOM operation failed: {0}")]
    Dom(String),
}

impl RenderError {
    /// Whether the failure should propagate out of the render call.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RenderError::Parse(_))
    }
}
