use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid validator configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Options for a [`Validator`](crate::Validator).
///
/// Every field is optional in the serialized form and falls back to its default.
///
/// ```
/// use geoschema::ValidatorConfig;
///
/// let config = ValidatorConfig::from_json(r#"{"max_depth": 8, "enforce_winding": true}"#).unwrap();
/// assert_eq!(config.max_depth, 8);
/// assert!(config.enforce_winding);
/// assert!(!config.strict_bbox);
/// ```
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Nesting cap for GeoJSON objects; the root object is at depth 0.
    pub max_depth: usize,
    /// Treat a bbox whose length disagrees with the coordinate dimension as an
    /// error, and skip the `verify_bbox` enclosure check.
    pub strict_bbox: bool,
    /// Report rings with unconventional winding as errors instead of warnings.
    pub enforce_winding: bool,
    /// Check that every bbox encloses the positions of its object.
    pub verify_bbox: bool,
    /// Warn about longitudes outside [-180, 180] and latitudes outside [-90, 90].
    pub check_ranges: bool,
    /// Wrap longitudes into [-180, 180] before the range check.
    pub wrap_longitude: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        ValidatorConfig {
            max_depth: DEFAULT_MAX_DEPTH,
            strict_bbox: false,
            enforce_winding: false,
            verify_bbox: false,
            check_ranges: true,
            wrap_longitude: false,
        }
    }
}

impl ValidatorConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config = serde_json::from_str(text)?;
        Ok(config)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        let config = serde_json::from_value(value)?;
        Ok(config)
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_strict_bbox(mut self, strict_bbox: bool) -> Self {
        self.strict_bbox = strict_bbox;
        self
    }

    pub fn with_enforce_winding(mut self, enforce_winding: bool) -> Self {
        self.enforce_winding = enforce_winding;
        self
    }

    pub fn with_verify_bbox(mut self, verify_bbox: bool) -> Self {
        self.verify_bbox = verify_bbox;
        self
    }

    pub fn with_check_ranges(mut self, check_ranges: bool) -> Self {
        self.check_ranges = check_ranges;
        self
    }

    pub fn with_wrap_longitude(mut self, wrap_longitude: bool) -> Self {
        self.wrap_longitude = wrap_longitude;
        self
    }
}
