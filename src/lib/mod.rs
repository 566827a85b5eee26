//! Structural and semantic validation of GeoJSON (RFC 7946).
//!
//! The validator works on already-parsed [`serde_json::Value`]s and reports
//! every problem it finds as a [`ValidationIssue`] with a path into the
//! document, instead of stopping at the first one.
//!
//! ```
//! use geoschema::{validate, ObjectType};
//! use serde_json::json;
//!
//! let collection = json!({
//!     "type": "FeatureCollection",
//!     "features": [
//!         {"type": "Feature", "geometry": {"type": "Point", "coordinates": [200, 0]}, "properties": null},
//!         {"geometry": null, "properties": null}
//!     ]
//! });
//! let result = validate(&collection, Some(ObjectType::FeatureCollection));
//! assert!(!result.is_valid());
//! let paths: Vec<String> = result.issues().iter().map(|i| i.path().to_string()).collect();
//! assert_eq!(paths, ["/features/0/geometry/coordinates", "/features/1"]);
//! ```

pub mod config;
pub mod geo;
pub mod geojson;
pub mod issue;
pub mod seq;
pub mod types;
mod validator;

#[cfg(test)]
mod test_helpers;

pub use self::config::{ConfigError, ValidatorConfig};
pub use self::geojson::{load, Feature, FeatureCollection, FeatureId, GeoJson, Geometry, LoadError};
pub use self::issue::{IssueKind, Path, PathSegment, Severity, ValidationIssue, ValidationResult};
pub use self::types::{GeometryType, ObjectType};
pub use self::validator::{validate, Validator};
