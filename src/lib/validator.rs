use super::config::ValidatorConfig;
use super::geo::{
    ring_orientation, validate_latitude, validate_longitude, wrap_longitude, Extent, Orientation,
};
use super::issue::{IssueKind, Path, Severity, ValidationIssue, ValidationResult};
use super::types::{GeometryType, ObjectType};
use serde_json::{Map, Value};
use std::fmt;
use tracing::{debug, trace};

/// Which tags are acceptable for the object being checked.
#[derive(Clone, Copy)]
enum Expect {
    Any,
    Geometry,
    Only(ObjectType),
}

impl Expect {
    fn accepts(self, tag: ObjectType) -> bool {
        match self {
            Expect::Any => true,
            Expect::Geometry => tag.is_geometry(),
            Expect::Only(expected) => tag == expected,
        }
    }
}

impl fmt::Display for Expect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expect::Any => f.write_str("a GeoJSON object"),
            Expect::Geometry => f.write_str("a geometry"),
            Expect::Only(tag) => write!(f, "{}", tag),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Default)]
struct Report {
    issues: Vec<ValidationIssue>,
}

impl Report {
    fn push(&mut self, path: &Path, severity: Severity, kind: IssueKind, message: impl Into<String>) {
        self.issues
            .push(ValidationIssue::new(path.clone(), severity, kind, message));
    }

    fn error(&mut self, path: &Path, kind: IssueKind, message: impl Into<String>) {
        self.push(path, Severity::Error, kind, message);
    }

    fn warning(&mut self, path: &Path, message: impl Into<String>) {
        self.push(path, Severity::Warning, IssueKind::Semantic, message);
    }

    fn append(&mut self, other: Report) {
        self.issues.extend(other.issues);
    }
}

/// Issues of individual members, emitted in the order the members appear in the document.
struct Members<'a> {
    object: &'a Map<String, Value>,
    sections: Vec<(usize, Report)>,
}

impl<'a> Members<'a> {
    fn new(object: &'a Map<String, Value>) -> Self {
        Members {
            object,
            sections: vec![],
        }
    }

    fn add(&mut self, key: &str, report: Report) {
        let position = self
            .object
            .keys()
            .position(|k| k == key)
            .unwrap_or(usize::MAX);
        self.sections.push((position, report));
    }

    fn flush(mut self, report: &mut Report) {
        self.sections.sort_by_key(|(position, _)| *position);
        for (_, section) in self.sections {
            report.append(section);
        }
    }
}

/// Recursive-descent GeoJSON validator.
///
/// A validator holds only its configuration; every call builds its own issue
/// list, so one instance can be shared freely between threads.
///
/// ```
/// use geoschema::{ObjectType, Validator, ValidatorConfig};
/// use serde_json::json;
///
/// let validator = Validator::new(ValidatorConfig::default());
/// let point = json!({"type": "Point", "coordinates": [-115.81, 37.24]});
/// assert!(validator.validate(&point, Some(ObjectType::Point)).is_valid());
/// assert!(!validator.validate(&point, Some(ObjectType::Feature)).is_valid());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    pub fn new(config: ValidatorConfig) -> Self {
        Validator { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate `document`, optionally requiring a specific top-level type.
    ///
    /// Never fails: every problem with the input is reported as an issue.
    pub fn validate(&self, document: &Value, expected: Option<ObjectType>) -> ValidationResult {
        let mut report = Report::default();
        let expect = expected.map_or(Expect::Any, Expect::Only);
        self.check_object(document, &Path::root(), expect, 0, &mut report);
        let result = ValidationResult::new(report.issues);
        debug!(
            valid = result.is_valid(),
            issues = result.issues().len(),
            "validated GeoJSON document"
        );
        result
    }

    fn check_object(
        &self,
        value: &Value,
        path: &Path,
        expect: Expect,
        depth: usize,
        report: &mut Report,
    ) -> Extent {
        if depth > self.config.max_depth {
            debug!(%path, depth, max_depth = self.config.max_depth, "nesting too deep");
            report.error(
                path,
                IssueKind::DepthExceeded,
                format!("too deep: nesting exceeds the maximum depth of {}", self.config.max_depth),
            );
            return Extent::default();
        }

        let object = match value.as_object() {
            Some(object) => object,
            None => {
                report.error(
                    path,
                    IssueKind::UnresolvableType,
                    format!(
                        "missing or invalid type: expected {}, found {}",
                        expect,
                        json_kind(value)
                    ),
                );
                return Extent::default();
            }
        };

        let tag = match resolve_tag(object) {
            Ok(tag) => tag,
            Err(reason) => {
                report.error(
                    path,
                    IssueKind::UnresolvableType,
                    format!("missing or invalid type: {}", reason),
                );
                return Extent::default();
            }
        };

        if !expect.accepts(tag) {
            report.error(
                path,
                IssueKind::UnresolvableType,
                format!("missing or invalid type: expected {}, found \"{}\"", expect, tag),
            );
            return Extent::default();
        }

        trace!(%path, %tag, depth, "checking object");
        let mut members = Members::new(object);
        let extent = match tag {
            ObjectType::Feature => self.check_feature(object, path, depth, &mut members, report),
            ObjectType::FeatureCollection => {
                self.check_feature_collection(object, path, depth, &mut members, report)
            }
            ObjectType::GeometryCollection => {
                self.check_geometry_collection(object, path, depth, &mut members, report)
            }
            geometry => match geometry.as_geometry() {
                Some(kind) => self.check_geometry(object, kind, path, &mut members, report),
                None => Extent::default(),
            },
        };

        if let Some(bbox) = object.get("bbox") {
            let mut section = Report::default();
            self.check_bbox(bbox, &path.key("bbox"), &extent, &mut section);
            members.add("bbox", section);
        }
        members.flush(report);
        extent
    }

    fn check_geometry(
        &self,
        object: &Map<String, Value>,
        kind: GeometryType,
        path: &Path,
        members: &mut Members<'_>,
        report: &mut Report,
    ) -> Extent {
        let coordinates = match object.get("coordinates") {
            Some(coordinates) => coordinates,
            None => {
                report.error(
                    path,
                    IssueKind::Structural,
                    "missing required member \"coordinates\"",
                );
                return Extent::default();
            }
        };
        let mut section = Report::default();
        let path = path.key("coordinates");
        let extent = match kind {
            GeometryType::Point => self
                .check_position(coordinates, &path, &mut section)
                .map(|position| Extent::from_position(&position))
                .unwrap_or_default(),
            GeometryType::MultiPoint => self.check_positions(coordinates, &path, 0, &mut section),
            GeometryType::LineString => self.check_positions(coordinates, &path, 2, &mut section),
            GeometryType::MultiLineString => self.check_each(
                coordinates,
                &path,
                "an array of line strings",
                &mut section,
                |item, path, report| self.check_positions(item, path, 2, report),
            ),
            GeometryType::Polygon => self.check_polygon(coordinates, &path, &mut section),
            GeometryType::MultiPolygon => self.check_each(
                coordinates,
                &path,
                "an array of polygons",
                &mut section,
                |item, path, report| self.check_polygon(item, path, report),
            ),
            GeometryType::GeometryCollection => Extent::default(),
        };
        members.add("coordinates", section);
        extent
    }

    fn check_geometry_collection(
        &self,
        object: &Map<String, Value>,
        path: &Path,
        depth: usize,
        members: &mut Members<'_>,
        report: &mut Report,
    ) -> Extent {
        let geometries = match object.get("geometries") {
            Some(geometries) => geometries,
            None => {
                report.error(path, IssueKind::Structural, "missing required member \"geometries\"");
                return Extent::default();
            }
        };
        let mut section = Report::default();
        let extent = self.check_each(
            geometries,
            &path.key("geometries"),
            "an array of geometries",
            &mut section,
            |item, path, report| self.check_object(item, path, Expect::Geometry, depth + 1, report),
        );
        members.add("geometries", section);
        extent
    }

    fn check_feature(
        &self,
        object: &Map<String, Value>,
        path: &Path,
        depth: usize,
        members: &mut Members<'_>,
        report: &mut Report,
    ) -> Extent {
        for required in &["geometry", "properties"] {
            if !object.contains_key(*required) {
                report.error(
                    path,
                    IssueKind::Structural,
                    format!("missing required member \"{}\"", required),
                );
            }
        }

        let mut extent = Extent::default();
        if let Some(geometry) = object.get("geometry") {
            let mut section = Report::default();
            let path = path.key("geometry");
            match geometry {
                Value::Null => {}
                Value::Object(_) => {
                    extent = self.check_object(geometry, &path, Expect::Geometry, depth + 1, &mut section)
                }
                other => section.error(
                    &path,
                    IssueKind::Structural,
                    format!("geometry must be an object or null, found {}", json_kind(other)),
                ),
            }
            members.add("geometry", section);
        }

        if let Some(properties) = object.get("properties") {
            let mut section = Report::default();
            if !(properties.is_object() || properties.is_null()) {
                section.error(
                    &path.key("properties"),
                    IssueKind::Structural,
                    format!("properties must be an object or null, found {}", json_kind(properties)),
                );
            }
            members.add("properties", section);
        }

        if let Some(id) = object.get("id") {
            let mut section = Report::default();
            if !(id.is_string() || id.is_number()) {
                section.error(
                    &path.key("id"),
                    IssueKind::Structural,
                    format!("id must be a string or a number, found {}", json_kind(id)),
                );
            }
            members.add("id", section);
        }
        extent
    }

    fn check_feature_collection(
        &self,
        object: &Map<String, Value>,
        path: &Path,
        depth: usize,
        members: &mut Members<'_>,
        report: &mut Report,
    ) -> Extent {
        let features = match object.get("features") {
            Some(features) => features,
            None => {
                report.error(path, IssueKind::Structural, "missing required member \"features\"");
                return Extent::default();
            }
        };
        let mut section = Report::default();
        let extent = self.check_each(
            features,
            &path.key("features"),
            "an array of features",
            &mut section,
            |item, path, report| {
                self.check_object(item, path, Expect::Only(ObjectType::Feature), depth + 1, report)
            },
        );
        members.add("features", section);
        extent
    }

    /// Require `value` to be an array and check every element, merging their extents.
    fn check_each<F>(
        &self,
        value: &Value,
        path: &Path,
        what: &str,
        report: &mut Report,
        mut check: F,
    ) -> Extent
    where
        F: FnMut(&Value, &Path, &mut Report) -> Extent,
    {
        let mut extent = Extent::default();
        match value.as_array() {
            Some(items) => {
                for (index, item) in items.iter().enumerate() {
                    extent.merge(&check(item, &path.index(index), report));
                }
            }
            None => report.error(
                path,
                IssueKind::Structural,
                format!("expected {}, found {}", what, json_kind(value)),
            ),
        }
        extent
    }

    /// A sequence of positions, with at least `min_len` members when non-empty.
    fn check_positions(&self, value: &Value, path: &Path, min_len: usize, report: &mut Report) -> Extent {
        let items = match value.as_array() {
            Some(items) => items,
            None => {
                report.error(
                    path,
                    IssueKind::Structural,
                    format!("expected an array of positions, found {}", json_kind(value)),
                );
                return Extent::default();
            }
        };
        if !items.is_empty() && items.len() < min_len {
            report.error(
                path,
                IssueKind::Structural,
                format!(
                    "line string must have at least {} positions, found {}",
                    min_len,
                    items.len()
                ),
            );
        }
        let mut extent = Extent::default();
        for (index, item) in items.iter().enumerate() {
            if let Some(position) = self.check_position(item, &path.index(index), report) {
                extent.include(&position);
            }
        }
        extent
    }

    fn check_polygon(&self, value: &Value, path: &Path, report: &mut Report) -> Extent {
        let mut ring_index = 0;
        self.check_each(value, path, "an array of linear rings", report, |item, path, report| {
            let exterior = ring_index == 0;
            ring_index += 1;
            self.check_ring(item, path, exterior, report)
        })
    }

    fn check_ring(&self, value: &Value, path: &Path, exterior: bool, report: &mut Report) -> Extent {
        let items = match value.as_array() {
            Some(items) => items,
            None => {
                report.error(
                    path,
                    IssueKind::Structural,
                    format!("linear ring must be an array of positions, found {}", json_kind(value)),
                );
                return Extent::default();
            }
        };

        let mut children = Report::default();
        let positions: Vec<Option<Vec<f64>>> = items
            .iter()
            .enumerate()
            .map(|(index, item)| self.check_position(item, &path.index(index), &mut children))
            .collect();

        if positions.len() < 4 {
            report.error(
                path,
                IssueKind::Structural,
                format!("linear ring must have at least 4 positions, found {}", positions.len()),
            );
        }
        if let (Some(Some(first)), Some(Some(last))) = (positions.first(), positions.last()) {
            if first != last {
                report.error(
                    path,
                    IssueKind::Structural,
                    "linear ring is not closed: first and last positions must be equal",
                );
            } else if positions.len() >= 4 {
                let ring: Option<Vec<Vec<f64>>> = positions.iter().cloned().collect();
                if let Some(ring) = ring {
                    self.check_winding(&ring, exterior, path, report);
                }
            }
        }
        report.append(children);

        let mut extent = Extent::default();
        for position in positions.iter().flatten() {
            extent.include(position);
        }
        extent
    }

    fn check_winding(&self, ring: &[Vec<f64>], exterior: bool, path: &Path, report: &mut Report) {
        let (expected, role) = if exterior {
            (Orientation::CounterClockwise, "exterior")
        } else {
            (Orientation::Clockwise, "interior")
        };
        let actual = match ring_orientation(ring) {
            Some(actual) => actual,
            None => return,
        };
        if actual != expected {
            let severity = if self.config.enforce_winding {
                Severity::Error
            } else {
                Severity::Warning
            };
            report.push(
                path,
                severity,
                IssueKind::Semantic,
                format!(
                    "{} ring winding is {}, the right-hand rule expects {}",
                    role, actual, expected
                ),
            );
        }
    }

    /// Returns the position only if it is structurally valid.
    fn check_position(&self, value: &Value, path: &Path, report: &mut Report) -> Option<Vec<f64>> {
        let items = match value.as_array() {
            Some(items) => items,
            None => {
                report.error(
                    path,
                    IssueKind::Structural,
                    format!("position must be an array of numbers, found {}", json_kind(value)),
                );
                return None;
            }
        };

        let mut valid = true;
        if items.len() < 2 || items.len() > 3 {
            report.error(
                path,
                IssueKind::Structural,
                format!("position must have 2 or 3 elements, found {}", items.len()),
            );
            valid = false;
        }

        let mut position = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item.as_f64().filter(|n| n.is_finite()) {
                Some(n) => position.push(n),
                None => {
                    report.error(
                        &path.index(index),
                        IssueKind::Structural,
                        format!("coordinate must be a finite number, found {}", json_kind(item)),
                    );
                    valid = false;
                }
            }
        }
        if !valid {
            return None;
        }

        if self.config.check_ranges {
            self.check_range(&position, path, report);
        }
        Some(position)
    }

    fn check_range(&self, position: &[f64], path: &Path, report: &mut Report) {
        let lon = if self.config.wrap_longitude {
            wrap_longitude(position[0])
        } else {
            position[0]
        };
        if let Err(e) = validate_longitude(lon) {
            report.warning(path, e.to_string());
        }
        if let Err(e) = validate_latitude(position[1]) {
            report.warning(path, e.to_string());
        }
    }

    fn check_bbox(&self, value: &Value, path: &Path, extent: &Extent, report: &mut Report) {
        let items = match value.as_array() {
            Some(items) => items,
            None => {
                report.error(
                    path,
                    IssueKind::Structural,
                    format!("bbox must be an array of numbers, found {}", json_kind(value)),
                );
                return;
            }
        };

        let mut children = Report::default();
        let values: Vec<f64> = items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                let n = item.as_f64().filter(|n| n.is_finite());
                if n.is_none() {
                    children.error(
                        &path.index(index),
                        IssueKind::Structural,
                        format!("bbox value must be a finite number, found {}", json_kind(item)),
                    );
                }
                n
            })
            .collect();

        let len = items.len();
        if len != 4 && len != 6 {
            report.error(
                path,
                IssueKind::Structural,
                format!("bbox must have 4 or 6 elements, found {}", len),
            );
        } else if let Some(dimension) = extent.dimension().filter(|d| len != 2 * d) {
            let severity = if self.config.strict_bbox {
                Severity::Error
            } else {
                Severity::Warning
            };
            report.push(
                path,
                severity,
                IssueKind::Semantic,
                format!(
                    "bbox has {} elements but the coordinates have {} dimensions",
                    len, dimension
                ),
            );
        } else if self.config.verify_bbox && !self.config.strict_bbox && values.len() == len {
            self.check_bbox_encloses(&values, extent, path, report);
        }
        report.append(children);
    }

    fn check_bbox_encloses(&self, bbox: &[f64], extent: &Extent, path: &Path, report: &mut Report) {
        let axes = bbox.len() / 2;
        let encloses = (0..axes.min(extent.common_axes())).all(|axis| {
            let (low, high) = (bbox[axis], bbox[axis + axes]);
            // west > east crosses the antimeridian
            if axis == 0 && low > high {
                return true;
            }
            low <= extent.min(axis) && extent.max(axis) <= high
        });
        if !encloses {
            report.error(
                path,
                IssueKind::Semantic,
                "bbox does not enclose all positions of the object",
            );
        }
    }
}

fn resolve_tag(object: &Map<String, Value>) -> Result<ObjectType, String> {
    match object.get("type") {
        None => Err("no \"type\" member".to_string()),
        Some(Value::String(tag)) => tag.parse().map_err(|e| format!("{}", e)),
        Some(other) => Err(format!("\"type\" must be a string, found {}", json_kind(other))),
    }
}

/// Validate `document` with the default configuration.
pub fn validate(document: &Value, expected: Option<ObjectType>) -> ValidationResult {
    Validator::default().validate(document, expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{feature, nested_collection, point, polygon};
    use serde_json::json;

    fn messages(result: &ValidationResult) -> Vec<String> {
        result
            .issues()
            .iter()
            .map(|issue| format!("{} {}", issue.path(), issue.message()))
            .collect()
    }

    #[test]
    fn valid_point() {
        let result = validate(&point(-115.81, 37.24), None);
        assert!(result.is_valid());
        assert!(result.issues().is_empty());
    }

    #[test]
    fn non_object_document() {
        let result = validate(&json!([1, 2]), None);
        assert!(!result.is_valid());
        assert_eq!(result.issues().len(), 1);
        let issue = &result.issues()[0];
        assert_eq!(issue.kind(), IssueKind::UnresolvableType);
        assert!(issue.path().is_root());
        assert!(issue.message().starts_with("missing or invalid type"));
    }

    #[test]
    fn type_must_be_a_string() {
        let result = validate(&json!({"type": 7, "coordinates": [0, 0]}), None);
        assert_eq!(
            messages(&result),
            vec![" missing or invalid type: \"type\" must be a string, found number"]
        );
    }

    #[test]
    fn unknown_type() {
        let result = validate(&json!({"type": "Circle", "radius": 1}), None);
        assert_eq!(result.issues().len(), 1);
        assert_eq!(result.issues()[0].kind(), IssueKind::UnresolvableType);
        assert!(result.issues()[0].message().contains("Circle"));
    }

    #[test]
    fn expected_type_mismatch() {
        let result = validate(&point(1., 2.), Some(ObjectType::Feature));
        assert!(!result.is_valid());
        assert_eq!(
            messages(&result),
            vec![" missing or invalid type: expected Feature, found \"Point\""]
        );
    }

    #[test]
    fn missing_coordinates() {
        let result = validate(&json!({"type": "LineString"}), None);
        assert_eq!(messages(&result), vec![" missing required member \"coordinates\""]);
        assert_eq!(result.issues()[0].kind(), IssueKind::Structural);
    }

    #[test]
    fn position_length() {
        let result = validate(&json!({"type": "Point", "coordinates": [1, 2, 3, 4]}), None);
        assert_eq!(
            messages(&result),
            vec!["/coordinates position must have 2 or 3 elements, found 4"]
        );

        let result = validate(&json!({"type": "Point", "coordinates": [1, 2, 3]}), None);
        assert!(result.is_valid());
    }

    #[test]
    fn non_numeric_coordinate() {
        let result = validate(&json!({"type": "MultiPoint", "coordinates": [[1, 2], [3, "4"]]}), None);
        assert_eq!(
            messages(&result),
            vec!["/coordinates/1/1 coordinate must be a finite number, found string"]
        );
    }

    #[test]
    fn wrong_nesting_depth() {
        let result = validate(&json!({"type": "LineString", "coordinates": [1, 2]}), None);
        assert_eq!(
            messages(&result),
            vec![
                "/coordinates/0 position must be an array of numbers, found number",
                "/coordinates/1 position must be an array of numbers, found number",
            ]
        );
    }

    #[test]
    fn line_string_needs_two_positions() {
        let result = validate(&json!({"type": "LineString", "coordinates": [[1, 2]]}), None);
        assert_eq!(
            messages(&result),
            vec!["/coordinates line string must have at least 2 positions, found 1"]
        );

        let result = validate(
            &json!({"type": "MultiLineString", "coordinates": [[[1, 2], [3, 4]], [[5, 6]]]}),
            None,
        );
        assert_eq!(
            messages(&result),
            vec!["/coordinates/1 line string must have at least 2 positions, found 1"]
        );
    }

    #[test]
    fn empty_line_strings() {
        for doc in &[
            json!({"type": "LineString", "coordinates": []}),
            json!({"type": "MultiLineString", "coordinates": [[]]}),
            json!({"type": "MultiLineString", "coordinates": []}),
        ] {
            let result = validate(doc, None);
            assert!(result.is_valid(), "{}: {}", doc, result);
            assert!(result.issues().is_empty());
        }
    }

    #[test]
    fn features_must_be_features() {
        let doc = json!({
            "type": "FeatureCollection",
            "features": [point(1., 2.), feature(point(300., 0.))]
        });
        let result = validate(&doc, None);
        assert!(!result.is_valid());
        assert_eq!(
            messages(&result),
            vec![
                "/features/0 missing or invalid type: expected Feature, found \"Point\"",
                "/features/1/geometry/coordinates longitude 300 is outside [-180, 180]",
            ]
        );
    }

    #[test]
    fn geometries_must_be_geometries() {
        let doc = json!({
            "type": "GeometryCollection",
            "geometries": [
                {"type": "FeatureCollection", "features": []},
                {"type": "Point", "coordinates": [1, 2, 3, 4]}
            ]
        });
        let result = validate(&doc, None);
        assert_eq!(
            messages(&result),
            vec![
                "/geometries/0 missing or invalid type: expected a geometry, found \"FeatureCollection\"",
                "/geometries/1/coordinates position must have 2 or 3 elements, found 4",
            ]
        );
        assert_eq!(result.issues()[0].kind(), IssueKind::UnresolvableType);
    }

    #[test]
    fn closed_ring() {
        let result = validate(&polygon(vec![vec![[0., 0.], [1., 0.], [1., 1.], [0., 0.]]]), None);
        assert!(result.is_valid());
        assert!(result.issues().is_empty());
    }

    #[test]
    fn open_ring() {
        let result = validate(&polygon(vec![vec![[0., 0.], [1., 0.], [1., 1.], [0., 1.]]]), None);
        assert!(!result.is_valid());
        let errors: Vec<_> = result.errors().collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message().contains("not closed"));
        assert_eq!(errors[0].path().to_string(), "/coordinates/0");
    }

    #[test]
    fn short_ring() {
        let result = validate(&polygon(vec![vec![[0., 0.], [1., 0.], [0., 0.]]]), None);
        assert_eq!(
            messages(&result),
            vec!["/coordinates/0 linear ring must have at least 4 positions, found 3"]
        );
    }

    #[test]
    fn ring_issue_precedes_position_issues() {
        let result = validate(&polygon(vec![vec![[0., 0.], [1., 0.], [1., 95.]]]), None);
        assert_eq!(
            messages(&result),
            vec![
                "/coordinates/0 linear ring must have at least 4 positions, found 3",
                "/coordinates/0 linear ring is not closed: first and last positions must be equal",
                "/coordinates/0/2 latitude 95 is outside [-90, 90]",
            ]
        );
    }

    #[test]
    fn clockwise_exterior_is_a_warning() {
        let doc = polygon(vec![vec![[0., 0.], [1., 1.], [1., 0.], [0., 0.]]]);
        let result = validate(&doc, None);
        assert!(result.is_valid());
        assert_eq!(
            messages(&result),
            vec!["/coordinates/0 exterior ring winding is clockwise, the right-hand rule expects counterclockwise"]
        );
        assert_eq!(result.issues()[0].severity(), Severity::Warning);

        let validator = Validator::new(ValidatorConfig::default().with_enforce_winding(true));
        let result = validator.validate(&doc, None);
        assert!(!result.is_valid());
        assert_eq!(result.issues()[0].severity(), Severity::Error);
    }

    #[test]
    fn hole_winding() {
        let doc = polygon(vec![
            vec![[0., 0.], [10., 0.], [10., 10.], [0., 10.], [0., 0.]],
            vec![[2., 2.], [2., 8.], [8., 8.], [8., 2.], [2., 2.]],
        ]);
        assert!(validate(&doc, None).issues().is_empty());

        let doc = polygon(vec![
            vec![[0., 0.], [10., 0.], [10., 10.], [0., 10.], [0., 0.]],
            vec![[2., 2.], [8., 2.], [8., 8.], [2., 8.], [2., 2.]],
        ]);
        assert_eq!(
            messages(&validate(&doc, None)),
            vec!["/coordinates/1 interior ring winding is counterclockwise, the right-hand rule expects clockwise"]
        );
    }

    #[test]
    fn longitude_out_of_range_is_a_warning() {
        let result = validate(&point(200., 0.), None);
        assert!(result.is_valid());
        assert_eq!(result.issues().len(), 1);
        assert_eq!(result.issues()[0].severity(), Severity::Warning);
        assert!(result.issues()[0].message().contains("longitude"));
    }

    #[test]
    fn range_checks_are_configurable() {
        let quiet = Validator::new(ValidatorConfig::default().with_check_ranges(false));
        assert!(quiet.validate(&point(200., 100.), None).issues().is_empty());

        let wrapping = Validator::new(ValidatorConfig::default().with_wrap_longitude(true));
        assert!(wrapping.validate(&point(200., 0.), None).issues().is_empty());
    }

    #[test]
    fn feature_requires_members() {
        let result = validate(&json!({"type": "Feature"}), None);
        assert_eq!(
            messages(&result),
            vec![
                " missing required member \"geometry\"",
                " missing required member \"properties\"",
            ]
        );
    }

    #[test]
    fn feature_with_null_members() {
        let result = validate(&json!({"type": "Feature", "geometry": null, "properties": null}), None);
        assert!(result.is_valid());
    }

    #[test]
    fn feature_member_types() {
        let doc = json!({
            "type": "Feature",
            "id": [1],
            "geometry": "POINT (1 2)",
            "properties": 3
        });
        assert_eq!(
            messages(&validate(&doc, None)),
            vec![
                "/id id must be a string or a number, found array",
                "/geometry geometry must be an object or null, found string",
                "/properties properties must be an object or null, found number",
            ]
        );
    }

    #[test]
    fn feature_geometry_must_be_a_geometry() {
        let doc = feature(json!({"type": "Feature", "geometry": null, "properties": null}));
        assert_eq!(
            messages(&validate(&doc, None)),
            vec!["/geometry missing or invalid type: expected a geometry, found \"Feature\""]
        );
    }

    #[test]
    fn issues_follow_member_order() {
        let doc = json!({
            "type": "Point",
            "bbox": [0, 0, 1],
            "coordinates": [0]
        });
        assert_eq!(
            messages(&validate(&doc, None)),
            vec![
                "/bbox bbox must have 4 or 6 elements, found 3",
                "/coordinates position must have 2 or 3 elements, found 1",
            ]
        );
    }

    #[test]
    fn bbox_values_must_be_numbers() {
        let doc = json!({"type": "Point", "coordinates": [0, 0], "bbox": [0, 0, "1", 1]});
        assert_eq!(
            messages(&validate(&doc, None)),
            vec!["/bbox/2 bbox value must be a finite number, found string"]
        );
    }

    #[test]
    fn bbox_dimension_mismatch() {
        let doc = json!({"type": "Point", "coordinates": [0, 0], "bbox": [0, 0, 0, 0, 0, 0]});
        let result = validate(&doc, None);
        assert!(result.is_valid());
        assert_eq!(result.warnings().count(), 1);

        let strict = Validator::new(ValidatorConfig::default().with_strict_bbox(true));
        let result = strict.validate(&doc, None);
        assert!(!result.is_valid());
        assert_eq!(
            messages(&result),
            vec!["/bbox bbox has 6 elements but the coordinates have 2 dimensions"]
        );
    }

    #[test]
    fn bbox_enclosure_is_opt_in() {
        let doc = json!({
            "type": "LineString",
            "coordinates": [[0, 0], [5, 5]],
            "bbox": [0, 0, 1, 1]
        });
        assert!(validate(&doc, None).issues().is_empty());

        let verifying = Validator::new(ValidatorConfig::default().with_verify_bbox(true));
        assert_eq!(
            messages(&verifying.validate(&doc, None)),
            vec!["/bbox bbox does not enclose all positions of the object"]
        );

        let strict = Validator::new(
            ValidatorConfig::default()
                .with_verify_bbox(true)
                .with_strict_bbox(true),
        );
        assert!(strict.validate(&doc, None).issues().is_empty());
    }

    #[test]
    fn bbox_across_antimeridian() {
        let doc = json!({
            "type": "LineString",
            "coordinates": [[170, 0], [-170, 5]],
            "bbox": [170, 0, -170, 5]
        });
        let verifying = Validator::new(ValidatorConfig::default().with_verify_bbox(true));
        assert!(verifying.validate(&doc, None).is_valid());
    }

    #[test]
    fn depth_cap() {
        let validator = Validator::new(ValidatorConfig::default().with_max_depth(64));
        let result = validator.validate(&nested_collection(100), None);
        assert!(!result.is_valid());
        let deep: Vec<_> = result
            .issues()
            .iter()
            .filter(|issue| issue.kind() == IssueKind::DepthExceeded)
            .collect();
        assert_eq!(deep.len(), 1);
        assert_eq!(result.issues().len(), 1);
        assert_eq!(deep[0].path().segments().len(), 2 * 65);
    }

    #[test]
    fn depth_within_cap() {
        let result = validate(&nested_collection(10), None);
        assert!(result.is_valid());
    }

    #[test]
    fn geometries_must_be_an_array() {
        let result = validate(&json!({"type": "GeometryCollection", "geometries": {}}), None);
        assert_eq!(
            messages(&result),
            vec!["/geometries expected an array of geometries, found object"]
        );
    }

    #[test]
    fn deterministic() {
        let doc = json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {}, "geometry": {"type": "Point", "coordinates": [300, 0]}},
                {"type": "Feature", "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [1, 1]]]}},
                {"properties": null}
            ]
        });
        let first = serde_json::to_string(&validate(&doc, None)).unwrap();
        let second = serde_json::to_string(&validate(&doc, None)).unwrap();
        assert_eq!(first, second);
    }
}
