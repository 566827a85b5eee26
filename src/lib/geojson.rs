use super::config::ValidatorConfig;
use super::geo::{get_bounds, merge_bounds, Bounds};
use super::issue::ValidationResult;
use super::types::{GeometryType, ObjectType};
use super::validator::Validator;
use geo_types::{
    Geometry as GeoGeometry, GeometryCollection as GeoGeometryCollection, LineString,
    MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use thiserror::Error;

pub type Position = Vec<f64>;

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Position },
    MultiPoint { coordinates: Vec<Position> },
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    GeometryCollection { geometries: Vec<Geometry> },
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(untagged)]
pub enum FeatureId {
    String(String),
    Number(Number),
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(tag = "type")]
pub struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FeatureId>,
    pub geometry: Option<Geometry>,
    pub properties: Option<Map<String, Value>>,
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(tag = "type")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

#[derive(Serialize, PartialEq, Debug, Clone)]
#[serde(untagged)]
pub enum GeoJson {
    Geometry(Geometry),
    Feature(Feature),
    FeatureCollection(FeatureCollection),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid GeoJSON document:\n{0}")]
    Invalid(ValidationResult),
    #[error("unable to deserialize GeoJSON document: {0}")]
    Deserialize(#[from] serde_json::Error),
}

fn xy(position: &[f64]) -> Option<(f64, f64)> {
    match position {
        [x, y, ..] => Some((*x, *y)),
        _ => None,
    }
}

fn to_line_string(positions: &[Position]) -> LineString<f64> {
    positions
        .iter()
        .filter_map(|p| xy(p))
        .collect::<Vec<_>>()
        .into()
}

fn to_polygon(rings: &[Vec<Position>]) -> Polygon<f64> {
    let mut rings = rings.iter().map(|ring| to_line_string(ring));
    let exterior = rings.next().unwrap_or_else(|| LineString(vec![]));
    Polygon::new(exterior, rings.collect())
}

impl Geometry {
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point { .. } => GeometryType::Point,
            Geometry::MultiPoint { .. } => GeometryType::MultiPoint,
            Geometry::LineString { .. } => GeometryType::LineString,
            Geometry::MultiLineString { .. } => GeometryType::MultiLineString,
            Geometry::Polygon { .. } => GeometryType::Polygon,
            Geometry::MultiPolygon { .. } => GeometryType::MultiPolygon,
            Geometry::GeometryCollection { .. } => GeometryType::GeometryCollection,
        }
    }

    /// Planar geometry over the first two axes of every position; altitude is dropped.
    ///
    /// Positions with fewer than two axes are skipped; a `Point` without them has no
    /// planar counterpart. Anything returned by [`load`] converts completely.
    pub fn to_geo(&self) -> Option<GeoGeometry<f64>> {
        let geometry: GeoGeometry<f64> = match self {
            Geometry::Point { coordinates } => {
                let (x, y) = xy(coordinates)?;
                Point::new(x, y).into()
            }
            Geometry::MultiPoint { coordinates } => {
                let points: Vec<(f64, f64)> = coordinates.iter().filter_map(|p| xy(p)).collect();
                MultiPoint::from(points).into()
            }
            Geometry::LineString { coordinates } => to_line_string(coordinates).into(),
            Geometry::MultiLineString { coordinates } => {
                MultiLineString(coordinates.iter().map(|ls| to_line_string(ls)).collect()).into()
            }
            Geometry::Polygon { coordinates } => to_polygon(coordinates).into(),
            Geometry::MultiPolygon { coordinates } => {
                MultiPolygon(coordinates.iter().map(|p| to_polygon(p)).collect()).into()
            }
            Geometry::GeometryCollection { geometries } => {
                GeoGeometry::GeometryCollection(GeoGeometryCollection(
                    geometries.iter().filter_map(Geometry::to_geo).collect(),
                ))
            }
        };
        Some(geometry)
    }

    /// `[west, south, east, north]`, or `None` for an empty geometry.
    pub fn bbox(&self) -> Option<[f64; 4]> {
        self.bounds().map(Into::into)
    }

    fn bounds(&self) -> Option<Bounds> {
        get_bounds(&self.to_geo()?)
    }
}

impl Feature {
    /// Property names in document order, or sorted.
    pub fn property_keys(&self, sort: bool) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .properties
            .iter()
            .flat_map(|properties| properties.keys())
            .map(String::as_str)
            .collect();
        if sort {
            keys.sort_unstable();
        }
        keys
    }

    pub fn bbox(&self) -> Option<[f64; 4]> {
        self.bounds().map(Into::into)
    }

    fn bounds(&self) -> Option<Bounds> {
        self.geometry.as_ref().and_then(Geometry::bounds)
    }
}

impl FeatureCollection {
    pub fn bbox(&self) -> Option<[f64; 4]> {
        merge_bounds(self.features.iter().map(Feature::bounds)).map(Into::into)
    }

    /// Features `offset..offset + limit` and the total number of features.
    pub fn page(&self, offset: usize, limit: usize) -> (FeatureCollection, usize) {
        let total = self.features.len();
        let features = self
            .features
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        (FeatureCollection { features }, total)
    }
}

impl GeoJson {
    pub fn object_type(&self) -> ObjectType {
        match self {
            GeoJson::Geometry(geometry) => geometry.geometry_type().into(),
            GeoJson::Feature(_) => ObjectType::Feature,
            GeoJson::FeatureCollection(_) => ObjectType::FeatureCollection,
        }
    }

    pub fn bbox(&self) -> Option<[f64; 4]> {
        match self {
            GeoJson::Geometry(geometry) => geometry.bbox(),
            GeoJson::Feature(feature) => feature.bbox(),
            GeoJson::FeatureCollection(collection) => collection.bbox(),
        }
    }
}

/// Validate `document` and, if it has no errors, convert it into the typed model.
///
/// `bbox` and foreign members are not carried over; use [`GeoJson::bbox`] to
/// compute the bounds of the loaded object.
///
/// ```
/// use geoschema::{load, GeoJson, ValidatorConfig};
/// use serde_json::json;
///
/// let doc = json!({"type": "Point", "coordinates": [-115.81, 37.24]});
/// let geojson = load(doc, &ValidatorConfig::default()).unwrap();
/// assert_eq!(geojson.bbox(), Some([-115.81, 37.24, -115.81, 37.24]));
/// ```
pub fn load(document: Value, config: &ValidatorConfig) -> Result<GeoJson, LoadError> {
    let result = Validator::new(config.clone()).validate(&document, None);
    if !result.is_valid() {
        return Err(LoadError::Invalid(result));
    }
    let tag = document
        .get("type")
        .and_then(Value::as_str)
        .and_then(|tag| tag.parse::<ObjectType>().ok());
    let geojson = match tag {
        Some(ObjectType::Feature) => GeoJson::Feature(serde_json::from_value(document)?),
        Some(ObjectType::FeatureCollection) => {
            GeoJson::FeatureCollection(serde_json::from_value(document)?)
        }
        _ => GeoJson::Geometry(serde_json::from_value(document)?),
    };
    Ok(geojson)
}
