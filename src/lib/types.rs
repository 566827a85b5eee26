use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Serialize, Deserialize, PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub enum GeometryType {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryType {
    pub const ALL: [GeometryType; 7] = [
        GeometryType::Point,
        GeometryType::MultiPoint,
        GeometryType::LineString,
        GeometryType::MultiLineString,
        GeometryType::Polygon,
        GeometryType::MultiPolygon,
        GeometryType::GeometryCollection,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GeometryType::Point => "Point",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::LineString => "LineString",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPolygon => "MultiPolygon",
            GeometryType::GeometryCollection => "GeometryCollection",
        }
    }
}

/// The tag of any GeoJSON object: a geometry, a `Feature` or a `FeatureCollection`.
#[derive(Serialize, Deserialize, PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub enum ObjectType {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    GeometryCollection,
    Feature,
    FeatureCollection,
}

impl ObjectType {
    pub fn as_geometry(self) -> Option<GeometryType> {
        let geometry = match self {
            ObjectType::Point => GeometryType::Point,
            ObjectType::MultiPoint => GeometryType::MultiPoint,
            ObjectType::LineString => GeometryType::LineString,
            ObjectType::MultiLineString => GeometryType::MultiLineString,
            ObjectType::Polygon => GeometryType::Polygon,
            ObjectType::MultiPolygon => GeometryType::MultiPolygon,
            ObjectType::GeometryCollection => GeometryType::GeometryCollection,
            ObjectType::Feature | ObjectType::FeatureCollection => return None,
        };
        Some(geometry)
    }

    pub fn is_geometry(self) -> bool {
        self.as_geometry().is_some()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ObjectType::Feature => "Feature",
            ObjectType::FeatureCollection => "FeatureCollection",
            other => other.as_geometry().map_or("", GeometryType::as_str),
        }
    }
}

impl From<GeometryType> for ObjectType {
    fn from(geometry: GeometryType) -> Self {
        match geometry {
            GeometryType::Point => ObjectType::Point,
            GeometryType::MultiPoint => ObjectType::MultiPoint,
            GeometryType::LineString => ObjectType::LineString,
            GeometryType::MultiLineString => ObjectType::MultiLineString,
            GeometryType::Polygon => ObjectType::Polygon,
            GeometryType::MultiPolygon => ObjectType::MultiPolygon,
            GeometryType::GeometryCollection => ObjectType::GeometryCollection,
        }
    }
}

#[derive(Error, PartialEq, Debug, Clone)]
#[error("unknown type \"{0}\"")]
pub struct UnknownType(pub String);

impl FromStr for GeometryType {
    type Err = UnknownType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GeometryType::ALL
            .iter()
            .copied()
            .find(|geometry| geometry.as_str() == s)
            .ok_or_else(|| UnknownType(s.to_string()))
    }
}

impl FromStr for ObjectType {
    type Err = UnknownType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Feature" => Ok(ObjectType::Feature),
            "FeatureCollection" => Ok(ObjectType::FeatureCollection),
            other => other.parse::<GeometryType>().map(ObjectType::from),
        }
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
