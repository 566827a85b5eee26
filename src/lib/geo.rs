use geo::algorithm::bounding_rect::BoundingRect;
use geo::algorithm::winding_order::Winding;
use geo_types::{Geometry, LineString, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, PartialEq, Debug, Clone, Copy)]
pub enum RangeError {
    #[error("longitude {0} is outside [-180, 180]")]
    Longitude(f64),
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),
}

pub fn validate_longitude(lon: f64) -> Result<f64, RangeError> {
    if (-180.0..=180.0).contains(&lon) {
        Ok(lon)
    } else {
        Err(RangeError::Longitude(lon))
    }
}

pub fn validate_latitude(lat: f64) -> Result<f64, RangeError> {
    if (-90.0..=90.0).contains(&lat) {
        Ok(lat)
    } else {
        Err(RangeError::Latitude(lat))
    }
}

/// Wrap a longitude into [-180, 180]; values already in range are untouched.
pub fn wrap_longitude(lon: f64) -> f64 {
    if (-180.0..=180.0).contains(&lon) || !lon.is_finite() {
        return lon;
    }
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// Running per-axis minimum and maximum of positions, up to three axes.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct Extent {
    min: [f64; 3],
    max: [f64; 3],
    dims: Option<(usize, usize)>,
}

impl Extent {
    pub fn from_position(position: &[f64]) -> Self {
        let mut extent = Extent::default();
        extent.include(position);
        extent
    }

    pub fn include(&mut self, position: &[f64]) {
        let len = position.len().min(3);
        match self.dims {
            None => {
                self.min = [f64::INFINITY; 3];
                self.max = [f64::NEG_INFINITY; 3];
                self.dims = Some((len, len));
            }
            Some((lo, hi)) => self.dims = Some((lo.min(len), hi.max(len))),
        }
        for (axis, value) in position.iter().take(3).enumerate() {
            self.min[axis] = self.min[axis].min(*value);
            self.max[axis] = self.max[axis].max(*value);
        }
    }

    pub fn merge(&mut self, other: &Extent) {
        let (lo, hi) = match other.dims {
            Some(dims) => dims,
            None => return,
        };
        self.dims = Some(match self.dims {
            None => {
                self.min = other.min;
                self.max = other.max;
                (lo, hi)
            }
            Some((self_lo, self_hi)) => {
                for axis in 0..3 {
                    self.min[axis] = self.min[axis].min(other.min[axis]);
                    self.max[axis] = self.max[axis].max(other.max[axis]);
                }
                (self_lo.min(lo), self_hi.max(hi))
            }
        });
    }

    pub fn is_empty(&self) -> bool {
        self.dims.is_none()
    }

    /// The dimension shared by every included position; `None` if empty or mixed.
    pub fn dimension(&self) -> Option<usize> {
        match self.dims {
            Some((lo, hi)) if lo == hi => Some(lo),
            _ => None,
        }
    }

    /// Number of axes present in every included position.
    pub fn common_axes(&self) -> usize {
        self.dims.map_or(0, |(lo, _)| lo)
    }

    pub fn min(&self, axis: usize) -> f64 {
        self.min[axis]
    }

    pub fn max(&self, axis: usize) -> f64 {
        self.max[axis]
    }
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum Orientation {
    Clockwise,
    CounterClockwise,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Clockwise => f.write_str("clockwise"),
            Orientation::CounterClockwise => f.write_str("counterclockwise"),
        }
    }
}

/// Orientation of a closed ring in the lon/lat plane; `None` for degenerate rings.
pub fn ring_orientation(ring: &[Vec<f64>]) -> Option<Orientation> {
    let coordinates: Vec<(f64, f64)> = ring
        .iter()
        .filter(|position| position.len() >= 2)
        .map(|position| (position[0], position[1]))
        .collect();
    let line_string: LineString<f64> = coordinates.into();
    if line_string.is_ccw() {
        Some(Orientation::CounterClockwise)
    } else if line_string.is_cw() {
        Some(Orientation::Clockwise)
    } else {
        None
    }
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone, Copy)]
pub struct Bounds {
    pub w: f64,
    pub s: f64,
    pub e: f64,
    pub n: f64,
}

impl Bounds {
    pub fn merge(self, other: Bounds) -> Bounds {
        Bounds {
            w: self.w.min(other.w),
            s: self.s.min(other.s),
            e: self.e.max(other.e),
            n: self.n.max(other.n),
        }
    }
}

impl From<Rect<f64>> for Bounds {
    fn from(rect: Rect<f64>) -> Self {
        Bounds {
            w: rect.min().x,
            s: rect.min().y,
            e: rect.max().x,
            n: rect.max().y,
        }
    }
}

/// GeoJSON bbox order: west, south, east, north.
impl From<Bounds> for [f64; 4] {
    fn from(bounds: Bounds) -> Self {
        [bounds.w, bounds.s, bounds.e, bounds.n]
    }
}

pub fn merge_bounds(bounds: impl IntoIterator<Item = Option<Bounds>>) -> Option<Bounds> {
    bounds
        .into_iter()
        .flatten()
        .fold(None, |acc: Option<Bounds>, b| {
            Some(acc.map_or(b, |acc| acc.merge(b)))
        })
}

pub fn get_bounds(geometry: &Geometry<f64>) -> Option<Bounds> {
    let rect = match geometry {
        Geometry::Point(p) => {
            return Some(Bounds {
                w: p.x(),
                s: p.y(),
                e: p.x(),
                n: p.y(),
            })
        }
        Geometry::MultiPoint(mp) => mp.bounding_rect(),
        Geometry::LineString(ls) => ls.bounding_rect(),
        Geometry::MultiLineString(mls) => mls.bounding_rect(),
        Geometry::Polygon(p) => p.bounding_rect(),
        Geometry::MultiPolygon(mp) => mp.bounding_rect(),
        Geometry::GeometryCollection(gc) => return merge_bounds(gc.0.iter().map(get_bounds)),
        _ => None,
    }?;
    Some(rect.into())
}
