use serde_json::{json, Value};

pub fn point(lon: f64, lat: f64) -> Value {
    json!({"type": "Point", "coordinates": [lon, lat]})
}

pub fn polygon(rings: Vec<Vec<[f64; 2]>>) -> Value {
    json!({"type": "Polygon", "coordinates": rings})
}

pub fn feature(geometry: Value) -> Value {
    json!({"type": "Feature", "geometry": geometry, "properties": {}})
}

/// `levels` GeometryCollections, each wrapping the next, around a single point.
pub fn nested_collection(levels: usize) -> Value {
    (0..levels).fold(point(0., 0.), |inner, _| {
        json!({"type": "GeometryCollection", "geometries": [inner]})
    })
}

pub fn station_feature() -> Value {
    json!({
        "type": "Feature",
        "geometry": {"type": "Point", "coordinates": [-118.365379, 34.199669]},
        "properties": {
            "stid": "KBUR",
            "elevation": 728,
            "mnet_id": 1,
            "name": "Burbank - Bob Hope Airport",
            "acquired_at": "2020-05-11T20:55:00",
            "air_temp": 23,
            "relative_humidity": 46.78,
            "wind_gust": 9.26,
            "wind_speed": 3.6,
            "wind_direction": 200
        }
    })
}
