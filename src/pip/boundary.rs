//! Planning-area boundary parsing from GeoJSON.

use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde::Deserialize;

use crate::error::GeometryError;

type Position = Vec<f64>;
type Ring = Vec<Position>;

/// The subset of GeoJSON we accept for a boundary
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum GeoJson {
    Polygon {
        coordinates: Vec<Ring>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Ring>>,
    },
    Feature {
        geometry: Option<Box<GeoJson>>,
    },
    #[serde(other)]
    Unsupported,
}

/// Parse a GeoJSON `Polygon`, `MultiPolygon` or `Feature` wrapping one.
///
/// Positions are `[lon, lat, ...]`. Unclosed rings are closed.
pub fn parse_boundary(geojson: &str) -> Result<MultiPolygon<f64>, GeometryError> {
    let parsed: GeoJson = serde_json::from_str(geojson)?;
    let multi = to_multi_polygon(parsed)?;
    if multi.0.is_empty() {
        return Err(GeometryError::Empty);
    }
    Ok(multi)
}

fn to_multi_polygon(value: GeoJson) -> Result<MultiPolygon<f64>, GeometryError> {
    match value {
        GeoJson::Polygon { coordinates } => Ok(MultiPolygon::new(vec![to_polygon(coordinates)?])),
        GeoJson::MultiPolygon { coordinates } => {
            let polygons = coordinates
                .into_iter()
                .map(to_polygon)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(MultiPolygon::new(polygons))
        }
        GeoJson::Feature { geometry } => match geometry {
            Some(inner) => to_multi_polygon(*inner),
            None => Err(GeometryError::MissingGeometry),
        },
        GeoJson::Unsupported => Err(GeometryError::UnsupportedType),
    }
}

fn to_polygon(rings: Vec<Ring>) -> Result<Polygon<f64>, GeometryError> {
    let mut rings = rings.into_iter();
    let exterior = match rings.next() {
        Some(ring) => to_line_string(ring)?,
        None => return Err(GeometryError::Empty),
    };
    let interiors = rings.map(to_line_string).collect::<Result<Vec<_>, _>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn to_line_string(ring: Ring) -> Result<LineString<f64>, GeometryError> {
    let mut coords = ring
        .into_iter()
        .map(|pos| match pos.as_slice() {
            [x, y, ..] => Ok(Coord { x: *x, y: *y }),
            _ => Err(GeometryError::InvalidPosition(pos.len())),
        })
        .collect::<Result<Vec<_>, _>>()?;

    // Close the ring if needed
    if let Some(first) = coords.first().copied() {
        if coords.last() != Some(&first) {
            coords.push(first);
        }
    }

    if coords.len() < 4 {
        return Err(GeometryError::RingTooShort(coords.len()));
    }

    Ok(LineString::new(coords))
}
