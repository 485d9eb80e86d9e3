use anyhow::{anyhow, bail, Context, Result};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::Value;
use tracing::warn;

use crate::error::Error;

/// One parsed boundary feature: district name plus geometry.
pub(super) struct DistrictFeature {
    pub(super) district: String,
    pub(super) shape: MultiPolygon<f64>,
}

/// Read district features from GeoJSON bytes.
///
/// Each feature must carry a `district` property and a Polygon or
/// MultiPolygon geometry. A malformed feature is skipped with a warning and
/// counted; only a document-level problem (not JSON, no `features` array)
/// is an error. Returns the features in file order plus the skip count.
pub(super) fn read_district_features(bytes: &[u8]) -> Result<(Vec<DistrictFeature>, usize)> {
    let value: Value = serde_json::from_slice(bytes).context("Failed to parse GeoJSON bytes")?;
    let features = value["features"].as_array()
        .ok_or_else(|| anyhow!("Document has no `features` array"))?;

    let mut parsed = Vec::with_capacity(features.len());
    let mut skipped = 0;

    for (index, feature) in features.iter().enumerate() {
        match parse_feature(feature) {
            Ok(f) => parsed.push(f),
            Err(source) => {
                let err = Error::Geometry { index, source };
                warn!(%err, "skipping malformed boundary feature");
                skipped += 1;
            }
        }
    }

    Ok((parsed, skipped))
}

fn parse_feature(feature: &Value) -> Result<DistrictFeature> {
    let district = feature["properties"]["district"].as_str()
        .ok_or_else(|| anyhow!("Feature has no `district` property"))?
        .to_string();

    let geometry = feature["geometry"].as_object()
        .ok_or_else(|| anyhow!("Feature has no geometry"))?;
    let coords = geometry["coordinates"].as_array()
        .ok_or_else(|| anyhow!("Geometry has no coordinates"))?;

    let shape = match geometry["type"].as_str() {
        Some("MultiPolygon") => parse_multipolygon_coords(coords)?,
        Some("Polygon") => MultiPolygon(vec![parse_polygon_coords(coords)?]),
        other => bail!("Unsupported geometry type: {:?}", other),
    };

    Ok(DistrictFeature { district, shape })
}

/// Parse GeoJSON MultiPolygon coordinates into a geo::MultiPolygon.
/// Format: [polygon, ...] where each polygon is [exterior, interior, ...].
fn parse_multipolygon_coords(coords: &[Value]) -> Result<MultiPolygon<f64>> {
    let mut polygons = Vec::new();

    for polygon_coords in coords {
        let rings = polygon_coords.as_array()
            .ok_or_else(|| anyhow!("Invalid MultiPolygon: polygon is not an array"))?;
        polygons.push(parse_polygon_coords(rings)?);
    }

    Ok(MultiPolygon(polygons))
}

/// Parse GeoJSON Polygon coordinates: [exterior, interior, ...].
fn parse_polygon_coords(rings: &[Value]) -> Result<Polygon<f64>> {
    let exterior_coords = rings.first()
        .and_then(|v| v.as_array())
        .ok_or_else(|| anyhow!("Invalid Polygon: missing exterior ring"))?;
    let exterior = parse_ring_coords(exterior_coords)?;

    let mut interiors = Vec::new();
    for interior_ring in &rings[1..] {
        let ring_array = interior_ring.as_array()
            .ok_or_else(|| anyhow!("Invalid Polygon: interior ring is not an array"))?;
        interiors.push(parse_ring_coords(ring_array)?);
    }

    Ok(Polygon::new(exterior, interiors))
}

/// Parse a ring (exterior or interior) from GeoJSON coordinates.
/// Format: [[x, y], [x, y], ...]
fn parse_ring_coords(coords: &[Value]) -> Result<LineString<f64>> {
    let mut points = Vec::with_capacity(coords.len());

    for coord_pair in coords {
        let coord_array = coord_pair.as_array()
            .ok_or_else(|| anyhow!("Invalid coordinate: not an array"))?;
        if coord_array.len() < 2 {
            bail!("Invalid coordinate: fewer than two components");
        }
        let x = coord_array[0].as_f64()
            .ok_or_else(|| anyhow!("Invalid coordinate: x must be a number"))?;
        let y = coord_array[1].as_f64()
            .ok_or_else(|| anyhow!("Invalid coordinate: y must be a number"))?;
        points.push(Coord { x, y });
    }

    // Ensure ring is closed (first point == last point)
    if !points.is_empty() && points[0] != points[points.len() - 1] {
        points.push(points[0]);
    }

    Ok(LineString(points))
}
