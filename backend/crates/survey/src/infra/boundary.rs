//! City Boundary Source
//!
//! Reads the city polygon from a GeoJSON FeatureCollection. The geometry of
//! the first feature is used.

use std::path::Path;

use geo::{Coord, LineString, Polygon};
use serde::Deserialize;

use crate::domain::sampler::CityBoundary;
use crate::error::{SurveyError, SurveyResult};

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    geometry: Geometry,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Polygon {
        coordinates: Vec<Vec<Vec<f64>>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Vec<f64>>>>,
    },
    #[serde(other)]
    Unsupported,
}

/// Load the city boundary from a GeoJSON file
pub async fn load_city_boundary(path: impl AsRef<Path>) -> SurveyResult<CityBoundary> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path).await.map_err(|e| {
        SurveyError::InvalidBoundary(format!("cannot read {}: {}", path.display(), e))
    })?;

    let boundary = parse_city_boundary(&text)?;
    let extent = boundary.extent();
    tracing::info!(
        path = %path.display(),
        min_x = extent.min_x,
        max_x = extent.max_x,
        min_y = extent.min_y,
        max_y = extent.max_y,
        "Loaded city boundary"
    );
    Ok(boundary)
}

/// Parse GeoJSON text. A leading UTF-8 BOM is allowed.
pub fn parse_city_boundary(text: &str) -> SurveyResult<CityBoundary> {
    let collection: FeatureCollection = serde_json::from_str(text.trim_start_matches('\u{feff}'))?;

    let feature = collection
        .features
        .into_iter()
        .next()
        .ok_or_else(|| SurveyError::InvalidBoundary("feature collection is empty".into()))?;

    let rings = match feature.geometry {
        Geometry::Polygon { coordinates } => coordinates,
        Geometry::MultiPolygon { mut coordinates } if coordinates.len() == 1 => {
            coordinates.remove(0)
        }
        Geometry::MultiPolygon { coordinates } => {
            return Err(SurveyError::InvalidBoundary(format!(
                "expected a single polygon, got a multipolygon of {}",
                coordinates.len()
            )));
        }
        Geometry::Unsupported => {
            return Err(SurveyError::InvalidBoundary(
                "geometry must be a Polygon".into(),
            ));
        }
    };

    CityBoundary::new(polygon_from_rings(rings)?)
}

fn polygon_from_rings(rings: Vec<Vec<Vec<f64>>>) -> SurveyResult<Polygon<f64>> {
    let mut rings = rings.into_iter().map(ring_to_line_string);

    let exterior = rings
        .next()
        .ok_or_else(|| SurveyError::InvalidBoundary("polygon has no rings".into()))??;
    let interiors = rings.collect::<SurveyResult<Vec<_>>>()?;

    Ok(Polygon::new(exterior, interiors))
}

fn ring_to_line_string(ring: Vec<Vec<f64>>) -> SurveyResult<LineString<f64>> {
    ring.into_iter()
        .map(|position| match position.as_slice() {
            // Altitude, if present, is dropped
            [x, y, ..] => Ok(Coord { x: *x, y: *y }),
            _ => Err(SurveyError::InvalidBoundary(
                "position needs at least two coordinates".into(),
            )),
        })
        .collect::<SurveyResult<Vec<_>>>()
        .map(LineString::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Point;

    const SQUARE: &str = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {"name": "city"},
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[34.7, 32.0], [34.9, 32.0], [34.9, 32.2], [34.7, 32.2], [34.7, 32.0]]]
            }
        }]
    }"#;

    #[test]
    fn test_parse_polygon() {
        let boundary = parse_city_boundary(SQUARE).unwrap();
        assert!(boundary.contains(&Point::new(34.8, 32.1)));
        assert!(!boundary.contains(&Point::new(35.0, 32.1)));
        assert_eq!(boundary.extent().min_x, 34.7);
        assert_eq!(boundary.extent().max_y, 32.2);
    }

    #[test]
    fn test_parse_with_bom() {
        let text = format!("\u{feff}{}", SQUARE);
        assert!(parse_city_boundary(&text).is_ok());
    }

    #[test]
    fn test_parse_single_multipolygon_and_altitude() {
        let text = r#"{"type":"FeatureCollection","features":[{"type":"Feature","geometry":{
            "type":"MultiPolygon",
            "coordinates":[[[[0,0,5],[4,0,5],[4,4,5],[0,4,5],[0,0,5]]]]
        }}]}"#;
        let boundary = parse_city_boundary(text).unwrap();
        assert!(boundary.contains(&Point::new(2.0, 2.0)));
    }

    #[test]
    fn test_hole_is_outside() {
        let text = r#"{"type":"FeatureCollection","features":[{"type":"Feature","geometry":{
            "type":"Polygon",
            "coordinates":[
                [[0,0],[10,0],[10,10],[0,10],[0,0]],
                [[4,4],[6,4],[6,6],[4,6],[4,4]]
            ]
        }}]}"#;
        let boundary = parse_city_boundary(text).unwrap();
        assert!(!boundary.contains(&Point::new(5.0, 5.0)));
        assert!(boundary.contains(&Point::new(1.0, 1.0)));
    }

    #[test]
    fn test_rejects_unusable_geometry() {
        let empty = r#"{"type":"FeatureCollection","features":[]}"#;
        assert!(matches!(
            parse_city_boundary(empty),
            Err(SurveyError::InvalidBoundary(_))
        ));

        let point = r#"{"type":"FeatureCollection","features":[{"type":"Feature","geometry":{
            "type":"Point","coordinates":[1,2]}}]}"#;
        assert!(matches!(
            parse_city_boundary(point),
            Err(SurveyError::InvalidBoundary(_))
        ));

        let two = r#"{"type":"FeatureCollection","features":[{"type":"Feature","geometry":{
            "type":"MultiPolygon","coordinates":[
                [[[0,0],[1,0],[1,1],[0,0]]],
                [[[5,5],[6,5],[6,6],[5,5]]]
            ]}}]}"#;
        assert!(matches!(
            parse_city_boundary(two),
            Err(SurveyError::InvalidBoundary(_))
        ));

        assert!(matches!(
            parse_city_boundary("not json"),
            Err(SurveyError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = load_city_boundary("/nonexistent/citylimits.geojson.json")
            .await
            .unwrap_err();
        assert!(matches!(err, SurveyError::InvalidBoundary(_)));
    }
}
