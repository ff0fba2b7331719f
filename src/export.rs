use anyhow::{Context, Result};
use geo_types::{LineString, MultiLineString};
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::geo::{GeoPoint, GeoSegment};

/// One two-vertex line per segment, `x` = longitude and `y` = latitude.
pub fn to_multi_line_string(segments: &[GeoSegment]) -> MultiLineString<f64> {
    MultiLineString::new(
        segments
            .iter()
            .map(|seg| {
                LineString::from(vec![
                    (seg.start.longitude, seg.start.latitude),
                    (seg.end.longitude, seg.end.latitude),
                ])
            })
            .collect(),
    )
}

/// GeoJSON Feature carrying the projected overlay as a MultiLineString.
pub fn overlay_feature(segments: &[GeoSegment], center: &GeoPoint, zoom: i32) -> Value {
    let lines: Vec<Value> = to_multi_line_string(segments)
        .0
        .iter()
        .map(|line| Value::Array(line.0.iter().map(|c| json!([c.x, c.y])).collect()))
        .collect();

    json!({
        "type": "Feature",
        "geometry": {
            "type": "MultiLineString",
            "coordinates": lines,
        },
        "properties": {
            "center": [center.longitude, center.latitude],
            "zoom": zoom,
            "segments": segments.len(),
        },
    })
}

pub fn export_overlay(
    segments: &[GeoSegment],
    center: &GeoPoint,
    zoom: i32,
    output: &str,
) -> Result<()> {
    let data = overlay_feature(segments, center, zoom);

    if let Some(parent) = Path::new(output).parent() {
        fs::create_dir_all(parent)?;
    }
    let json_str = serde_json::to_string(&data).context("Failed to serialize overlay")?;
    fs::write(output, &json_str).with_context(|| format!("Failed to write {output}"))?;

    info!(
        "Exported {} segments around ({:.6}, {:.6}) at zoom {zoom} to {output}",
        segments.len(),
        center.latitude,
        center.longitude,
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::PathSegment;

    fn segments() -> Vec<GeoSegment> {
        vec![
            PathSegment::new(GeoPoint::new(47.6, -122.1), GeoPoint::new(47.5, -122.0)),
            PathSegment::new(GeoPoint::new(1.0, 2.0), GeoPoint::new(3.0, 4.0)),
        ]
    }

    #[test]
    fn test_multi_line_string_lon_lat_order() {
        let mls = to_multi_line_string(&segments());
        assert_eq!(mls.0.len(), 2);
        assert_eq!(mls.0[0].0[0].x, -122.1);
        assert_eq!(mls.0[0].0[0].y, 47.6);
        assert_eq!(mls.0[1].0[1].x, 4.0);
        assert_eq!(mls.0[1].0[1].y, 3.0);
    }

    #[test]
    fn test_overlay_feature_shape() {
        let center = GeoPoint::new(47.60396, -122.1318);
        let feature = overlay_feature(&segments(), &center, 16);

        assert_eq!(feature["type"], "Feature");
        assert_eq!(feature["geometry"]["type"], "MultiLineString");
        assert_eq!(feature["geometry"]["coordinates"][0][1], json!([-122.0, 47.5]));
        assert_eq!(feature["geometry"]["coordinates"][1][0], json!([2.0, 1.0]));
        assert_eq!(feature["properties"]["center"], json!([-122.1318, 47.60396]));
        assert_eq!(feature["properties"]["zoom"], 16);
        assert_eq!(feature["properties"]["segments"], 2);
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested/overlay.geojson");
        let out_str = out.to_str().unwrap();

        export_overlay(&segments(), &GeoPoint::new(0.0, 0.0), 10, out_str).unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(
            written["geometry"]["coordinates"].as_array().unwrap().len(),
            2
        );
    }
}
