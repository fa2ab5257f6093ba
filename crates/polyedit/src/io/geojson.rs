use std::path::Path;

use geojson::{Feature, FeatureCollection, Geometry, Value};

use crate::{error::Result, session::Session};

impl Session {
    /// Export the current polygon set as a GeoJSON feature collection.
    ///
    /// Each polygon becomes one feature with area/perimeter/vertex-count
    /// properties; image dimensions and the selection go into the
    /// collection's foreign members.
    pub fn to_geojson(&self) -> Result<FeatureCollection> {
        let mut features = Vec::new();

        for (index, polygon) in self.polygons().iter().enumerate() {
            // GeoJSON rings are explicitly closed.
            let mut ring: Vec<Vec<f64>> = polygon
                .points
                .iter()
                .map(|p| vec![f64::from(p.x), f64::from(p.y)])
                .collect();
            if let Some(first) = ring.first().cloned() {
                ring.push(first);
            }

            let geometry = Geometry::new(Value::Polygon(vec![ring]));

            let mut properties = serde_json::Map::new();
            properties.insert(
                "id".to_string(),
                serde_json::Value::Number(serde_json::Number::from(index)),
            );
            properties.insert(
                "area".to_string(),
                serde_json::Value::Number(
                    serde_json::Number::from_f64(polygon.area())
                        .unwrap_or(serde_json::Number::from(0)),
                ),
            );
            properties.insert(
                "perimeter".to_string(),
                serde_json::Value::Number(
                    serde_json::Number::from_f64(polygon.perimeter())
                        .unwrap_or(serde_json::Number::from(0)),
                ),
            );
            properties.insert(
                "vertex_count".to_string(),
                serde_json::Value::Number(serde_json::Number::from(polygon.points.len())),
            );
            properties.insert(
                "selected".to_string(),
                serde_json::Value::Bool(self.selected() == Some(index)),
            );

            features.push(Feature {
                bbox: None,
                geometry: Some(geometry),
                id: Some(geojson::feature::Id::Number(serde_json::Number::from(index))),
                properties: Some(properties),
                foreign_members: None,
            });
        }

        let mut foreign_members = serde_json::Map::new();
        foreign_members.insert(
            "image_width".to_string(),
            serde_json::Value::Number(serde_json::Number::from(self.working().width())),
        );
        foreign_members.insert(
            "image_height".to_string(),
            serde_json::Value::Number(serde_json::Number::from(self.working().height())),
        );
        foreign_members.insert(
            "polygon_count".to_string(),
            serde_json::Value::Number(serde_json::Number::from(self.polygons().len())),
        );

        Ok(FeatureCollection {
            bbox: None,
            features,
            foreign_members: Some(foreign_members),
        })
    }

    /// Export to GeoJSON and serialize to a JSON string
    pub fn to_geojson_string(&self) -> Result<String> {
        let geojson = self.to_geojson()?;
        Ok(serde_json::to_string_pretty(&geojson)?)
    }

    /// Save the polygon set as GeoJSON
    pub fn save_geojson<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let geojson_string = self.to_geojson_string()?;
        std::fs::write(path, geojson_string)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use imageproc::point::Point;

    use crate::session::EditorCommand;
    use crate::types::Polygon;

    fn session_with_two_polygons() -> Session {
        let mut session = Session::new(RgbImage::new(48, 32));
        session.set_polygons(vec![
            Polygon::new(vec![
                Point::new(0, 0),
                Point::new(10, 0),
                Point::new(10, 10),
                Point::new(0, 10),
            ]),
            Polygon::new(vec![
                Point::new(20, 5),
                Point::new(30, 5),
                Point::new(25, 15),
            ]),
        ]);
        session
    }

    #[test]
    fn test_geojson_has_one_feature_per_polygon() {
        let session = session_with_two_polygons();
        let collection = session.to_geojson().expect("Should build GeoJSON");

        assert_eq!(collection.features.len(), 2);

        let members = collection.foreign_members.expect("Should carry metadata");
        assert_eq!(members["image_width"], 48);
        assert_eq!(members["polygon_count"], 2);
    }

    #[test]
    fn test_geojson_rings_are_closed_and_selection_marked() {
        let mut session = session_with_two_polygons();
        session.apply(EditorCommand::SelectNext).unwrap();

        let collection = session.to_geojson().expect("Should build GeoJSON");
        let feature = &collection.features[0];

        let Some(Geometry {
            value: Value::Polygon(rings),
            ..
        }) = &feature.geometry
        else {
            panic!("Feature should hold a polygon");
        };
        assert_eq!(rings[0].first(), rings[0].last());
        assert_eq!(rings[0].len(), 5, "Square ring closes on its first vertex");

        let properties = feature.properties.as_ref().expect("Should have properties");
        assert_eq!(properties["selected"], true);
        assert_eq!(properties["vertex_count"], 4);
    }
}
