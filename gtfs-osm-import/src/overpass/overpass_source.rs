use super::{FilterQuery, OsmXmlReader, OverpassError, OverpassQuery};
use gtfs_osm::model::{osm::OsmSchedule, schedule::BoundingBox};
use std::time::Duration;

/// map data of an area, queried from an Overpass API endpoint or read from
/// a document saved from an earlier query.
#[derive(Debug, Clone)]
pub struct OverpassSource {
    endpoint: String,
    timeout_seconds: u64,
    bbox: BoundingBox,
    platform_filters: Vec<FilterQuery>,
}

impl OverpassSource {
    pub fn new(endpoint: &str, timeout_seconds: u64, bbox: BoundingBox) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            timeout_seconds,
            bbox,
            platform_filters: vec![FilterQuery::equals("public_transport", "platform")],
        }
    }

    pub fn with_platform_filters(mut self, platform_filters: Vec<FilterQuery>) -> Self {
        self.platform_filters = platform_filters;
        self
    }

    pub fn platforms_query(&self) -> OverpassQuery {
        OverpassQuery::Platforms {
            bbox: self.bbox,
            timeout_seconds: self.timeout_seconds,
            platform_filters: self.platform_filters.clone(),
        }
    }

    pub fn routes_query(&self) -> OverpassQuery {
        OverpassQuery::Routes {
            bbox: self.bbox,
            timeout_seconds: self.timeout_seconds,
            platform_filters: self.platform_filters.clone(),
        }
    }

    /// sends a query and returns the OSM XML document of the response.
    pub fn fetch(&self, query: &OverpassQuery) -> Result<String, OverpassError> {
        let body = query.to_string();
        log::info!("querying {} for bbox {}", self.endpoint, self.bbox);
        log::debug!("{body}");
        let client = reqwest::blocking::Client::builder()
            // the server side timeout is part of the query
            .timeout(Duration::from_secs(self.timeout_seconds + 30))
            .build()?;
        let response = client.post(&self.endpoint).body(body).send()?;
        let status = response.status();
        let text = response.text()?;
        if !status.is_success() {
            return Err(OverpassError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(text)
    }

    /// stops, routes and trips of the area. a cached document replaces the
    /// query.
    pub fn load(&self, cached_document: Option<&str>) -> Result<OsmSchedule, OverpassError> {
        let reader = self.reader();
        match cached_document {
            Some(xml) => reader.read(xml),
            None => reader.read(&self.fetch(&self.routes_query())?),
        }
    }

    /// stops of the area only.
    pub fn load_stops(&self, cached_document: Option<&str>) -> Result<OsmSchedule, OverpassError> {
        let reader = self.reader();
        match cached_document {
            Some(xml) => reader.read_stops(xml),
            None => reader.read_stops(&self.fetch(&self.platforms_query())?),
        }
    }

    pub fn reader(&self) -> OsmXmlReader {
        OsmXmlReader::new(self.platform_filters.clone())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_load_from_cached_document() {
        let bbox = BoundingBox {
            min_lat: 45.0,
            min_lon: -74.0,
            max_lat: 46.0,
            max_lon: -73.0,
        };
        let source = OverpassSource::new("http://localhost:1/api/interpreter", 30, bbox);
        let xml = r#"<osm version="0.6"><node id="1" lat="45.5" lon="-73.5"><tag k="ref" v="52"/></node></osm>"#;
        match source.load_stops(Some(xml)) {
            Ok(map) => assert_eq!(map.stops().len(), 1),
            Err(e) => panic!("{e}"),
        }
        assert!(source
            .platforms_query()
            .to_string()
            .starts_with("[out:xml][timeout:30][bbox:45,-74,46,-73];"));
    }
}
