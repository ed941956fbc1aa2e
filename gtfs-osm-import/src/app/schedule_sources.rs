use super::AppError;
use crate::{
    cache::read_cache,
    config::ImportConfiguration,
    gtfs::GtfsLoader,
    overpass::{OsmXmlReader, OverpassSource},
};
use clap::Args;
use gtfs_osm::model::{gtfs::FeedSchedule, osm::OsmSchedule};

/// where the feed and map schedules of a run come from. a cache file takes
/// precedence over the raw source of the same schedule.
#[derive(Args, Debug, Clone, Default)]
pub struct ScheduleSources {
    #[arg(long, global = true, help = "directory of the unzipped GTFS feed")]
    pub gtfs_datadir: Option<String>,
    #[arg(long, global = true, help = "GTFS schedule cache written by `cache gtfs`")]
    pub gtfs_cache: Option<String>,
    #[arg(long, global = true, help = "OSM XML document replacing the overpass query")]
    pub osm_xml: Option<String>,
    #[arg(long, global = true, help = "OSM schedule cache written by `cache osm`")]
    pub osm_cache: Option<String>,
}

impl ScheduleSources {
    /// the feed with its routes, trips and stop times. `route_refs` limits
    /// the routes read from the feed directory.
    pub fn load_feed(
        &self,
        conf: &ImportConfiguration,
        route_refs: Option<&[String]>,
    ) -> Result<FeedSchedule, AppError> {
        match (&self.gtfs_cache, &self.gtfs_datadir) {
            (Some(cache), _) => Ok(read_cache(cache)?),
            (None, Some(datadir)) => {
                let loader = GtfsLoader::new(datadir, conf.duplicate_stop_policy)?;
                Ok(loader.load(route_refs, &conf.load_options())?)
            }
            (None, None) => Err(AppError::MissingSource(String::from(
                "GTFS (--gtfs-datadir or --gtfs-cache)",
            ))),
        }
    }

    /// the feed stops alone. a cached feed is read in full.
    pub fn load_feed_stops(&self, conf: &ImportConfiguration) -> Result<FeedSchedule, AppError> {
        match (&self.gtfs_cache, &self.gtfs_datadir) {
            (Some(cache), _) => Ok(read_cache(cache)?),
            (None, Some(datadir)) => {
                let loader = GtfsLoader::new(datadir, conf.duplicate_stop_policy)?;
                Ok(loader.load_stops_only()?)
            }
            (None, None) => Err(AppError::MissingSource(String::from(
                "GTFS (--gtfs-datadir or --gtfs-cache)",
            ))),
        }
    }

    /// map stops, routes and trips around the feed.
    pub fn load_map(
        &self,
        conf: &ImportConfiguration,
        feed: &FeedSchedule,
    ) -> Result<OsmSchedule, AppError> {
        if let Some(cache) = &self.osm_cache {
            return Ok(read_cache(cache)?);
        }
        match &self.osm_xml {
            Some(path) => {
                let xml = std::fs::read_to_string(path)?;
                Ok(OsmXmlReader::new(conf.platform_filters.clone()).read(&xml)?)
            }
            None => Ok(overpass_source(conf, feed)?.load(None)?),
        }
    }

    /// map stops around the feed.
    pub fn load_map_stops(
        &self,
        conf: &ImportConfiguration,
        feed: &FeedSchedule,
    ) -> Result<OsmSchedule, AppError> {
        if let Some(cache) = &self.osm_cache {
            return Ok(read_cache(cache)?);
        }
        match &self.osm_xml {
            Some(path) => {
                let xml = std::fs::read_to_string(path)?;
                Ok(OsmXmlReader::new(conf.platform_filters.clone()).read_stops(&xml)?)
            }
            None => Ok(overpass_source(conf, feed)?.load_stops(None)?),
        }
    }

    /// the raw overpass response for the area of the feed.
    pub fn query_map_document(
        &self,
        conf: &ImportConfiguration,
        feed: &FeedSchedule,
    ) -> Result<String, AppError> {
        let source = overpass_source(conf, feed)?;
        Ok(source.fetch(&source.routes_query())?)
    }
}

/// overpass source covering the feed stops, grown by the configured margin.
pub fn overpass_source(
    conf: &ImportConfiguration,
    feed: &FeedSchedule,
) -> Result<OverpassSource, AppError> {
    let bbox = feed.bounding_box(Some(conf.bbox_margin_meters))?;
    Ok(OverpassSource::new(
        &conf.overpass_endpoint,
        conf.overpass_timeout_seconds,
        bbox,
    )
    .with_platform_filters(conf.platform_filters.clone()))
}

#[cfg(test)]
mod test {
    use super::*;
    use gtfs_osm::model::gtfs::GtfsStop;

    #[test]
    fn test_missing_feed_source() {
        let sources = ScheduleSources::default();
        let result = sources.load_feed(&ImportConfiguration::default(), None);
        assert!(matches!(result, Err(AppError::MissingSource(_))));
    }

    #[test]
    fn test_map_from_xml_document() {
        let path = std::env::temp_dir().join(format!("gtfs-osm-map-{}.osm", std::process::id()));
        let xml = r#"<osm version="0.6">
            <node id="7" lat="45.5" lon="-73.56">
              <tag k="public_transport" v="platform"/><tag k="ref" v="52"/>
            </node>
            </osm>"#;
        if let Err(e) = std::fs::write(&path, xml) {
            panic!("{e}");
        }
        let sources = ScheduleSources {
            osm_xml: Some(path.display().to_string()),
            ..Default::default()
        };
        let mut feed = FeedSchedule::new();
        feed.add_stop(GtfsStop::new("s1", 45.5, -73.56, "Berri", "52"));
        let result = sources.load_map_stops(&ImportConfiguration::default(), &feed);
        let _ = std::fs::remove_file(&path);
        match result {
            Ok(map) => assert_eq!(map.stops().len(), 1),
            Err(e) => panic!("{e}"),
        }
    }

    #[test]
    fn test_overpass_source_bbox() {
        let feed = FeedSchedule::new();
        let result = overpass_source(&ImportConfiguration::default(), &feed);
        assert!(matches!(result, Err(AppError::ScheduleError { .. })));
    }
}
