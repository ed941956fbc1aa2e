use super::CacheError;
use chrono::{DateTime, Utc};
use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

/// cached value with the time it was written.
#[derive(Debug, Serialize, Deserialize)]
pub struct CacheEnvelope<T> {
    pub created: DateTime<Utc>,
    pub data: T,
}

pub fn write_cache<T: Serialize, P: AsRef<Path>>(data: &T, path: P) -> Result<(), CacheError> {
    let path = path.as_ref();
    let io_error = |source| CacheError::Io {
        path: path.display().to_string(),
        source,
    };
    let file = File::create(path).map_err(io_error)?;
    let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
    let envelope = CacheEnvelope {
        created: Utc::now(),
        data,
    };
    serde_json::to_writer(&mut encoder, &envelope).map_err(|source| CacheError::Json {
        path: path.display().to_string(),
        source,
    })?;
    let mut writer = encoder.finish().map_err(io_error)?;
    writer.flush().map_err(io_error)?;
    log::info!("wrote cache file {}", path.display());
    Ok(())
}

pub fn read_cache<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, CacheError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| CacheError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let decoder = GzDecoder::new(BufReader::new(file));
    let envelope: CacheEnvelope<T> =
        serde_json::from_reader(decoder).map_err(|source| CacheError::Json {
            path: path.display().to_string(),
            source,
        })?;
    log::info!(
        "read cache file {} created {}",
        path.display(),
        envelope.created.format("%Y-%m-%d %H:%M:%S UTC")
    );
    Ok(envelope.data)
}

#[cfg(test)]
mod test {
    use super::*;
    use gtfs_osm::model::{
        gtfs::{FeedSchedule, GtfsRoute, GtfsStop, GtfsTrip},
        schedule::{RouteIdx, StopIdx},
    };

    #[test]
    fn test_schedule_cache() {
        let mut feed = FeedSchedule::new();
        feed.add_stop(GtfsStop::new("s1", 45.5, -73.56, "Berri", "52"));
        feed.add_route(GtfsRoute::new("r1", "24", "Sherbrooke", "Bus 24 : Sherbrooke", None, None));
        let _ = feed.attach_trip(GtfsTrip::new("t1", "r1", "24-E", None));
        let _ = feed.add_stop_time("t1", 1, "s1");

        let path = std::env::temp_dir().join(format!("gtfs-osm-cache-{}.json.gz", std::process::id()));
        if let Err(e) = write_cache(&feed, &path) {
            panic!("{e}");
        }
        let cached: FeedSchedule = match read_cache(&path) {
            Ok(cached) => cached,
            Err(e) => panic!("{e}"),
        };
        let _ = std::fs::remove_file(&path);
        assert_eq!(cached.stop_idx(&String::from("s1")), Some(StopIdx(0)));
        assert_eq!(cached.route(RouteIdx(0)).name, "Bus 24 : Sherbrooke");
        assert_eq!(cached.trips().count(), 1);
    }

    #[test]
    fn test_missing_cache_file() {
        let result: Result<FeedSchedule, CacheError> = read_cache("/nonexistent/cache.json.gz");
        assert!(matches!(result, Err(CacheError::Io { .. })));
    }
}
