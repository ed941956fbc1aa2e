use super::{find_profile, AgencyProfile, FeedError, GtfsRow, LoadOptions, RowError};
use gtfs_osm::model::{gtfs::FeedSchedule, schedule::DuplicateStopPolicy};
use kdam::tqdm;
use std::{
    fs::File,
    path::{Path, PathBuf},
};

const AGENCY_FILE: &str = "agency.txt";
const STOPS_FILE: &str = "stops.txt";
const ROUTES_FILE: &str = "routes.txt";
const TRIPS_FILE: &str = "trips.txt";
const STOP_TIMES_FILE: &str = "stop_times.txt";
const SHAPES_FILE: &str = "shapes.txt";

/// reads an unzipped GTFS feed directory into a [`FeedSchedule`].
#[derive(Debug)]
pub struct GtfsLoader {
    datadir: PathBuf,
    profile: &'static AgencyProfile,
    duplicate_stop_policy: DuplicateStopPolicy,
}

impl GtfsLoader {
    /// selects the agency profile from the first row of agency.txt.
    pub fn new<P: AsRef<Path>>(
        datadir: P,
        duplicate_stop_policy: DuplicateStopPolicy,
    ) -> Result<Self, FeedError> {
        let datadir = datadir.as_ref().to_path_buf();
        let path = datadir.join(AGENCY_FILE);
        let mut rows = reader(&path)?.into_deserialize::<GtfsRow>();
        let row = match rows.next() {
            None => return Err(FeedError::EmptyFile(path.display().to_string())),
            Some(row) => row
                .map_err(|source| FeedError::Csv {
                    path: path.display().to_string(),
                    source,
                })?
                .normalized(),
        };
        let row_error = |source| FeedError::Row {
            file: AGENCY_FILE.to_string(),
            row: 1,
            source,
        };
        let agency_id = row.get("agency_id").map_err(row_error)?;
        let agency_name = row.get("agency_name").map_err(row_error)?;
        let profile = find_profile(agency_id, agency_name).ok_or_else(|| {
            FeedError::UnsupportedAgency {
                id: agency_id.to_string(),
                name: agency_name.to_string(),
            }
        })?;
        log::info!("reading feed of {agency_name} from {}", datadir.display());
        Ok(Self {
            datadir,
            profile,
            duplicate_stop_policy,
        })
    }

    pub fn profile(&self) -> &'static AgencyProfile {
        self.profile
    }

    /// loads stops, then the routes whose id or reference code is listed in
    /// `routes_of_interest` (all routes when None) with their trips and stop
    /// times.
    pub fn load(
        &self,
        routes_of_interest: Option<&[String]>,
        options: &LoadOptions,
    ) -> Result<FeedSchedule, FeedError> {
        let mut schedule = FeedSchedule::new();
        self.load_stops(&mut schedule)?;
        self.load_routes(&mut schedule, routes_of_interest)?;
        self.load_trips(&mut schedule)?;
        self.load_stop_times(&mut schedule)?;
        if options.unique_trips {
            schedule.remove_duplicated_trips();
        }
        if options.remove_truncated_trips {
            schedule.remove_truncated_trips();
        }
        if options.include_shapes {
            self.load_shapes(&mut schedule)?;
        }
        log::info!(
            "loaded {} stops, {} routes and {} trips",
            schedule.stops().len(),
            schedule.route_count(),
            schedule.trips().count()
        );
        Ok(schedule)
    }

    pub fn load_stops_only(&self) -> Result<FeedSchedule, FeedError> {
        let mut schedule = FeedSchedule::new();
        self.load_stops(&mut schedule)?;
        log::info!("loaded {} stops", schedule.stops().len());
        Ok(schedule)
    }

    fn load_stops(&self, schedule: &mut FeedSchedule) -> Result<(), FeedError> {
        self.for_each_row(STOPS_FILE, |row| {
            let stop = (self.profile.make_stop)(row)?;
            schedule.add_stop_deduplicated(stop, self.duplicate_stop_policy);
            Ok(())
        })
    }

    fn load_routes(
        &self,
        schedule: &mut FeedSchedule,
        routes_of_interest: Option<&[String]>,
    ) -> Result<(), FeedError> {
        self.for_each_row(ROUTES_FILE, |row| {
            let route = (self.profile.make_route)(row)?;
            let wanted = routes_of_interest
                .map(|wanted| wanted.iter().any(|r| *r == route.id || *r == route.ref_code))
                .unwrap_or(true);
            if wanted {
                schedule.add_route(route);
            }
            Ok(())
        })
    }

    /// trips of routes that were not loaded are ignored.
    fn load_trips(&self, schedule: &mut FeedSchedule) -> Result<(), FeedError> {
        self.for_each_row(TRIPS_FILE, |row| {
            let trip = (self.profile.make_trip)(row)?;
            let _ = schedule.attach_trip(trip);
            Ok(())
        })
    }

    fn load_stop_times(&self, schedule: &mut FeedSchedule) -> Result<(), FeedError> {
        let mut failure = None;
        self.for_each_row(STOP_TIMES_FILE, |row| {
            if failure.is_some() {
                return Ok(());
            }
            let stop_time = (self.profile.make_stop_time)(row)?;
            if let Err(e) =
                schedule.add_stop_time(&stop_time.trip_id, stop_time.sequence, &stop_time.stop_id)
            {
                failure = Some(e);
            }
            Ok(())
        })?;
        match failure {
            Some(e) => Err(FeedError::Schedule(e)),
            None => Ok(()),
        }
    }

    fn load_shapes(&self, schedule: &mut FeedSchedule) -> Result<(), FeedError> {
        self.for_each_row(SHAPES_FILE, |row| {
            schedule.add_shape_point(
                row.get("shape_id")?,
                row.parse("shape_pt_lat")?,
                row.parse("shape_pt_lon")?,
                row.parse("shape_pt_sequence")?,
            );
            Ok(())
        })
    }

    /// applies `op` to every row of a feed file. rows the profile skips are
    /// logged, any other row error stops the load.
    fn for_each_row<F>(&self, file: &str, mut op: F) -> Result<(), FeedError>
    where
        F: FnMut(&GtfsRow) -> Result<(), RowError>,
    {
        let path = self.datadir.join(file);
        let rows = reader(&path)?.into_deserialize::<GtfsRow>().enumerate();
        for (row_idx, row) in tqdm!(rows, desc = file) {
            let row = row
                .map_err(|source| FeedError::Csv {
                    path: path.display().to_string(),
                    source,
                })?
                .normalized();
            match op(&row) {
                Ok(()) => {}
                Err(RowError::Skip(reason)) => {
                    log::debug!("{file}, row {}: {reason}", row_idx + 1)
                }
                Err(source) => {
                    return Err(FeedError::Row {
                        file: file.to_string(),
                        row: row_idx + 1,
                        source,
                    })
                }
            }
        }
        eprintln!();
        Ok(())
    }
}

fn reader(path: &Path) -> Result<csv::Reader<File>, FeedError> {
    let file = File::open(path).map_err(|source| FeedError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(csv::ReaderBuilder::new().flexible(true).from_reader(file))
}
