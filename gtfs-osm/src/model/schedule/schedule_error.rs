use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("schedule does not contain any stops")]
    EmptySchedule,
    #[error("trip '{trip}' references stop '{stop}' not in schedule")]
    UnknownStop { trip: String, stop: String },
    #[error("attempting to get trip '{0}' not in schedule")]
    UnknownTrip(String),
    #[error("{0}")]
    InternalError(String),
}
