/// a stop_times.txt record: a stop served by a trip at a position.
#[derive(Debug, Clone, PartialEq)]
pub struct StopTimeRow {
    pub trip_id: String,
    pub stop_id: String,
    pub sequence: u32,
}
