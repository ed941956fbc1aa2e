use super::{ExportError, JosmDocument};
use crate::model::schedule::RouteIdx;

/// edit document holding the modified routes of a map schedule.
#[derive(Debug)]
pub struct RouteExport {
    pub document: JosmDocument,
    /// routes written to the document, in schedule order
    pub routes: Vec<RouteIdx>,
    /// trips that could not be written. their route is still exported
    pub failures: Vec<ExportError>,
}
