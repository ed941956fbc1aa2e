/// steps applied while loading a complete feed.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOptions {
    /// drop trips repeating the stop sequence of another trip of their route
    pub unique_trips: bool,
    /// per route and reference code, keep only the trip serving most stops
    pub remove_truncated_trips: bool,
    /// read shapes.txt
    pub include_shapes: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            unique_trips: true,
            remove_truncated_trips: true,
            include_shapes: false,
        }
    }
}
