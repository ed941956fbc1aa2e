use gtfs_osm::{
    conflation::{ConflationError, RouteCandidate, RouteResolver},
    model::{gtfs::GtfsRoute, schedule::RouteIdx},
};
use std::io::{BufRead, Write};

/// asks on a console which candidate map route a feed route corresponds to.
///
/// answers are a candidate number, `n` for none of them, or `q` to stop the
/// run. the end of the input also stops the run.
pub struct ConsoleResolver<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleResolver<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn prompt(
        &mut self,
        feed_route: &GtfsRoute,
        candidates: &[RouteCandidate<'_>],
    ) -> std::io::Result<()> {
        writeln!(
            self.output,
            "route {} ({}) matches several OSM routes:",
            feed_route.ref_code, feed_route.name
        )?;
        for (i, candidate) in candidates.iter().enumerate() {
            writeln!(self.output, "  {}) {}", i + 1, candidate.route.label())?;
        }
        write!(self.output, "which one [1-{}, n = none, q = quit]? ", candidates.len())?;
        self.output.flush()
    }
}

impl<R: BufRead, W: Write> RouteResolver for ConsoleResolver<R, W> {
    fn choose(
        &mut self,
        feed_route: &GtfsRoute,
        candidates: &[RouteCandidate<'_>],
    ) -> Result<Option<RouteIdx>, ConflationError> {
        let io_error = |e: std::io::Error| ConflationError::ResolverError(e.to_string());
        loop {
            self.prompt(feed_route, candidates).map_err(io_error)?;
            let mut line = String::new();
            if self.input.read_line(&mut line).map_err(io_error)? == 0 {
                return Err(ConflationError::Cancelled);
            }
            match line.trim() {
                "q" | "Q" => return Err(ConflationError::Cancelled),
                "n" | "N" => return Ok(None),
                answer => match answer.parse::<usize>() {
                    Ok(n) if n >= 1 && n <= candidates.len() => {
                        return Ok(Some(candidates[n - 1].idx))
                    }
                    _ => {
                        writeln!(self.output, "'{answer}' is not a valid answer")
                            .map_err(io_error)?;
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use gtfs_osm::model::osm::{OsmAttributes, OsmElement, OsmId, OsmRoute, OsmTags};

    fn routes() -> (GtfsRoute, Vec<OsmRoute>) {
        let feed_route = GtfsRoute::new("r12", "12", "", "Bus 12", Some("N"), Some("X"));
        let map_routes = [(1, "M"), (2, "P")]
            .into_iter()
            .map(|(id, network)| {
                OsmRoute::new(OsmElement::existing(
                    OsmId(id),
                    OsmTags::from_iter([("ref", "12"), ("network", network)]),
                    OsmAttributes::default(),
                ))
            })
            .collect();
        (feed_route, map_routes)
    }

    fn choose(input: &str) -> (Result<Option<RouteIdx>, ConflationError>, String) {
        let (feed_route, map_routes) = routes();
        let candidates = map_routes
            .iter()
            .enumerate()
            .map(|(i, route)| RouteCandidate {
                idx: RouteIdx(i + 5),
                route,
            })
            .collect::<Vec<_>>();
        let mut output = vec![];
        let result = ConsoleResolver::new(input.as_bytes(), &mut output).choose(&feed_route, &candidates);
        (result, String::from_utf8_lossy(&output).to_string())
    }

    #[test]
    fn test_pick_candidate() {
        let (result, output) = choose("2\n");
        match result {
            Ok(choice) => assert_eq!(choice, Some(RouteIdx(6))),
            Err(e) => panic!("{e}"),
        }
        assert!(output.contains("1) <unnamed> [ref=12 network=M"));
        assert!(output.contains("network=P"));
    }

    #[test]
    fn test_invalid_answer_then_none() {
        let (result, output) = choose("7\nabc\nn\n");
        match result {
            Ok(choice) => assert_eq!(choice, None),
            Err(e) => panic!("{e}"),
        }
        assert!(output.contains("'7' is not a valid answer"));
        assert!(output.contains("'abc' is not a valid answer"));
    }

    #[test]
    fn test_cancel() {
        assert!(matches!(choose("q\n").0, Err(ConflationError::Cancelled)));
        assert!(matches!(choose("").0, Err(ConflationError::Cancelled)));
    }
}
