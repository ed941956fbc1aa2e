use super::ConflationError;
use crate::model::{gtfs::GtfsRoute, osm::OsmRoute, schedule::RouteIdx};
use std::collections::VecDeque;

/// a map route offered as a possible match for a feed route.
#[derive(Debug, Clone, Copy)]
pub struct RouteCandidate<'a> {
    pub idx: RouteIdx,
    pub route: &'a OsmRoute,
}

/// decides which candidate map route, if any, corresponds to a feed route
/// when matching by reference code alone found several.
///
/// returning `Ok(None)` means "none of these". returning
/// [`ConflationError::Cancelled`] aborts the whole run.
pub trait RouteResolver {
    fn choose(
        &mut self,
        feed_route: &GtfsRoute,
        candidates: &[RouteCandidate<'_>],
    ) -> Result<Option<RouteIdx>, ConflationError>;
}

/// treats every ambiguous match as not found. used in bulk modes.
pub struct SkipAmbiguous;

impl RouteResolver for SkipAmbiguous {
    fn choose(
        &mut self,
        feed_route: &GtfsRoute,
        candidates: &[RouteCandidate<'_>],
    ) -> Result<Option<RouteIdx>, ConflationError> {
        log::warn!(
            "route {} has {} candidate matches in OSM, skipping",
            feed_route.ref_code,
            candidates.len()
        );
        Ok(None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptedAnswer {
    /// position in the candidate list
    Pick(usize),
    NoneOfThese,
    Cancel,
}

/// answers from a fixed queue, in order. an exhausted queue answers
/// "none of these".
#[derive(Debug, Clone, Default)]
pub struct ScriptedResolver {
    answers: VecDeque<ScriptedAnswer>,
}

impl ScriptedResolver {
    pub fn new(answers: impl IntoIterator<Item = ScriptedAnswer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
        }
    }
}

impl RouteResolver for ScriptedResolver {
    fn choose(
        &mut self,
        _feed_route: &GtfsRoute,
        candidates: &[RouteCandidate<'_>],
    ) -> Result<Option<RouteIdx>, ConflationError> {
        match self.answers.pop_front() {
            None | Some(ScriptedAnswer::NoneOfThese) => Ok(None),
            Some(ScriptedAnswer::Cancel) => Err(ConflationError::Cancelled),
            Some(ScriptedAnswer::Pick(i)) => candidates
                .get(i)
                .map(|c| Some(c.idx))
                .ok_or_else(|| {
                    ConflationError::ResolverError(format!(
                        "answer {i} is not one of the {} candidates",
                        candidates.len()
                    ))
                }),
        }
    }
}
