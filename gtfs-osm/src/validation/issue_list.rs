use super::{Issue, IssueKind};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// issues gathered during a run, reported as one table per kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueList(Vec<Issue>);

impl IssueList {
    pub fn push(&mut self, issue: Issue) {
        self.0.push(issue);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.0.iter()
    }

    pub fn of_kind(&self, kind: IssueKind) -> Vec<&Issue> {
        self.0.iter().filter(|i| i.kind() == kind).collect()
    }

    /// text report. kinds appear in the order they were first seen; each
    /// cell is centered in its column and truncated to fit.
    pub fn report(&self) -> String {
        let kinds = self.0.iter().map(Issue::kind).unique().collect_vec();
        let mut out = String::new();
        for kind in kinds {
            let issues = self.of_kind(kind);
            let columns = kind.columns();
            out.push_str(&format!("{} ({})\n", kind.description(), issues.len()));
            let header = columns
                .iter()
                .map(|(name, width)| cell(name, *width))
                .join("|");
            out.push_str(&header);
            out.push('\n');
            let total_width: usize =
                columns.iter().map(|(_, w)| *w).sum::<usize>() + columns.len().saturating_sub(1);
            out.push_str(&"-".repeat(total_width));
            out.push('\n');
            for issue in issues {
                let row = issue
                    .cells()
                    .iter()
                    .zip(columns.iter())
                    .map(|(value, (_, width))| cell(value, *width))
                    .join("|");
                out.push_str(&row);
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }
}

impl Extend<Issue> for IssueList {
    fn extend<I: IntoIterator<Item = Issue>>(&mut self, iter: I) {
        self.0.extend(iter)
    }
}

impl FromIterator<Issue> for IssueList {
    fn from_iter<I: IntoIterator<Item = Issue>>(iter: I) -> Self {
        IssueList(iter.into_iter().collect())
    }
}

fn cell(value: &str, width: usize) -> String {
    let precision = width.saturating_sub(2);
    format!("{value:^width$.precision$}")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_report_groups_by_kind() {
        let issues: IssueList = vec![
            Issue::OsmStopWithUnknownRef {
                osm_id: String::from("123"),
                stop_ref: String::from("A"),
            },
            Issue::NodesTooFar {
                osm_id: String::from("124"),
                gtfs_id: String::from("s1"),
                stop_ref: String::from("B"),
                distance_meters: 75.31,
            },
            Issue::OsmStopWithUnknownRef {
                osm_id: String::from("125"),
                stop_ref: String::from("C"),
            },
        ]
        .into_iter()
        .collect();
        let report = issues.report();
        let lines = report.lines().collect_vec();
        assert_eq!(
            lines[0],
            "OSM stops with a ref unknown to the GTFS feed (2)"
        );
        assert_eq!(lines[1], "    osm id    |   ref    ");
        assert_eq!(lines[2], "-".repeat(25));
        assert_eq!(lines[3], "     123      |    A     ");
        assert!(lines.contains(&"OSM stops too far from their GTFS stop (1)"));
        assert!(report.contains("75.3"), "distance should be printed: {report}");
    }

    #[test]
    fn test_cell_truncates() {
        assert_eq!(cell("abcdefghij", 6), " abcd ".to_string());
    }
}
