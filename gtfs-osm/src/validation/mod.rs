mod issue;
mod issue_kind;
mod issue_list;

pub use issue::Issue;
pub use issue_kind::IssueKind;
pub use issue_list::IssueList;
