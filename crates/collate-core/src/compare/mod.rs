pub mod engine;
pub mod outcome;

pub use engine::compare_documents;
pub use outcome::{
    ComparisonReport, Difference, DocSide, ExpectedStatus, ExpectedTableCheck, MatchEntry,
    Severity, Stats, Summary, TableOutcome, TableStatus, Verdict,
};
