//*** START FILE: src/analysis/mod.rs ***//
pub mod composer;
pub mod matcher;
pub mod ranking;
pub mod scanner;

// Entry points used by the session, the report and the viewer
pub use composer::compose;
pub use matcher::TermMatcher;
pub use ranking::{rank_by_severity, SeveritySummary};
pub use scanner::{count_occurrences, scan, scan_with_report, RejectedEntry, ScanReport};
//*** END FILE: src/analysis/mod.rs ***//
