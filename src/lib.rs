//*** START FILE: src/lib.rs ***//

// Declare all modules that are part of this library
pub mod config;
pub mod error;
pub mod types {
    pub mod bias_data;
}
pub mod parsing {
    pub mod dictionary_parser;
}
pub mod analysis;
pub mod cli;
pub mod report;
pub mod session;

// Re-exports for the binary and the integration tests
pub use analysis::{compose, scan, scan_with_report, SeveritySummary};
pub use error::DecoderError;
pub use session::{AnalysisSession, ViewState};
pub use types::bias_data::{concat_text, DictionaryEntry, MatchRecord, Segment, Severity};

//*** END FILE: src/lib.rs ***//
