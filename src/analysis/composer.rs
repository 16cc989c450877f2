use std::ops::Range;
use tracing::{debug, warn};

use super::matcher::TermMatcher;
use crate::types::bias_data::{MatchRecord, Segment};

// Working representation: byte ranges into the original text. A claimed range
// remembers which ranked match owns it and is never searched again.
#[derive(Debug)]
enum Span {
    Plain(Range<usize>),
    Claimed { range: Range<usize>, owner: usize },
}

/// Splits `text` into plain and highlighted segments.
///
/// Matches are applied in the order given (callers pass the scanner's
/// severity ranking), and each one only searches text that no earlier match
/// has claimed. Concatenating the returned segments always reproduces `text`.
pub fn compose(text: &str, ranked_matches: &[MatchRecord]) -> Vec<Segment> {
    let mut spans = vec![Span::Plain(0..text.len())];

    for (owner, record) in ranked_matches.iter().enumerate() {
        let matcher = match TermMatcher::new(&record.entry.term) {
            Ok(matcher) => matcher,
            Err(e) => {
                warn!(term = %record.entry.term, error = %e, "not highlighting match record");
                continue;
            }
        };

        let mut next = Vec::with_capacity(spans.len());
        for span in spans {
            match span {
                Span::Plain(range) => split_plain(text, range, &matcher, owner, &mut next),
                claimed => next.push(claimed),
            }
        }
        spans = next;
    }

    let segments: Vec<Segment> = spans
        .into_iter()
        .map(|span| match span {
            Span::Plain(range) => Segment::plain(&text[range]),
            Span::Claimed { range, owner } => Segment::highlight(&text[range], &ranked_matches[owner]),
        })
        .collect();
    debug!(
        segments = segments.len(),
        highlights = segments.iter().filter(|s| s.is_highlight()).count(),
        "composition complete"
    );
    segments
}

fn split_plain(text: &str, range: Range<usize>, matcher: &TermMatcher, owner: usize, out: &mut Vec<Span>) {
    let hits = matcher.find_in(text, range.clone());
    if hits.is_empty() {
        out.push(Span::Plain(range));
        return;
    }

    let mut cursor = range.start;
    for hit in hits {
        if hit.start > cursor {
            out.push(Span::Plain(cursor..hit.start));
        }
        cursor = hit.end;
        out.push(Span::Claimed { range: hit, owner });
    }
    if cursor < range.end {
        out.push(Span::Plain(cursor..range.end));
    }
}
