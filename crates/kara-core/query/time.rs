//! Time-based lookups and placement heuristics for new words

use crate::model::{
    AlignmentDocument, Line, Seconds, Subword, TimeSpan, TimingDefaults, MAX_WORD_DURATION,
    WORD_GAP_EPSILON,
};

/// First line (in document order) whose span contains `time`
#[must_use]
pub fn find_line_by_time(doc: &AlignmentDocument, time: Seconds) -> Option<&Line> {
    doc.lines().iter().find(|line| line.span().contains(time))
}

/// First subword (in document order) starting strictly after `time`
#[must_use]
pub fn find_next_subword_by_time(doc: &AlignmentDocument, time: Seconds) -> Option<&Subword> {
    doc.subwords().find(|s| s.start > time)
}

/// Whether any line covers `time`
///
/// Hosts use this to refuse creating a line on top of an existing one.
#[must_use]
pub fn is_line_at_time(doc: &AlignmentDocument, time: Seconds) -> bool {
    find_line_by_time(doc, time).is_some()
}

/// Span for a new word starting at `time`
///
/// The word runs until just before the next existing subword, capped at
/// [`MAX_WORD_DURATION`]. When the next subword starts less than
/// [`WORD_GAP_EPSILON`] after `time` the returned span is inverted; callers
/// that enforce ranges will reject it.
///
/// # Examples
///
/// ```
/// use kara_core::{get_new_word_time, AlignmentDocument};
///
/// let span = get_new_word_time(&AlignmentDocument::new(), 1.0);
/// assert_eq!(span.start, 1.0);
/// assert!((span.end - 1.2).abs() < 1e-9);
/// ```
#[must_use]
pub fn get_new_word_time(doc: &AlignmentDocument, time: Seconds) -> TimeSpan {
    get_new_word_time_with(doc, time, &TimingDefaults::default())
}

/// [`get_new_word_time`] with explicit heuristics
#[must_use]
pub fn get_new_word_time_with(
    doc: &AlignmentDocument,
    time: Seconds,
    defaults: &TimingDefaults,
) -> TimeSpan {
    let capped = time + defaults.max_word_duration;
    let end = find_next_subword_by_time(doc, time)
        .map_or(capped, |next| (next.start - defaults.gap_epsilon).min(capped));
    TimeSpan::new(time, end)
}

/// Span for a new word placed right after `subword`, with the same duration
#[must_use]
pub fn get_new_word_time_by_subword(subword: &Subword) -> TimeSpan {
    let start = subword.end + WORD_GAP_EPSILON;
    TimeSpan::new(start, start + subword.duration())
}

/// Upper bound used when nothing else limits a new word
#[must_use]
pub const fn default_word_duration() -> Seconds {
    MAX_WORD_DURATION
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::tests::sample_document;

    const EPS: f64 = 1e-9;

    #[test]
    fn line_by_time_is_inclusive() {
        let doc = sample_document();
        assert_eq!(find_line_by_time(&doc, 0.0).map(|l| l.id.as_str()), Some("l1"));
        assert_eq!(find_line_by_time(&doc, 2.0).map(|l| l.id.as_str()), Some("l1"));
        assert_eq!(find_line_by_time(&doc, 3.0).map(|l| l.id.as_str()), Some("l2"));
        assert!(find_line_by_time(&doc, 2.2).is_none());
        assert!(!is_line_at_time(&doc, 10.0));
        assert!(is_line_at_time(&doc, 1.5));
    }

    #[test]
    fn next_subword_is_strictly_after() {
        let doc = sample_document();
        assert_eq!(find_next_subword_by_time(&doc, 0.0).map(|s| s.id.as_str()), Some("s2"));
        assert_eq!(find_next_subword_by_time(&doc, 1.0).map(|s| s.id.as_str()), Some("s3"));
        assert!(find_next_subword_by_time(&doc, 2.5).is_none());
    }

    #[test]
    fn new_word_time_capped_by_default_duration() {
        let doc = sample_document();
        let span = get_new_word_time(&doc, 5.0);
        assert_eq!(span.start, 5.0);
        assert!((span.end - 5.2).abs() < EPS);
    }

    #[test]
    fn new_word_time_stops_before_next_subword() {
        let doc = sample_document();
        // s3 starts at 2.5
        let span = get_new_word_time(&doc, 2.4);
        assert!((span.end - 2.49).abs() < EPS);
    }

    #[test]
    fn new_word_time_by_subword_keeps_duration() {
        let doc = sample_document();
        let s1 = doc.subwords().next().unwrap();
        let span = get_new_word_time_by_subword(s1);
        assert!((span.start - 1.01).abs() < EPS);
        assert!((span.duration() - s1.duration()).abs() < EPS);
    }

    #[test]
    fn custom_defaults_apply() {
        let defaults = TimingDefaults {
            max_word_duration: 1.0,
            gap_epsilon: 0.1,
        };
        let span = get_new_word_time_with(&AlignmentDocument::new(), 0.0, &defaults);
        assert_eq!(span.end, 1.0);
        assert_eq!(default_word_duration(), MAX_WORD_DURATION);
    }
}
