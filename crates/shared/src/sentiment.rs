//! Maps a raw classifier label to the presentation category that picks the
//! result icon. The label itself is always shown unmodified.

/// Keyword tables are checked in order; positive wins a tie. Both sets are
/// part of the output contract and must not be reordered or extended.
const POSITIVE_MARKERS: [&str; 3] = ["joy", "love", "happy"];
const NEGATIVE_MARKERS: [&str; 3] = ["anger", "hate", "sad"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentCategory {
    Positive,
    Negative,
    Neutral,
}

impl SentimentCategory {
    pub fn icon(self) -> &'static str {
        match self {
            SentimentCategory::Positive => "\u{1F60D}",
            SentimentCategory::Negative => "\u{1F621}",
            SentimentCategory::Neutral => "\u{1F610}",
        }
    }
}

/// Case-insensitive substring match, first table that hits wins.
pub fn categorize(label: &str) -> SentimentCategory {
    let label = label.to_lowercase();
    if POSITIVE_MARKERS.iter().any(|marker| label.contains(marker)) {
        SentimentCategory::Positive
    } else if NEGATIVE_MARKERS.iter().any(|marker| label.contains(marker)) {
        SentimentCategory::Negative
    } else {
        SentimentCategory::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_positive_markers_case_insensitively() {
        assert_eq!(categorize("joy"), SentimentCategory::Positive);
        assert_eq!(categorize("LOVE"), SentimentCategory::Positive);
        assert_eq!(categorize("so Happy today"), SentimentCategory::Positive);
    }

    #[test]
    fn matches_negative_markers() {
        assert_eq!(categorize("anger"), SentimentCategory::Negative);
        assert_eq!(categorize("I hated the delay"), SentimentCategory::Negative);
        assert_eq!(categorize("sadness"), SentimentCategory::Negative);
    }

    #[test]
    fn positive_wins_when_both_tables_match() {
        assert_eq!(
            categorize("I feel Joy and Hate"),
            SentimentCategory::Positive
        );
    }

    #[test]
    fn unmatched_labels_are_neutral() {
        assert_eq!(categorize("it was fine"), SentimentCategory::Neutral);
        assert_eq!(categorize(""), SentimentCategory::Neutral);
    }

    #[test]
    fn repeated_calls_are_stable() {
        let first = categorize("surprise");
        assert_eq!(categorize("surprise"), first);
    }
}
